use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use export_core::{ArticleExport, SentimentCache, StaticPageDescriptor};
use export_logging::{export_info, export_warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::decode::{decode_source, DecodeError};

/// Outcome of an optional source load. A missing file is an expected case,
/// not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Present(T),
    Absent,
}

impl<T> Loaded<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Loaded::Present(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Loaded::Present(value) => Some(value),
            Loaded::Absent => None,
        }
    }
}

impl<T: Default> Loaded<T> {
    /// The loaded value, or the empty collection for an absent file.
    pub fn into_inner_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error("malformed {kind} source {path:?}: {source}")]
    Malformed {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads the CMS article export (`{ "posts": [...] }`).
pub fn load_articles(path: &Path) -> Result<Loaded<ArticleExport>, SourceError> {
    let loaded = load_json::<ArticleExport>(path, "article")?;
    if let Loaded::Present(export) = &loaded {
        export_info!("Loaded {} articles from {:?}", export.posts.len(), path);
    }
    Ok(loaded)
}

/// Loads the sentiment cache (`{ "daily": {...}, "monthly": {...} }`).
pub fn load_sentiment(path: &Path) -> Result<Loaded<SentimentCache>, SourceError> {
    let loaded = load_json::<SentimentCache>(path, "sentiment")?;
    if let Loaded::Present(cache) = &loaded {
        export_info!(
            "Loaded {} daily and {} monthly sentiment records from {:?}",
            cache.daily.len(),
            cache.monthly.len(),
            path
        );
    }
    Ok(loaded)
}

#[derive(Debug, Deserialize)]
struct PageSeo {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

/// Loads a static page table (`{ "/route": { "title": .., "description": .. } }`).
/// Entries come back ordered by route.
pub fn load_static_pages(path: &Path) -> Result<Loaded<Vec<StaticPageDescriptor>>, SourceError> {
    let loaded = load_json::<BTreeMap<String, PageSeo>>(path, "static page")?;
    Ok(match loaded {
        Loaded::Present(table) => {
            export_info!("Loaded {} static pages from {:?}", table.len(), path);
            Loaded::Present(
                table
                    .into_iter()
                    .map(|(route, seo)| StaticPageDescriptor::new(route, seo.title, seo.description))
                    .collect(),
            )
        }
        Loaded::Absent => Loaded::Absent,
    })
}

fn load_json<T: DeserializeOwned>(path: &Path, kind: &'static str) -> Result<Loaded<T>, SourceError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            export_warn!("{} source {:?} not found, using an empty collection", kind, path);
            return Ok(Loaded::Absent);
        }
        Err(source) => {
            return Err(SourceError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let decoded = decode_source(&bytes).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&decoded.text)
        .map(Loaded::Present)
        .map_err(|source| SourceError::Malformed {
            kind,
            path: path.to_path_buf(),
            source,
        })
}
