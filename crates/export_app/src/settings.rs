use std::fs;
use std::path::{Path, PathBuf};

use export_core::SiteConfig;
use export_engine::{ExportConfig, DEFAULT_MANIFEST_FILENAME};
use export_logging::{export_info, export_warn, LogDestination};
use serde::Deserialize;

pub(crate) const SETTINGS_FILENAME: &str = "markdown_export.ron";

/// Optional overrides read from `markdown_export.ron` in the project root.
/// Relative paths are resolved against that root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub output_dir: Option<PathBuf>,
    pub articles_path: Option<PathBuf>,
    pub sentiment_path: Option<PathBuf>,
    pub pages_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub write_manifest: bool,
    pub log_output: LogOutput,
}

/// Where log records go; `File` writes only `markdown_export.log`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub(crate) enum LogOutput {
    #[default]
    Terminal,
    File,
    Both,
}

impl From<LogOutput> for LogDestination {
    fn from(output: LogOutput) -> Self {
        match output {
            LogOutput::Terminal => LogDestination::Terminal,
            LogOutput::File => LogDestination::File,
            LogOutput::Both => LogDestination::Both,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: None,
            articles_path: None,
            sentiment_path: None,
            pages_path: None,
            base_url: None,
            write_manifest: true,
            log_output: LogOutput::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Missing file means defaults; anything else unreadable is reported so the
/// caller can warn once logging is up.
pub(crate) fn load_settings(root: &Path) -> Result<Settings, SettingsError> {
    let path = root.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Settings::default());
        }
        Err(source) => return Err(SettingsError::Read { path, source }),
    };
    ron::from_str(&content).map_err(|source| SettingsError::Parse { path, source })
}

impl Settings {
    pub(crate) fn log_destination(&self) -> LogDestination {
        self.log_output.into()
    }

    pub(crate) fn apply(&self, mut config: ExportConfig, root: &Path) -> ExportConfig {
        let resolve = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                root.join(p)
            }
        };

        if let Some(dir) = &self.output_dir {
            config.output_dir = resolve(dir);
        }
        if let Some(path) = &self.articles_path {
            config.articles_path = resolve(path);
        }
        if let Some(path) = &self.sentiment_path {
            config.sentiment_path = resolve(path);
        }
        if let Some(path) = &self.pages_path {
            config.pages_path = Some(resolve(path));
        }
        if let Some(base_url) = &self.base_url {
            match SiteConfig::new(base_url) {
                Ok(site) => {
                    export_info!("Using base URL {}", site.origin());
                    config.site = site;
                }
                Err(err) => {
                    export_warn!(
                        "Ignoring base_url {:?} from {}: {}",
                        base_url,
                        SETTINGS_FILENAME,
                        err
                    );
                }
            }
        }
        config.manifest_filename = self
            .write_manifest
            .then(|| DEFAULT_MANIFEST_FILENAME.to_string());
        config
    }
}
