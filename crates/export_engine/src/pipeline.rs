use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use export_core::{Domain, DomainCounts, RunSummary, SiteConfig};
use export_logging::{export_debug, export_error, export_info, export_warn};

use crate::convert::{ConverterConfig, RuleBasedConverter};
use crate::manifest::{Manifest, DEFAULT_MANIFEST_FILENAME};
use crate::pages::builtin_pages;
use crate::persist::{ensure_output_dir, AtomicFileWriter, PersistError};
use crate::sources::{load_articles, load_sentiment, load_static_pages, SourceError};
use crate::synth::{
    synthesize_article, synthesize_daily, synthesize_monthly, synthesize_page, SynthContext,
    Synthesized,
};

pub const DEFAULT_ARTICLES_PATH: &str = "src/data/ghost-posts.json";
pub const DEFAULT_SENTIMENT_PATH: &str = "functions/sentiment-cache.json";
pub const DEFAULT_OUTPUT_DIR: &str = "dist/markdown";

pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Clone)]
pub struct ExportConfig {
    pub articles_path: PathBuf,
    pub sentiment_path: PathBuf,
    /// When unset, the built-in page table is used.
    pub pages_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub site: SiteConfig,
    pub converter: ConverterConfig,
    pub manifest_filename: Option<String>,
    pub today: Clock,
}

impl ExportConfig {
    /// Default source and output locations below a project root.
    pub fn for_project_root(root: &Path) -> Self {
        Self {
            articles_path: root.join(DEFAULT_ARTICLES_PATH),
            sentiment_path: root.join(DEFAULT_SENTIMENT_PATH),
            pages_path: None,
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            site: SiteConfig::default(),
            converter: ConverterConfig::default(),
            manifest_filename: Some(DEFAULT_MANIFEST_FILENAME.to_string()),
            today: Arc::new(|| Utc::now().date_naive()),
        }
    }

    pub fn with_fixed_date(mut self, date: NaiveDate) -> Self {
        self.today = Arc::new(move || date);
        self
    }
}

impl fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field("articles_path", &self.articles_path)
            .field("sentiment_path", &self.sentiment_path)
            .field("pages_path", &self.pages_path)
            .field("output_dir", &self.output_dir)
            .field("site", &self.site)
            .field("converter", &self.converter)
            .field("manifest_filename", &self.manifest_filename)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("cannot prepare output directory {path:?}: {source}")]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Runs the three export domains in a fixed order.
pub struct ExportPipeline {
    config: ExportConfig,
    converter: RuleBasedConverter,
}

impl ExportPipeline {
    pub fn new(config: ExportConfig) -> Self {
        let converter = RuleBasedConverter::new(config.converter.clone());
        Self { config, converter }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let output_dir = &self.config.output_dir;
        export_info!("Generating markdown pages into {:?}", output_dir);
        ensure_output_dir(output_dir).map_err(|source| PipelineError::OutputRoot {
            path: output_dir.clone(),
            source,
        })?;

        let ctx = SynthContext {
            site: &self.config.site,
            converter: &self.converter,
            today: (self.config.today)(),
        };
        let mut session = WriteSession::new(AtomicFileWriter::new(output_dir.clone()));
        let mut summary = RunSummary::default();

        export_info!("1. Generating research post markdown...");
        let articles = load_articles(&self.config.articles_path)?.into_inner_or_default();
        let counts: DomainCounts = articles
            .posts
            .iter()
            .map(|article| {
                session.emit(
                    Domain::Articles,
                    &article.slug,
                    synthesize_article(article, &ctx),
                )
            })
            .sum();
        summary.record(Domain::Articles, counts);
        export_info!(
            "   Generated {} research posts ({} skipped)",
            counts.generated,
            counts.skipped
        );

        export_info!("2. Generating static page markdown...");
        let pages = match &self.config.pages_path {
            Some(path) => load_static_pages(path)?.into_inner_or_default(),
            None => builtin_pages(),
        };
        let counts: DomainCounts = pages
            .iter()
            .map(|page| session.emit(Domain::Pages, &page.route_path, synthesize_page(page, &ctx)))
            .sum();
        summary.record(Domain::Pages, counts);
        export_info!("   Generated {} static pages", counts.generated);

        export_info!("3. Generating sentiment page markdown...");
        let cache = load_sentiment(&self.config.sentiment_path)?.into_inner_or_default();
        let daily: DomainCounts = cache
            .daily
            .iter()
            .map(|(period, record)| {
                session.emit(
                    Domain::DailySentiment,
                    period,
                    synthesize_daily(period, record, &ctx),
                )
            })
            .sum();
        let monthly: DomainCounts = cache
            .monthly
            .iter()
            .map(|(period, record)| {
                session.emit(
                    Domain::MonthlySentiment,
                    period,
                    synthesize_monthly(period, record, &ctx),
                )
            })
            .sum();
        summary.record(Domain::DailySentiment, daily);
        summary.record(Domain::MonthlySentiment, monthly);
        export_info!(
            "   Generated {} daily + {} monthly sentiment pages",
            daily.generated,
            monthly.generated
        );

        if let Some(filename) = &self.config.manifest_filename {
            match session.manifest.write(&session.writer, filename) {
                Ok(path) => export_debug!("Wrote manifest {:?}", path),
                Err(err) => export_error!("Failed to write manifest {}: {}", filename, err),
            }
        }

        export_info!(
            "Total: {} markdown files generated in {:?}",
            summary.total().generated,
            output_dir
        );
        Ok(summary)
    }
}

/// Per-run write state: the writer, paths already claimed and the manifest.
struct WriteSession {
    writer: AtomicFileWriter,
    claimed: HashSet<PathBuf>,
    manifest: Manifest,
}

impl WriteSession {
    fn new(writer: AtomicFileWriter) -> Self {
        Self {
            writer,
            claimed: HashSet::new(),
            manifest: Manifest::default(),
        }
    }

    fn emit(&mut self, domain: Domain, label: &str, outcome: Synthesized) -> DomainCounts {
        let generated = match outcome {
            Synthesized::Emit(generated) => generated,
            Synthesized::Skip(reason) => {
                export_info!("Skipping {} {:?}: {}", domain, label, reason);
                return DomainCounts::skipped();
            }
        };

        let relative = generated.key.relative_path();
        if !self.claimed.insert(relative.clone()) {
            export_warn!(
                "{} {:?} resolves to {:?}, which this run already wrote; skipping",
                domain,
                generated.key.label(),
                relative
            );
            return DomainCounts::skipped();
        }

        let content = generated.document.render();
        match self.writer.write(&relative, &content) {
            Ok(path) => {
                export_debug!("Wrote {:?}", path);
                self.manifest.record(domain, &relative, &generated, &content);
                DomainCounts::generated()
            }
            Err(err) => {
                export_warn!("Failed to write {:?} for {}: {}", relative, label, err);
                DomainCounts::failed()
            }
        }
    }
}
