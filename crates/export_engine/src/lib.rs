//! Export engine: source loading, HTML conversion, document synthesis and writing.
mod convert;
mod decode;
mod manifest;
mod pages;
mod persist;
mod pipeline;
mod sources;
mod synth;

pub use convert::{
    default_rules, ConvertError, Converter, ConverterConfig, Rule, RuleBasedConverter,
    RuleMatcher, RuleOutcome, RuleReplacement,
};
pub use decode::{decode_source, DecodeError, DecodedSource};
pub use manifest::{Manifest, ManifestEntry, ManifestError, DEFAULT_MANIFEST_FILENAME};
pub use pages::builtin_pages;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{
    Clock, ExportConfig, ExportPipeline, PipelineError, DEFAULT_ARTICLES_PATH,
    DEFAULT_OUTPUT_DIR, DEFAULT_SENTIMENT_PATH,
};
pub use sources::{load_articles, load_sentiment, load_static_pages, Loaded, SourceError};
pub use synth::{
    synthesize_article, synthesize_daily, synthesize_monthly, synthesize_page, Generated,
    SkipReason, SynthContext, Synthesized,
};
