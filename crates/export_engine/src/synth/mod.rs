//! Per-domain document synthesis: one source record in, at most one
//! markdown document out.
mod article;
mod page;
mod sentiment;

use std::fmt;

use chrono::NaiveDate;
use export_core::{DocumentKey, MarkdownDocument, SiteConfig};

use crate::convert::Converter;

pub use article::synthesize_article;
pub use page::synthesize_page;
pub use sentiment::{synthesize_daily, synthesize_monthly};

/// Everything a synthesizer needs besides the record itself.
#[derive(Clone, Copy)]
pub struct SynthContext<'a> {
    pub site: &'a SiteConfig,
    pub converter: &'a dyn Converter,
    /// Date used wherever a document has no date of its own.
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub key: DocumentKey,
    pub title: String,
    pub url: String,
    pub document: MarkdownDocument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MembersOnly,
    EmptyHtml,
    MissingSlug,
    InvalidPeriod(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MembersOnly => write!(f, "members-only content"),
            SkipReason::EmptyHtml => write!(f, "no html body"),
            SkipReason::MissingSlug => write!(f, "missing slug"),
            SkipReason::InvalidPeriod(period) => write!(f, "invalid period key {period:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesized {
    Emit(Generated),
    Skip(SkipReason),
}

impl Synthesized {
    pub fn generated(self) -> Option<Generated> {
        match self {
            Synthesized::Emit(generated) => Some(generated),
            Synthesized::Skip(_) => None,
        }
    }
}
