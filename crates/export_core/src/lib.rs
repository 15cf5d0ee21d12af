//! Export core: pure data model, frontmatter rendering and path resolution.
mod frontmatter;
mod model;
mod paths;
mod sentiment;
mod site;
mod summary;

pub use frontmatter::{Frontmatter, FrontmatterValue, MarkdownDocument};
pub use model::{
    ArticleExport, Author, DailySentiment, EditorialArticle, MonthlySentiment, SentimentCache,
    StaticPageDescriptor, Tag, Visibility,
};
pub use paths::{slugify_path, DocumentKey};
pub use sentiment::{
    category_label, format_thousands, month_name, parse_daily_period, parse_monthly_period,
    round_score, InterpretationBand,
};
pub use site::SiteConfig;
pub use summary::{Domain, DomainCounts, RunSummary};
