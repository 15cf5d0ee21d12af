use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use export_core::{DocumentKey, EditorialArticle, Frontmatter, MarkdownDocument};
use export_logging::export_warn;

use super::{Generated, SkipReason, SynthContext, Synthesized};

const UNTITLED: &str = "Untitled";

/// Builds the research document for one CMS article, or says why it is skipped.
pub fn synthesize_article(article: &EditorialArticle, ctx: &SynthContext<'_>) -> Synthesized {
    if article.is_members_only() {
        return Synthesized::Skip(SkipReason::MembersOnly);
    }
    if article.has_blank_html() {
        return Synthesized::Skip(SkipReason::EmptyHtml);
    }
    let slug = article.slug.trim();
    if slug.is_empty() {
        return Synthesized::Skip(SkipReason::MissingSlug);
    }

    let title = article
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED);
    let date = article_date(article, ctx.today);
    let author = article
        .primary_author
        .as_ref()
        .map(|a| a.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(ctx.site.platform_name.as_str());
    let url = ctx.site.article_url(slug);

    let content = convert_body(article, slug, ctx);

    let frontmatter = Frontmatter::new()
        .quoted("title", title)
        .plain("date", date.format("%Y-%m-%d"))
        .plain("author", author)
        .list("tags", article.public_tag_names())
        .plain("url", &url)
        .quoted_opt("description", article.description())
        .plain_opt("image", article.feature_image.as_deref());

    let body = format!("# {title}\n\n{content}");
    Synthesized::Emit(Generated {
        key: DocumentKey::Article {
            slug: slug.to_string(),
        },
        title: title.to_string(),
        url,
        document: MarkdownDocument::new(frontmatter, body),
    })
}

fn convert_body(article: &EditorialArticle, slug: &str, ctx: &SynthContext<'_>) -> String {
    let html = article.html.as_deref().unwrap_or("");
    match ctx.converter.to_markdown(html) {
        Ok(markdown) => markdown,
        Err(err) => {
            export_warn!("Failed to convert HTML for {}: {}", slug, err);
            article.excerpt.clone().unwrap_or_default()
        }
    }
}

/// UTC calendar date of `published_at`, or `today` when absent or unreadable.
fn article_date(article: &EditorialArticle, today: NaiveDate) -> NaiveDate {
    let Some(raw) = article.published_at.as_deref().map(str::trim) else {
        return today;
    };
    if raw.is_empty() {
        return today;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc).date_naive();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.date();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed;
    }
    export_warn!(
        "Unreadable published_at {:?} for {}, using {}",
        raw,
        article.slug,
        today
    );
    today
}
