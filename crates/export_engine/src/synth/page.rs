use export_core::{DocumentKey, Frontmatter, MarkdownDocument, StaticPageDescriptor};

use super::{Generated, SynthContext, Synthesized};

const TITLE_SEPARATOR: &str = " | ";

/// Static pages are always emitted.
pub fn synthesize_page(page: &StaticPageDescriptor, ctx: &SynthContext<'_>) -> Synthesized {
    let title = if page.title.is_empty() {
        ctx.site.platform_name.as_str()
    } else {
        page.title.as_str()
    };
    let url = ctx.site.url_for(&page.route_path);
    let heading = title.split(TITLE_SEPARATOR).next().unwrap_or(title);

    let frontmatter = Frontmatter::new()
        .quoted("title", title)
        .plain("date", ctx.today.format("%Y-%m-%d"))
        .plain("url", &url)
        .quoted("description", page.description.as_str());

    let body = format!(
        "# {heading}\n\n{description}\n\nVisit the full page at: [{url}]({url})",
        description = page.description
    );

    Synthesized::Emit(Generated {
        key: DocumentKey::Page {
            route: page.route_path.clone(),
        },
        title: title.to_string(),
        url,
        document: MarkdownDocument::new(frontmatter, body),
    })
}
