use std::path::PathBuf;

/// Natural key of a generated document. Each variant maps to its own
/// output subtree, so keys from different domains never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentKey {
    Article { slug: String },
    Page { route: String },
    DailySentiment { date: String },
    MonthlySentiment { period: String },
}

impl DocumentKey {
    /// Output path relative to the export root.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            DocumentKey::Article { slug } => PathBuf::from("research").join(format!("{slug}.md")),
            DocumentKey::Page { route } => {
                PathBuf::from("pages").join(format!("{}.md", slugify_path(route)))
            }
            DocumentKey::DailySentiment { date } => PathBuf::from("sentiment")
                .join("daily")
                .join(format!("{date}.md")),
            DocumentKey::MonthlySentiment { period } => PathBuf::from("sentiment")
                .join("monthly")
                .join(format!("{period}.md")),
        }
    }

    /// The raw key, used in log lines.
    pub fn label(&self) -> &str {
        match self {
            DocumentKey::Article { slug } => slug,
            DocumentKey::Page { route } => route,
            DocumentKey::DailySentiment { date } => date,
            DocumentKey::MonthlySentiment { period } => period,
        }
    }
}

/// Route path to a flat file stem: `/` is `home`, other routes drop the
/// leading slash, turn `/` into `-` and keep only `[A-Za-z0-9-]`.
pub fn slugify_path(route: &str) -> String {
    if route == "/" {
        return "home".to_string();
    }
    let slug: String = route
        .strip_prefix('/')
        .unwrap_or(route)
        .chars()
        .map(|c| if c == '/' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_routes_are_flattened() {
        assert_eq!(slugify_path("/docs/api/v1"), "docs-api-v1");
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(slugify_path("/About_Us"), "AboutUs");
    }

    #[test]
    fn only_symbols_fall_back_to_page() {
        assert_eq!(slugify_path("/?!"), "page");
    }
}
