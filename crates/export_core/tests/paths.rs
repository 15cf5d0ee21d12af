use std::collections::HashSet;
use std::path::PathBuf;

use export_core::{slugify_path, DocumentKey};
use pretty_assertions::assert_eq;

#[test]
fn root_route_is_home() {
    assert_eq!(slugify_path("/"), "home");
}

#[test]
fn simple_route_keeps_its_name() {
    assert_eq!(
        slugify_path("/bitcoin-fear-greed-index"),
        "bitcoin-fear-greed-index"
    );
}

#[test]
fn empty_route_is_page() {
    assert_eq!(slugify_path(""), "page");
}

#[test]
fn each_domain_has_its_own_subtree() {
    let cases = [
        (
            DocumentKey::Article {
                slug: "btc-etf".into(),
            },
            "research/btc-etf.md",
        ),
        (
            DocumentKey::Page {
                route: "/pricing".into(),
            },
            "pages/pricing.md",
        ),
        (
            DocumentKey::Page { route: "/".into() },
            "pages/home.md",
        ),
        (
            DocumentKey::DailySentiment {
                date: "2025-03-14".into(),
            },
            "sentiment/daily/2025-03-14.md",
        ),
        (
            DocumentKey::MonthlySentiment {
                period: "2025-03".into(),
            },
            "sentiment/monthly/2025-03.md",
        ),
    ];
    for (key, expected) in cases {
        let expected: PathBuf = expected.split('/').collect();
        assert_eq!(key.relative_path(), expected, "key {key:?}");
    }
}

#[test]
fn resolution_is_pure_and_distinct_slugs_do_not_collide() {
    let slugs = ["a", "b", "btc-etf", "btc-etf-2"];
    let paths: HashSet<PathBuf> = slugs
        .iter()
        .map(|slug| {
            DocumentKey::Article {
                slug: slug.to_string(),
            }
            .relative_path()
        })
        .collect();
    assert_eq!(paths.len(), slugs.len());

    let key = DocumentKey::Page {
        route: "/about".into(),
    };
    assert_eq!(key.relative_path(), key.relative_path());
}
