use export_core::{Frontmatter, FrontmatterValue, MarkdownDocument};
use pretty_assertions::assert_eq;

#[test]
fn document_renders_delimited_header_then_body() {
    let fm = Frontmatter::new()
        .quoted("title", "Hello")
        .plain("date", "2025-01-02")
        .list("tags", vec!["ETF".into(), "Macro".into()]);
    let doc = MarkdownDocument::new(fm, "# Hello\n\nBody");

    assert_eq!(
        doc.render(),
        "---\ntitle: \"Hello\"\ndate: 2025-01-02\ntags: [\"ETF\", \"Macro\"]\n---\n\n# Hello\n\nBody"
    );
}

#[test]
fn empty_list_renders_brackets() {
    let fm = Frontmatter::new().list("tags", Vec::new());
    assert_eq!(fm.render(), "---\ntags: []\n---");
}

#[test]
fn optional_entries_are_omitted_when_empty() {
    let fm = Frontmatter::new()
        .quoted_opt("description", Some(""))
        .plain_opt("image", None)
        .plain_opt("url", Some("https://x"));
    assert_eq!(fm.keys().collect::<Vec<_>>(), vec!["url"]);
}

#[test]
fn no_value_carries_an_unescaped_quote() {
    let fm = Frontmatter::new()
        .quoted("title", "The \"Halving\" Trade")
        .list("tags", vec!["\"quoted\" tag".into()])
        .plain("author", "A \"B\" C");
    let rendered = fm.render();

    for line in rendered.lines().filter(|l| *l != "---") {
        let (_, value) = line.split_once(": ").expect("key/value line");
        let mut prev = ' ';
        let mut in_quotes = false;
        for ch in value.chars() {
            if ch == '"' && prev != '\\' {
                in_quotes = !in_quotes;
            }
            prev = if prev == '\\' && ch == '\\' { ' ' } else { ch };
        }
        assert!(!in_quotes, "unbalanced quotes in {line:?}");
    }
    assert_eq!(
        fm.get("title"),
        Some(&FrontmatterValue::Quoted("The \"Halving\" Trade".into()))
    );
    assert!(rendered.contains(r#"title: "The \"Halving\" Trade""#));
}
