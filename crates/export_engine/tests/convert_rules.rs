use export_engine::{
    default_rules, ConvertError, Converter, ConverterConfig, Rule, RuleBasedConverter,
    RuleOutcome,
};
use pretty_assertions::assert_eq;
use scraper::ElementRef;

fn convert(html: &str) -> String {
    RuleBasedConverter::default().to_markdown(html).unwrap()
}

fn rewrite(html: &str) -> String {
    RuleBasedConverter::default().rewrite(html).unwrap()
}

#[test]
fn rules_are_evaluated_in_declared_order() {
    let converter = RuleBasedConverter::default();
    assert_eq!(
        converter.rule_names(),
        vec!["figure", "signup-card", "callout-card"]
    );
    assert_eq!(
        default_rules().iter().map(|r| r.name).collect::<Vec<_>>(),
        converter.rule_names()
    );
}

#[test]
fn figure_becomes_image_and_caption() {
    let html = r#"<figure class="kg-card kg-image-card"><img src="https://img.example/a.png" alt="Chart"><figcaption>Weekly <b>flows</b></figcaption></figure>"#;
    assert_eq!(
        rewrite(html),
        r#"<p><img src="https://img.example/a.png" alt="Chart"><br><em>Weekly flows</em></p>"#
    );
    let md = convert(html);
    assert!(md.starts_with("![Chart](https://img.example/a.png)"), "{md:?}");
    assert!(md.contains("Weekly flows"), "{md:?}");
    assert!(!md.contains("figcaption"), "{md:?}");
}

#[test]
fn figure_without_caption_is_just_the_image() {
    let html = r#"<p>Intro</p><figure><img src="/a.png"></figure><p>Outro</p>"#;
    assert_eq!(
        rewrite(html),
        r#"<p>Intro</p><p><img src="/a.png" alt=""></p><p>Outro</p>"#
    );
    let md = convert(html);
    assert!(md.starts_with("Intro"), "{md:?}");
    assert!(md.contains("![](/a.png)"), "{md:?}");
    assert!(md.ends_with("Outro"), "{md:?}");
}

#[test]
fn figure_without_image_falls_through() {
    let html = r#"<figure><blockquote>Quoted</blockquote></figure>"#;
    assert_eq!(rewrite(html), html);
    assert!(convert(html).contains("> Quoted"));
}

#[test]
fn signup_cards_are_elided() {
    let html = r#"<p>Before</p><div class="kg-card kg-signup-card"><h2>Subscribe</h2><form class="kg-signup-card-form"><input type="email"></form></div><p>After</p>"#;
    assert_eq!(rewrite(html), "<p>Before</p><p>After</p>");
    assert_eq!(convert(html), "Before\n\nAfter");
}

#[test]
fn standalone_signup_form_is_elided() {
    let html = r#"<p>Keep</p><div class="kg-signup-card-form"><p>Join us</p></div>"#;
    assert_eq!(rewrite(html), "<p>Keep</p>");
    assert_eq!(convert(html), "Keep");
}

#[test]
fn callout_text_becomes_blockquote() {
    let html = r#"<div class="kg-card kg-callout-card kg-callout-card-grey"><div class="kg-callout-emoji">💡</div><div class="kg-callout-text">Line one<br>Line <strong>two</strong></div></div>"#;
    assert_eq!(
        rewrite(html),
        "<blockquote>Line one<br>Line <strong>two</strong></blockquote>"
    );
    let md = convert(html);
    assert!(md.starts_with("> Line one"), "{md:?}");
    assert!(md.contains("**two**"), "{md:?}");
    assert!(!md.contains('💡'));
}

#[test]
fn callout_without_text_falls_through() {
    let html = r#"<div class="kg-callout-card"><p>Plain</p></div>"#;
    assert_eq!(rewrite(html), "<div><p>Plain</p></div>");
    assert_eq!(convert(html), "Plain");
}

#[test]
fn earlier_rule_wins_when_several_match() {
    let html = r#"<figure class="kg-signup-card"><img src="/kept.png" alt="kept"></figure>"#;
    assert_eq!(rewrite(html), r#"<p><img src="/kept.png" alt="kept"></p>"#);
    assert_eq!(convert(html), "![kept](/kept.png)");
}

fn is_mark(element: &ElementRef<'_>) -> bool {
    element.value().name() == "mark"
}

fn replace_mark(
    _converter: &RuleBasedConverter,
    element: ElementRef<'_>,
    _depth: usize,
) -> Result<RuleOutcome, ConvertError> {
    Ok(RuleOutcome::Replace(format!(
        "<strong>{}</strong>",
        element.text().collect::<String>()
    )))
}

#[test]
fn custom_rules_can_be_supplied() {
    let mut rules = default_rules();
    rules.push(Rule::new("mark", is_mark, replace_mark));
    let converter = RuleBasedConverter::with_rules(ConverterConfig::default(), rules);
    assert_eq!(
        converter.rewrite("<p>a <mark>b</mark></p>").unwrap(),
        "<p>a <strong>b</strong></p>"
    );
    let md = converter.to_markdown("<p>a <mark>b</mark></p>").unwrap();
    assert_eq!(md, "a **b**");
}

#[test]
fn paragraphs_are_separated_by_a_blank_line() {
    assert_eq!(convert("<p>A</p><p>B</p>"), "A\n\nB");
}

#[test]
fn headings_keep_their_text() {
    let md = convert("<h1>Hello</h1><p>world</p>");
    assert!(
        md.starts_with("# Hello") || md.starts_with("Hello\n=="),
        "unexpected markdown output: {md:?}"
    );
    assert!(md.contains("world"));
}

#[test]
fn whitespace_between_blocks_is_dropped() {
    let html = "<p>A</p>\n   \n<p>  B  \n spread </p>";
    assert_eq!(rewrite(html), "<p>A</p><p>B spread </p>");
    assert_eq!(convert(html), "A\n\nB spread");
}

#[test]
fn lists_render_every_item() {
    let md = convert("<ul>\n<li>One</li>\n<li>Two <em>three</em></li>\n</ul>");
    assert!(md.contains("One"), "{md:?}");
    assert!(md.contains("Two *three*"), "{md:?}");
    assert_eq!(md.lines().filter(|l| !l.trim().is_empty()).count(), 2);
}

#[test]
fn huge_ordered_list_start_does_not_overflow() {
    let html = r#"<ol start="18446744073709551615"><li>a</li><li>b</li></ol>"#;
    let md = RuleBasedConverter::default().to_markdown(html).unwrap();
    assert!(md.contains('a') && md.contains('b'), "{md:?}");
}

#[test]
fn only_rendered_attributes_survive_the_rewrite() {
    let html = r#"<p class="lead" style="x">See <a href="https://x.example/a" title="Docs" rel="nofollow">the <strong>docs</strong></a>.</p>"#;
    assert_eq!(
        rewrite(html),
        r#"<p>See <a href="https://x.example/a" title="Docs">the <strong>docs</strong></a>.</p>"#
    );
    let md = convert(html);
    assert!(md.contains("[the **docs**](https://x.example/a"), "{md:?}");
}

#[test]
fn links_without_target_keep_their_text() {
    let html = r#"<p><img src="/i.png" alt="icon"> and <a>no href</a></p>"#;
    assert_eq!(
        rewrite(html),
        r#"<p><img src="/i.png" alt="icon"> and no href</p>"#
    );
    assert_eq!(convert(html), "![icon](/i.png) and no href");
}

#[test]
fn markdown_punctuation_in_text_is_escaped() {
    let md = convert("<p>2 * 3 = 6</p>");
    assert!(md.contains(r"2 \* 3"), "{md:?}");

    assert_eq!(convert("<p># not a heading</p>"), r"\# not a heading");
    assert_eq!(convert("<p>## nor this</p>"), r"\## nor this");
    assert_eq!(convert("<p>1. not a list</p>"), r"1\. not a list");
    assert_eq!(convert("<p>&gt; not a quote</p>"), r"\> not a quote");
    assert_eq!(convert("<p>- not a bullet</p>"), r"\- not a bullet");
    assert_eq!(convert("<p>+ nor this</p>"), r"\+ nor this");
    let md = convert("<p>Intro<br>2. second line</p>");
    assert!(md.starts_with("Intro"), "{md:?}");
    assert!(md.ends_with("\n2\\. second line"), "{md:?}");
}

#[test]
fn markers_inside_a_line_are_left_alone() {
    assert_eq!(convert("<p>Tag #hashtag, -5 and 3.5</p>"), "Tag #hashtag, -5 and 3.5");
    assert_eq!(convert("<p>Step <b>1. mixed</b></p>"), "Step **1. mixed**");
}

#[test]
fn code_is_kept_verbatim() {
    let md = convert("<p>Use <code>a_b</code> here</p>");
    assert!(md.contains("`a_b`"), "{md:?}");

    let md = convert("<pre><code class=\"language-sh\"># list files\nls -l\n</code></pre>");
    assert!(md.contains("# list files\nls -l"), "{md:?}");
    assert!(!md.contains(r"\#"), "{md:?}");
}

#[test]
fn scripts_and_comments_are_dropped() {
    let html = "<p>Shown</p><script>alert(1)</script><!-- note --><style>p{}</style>";
    assert_eq!(rewrite(html), "<p>Shown</p>");
    assert_eq!(convert(html), "Shown");
}

#[test]
fn conversion_is_deterministic() {
    let html = r#"<h2>T</h2><ul><li><a href="https://a.example">a</a></li></ul><figure><img src="/x.png"><figcaption>c</figcaption></figure>"#;
    let converter = RuleBasedConverter::default();
    let first = converter.to_markdown(html).unwrap();
    let second = converter.to_markdown(html).unwrap();
    assert_eq!(first, second);
}

#[test]
fn excessive_nesting_is_an_error() {
    let converter = RuleBasedConverter::new(ConverterConfig {
        max_depth: 3,
        ..ConverterConfig::default()
    });
    let result = converter.to_markdown("<div><div><div><div><p>x</p></div></div></div></div>");
    assert_eq!(result, Err(ConvertError::TooDeep { limit: 3 }));
}

#[test]
fn oversized_input_is_an_error() {
    let converter = RuleBasedConverter::new(ConverterConfig {
        max_input_bytes: 10,
        ..ConverterConfig::default()
    });
    let html = "<p>far more than ten bytes</p>";
    assert_eq!(
        converter.to_markdown(html),
        Err(ConvertError::InputTooLarge {
            max: 10,
            actual: html.len()
        })
    );
}
