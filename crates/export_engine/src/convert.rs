//! HTML fragment to portable markdown.
//!
//! Conversion runs in two passes. The fragment is parsed with `scraper` and
//! written back out as HTML; on the way every element is first offered to an
//! ordered rule table, and the first rule whose matcher accepts the element
//! may replace it with other markup or decline with
//! [`RuleOutcome::Fallthrough`]. Noise elements and unused attributes are
//! dropped in the same pass. The rewritten HTML is rendered by `html2md`.
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

const DEFAULT_MAX_DEPTH: usize = 512;
const DEFAULT_MAX_INPUT_BYTES: usize = 8 * 1024 * 1024;

const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "template", "head", "title", "meta", "link", "svg",
    "form", "button", "input", "select", "textarea", "object", "embed", "canvas", "video",
    "audio",
];

/// Elements whose start or end puts the following text at the start of a line.
const LINE_BREAKING_TAGS: &[&str] = &[
    "html", "body", "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// The only attributes the renderer reads.
const KEPT_ATTRIBUTES: &[&str] = &["href", "src", "alt", "title"];

/// Private-use stand-ins for block markers that open a line of prose. The
/// renderer passes them through untouched and they come back escaped.
const MARKER_STAND_INS: &[(char, char)] = &[
    ('#', '\u{E000}'),
    ('>', '\u{E001}'),
    ('-', '\u{E002}'),
    ('+', '\u{E003}'),
    ('.', '\u{E004}'),
];

/// Explicit converter settings; there is no global converter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Maximum element nesting before conversion gives up.
    pub max_depth: usize,
    pub max_input_bytes: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("input of {actual} bytes exceeds the {max} byte limit")]
    InputTooLarge { max: usize, actual: usize },
    #[error("element nesting exceeds depth limit {limit}")]
    TooDeep { limit: usize },
}

pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> Result<String, ConvertError>;
}

/// What a rule does with the element it matched. `Replace` carries HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Replace(String),
    Fallthrough,
}

pub type RuleMatcher = fn(&ElementRef<'_>) -> bool;
pub type RuleReplacement =
    fn(&RuleBasedConverter, ElementRef<'_>, usize) -> Result<RuleOutcome, ConvertError>;

/// One entry of the rule table: a matcher and the replacement it selects.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matches: RuleMatcher,
    pub replace: RuleReplacement,
}

impl Rule {
    pub const fn new(name: &'static str, matches: RuleMatcher, replace: RuleReplacement) -> Self {
        Self {
            name,
            matches,
            replace,
        }
    }
}

/// Rules for CMS card markup, most specific first.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new("figure", is_figure, replace_figure),
        Rule::new("signup-card", is_signup_card, replace_signup_card),
        Rule::new("callout-card", is_callout_card, replace_callout_card),
    ]
}

fn is_figure(element: &ElementRef<'_>) -> bool {
    element.value().name() == "figure"
}

/// Image plus an emphasised caption line.
fn replace_figure(
    _converter: &RuleBasedConverter,
    element: ElementRef<'_>,
    _depth: usize,
) -> Result<RuleOutcome, ConvertError> {
    let Some(img) = find_descendant(element, |e| e.value().name() == "img") else {
        return Ok(RuleOutcome::Fallthrough);
    };
    let mut html = String::from("<p>");
    push_image(&mut html, img);
    if let Some(caption) = find_descendant(element, |e| e.value().name() == "figcaption") {
        let text = collapse_whitespace(&caption.text().collect::<String>());
        let text = text.trim();
        if !text.is_empty() {
            html.push_str("<br><em>");
            push_text(&mut html, text);
            html.push_str("</em>");
        }
    }
    html.push_str("</p>");
    Ok(RuleOutcome::Replace(html))
}

fn is_signup_card(element: &ElementRef<'_>) -> bool {
    has_class(element, "kg-signup-card") || has_class(element, "kg-signup-card-form")
}

fn replace_signup_card(
    _converter: &RuleBasedConverter,
    _element: ElementRef<'_>,
    _depth: usize,
) -> Result<RuleOutcome, ConvertError> {
    Ok(RuleOutcome::Replace(String::new()))
}

fn is_callout_card(element: &ElementRef<'_>) -> bool {
    has_class(element, "kg-callout-card")
}

/// Only the callout text survives, as a blockquote.
fn replace_callout_card(
    converter: &RuleBasedConverter,
    element: ElementRef<'_>,
    depth: usize,
) -> Result<RuleOutcome, ConvertError> {
    let Some(text) = find_descendant(element, |e| has_class(e, "kg-callout-text")) else {
        return Ok(RuleOutcome::Fallthrough);
    };
    let inner = converter.rewrite_children(text, depth + 1)?;
    if inner.trim().is_empty() {
        return Ok(RuleOutcome::Replace(String::new()));
    }
    Ok(RuleOutcome::Replace(format!("<blockquote>{inner}</blockquote>")))
}

/// Rule-table rewrite over `scraper`, rendered with `html2md`.
#[derive(Debug, Clone)]
pub struct RuleBasedConverter {
    config: ConverterConfig,
    rules: Vec<Rule>,
}

impl RuleBasedConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_rules(config, default_rules())
    }

    pub fn with_rules(config: ConverterConfig, rules: Vec<Rule>) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name).collect()
    }

    /// First pass only: the fragment with rules applied, as HTML.
    pub fn rewrite(&self, html: &str) -> Result<String, ConvertError> {
        if html.len() > self.config.max_input_bytes {
            return Err(ConvertError::InputTooLarge {
                max: self.config.max_input_bytes,
                actual: html.len(),
            });
        }
        let fragment = Html::parse_fragment(html);
        self.rewrite_children(fragment.root_element(), 1)
    }

    /// Rewrites the children of `element`; `depth` is the depth of the children.
    pub fn rewrite_children(
        &self,
        element: ElementRef<'_>,
        depth: usize,
    ) -> Result<String, ConvertError> {
        let mut out = String::new();
        for child in element.children() {
            self.rewrite_node(child, depth, &mut out)?;
        }
        Ok(out)
    }

    fn rewrite_node(
        &self,
        node: NodeRef<'_, Node>,
        depth: usize,
        out: &mut String,
    ) -> Result<(), ConvertError> {
        if depth > self.config.max_depth {
            return Err(ConvertError::TooDeep {
                limit: self.config.max_depth,
            });
        }
        match node.value() {
            Node::Text(text) => rewrite_text(node, text, out),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.rewrite_element(element, depth, out)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn rewrite_element(
        &self,
        element: ElementRef<'_>,
        depth: usize,
        out: &mut String,
    ) -> Result<(), ConvertError> {
        if let Some(rule) = self.rules.iter().find(|rule| (rule.matches)(&element)) {
            if let RuleOutcome::Replace(html) = (rule.replace)(self, element, depth)? {
                out.push_str(&html);
                return Ok(());
            }
        }

        let name = element.value().name();
        if SKIPPED_TAGS.contains(&name) {
            return Ok(());
        }
        if name == "img" {
            push_image(out, element);
            return Ok(());
        }
        // A link without a target renders as its text.
        let unwrap = name == "a"
            && element
                .value()
                .attr("href")
                .map_or(true, |href| href.trim().is_empty());

        if !unwrap {
            out.push('<');
            out.push_str(name);
            for key in KEPT_ATTRIBUTES {
                if let Some(value) = element.value().attr(key) {
                    push_attribute(out, key, value);
                }
            }
            out.push('>');
            if VOID_TAGS.contains(&name) {
                return Ok(());
            }
            // The parser eats one newline directly after `<pre>`.
            if name == "pre" {
                out.push('\n');
            }
        }
        for child in element.children() {
            self.rewrite_node(child, depth + 1, out)?;
        }
        if !unwrap {
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Ok(())
    }
}

impl Default for RuleBasedConverter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl Converter for RuleBasedConverter {
    fn to_markdown(&self, html: &str) -> Result<String, ConvertError> {
        let rewritten = self.rewrite(html)?;
        let markdown = html2md::parse_html(&rewritten);
        Ok(restore_block_markers(markdown.trim()))
    }
}

fn rewrite_text(node: NodeRef<'_, Node>, text: &str, out: &mut String) {
    if inside_code(node) {
        push_text(out, text);
        return;
    }
    let collapsed = collapse_whitespace(text);
    if !opens_line(node) {
        push_text(out, &collapsed);
        return;
    }
    let line = collapsed.trim_start();
    match block_marker_at(line) {
        Some(at) => {
            let marker = line[at..].chars().next().unwrap_or_default();
            push_text(out, &line[..at]);
            out.push(stand_in_for(marker).unwrap_or(marker));
            push_text(out, &line[at + marker.len_utf8()..]);
        }
        None => push_text(out, line),
    }
}

/// Byte offset of a marker that would turn `line` into a heading, quote or
/// list item when it starts a markdown line.
fn block_marker_at(line: &str) -> Option<usize> {
    let closes = |rest: &str| rest.chars().next().map_or(true, char::is_whitespace);
    match line.chars().next()? {
        '>' => Some(0),
        '#' => closes(line.trim_start_matches('#')).then_some(0),
        '-' | '+' => closes(&line[1..]).then_some(0),
        c if c.is_ascii_digit() => {
            let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
            let digits = line.len() - rest.len();
            (rest.starts_with('.') && closes(&rest[1..])).then_some(digits)
        }
        _ => None,
    }
}

fn stand_in_for(marker: char) -> Option<char> {
    MARKER_STAND_INS
        .iter()
        .find(|(m, _)| *m == marker)
        .map(|(_, stand_in)| *stand_in)
}

fn is_stand_in(ch: char) -> bool {
    MARKER_STAND_INS.iter().any(|(_, stand_in)| *stand_in == ch)
}

fn restore_block_markers(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    for ch in markdown.chars() {
        match MARKER_STAND_INS.iter().find(|(_, stand_in)| *stand_in == ch) {
            Some((marker, _)) => {
                out.push('\\');
                out.push(*marker);
            }
            None => out.push(ch),
        }
    }
    out
}

/// True when the text of `node` will be the first thing on its output line.
fn opens_line(node: NodeRef<'_, Node>) -> bool {
    let previous = node.prev_siblings().find(|sibling| !is_blank(sibling));
    match previous {
        Some(sibling) => breaks_line(&sibling),
        None => match node.parent() {
            None => true,
            Some(parent) if breaks_line(&parent) => true,
            Some(parent) => opens_line(parent),
        },
    }
}

fn breaks_line(node: &NodeRef<'_, Node>) -> bool {
    match node.value() {
        Node::Element(element) => LINE_BREAKING_TAGS.contains(&element.name()),
        Node::Document | Node::Fragment => true,
        _ => false,
    }
}

fn is_blank(node: &NodeRef<'_, Node>) -> bool {
    match node.value() {
        Node::Text(text) => text.trim().is_empty(),
        Node::Comment(_) => true,
        _ => false,
    }
}

fn inside_code(node: NodeRef<'_, Node>) -> bool {
    node.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|e| matches!(e.value().name(), "pre" | "code"))
}

fn push_image(out: &mut String, img: ElementRef<'_>) {
    let src = img.value().attr("src").map(str::trim).unwrap_or("");
    if src.is_empty() {
        return;
    }
    out.push_str("<img");
    push_attribute(out, "src", src);
    push_attribute(out, "alt", img.value().attr("alt").unwrap_or(""));
    if let Some(title) = img.value().attr("title") {
        push_attribute(out, "title", title);
    }
    out.push('>');
}

fn push_attribute(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c if is_stand_in(c) => {}
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if is_stand_in(c) => {}
            c => out.push(c),
        }
    }
}

fn find_descendant<'a>(
    element: ElementRef<'a>,
    predicate: impl Fn(&ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|candidate| predicate(candidate))
}

fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out
}
