use std::fmt::Write;

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    /// Written bare, e.g. `date: 2025-03-01`.
    Plain(String),
    /// Written in double quotes with `\` and `"` escaped.
    Quoted(String),
    /// Written as `["a", "b"]`, each item quoted.
    List(Vec<String>),
}

/// Key-ordered header block. Keys keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frontmatter {
    entries: Vec<(String, FrontmatterValue)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(mut self, key: &str, value: impl ToString) -> Self {
        self.entries
            .push((key.to_string(), FrontmatterValue::Plain(value.to_string())));
        self
    }

    pub fn quoted(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries
            .push((key.to_string(), FrontmatterValue::Quoted(value.into())));
        self
    }

    pub fn list(mut self, key: &str, items: Vec<String>) -> Self {
        self.entries.push((key.to_string(), FrontmatterValue::List(items)));
        self
    }

    /// Adds a quoted entry only when `value` is present and non-empty.
    pub fn quoted_opt(self, key: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.quoted(key, v),
            None => self,
        }
    }

    /// Adds a plain entry only when `value` is present and non-empty.
    pub fn plain_opt(self, key: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.plain(key, v),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in &self.entries {
            let _ = writeln!(out, "{key}: {}", render_value(value));
        }
        out.push_str("---");
        out
    }
}

fn render_value(value: &FrontmatterValue) -> String {
    match value {
        FrontmatterValue::Plain(text) if needs_quoting(text) => quote(text),
        FrontmatterValue::Plain(text) => text.clone(),
        FrontmatterValue::Quoted(text) => quote(text),
        FrontmatterValue::List(items) => {
            let quoted: Vec<String> = items.iter().map(|item| quote(item)).collect();
            format!("[{}]", quoted.join(", "))
        }
    }
}

fn needs_quoting(text: &str) -> bool {
    text.contains(['"', '\n', '\r'])
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// A generated document: frontmatter header followed by a markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
}

impl MarkdownDocument {
    pub fn new(frontmatter: Frontmatter, body: impl Into<String>) -> Self {
        Self {
            frontmatter,
            body: body.into(),
        }
    }

    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.frontmatter.render(), self.body)
    }
}
