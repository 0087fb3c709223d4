//! Frontmatter extraction for post documents
//!
//! A post may start with a block delimited by two `---` lines. Each line of the
//! block of the form `key: value` becomes one metadata entry. Values wrapped in
//! `[` and `]` are read as comma separated lists, everything else is kept as a
//! plain string. Nothing here fails: malformed lines are skipped and a missing
//! block simply yields empty metadata.

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::Serialize;

static FRONTMATTER_BLOCK: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?s)\A---\r?\n(?:(.*?)\r?\n)?---(?:\r?\n|\z)").unwrap()
});

static KEY_VALUE_SEPARATOR: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r":\s").unwrap());

/// A single metadata value. Scalars are never coerced to numbers or booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Vec<&str>> for MetaValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(ToOwned::to_owned).collect())
    }
}

/// Flat key/value mapping read from a frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, MetaValue>);

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(MetaValue::as_text)
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date").and_then(MetaValue::as_text)
    }

    pub fn tags(&self) -> Option<&MetaValue> {
        self.get("tags")
    }

    fn insert(&mut self, key: &str, value: MetaValue) {
        self.0.insert(key.to_owned(), value);
    }
}

/// Result of splitting a raw document into metadata and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub metadata: Metadata,
    pub body: &'a str,
    /// Frontmatter lines that had no `key: value` shape.
    pub ignored_lines: Vec<&'a str>,
}

/// Split `raw` into its frontmatter metadata and body.
///
/// Without a leading `---` block the body is `raw` untouched. With one, the
/// body is the remainder after the closing delimiter, trimmed.
pub fn extract(raw: &str) -> Extracted<'_> {
    let Some(captures) = FRONTMATTER_BLOCK.captures(raw) else {
        return Extracted {
            metadata: Metadata::default(),
            body: raw,
            ignored_lines: Vec::new(),
        };
    };
    let block = captures.get(1).map_or("", |m| m.as_str());
    let end = captures.get(0).map_or(0, |m| m.end());

    let mut metadata = Metadata::default();
    let mut ignored_lines = Vec::new();
    for line in block.lines().filter(|line| !line.is_empty()) {
        match KEY_VALUE_SEPARATOR.find(line) {
            Some(separator) => {
                let key = line[..separator.start()].trim();
                let value = parse_value(line[separator.end()..].trim());
                metadata.insert(key, value);
            }
            None => ignored_lines.push(line),
        }
    }

    Extracted {
        metadata,
        body: raw[end..].trim(),
        ignored_lines,
    }
}

/// Bracketed values become lists. Embedded commas and brackets cannot be escaped.
fn parse_value(value: &str) -> MetaValue {
    match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(inner) if inner.trim().is_empty() => MetaValue::List(Vec::new()),
        Some(inner) => MetaValue::List(inner.split(',').map(|item| item.trim().to_owned()).collect()),
        None => MetaValue::Text(value.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::{MetaValue, extract};

    #[test]
    fn test_scalar_and_list_values() {
        let raw = "---\ntitle: Hello World\ntags: [a, b, c]\n---\nbody";
        let extracted = extract(raw);
        assert_eq!(extracted.metadata.title(), Some("Hello World"));
        assert_eq!(
            extracted.metadata.tags(),
            Some(&MetaValue::from(vec!["a", "b", "c"]))
        );
        assert_eq!(extracted.body, "body");
        assert!(extracted.ignored_lines.is_empty());
    }

    #[test]
    fn test_no_frontmatter_keeps_body_untouched() {
        let raw = "\n  # Just a post\n\nwith text  \n";
        let extracted = extract(raw);
        assert!(extracted.metadata.is_empty());
        assert_eq!(extracted.body, raw);
    }

    #[test]
    fn test_frontmatter_must_start_the_document() {
        let raw = "intro\n---\ntitle: Late\n---\nbody";
        let extracted = extract(raw);
        assert!(extracted.metadata.is_empty());
        assert_eq!(extracted.body, raw);
    }

    #[test]
    fn test_unclosed_frontmatter_is_not_a_block() {
        let raw = "---\ntitle: Open\nbody";
        let extracted = extract(raw);
        assert!(extracted.metadata.is_empty());
        assert_eq!(extracted.body, raw);
    }

    #[test]
    fn test_body_is_trimmed() {
        let extracted = extract("---\ntitle: x\n---\n\n\n  text\n\n");
        assert_eq!(extracted.body, "text");
    }

    #[test]
    fn test_empty_block() {
        let extracted = extract("---\n---\nbody");
        assert!(extracted.metadata.is_empty());
        assert_eq!(extracted.body, "body");
    }

    #[test]
    fn test_crlf_document() {
        let extracted = extract("---\r\ntitle: Windows\r\n---\r\nbody\r\n");
        assert_eq!(extracted.metadata.title(), Some("Windows"));
        assert_eq!(extracted.body, "body");
    }

    #[test]
    fn test_lines_without_separator_are_skipped() {
        let extracted = extract("---\ntitle: ok\njust words\nempty:\n---\nbody");
        assert_eq!(extracted.metadata.len(), 1);
        assert!(!extracted.metadata.contains_key("empty"));
        assert_eq!(extracted.ignored_lines, vec!["just words", "empty:"]);
    }

    #[test]
    fn test_value_split_on_first_separator() {
        let extracted = extract("---\ntitle: Rust: the good parts\nurl: https://x.io\n---\n");
        assert_eq!(extracted.metadata.title(), Some("Rust: the good parts"));
        assert_eq!(
            extracted.metadata.get("url").and_then(MetaValue::as_text),
            Some("https://x.io")
        );
    }

    #[test]
    fn test_empty_list() {
        let extracted = extract("---\ntags: []\n---\n");
        assert_eq!(extracted.metadata.tags(), Some(&MetaValue::List(Vec::new())));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let extracted = extract("---\ntitle: first\ntitle: second\n---\n");
        assert_eq!(extracted.metadata.len(), 1);
        assert_eq!(extracted.metadata.title(), Some("second"));
    }

    #[test]
    fn test_numeric_values_stay_strings() {
        let extracted = extract("---\nyear: 2025\ndraft: false\n---\n");
        assert_eq!(extracted.metadata.get("year"), Some(&MetaValue::from("2025")));
        assert_eq!(extracted.metadata.get("draft"), Some(&MetaValue::from("false")));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let extracted = extract("---\nTitle: Upper\n---\n");
        assert_eq!(extracted.metadata.title(), None);
        assert_eq!(extracted.metadata.get("Title"), Some(&MetaValue::from("Upper")));
    }

    #[test]
    fn test_missing_title_stays_missing() {
        let extracted = extract("---\ndate: 2025-07-21\n---\nbody");
        assert!(!extracted.metadata.contains_key("title"));
        assert_eq!(extracted.metadata.date(), Some("2025-07-21"));
    }

    #[test]
    fn test_extract_is_deterministic() {
        let raw = "---\ntitle: t\ntags: [x, y]\n---\n# body";
        assert_eq!(extract(raw), extract(raw));
    }
}
