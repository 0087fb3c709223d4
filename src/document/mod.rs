use serde::Serialize;

pub mod frontmatter;
pub mod markdown;

pub use frontmatter::{Extracted, MetaValue, Metadata, extract};
pub use markdown::render;

/// A post document after frontmatter extraction and markdown rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub metadata: Metadata,
    pub body: String,
    pub html: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_lines: Vec<String>,
}

pub fn parse(raw: &str) -> Document {
    let Extracted {
        metadata,
        body,
        ignored_lines,
    } = extract(raw);
    Document {
        html: render(body),
        body: body.to_owned(),
        metadata,
        ignored_lines: ignored_lines.into_iter().map(ToOwned::to_owned).collect(),
    }
}
