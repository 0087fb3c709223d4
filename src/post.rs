//! Post records assembled from parsed documents
//!
//! Defaulting lives here, not in the document parser: a missing title becomes
//! [`UNTITLED`] and a missing date is derived from the file name.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::document::{self, MetaValue};

pub const UNTITLED: &str = "Untitled Post";

/// A fully rendered post, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    pub slug: String,
    pub body: String,
}

/// Metadata-only view of a post, as printed by `list`.
#[derive(Debug, Serialize)]
pub struct PostMetadata<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub tags: &'a [String],
    pub slug: &'a str,
}

impl PostRecord {
    pub fn metadata(&self) -> PostMetadata<'_> {
        PostMetadata {
            title: &self.title,
            date: &self.date,
            tags: &self.tags,
            slug: &self.slug,
        }
    }

    pub fn html_filename(&self) -> String {
        format!("{}.html", self.slug)
    }

    pub fn sort_key(&self) -> Option<NaiveDateTime> {
        parse_date(&self.date)
    }

    /// `M/D/YYYY` when the date parses, the raw string otherwise.
    pub fn display_date(&self) -> String {
        match self.sort_key() {
            Some(date) => date.format("%-m/%-d/%Y").to_string(),
            None => self.date.clone(),
        }
    }
}

pub fn slug_from_filename(filename: &str) -> &str {
    filename.strip_suffix(".md").unwrap_or(filename)
}

/// First 19 characters of the file name with `-` turned into `:` and a `Z`
/// appended. `2025-07-21-15-30-00.md` becomes `2025:07:21:15:30:00Z`.
pub fn date_from_filename(filename: &str) -> String {
    let mut date = filename
        .chars()
        .take(19)
        .map(|c| if c == '-' { ':' } else { c })
        .collect::<String>();
    date.push('Z');
    date
}

/// Build a [`PostRecord`] from a post file's name and contents.
pub fn assemble(filename: &str, raw: &str) -> PostRecord {
    let document = document::parse(raw);
    for line in &document.ignored_lines {
        crate::warn_entry!("{filename}: ignored frontmatter line {line:?}");
    }
    let metadata = &document.metadata;

    let title = metadata.title().map(ToOwned::to_owned).unwrap_or_else(|| {
        crate::warn_entry!("{filename}: no title, using {UNTITLED:?}");
        UNTITLED.to_owned()
    });
    let date = metadata.date().map(ToOwned::to_owned).unwrap_or_else(|| {
        let date = date_from_filename(filename);
        crate::warn_entry!("{filename}: no date, derived {date:?} from file name");
        date
    });
    let tags = match metadata.tags() {
        Some(MetaValue::List(tags)) => tags.clone(),
        Some(MetaValue::Text(tag)) => vec![tag.clone()],
        None => Vec::new(),
    };

    PostRecord {
        title,
        date,
        tags,
        slug: slug_from_filename(filename).to_owned(),
        body: document.html,
    }
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

const FILENAME_STAMP_FORMATS: &[&str] = &["%Y:%m:%d:%H:%M:%S", "%Y:%m:%d:%H:%M"];

/// Parse the date forms posts use in practice. Anything else is `None`.
pub fn parse_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(date) {
        return Some(datetime.naive_utc());
    }
    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
    {
        return Some(datetime);
    }
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(day.and_time(NaiveTime::MIN));
    }
    let stamp = date.strip_suffix('Z').unwrap_or(date);
    FILENAME_STAMP_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_and_remainder(stamp, format)
            .ok()
            .map(|(datetime, _)| datetime)
    })
}

/// Newest first. Stable, and unparseable dates go last.
pub fn sort_newest_first(posts: &mut [PostRecord]) {
    posts.sort_by_key(|post| Reverse(post.sort_key()));
}
