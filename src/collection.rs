//! Loading every post from a [`PostSource`]
//!
//! Posts are read concurrently. A post that cannot be read is logged and left
//! out; a post that can be read but not decoded stays in the listing as a
//! [`Entry::Broken`] placeholder.

use std::cmp::Reverse;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    ErrorContext, ErrorDetail,
    post::{self, PostRecord},
    progress::{BatchPhase, EntryStatus, ProgressReporter},
    source::PostSource,
    warning,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Post(PostRecord),
    Broken { name: String, reason: String },
}

impl Entry {
    pub fn post(&self) -> Option<&PostRecord> {
        match self {
            Self::Post(post) => Some(post),
            Self::Broken { .. } => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Post(post) => &post.slug,
            Self::Broken { name, .. } => name,
        }
    }
}

/// Everything loaded from one source, newest first.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub entries: Vec<Entry>,
    /// Posts that could not be read at all.
    pub dropped: Vec<String>,
}

impl Collection {
    pub fn posts(&self) -> impl Iterator<Item = &PostRecord> {
        self.entries.iter().filter_map(Entry::post)
    }

    pub fn broken(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, Entry::Broken { .. }))
            .count()
    }
}

async fn load_entry<S: PostSource>(
    source: &S,
    name: String,
    reporter: &dyn ProgressReporter,
) -> Option<Entry> {
    reporter.update_entry(&name, EntryStatus::Reading);
    let bytes = match source.read(&name).await {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(%error, post = %name, "failed to read post, dropping it");
            reporter.update_entry(&name, EntryStatus::Failed(error.to_string()));
            return None;
        }
    };

    reporter.update_entry(&name, EntryStatus::Rendering);
    let raw = match String::from_utf8(bytes) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(%error, post = %name, "post is not valid UTF-8");
            reporter.update_entry(&name, EntryStatus::Failed(error.to_string()));
            return Some(Entry::Broken {
                name,
                reason: error.to_string(),
            });
        }
    };

    let (record, warnings) =
        warning::collect_warnings(async { post::assemble(&name, &raw) }).await;
    for message in &warnings {
        warn!(post = %name, "{message}");
        reporter.log_warn(message);
    }
    debug!(post = %name, title = %record.title, date = %record.date, "loaded post");
    reporter.update_entry(&name, EntryStatus::Done);
    Some(Entry::Post(record))
}

/// Read, parse and sort every post of `source`.
///
/// Fails when the source cannot be listed or when nothing usable is left.
pub async fn load<S: PostSource>(
    source: &S,
    reporter: &dyn ProgressReporter,
) -> Result<Collection, crate::Error> {
    let ctx = ErrorContext::new(source.location());
    let names = source
        .list()
        .await
        .map_err(|error| ctx.error(ErrorDetail::ListPosts(error)))?;
    reporter.register_entries(names.clone());
    reporter.set_phase(BatchPhase::LoadingPosts);

    let tasks = names
        .iter()
        .map(|name| load_entry(source, name.clone(), reporter));
    let loaded = join_all(tasks).await;

    let dropped = names
        .iter()
        .zip(&loaded)
        .filter(|(_, entry)| entry.is_none())
        .map(|(name, _)| name.clone())
        .collect::<Vec<_>>();
    let mut entries = loaded.into_iter().flatten().collect::<Vec<_>>();
    if entries.is_empty() {
        return Err(ctx.error(ErrorDetail::NoPosts { dropped }));
    }
    entries.sort_by_key(|entry| Reverse(entry.post().and_then(PostRecord::sort_key)));
    Ok(Collection { entries, dropped })
}
