//! Static site output
//!
//! [`build`] turns a posts directory into a `build/` tree: one page per post,
//! an index page and the stylesheet. [`render_feed`] renders every post of any
//! [`PostSource`] into a single page.

use std::{
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
};

use futures::future::try_join_all;
use tracing::{info, warn};

use crate::{
    Error, ErrorContext, ErrorDetail,
    collection::{self, Collection},
    config::Config,
    progress::{BatchPhase, ProgressReporter},
    source::{DirSource, PostSource},
    template,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub broken: usize,
    pub dropped: Vec<String>,
}

async fn write_page(ctx: &ErrorContext, path: &Path, html: &str) -> Result<(), Error> {
    tokio::fs::write(path, html).await.map_err(|error| {
        ctx.with_post(path.display().to_string())
            .error(ErrorDetail::WritePage(error))
    })
}

/// Load a collection, treating "nothing to show" as an empty collection.
async fn load_or_empty<S: PostSource>(
    source: &S,
    reporter: &dyn ProgressReporter,
) -> Result<Collection, Error> {
    let Error { context, detail } = match collection::load(source, reporter).await {
        Ok(collection) => return Ok(collection),
        Err(error) => error,
    };
    match *detail {
        ErrorDetail::NoPosts { dropped } => {
            warn!(%context, ?dropped, "no posts to show, rendering error page");
            reporter.log_warn(&format!("{context}: no posts available"));
            Ok(Collection {
                entries: Vec::new(),
                dropped,
            })
        }
        detail => Err(Error {
            context,
            detail: Box::new(detail),
        }),
    }
}

/// Build the static site described by `config`.
pub async fn build(
    config: &Config,
    reporter: &dyn ProgressReporter,
) -> Result<BuildSummary, Error> {
    let build_dir = &config.build_dir;
    let posts_dir = build_dir.join("posts");
    let ctx = ErrorContext::new(build_dir.display().to_string());

    tokio::fs::create_dir_all(&posts_dir)
        .await
        .map_err(|error| ctx.error(ErrorDetail::CreateDir(error)))?;

    if let Some(stylesheet) = &config.stylesheet {
        tokio::fs::copy(stylesheet, build_dir.join("style.css"))
            .await
            .map_err(|error| {
                ErrorContext::new(stylesheet.display().to_string())
                    .error(ErrorDetail::CopyStylesheet(error))
            })?;
    }

    reporter.set_phase(BatchPhase::ListingPosts);
    let source = DirSource::new(&config.posts_dir);
    let collection = load_or_empty(&source, reporter).await?;

    reporter.set_phase(BatchPhase::WritingPages);
    let index = if collection.entries.is_empty() {
        template::error_page(&config.site_title, "style.css")
    } else {
        let total = collection.posts().count();
        let written = AtomicUsize::new(0);
        try_join_all(collection.posts().map(|post| {
            let path = posts_dir.join(post.html_filename());
            let html = template::post_page(post);
            let (ctx, written) = (&ctx, &written);
            async move {
                write_page(ctx, &path, &html).await?;
                let done = written.fetch_add(1, Ordering::Relaxed) + 1;
                reporter.set_write_progress(done, total);
                Ok::<_, Error>(())
            }
        }))
        .await?;
        template::index_page(&config.site_title, &collection.entries)
    };
    write_page(&ctx, &build_dir.join("index.html"), &index).await?;

    let summary = BuildSummary {
        pages: collection.posts().count(),
        broken: collection.broken(),
        dropped: collection.dropped,
    };
    info!(
        pages = summary.pages,
        broken = summary.broken,
        dropped = summary.dropped.len(),
        "build completed"
    );
    Ok(summary)
}

/// Render every post of `source` in full on one page, newest first.
pub async fn render_feed<S: PostSource>(
    source: &S,
    site_title: &str,
    reporter: &dyn ProgressReporter,
) -> Result<String, Error> {
    reporter.set_phase(BatchPhase::ListingPosts);
    let collection = load_or_empty(source, reporter).await?;
    if collection.entries.is_empty() {
        return Ok(template::error_page(site_title, "style.css"));
    }
    Ok(template::feed_page(site_title, "style.css", &collection.entries))
}
