//! HTML page templates
//!
//! Plain string interpolation around rendered post bodies. Titles and tags are
//! escaped; post bodies are inserted exactly as the renderer produced them.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::{collection::Entry, post::PostRecord};

pub const BROKEN_POST_MESSAGE: &str = "Error rendering this post.";
pub const NO_POSTS_MESSAGE: &str = "Error loading posts. Please try again later.";

fn page(title: &str, stylesheet: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{stylesheet}">
</head>
<body>
{main}
</body>
</html>
"#,
        title = text(title),
        stylesheet = attr(stylesheet),
    )
}

fn tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<div class="tags">"#);
    for tag in tags {
        write!(out, r#"<span class="tag">{}</span>"#, text(tag)).unwrap();
    }
    out.push_str("</div>");
    out
}

fn post_meta(post: &PostRecord) -> String {
    format!(
        r#"<div class="post-meta"><time datetime="{datetime}">{display}</time>{tags}</div>"#,
        datetime = attr(&post.date),
        display = text(&post.display_date()),
        tags = tags(&post.tags),
    )
}

fn broken_card() -> String {
    format!(r#"<div class="post error">{BROKEN_POST_MESSAGE}</div>"#)
}

/// Stand-alone page for one post, written to `posts/<slug>.html`.
pub fn post_page(post: &PostRecord) -> String {
    let main = format!(
        r#"    <main>
        <article class="post">
            <header class="post-header">
                <h1 class="post-title">{title}</h1>
                {meta}
            </header>
            <div class="post-content">
                {body}
            </div>
        </article>
    </main>"#,
        title = text(&post.title),
        meta = post_meta(post),
        body = post.body,
    );
    page(&post.title, "../style.css", &main)
}

/// Index page linking every post page.
pub fn index_page(site_title: &str, entries: &[Entry]) -> String {
    let mut main = String::from(r#"    <main id="posts">"#);
    for entry in entries {
        main.push_str("\n        ");
        match entry {
            Entry::Post(post) => write!(
                main,
                r#"<article class="post"><header class="post-header"><h2 class="post-title"><a href="posts/{href}">{title}</a></h2>{meta}</header></article>"#,
                href = attr(&post.html_filename()),
                title = text(&post.title),
                meta = post_meta(post),
            )
            .unwrap(),
            Entry::Broken { .. } => main.push_str(&broken_card()),
        }
    }
    main.push_str("\n    </main>");
    page(site_title, "style.css", &main)
}

/// Single page with every post rendered in full, newest first.
pub fn feed_page(site_title: &str, stylesheet: &str, entries: &[Entry]) -> String {
    let mut main = String::from(r#"    <main id="posts">"#);
    for entry in entries {
        main.push_str("\n        ");
        match entry {
            Entry::Post(post) => write!(
                main,
                r#"<article class="post"><header class="post-header"><h2 class="post-title">{title}</h2>{meta}</header><div class="post-content">{body}</div></article>"#,
                title = text(&post.title),
                meta = post_meta(post),
                body = post.body,
            )
            .unwrap(),
            Entry::Broken { .. } => main.push_str(&broken_card()),
        }
    }
    main.push_str("\n    </main>");
    page(site_title, stylesheet, &main)
}

/// Shown instead of an empty listing.
pub fn error_page(site_title: &str, stylesheet: &str) -> String {
    let main = format!(r#"    <main id="posts"><p>{NO_POSTS_MESSAGE}</p></main>"#);
    page(site_title, stylesheet, &main)
}
