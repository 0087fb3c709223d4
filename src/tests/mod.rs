use std::{path::PathBuf, sync::Mutex};

use crate::{
    collection,
    config::Config,
    progress::{BatchPhase, EntryStatus, NullReporter, ProgressReporter},
    site,
    source::DirSource,
    template::{BROKEN_POST_MESSAGE, NO_POSTS_MESSAGE},
};

fn config(posts_dir: &str, build_dir: PathBuf) -> Config {
    Config {
        posts_dir: PathBuf::from(posts_dir),
        build_dir,
        stylesheet: Some(PathBuf::from("src/tests/scenario/style.css")),
        ..Config::default()
    }
}

/// Keeps every page-writing progress call in order.
#[derive(Default)]
struct WriteRecorder(Mutex<Vec<(usize, usize)>>);

impl ProgressReporter for WriteRecorder {
    fn set_phase(&self, _phase: BatchPhase) {}
    fn register_entries(&self, _entries: Vec<String>) {}
    fn update_entry(&self, _entry: &str, _status: EntryStatus) {}
    fn set_write_progress(&self, written: usize, total: usize) {
        self.0.lock().unwrap().push((written, total));
    }
    fn log_warn(&self, _message: &str) {}
    fn finish(&self) {}
}

#[tokio::test]
async fn build_scenario() {
    let out = tempfile::tempdir().unwrap();
    let config = config("src/tests/scenario/posts", out.path().join("build"));
    let summary = site::build(&config, &NullReporter).await.unwrap();
    assert_eq!(summary.pages, 3);
    assert_eq!(summary.broken, 0);
    assert!(summary.dropped.is_empty());

    let build = out.path().join("build");
    let style = std::fs::read_to_string(build.join("style.css")).unwrap();
    assert!(style.contains("sans-serif"));

    let hello = std::fs::read_to_string(build.join("posts/2025-07-21-15-30.html")).unwrap();
    assert!(hello.contains("<title>Hello</title>"));
    assert!(hello.contains("<h1>Hi</h1><p><strong>bold</strong> text</p>"));
    assert!(hello.contains(r#"<span class="tag">a</span><span class="tag">b</span>"#));

    let second = std::fs::read_to_string(build.join("posts/2025-07-22-15-30.html")).unwrap();
    assert!(second.contains(
        r#"<h2>Notes</h2><p>Some <em>italic</em> words and a <a href="https://example.com">link</a>.</p><ul><li> first</li><li> second</li></ul><p>Closing line.</p>"#
    ));

    let untitled = std::fs::read_to_string(build.join("posts/2025-07-23-09-00-00.html")).unwrap();
    assert!(untitled.contains("<title>Untitled Post</title>"));
    assert!(untitled.contains(r#"<time datetime="2025:07:23:09:00:00Z">7/23/2025</time>"#));

    let index = std::fs::read_to_string(build.join("index.html")).unwrap();
    let positions = [
        "posts/2025-07-23-09-00-00.html",
        "posts/2025-07-22-15-30.html",
        "posts/2025-07-21-15-30.html",
    ]
    .map(|href| index.find(href).unwrap());
    assert!(positions.is_sorted());
}

#[tokio::test]
async fn build_without_posts_writes_error_page() {
    let out = tempfile::tempdir().unwrap();
    let mut config = config("src/tests/empty", out.path().to_owned());
    config.stylesheet = None;
    let summary = site::build(&config, &NullReporter).await.unwrap();
    assert_eq!(summary.pages, 0);
    let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains(NO_POSTS_MESSAGE));
    assert!(!out.path().join("style.css").exists());
}

#[tokio::test]
async fn build_with_missing_posts_dir_fails() {
    let out = tempfile::tempdir().unwrap();
    let config = config("src/tests/does-not-exist", out.path().to_owned());
    let error = site::build(&config, &NullReporter).await.unwrap_err();
    assert!(!error.is_no_posts());
}

#[tokio::test]
async fn write_progress_counts_finished_pages() {
    let posts = tempfile::tempdir().unwrap();
    for day in 1..=28 {
        for hour in [9, 21] {
            // Uneven sizes so writes finish out of order
            let body = "words ".repeat(day * hour * 40);
            std::fs::write(
                posts.path().join(format!("2025-02-{day:02}-{hour:02}-00.md")),
                format!("---\ntitle: Day {day}\n---\n{body}"),
            )
            .unwrap();
        }
    }
    let out = tempfile::tempdir().unwrap();
    let mut config = config("unused", out.path().to_owned());
    config.posts_dir = posts.path().to_owned();
    config.stylesheet = None;

    let reporter = WriteRecorder::default();
    let summary = site::build(&config, &reporter).await.unwrap();
    assert_eq!(summary.pages, 56);
    let calls = reporter.0.into_inner().unwrap();
    assert_eq!(calls.last(), Some(&(56, 56)));
    let written = calls.iter().map(|(written, _)| *written).collect::<Vec<_>>();
    assert_eq!(written, (1..=56).collect::<Vec<_>>());
}

#[tokio::test]
async fn build_keeps_dropped_names_without_posts() {
    let posts = tempfile::tempdir().unwrap();
    // A directory named like a post is listed but cannot be read
    std::fs::create_dir(posts.path().join("2025-07-21-15-30.md")).unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut config = config("unused", out.path().to_owned());
    config.posts_dir = posts.path().to_owned();
    config.stylesheet = None;

    let summary = site::build(&config, &NullReporter).await.unwrap();
    assert_eq!(summary.pages, 0);
    assert_eq!(summary.dropped, vec!["2025-07-21-15-30.md"]);
    let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains(NO_POSTS_MESSAGE));
}

#[tokio::test]
async fn build_with_only_broken_posts_lists_placeholders() {
    let posts = tempfile::tempdir().unwrap();
    std::fs::write(posts.path().join("2025-07-21-15-30.md"), [0xc3, 0x28]).unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut config = config("unused", out.path().to_owned());
    config.posts_dir = posts.path().to_owned();
    config.stylesheet = None;

    let summary = site::build(&config, &NullReporter).await.unwrap();
    assert_eq!((summary.pages, summary.broken), (0, 1));
    let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains(BROKEN_POST_MESSAGE));
    assert!(!index.contains(NO_POSTS_MESSAGE));
}

#[tokio::test]
async fn broken_post_is_listed_as_placeholder() {
    let posts = tempfile::tempdir().unwrap();
    std::fs::write(
        posts.path().join("2025-07-21-15-30.md"),
        "---\ntitle: Fine\ndate: 2025-07-21\n---\nok",
    )
    .unwrap();
    std::fs::write(posts.path().join("2025-07-22-15-30.md"), [0xc3, 0x28]).unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut config = config("unused", out.path().to_owned());
    config.posts_dir = posts.path().to_owned();
    config.stylesheet = None;

    let summary = site::build(&config, &NullReporter).await.unwrap();
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.broken, 1);
    let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains(BROKEN_POST_MESSAGE));
    assert!(index.contains("Fine"));
}

#[tokio::test]
async fn feed_renders_full_posts() {
    let source = DirSource::new("src/tests/scenario/posts");
    let html = site::render_feed(&source, "My Blog", &NullReporter)
        .await
        .unwrap();
    assert!(html.contains("<h1>Hi</h1><p><strong>bold</strong> text</p>"));
    assert!(html.find("Second post").unwrap() < html.find(">Hello<").unwrap());
}

#[tokio::test]
async fn feed_without_posts_is_error_page() {
    let source = DirSource::new("src/tests/empty");
    let html = site::render_feed(&source, "My Blog", &NullReporter)
        .await
        .unwrap();
    assert!(html.contains(NO_POSTS_MESSAGE));
}

#[tokio::test]
async fn collection_of_scenario() {
    let source = DirSource::new("src/tests/scenario/posts");
    let collection = collection::load(&source, &NullReporter).await.unwrap();
    let slugs = collection
        .posts()
        .map(|post| post.slug.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        slugs,
        vec!["2025-07-23-09-00-00", "2025-07-22-15-30", "2025-07-21-15-30"]
    );
    let hello = collection.posts().last().unwrap();
    assert_eq!(hello.tags, vec!["a", "b"]);
}
