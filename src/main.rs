use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use blogsmith::{
    collection,
    config::Config,
    document,
    post::PostMetadata,
    progress::{self, BatchPhase, NullReporter},
    site,
    source::{DirSource, HttpSource},
};
use clap::{Parser, Subcommand};
use tracing::error;
use url::Url;

#[derive(Parser)]
#[clap(version, about = "Static blog builder for markdown posts with frontmatter")]
struct Opts {
    #[clap(short, long, env = "BLOGSMITH_CONFIG")]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write post pages, index page and stylesheet to the build directory
    Build,
    /// Print metadata of all posts, newest first, as JSON
    List,
    /// Print the metadata and rendered HTML of one post file as JSON
    Render { path: PathBuf },
    /// Fetch posts from a published blog and render them on one page
    Fetch {
        #[clap(long)]
        base_url: Option<Url>,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}

async fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let config = Config::load(path).await?;
    let dir = path.parent().map(PathBuf::from).unwrap_or_default();
    Ok(config.resolve_relative_to(&dir))
}

async fn build(config: &Config) -> anyhow::Result<()> {
    let reporter = progress::create_reporter();
    let result = site::build(config, reporter.as_ref()).await;
    match &result {
        Ok(summary) => {
            if summary.pages == 0 && summary.broken == 0 {
                reporter.log_warn("no posts found, wrote error page as index");
            }
            reporter.set_phase(BatchPhase::Completed);
        }
        Err(e) => reporter.set_phase(BatchPhase::Failed(e.to_string())),
    }
    reporter.finish();
    result?;
    Ok(())
}

async fn list(config: &Config) -> anyhow::Result<()> {
    let source = DirSource::new(&config.posts_dir);
    let collection = match collection::load(&source, &NullReporter).await {
        Ok(collection) => collection,
        Err(e) if e.is_no_posts() => Default::default(),
        Err(e) => return Err(e.into()),
    };
    let posts = collection
        .posts()
        .map(|post| post.metadata())
        .collect::<Vec<PostMetadata>>();
    println!("{}", serde_json::to_string_pretty(&posts)?);
    Ok(())
}

async fn render(path: &PathBuf) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    let document = document::parse(&raw);
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

async fn fetch(
    config: &Config,
    base_url: Option<Url>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let remote = &config.remote;
    let base_url = base_url.unwrap_or_else(|| remote.base_url.clone());
    let source = HttpSource::new(&base_url, &remote.index_path, &remote.posts_path)
        .with_context(|| format!("set up source for {base_url}"))?;
    let reporter = progress::create_reporter();
    let result = site::render_feed(&source, &config.site_title, reporter.as_ref()).await;
    reporter.finish();
    let html = result?;
    match output {
        Some(output) => tokio::fs::write(&output, html)
            .await
            .with_context(|| format!("write {}", output.display()))?,
        None => print!("{html}"),
    }
    Ok(())
}

async fn run(opts: Opts) -> anyhow::Result<()> {
    let config = load_config(opts.config.as_ref())
        .await
        .with_context(|| "load config")?;
    match opts.command {
        Command::Build => build(&config).await,
        Command::List => list(&config).await,
        Command::Render { path } => render(&path).await,
        Command::Fetch { base_url, output } => fetch(&config, base_url, output).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = run(opts).await {
        error!(?e, "critical error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
