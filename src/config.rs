use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

fn default_site_title() -> String {
    "My Blog".to_owned()
}

fn default_posts_dir() -> PathBuf {
    PathBuf::from("posts")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_stylesheet() -> Option<PathBuf> {
    Some(PathBuf::from("style.css"))
}

fn default_base_url() -> Url {
    Url::parse("http://localhost:8080/").unwrap()
}

fn default_index_path() -> String {
    "posts/index.json".to_owned()
}

fn default_posts_path() -> String {
    "posts".to_owned()
}

/// Where `fetch` finds a published blog.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    #[serde(default = "default_index_path")]
    pub index_path: String,
    #[serde(default = "default_posts_path")]
    pub posts_path: String,
}

impl Default for Remote {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            index_path: default_index_path(),
            posts_path: default_posts_path(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_site_title")]
    pub site_title: String,
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    /// Copied to `<build_dir>/style.css`. `null` skips the copy.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: Option<PathBuf>,
    #[serde(default)]
    pub remote: Remote,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_title: default_site_title(),
            posts_dir: default_posts_dir(),
            build_dir: default_build_dir(),
            stylesheet: default_stylesheet(),
            remote: Remote::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config {path}: {error}")]
    Read {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("failed to parse config {path}: {error}")]
    Parse {
        path: PathBuf,
        error: serde_yaml::Error,
    },
}

impl Config {
    pub fn from_yaml(src: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes as unit, not as an empty map
        if src.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(src)
    }

    pub async fn load(path: &Path) -> Result<Self, Error> {
        let src = tokio::fs::read_to_string(path)
            .await
            .map_err(|error| Error::Read {
                path: path.to_owned(),
                error,
            })?;
        Self::from_yaml(&src).map_err(|error| Error::Parse {
            path: path.to_owned(),
            error,
        })
    }

    /// Paths in the file are relative to the file's directory.
    pub fn resolve_relative_to(mut self, dir: &Path) -> Self {
        let resolve = |path: PathBuf| {
            if path.is_relative() {
                dir.join(path)
            } else {
                path
            }
        };
        self.posts_dir = resolve(self.posts_dir);
        self.build_dir = resolve(self.build_dir);
        self.stylesheet = self.stylesheet.map(resolve);
        self
    }
}
