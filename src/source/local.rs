use std::path::PathBuf;

use tracing::debug;

use super::{Error, PostSource};

/// Posts stored as `*.md` files in one directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PostSource for DirSource {
    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    async fn list(&self) -> Result<Vec<String>, Error> {
        let io_error = |error| Error::Io {
            path: self.dir.clone(),
            error,
        };
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(io_error)?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            let Some(name) = entry.file_name().to_str().map(ToOwned::to_owned) else {
                debug!(path = %entry.path().display(), "skip non UTF-8 file name");
                continue;
            };
            if name.ends_with(".md") {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, Error> {
        let path = self.dir.join(name);
        tokio::fs::read(&path)
            .await
            .map_err(|error| Error::Io { path, error })
    }
}
