use tracing::debug;
use url::Url;

use super::{Error, PostIndex, PostSource};

/// Posts served over HTTP next to a JSON directory index.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    index_url: Url,
    posts_url: Url,
}

fn join(base: &Url, path: &str) -> Result<Url, Error> {
    base.join(path).map_err(|e| Error::Url(path.to_owned(), e))
}

/// `join` replaces the last path segment unless the base ends with `/`.
fn as_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl HttpSource {
    pub fn new(base_url: &Url, index_path: &str, posts_path: &str) -> Result<Self, Error> {
        let base_url = as_directory(base_url.clone());
        Ok(Self {
            client: reqwest::Client::new(),
            index_url: join(&base_url, index_path)?,
            posts_url: as_directory(join(&base_url, posts_path)?),
        })
    }

    pub fn post_url(&self, name: &str) -> Result<Url, Error> {
        join(&self.posts_url, name)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, Error> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;
        let code = response.status();
        if !code.is_success() {
            return Err(Error::Status { code, url });
        }
        Ok(response)
    }
}

impl PostSource for HttpSource {
    fn location(&self) -> String {
        self.index_url.to_string()
    }

    async fn list(&self) -> Result<Vec<String>, Error> {
        let index = self
            .get(self.index_url.clone())
            .await?
            .json::<PostIndex>()
            .await
            .map_err(Error::Transport)?;
        Ok(index.posts)
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, Error> {
        let bytes = self
            .get(self.post_url(name)?)
            .await?
            .bytes()
            .await
            .map_err(Error::Transport)?;
        Ok(bytes.to_vec())
    }
}
