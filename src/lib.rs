pub mod collection;
pub mod config;
pub mod document;
pub mod post;
pub mod progress;
pub mod site;
pub mod source;
pub mod template;
pub mod warning;

#[cfg(test)]
mod tests;

#[derive(Debug, thiserror::Error)]
#[error("{context}: {detail}")]
pub struct Error {
    pub context: Box<ErrorContext>,
    pub detail: Box<ErrorDetail>,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub location: String,
    pub post: Option<String>,
}

impl ErrorContext {
    fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            post: None,
        }
    }

    fn with_post(&self, post: impl Into<String>) -> Self {
        Self {
            location: self.location.clone(),
            post: Some(post.into()),
        }
    }

    fn error(&self, detail: ErrorDetail) -> Error {
        Error {
            context: Box::new(self.clone()),
            detail: Box::new(detail),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.post {
            Some(post) => write!(f, "{post}({})", self.location),
            None => f.write_str(&self.location),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorDetail {
    #[error("Failed to list posts: {0}")]
    ListPosts(source::Error),
    #[error("No posts available")]
    NoPosts {
        /// Posts that were listed but could not be read.
        dropped: Vec<String>,
    },
    #[error("Failed to create directory: {0}")]
    CreateDir(std::io::Error),
    #[error("Failed to copy stylesheet: {0}")]
    CopyStylesheet(std::io::Error),
    #[error("Failed to write page: {0}")]
    WritePage(std::io::Error),
}

impl Error {
    pub fn is_no_posts(&self) -> bool {
        matches!(*self.detail, ErrorDetail::NoPosts { .. })
    }
}
