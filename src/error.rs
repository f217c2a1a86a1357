use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Git command failed: {0}")]
    GitCommandError(String),

    #[error("Repository path does not exist: {}", .0.display())]
    RepositoryNotFound(PathBuf),

    #[error("Malformed name-status line: {0:?}")]
    MalformedStatusLine(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
