use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to read {path:?}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to write {path:?}: {source}")]
    WriteFile { path: PathBuf, source: io::Error },
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Time(#[from] time::error::Format),
    #[error(transparent)]
    Archive(#[from] zarc::ArchiveError),
    #[error(transparent)]
    Read(#[from] zarc::ReadError),
    #[error("{0:?} has no file name")]
    NoFileName(PathBuf),
    #[error("archive name {0:?} is used more than once")]
    DuplicateName(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
