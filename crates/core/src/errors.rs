use crate::status::ExitStatus;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TildeError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    FlagParse(String),

    #[error("could not determine the current directory: {0}")]
    CurrentDir(io::Error),

    #[error("could not stat {path:?}: {source}")]
    Stat { path: PathBuf, source: io::Error },

    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("directory path {0:?} is not valid UTF-8")]
    NonUtf8Path(PathBuf),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("error while listing candidates: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("error during directory walk: {0}")]
    Walk(#[from] ignore::Error),

    #[error("could not read an answer for {path:?}: {source}")]
    Prompt { path: PathBuf, source: io::Error },

    #[error("failed to remove {path:?}: {source}")]
    Remove { path: PathBuf, source: io::Error },
}

impl TildeError {
    /// The exit status this error resolves to when it ends the run.
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Usage(_) => ExitStatus::Usage,
            Self::FlagParse(_) => ExitStatus::FlagParse,
            _ => ExitStatus::Io,
        }
    }

    /// End the run with this error, keeping the worse of `prior` and the error's own status.
    pub fn abort(self, prior: ExitStatus) -> Aborted {
        Aborted { status: prior.worst(self.exit_status()), error: self }
    }
}

/// A run that ended early, with the status accumulated up to that point.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct Aborted {
    pub error: TildeError,
    pub status: ExitStatus,
}
