//! Low-level library for finding and removing editor backup files
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
pub use errors::{Aborted, TildeError};
pub use status::ExitStatus;

pub type Result<T> = std::result::Result<T, TildeError>;

pub mod config;
pub mod errors;
pub mod matcher;
pub mod prompt;
pub mod status;
pub mod sweep;
