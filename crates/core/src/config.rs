//! Run configuration and target directory resolution.
use crate::{errors::TildeError, Result};
use derive_more::{Display, From};
use log::LevelFilter;
use std::{
    env, fs,
    path::{Component, Path, PathBuf},
};

/// The suffix used when `RTILDE_SUFFIX` is not set.
pub const DEFAULT_SUFFIX: &str = "~";

/// The trailing characters which mark a file for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, From, Display)]
#[from(String, &'static str)]
pub struct Suffix(String);

impl Suffix {
    /// Read the suffix from the `RTILDE_SUFFIX` environment variable.
    ///
    /// Falls back to [`DEFAULT_SUFFIX`] if the variable is unset or empty.
    pub fn from_env() -> Self {
        match env::var("RTILDE_SUFFIX") {
            Ok(suffix) if !suffix.is_empty() => Self(suffix),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the file name of `path` ends with the suffix.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .file_name()
            .is_some_and(|name| name.as_encoded_bytes().ends_with(self.0.as_bytes()))
    }
}

impl Default for Suffix {
    fn default() -> Self {
        Self(DEFAULT_SUFFIX.to_string())
    }
}

/// How much detail gets printed.
///
/// 0 = errors only, 1 = normal, 2 = verbose, 3 = debug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct Verbosity(u8);

impl Verbosity {
    pub const QUIET: Self = Self(0);
    pub const NORMAL: Self = Self(1);
    pub const VERBOSE: Self = Self(2);
    pub const DEBUG: Self = Self(3);

    /// Returns `None` if `level` is outside of `0..=3`.
    pub fn new(level: i64) -> Option<Self> {
        u8::try_from(level).ok().filter(|l| *l <= Self::DEBUG.0).map(Self)
    }

    /// The max log level corresponding to this verbosity.
    pub fn level_filter(self) -> LevelFilter {
        match self.0 {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Everything a sweep needs to know, fixed once the command line has been validated.
///
/// # Examples
///
/// ```
/// # use rtilde_core::config::{Config, Verbosity};
/// let config = Config::builder().dir("/tmp").recursive(true).build();
/// assert_eq!(config.verbosity, Verbosity::NORMAL);
/// assert_eq!(config.suffix.as_str(), "~");
/// assert!(!config.continue_on_error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct Config {
    #[builder(default)]
    pub verbosity: Verbosity,

    #[builder(default)]
    pub recursive: bool,

    /// Log IO errors and keep going instead of stopping at the first one.
    #[builder(default)]
    pub continue_on_error: bool,

    /// Ask before each removal.
    #[builder(default)]
    pub interactive: bool,

    /// The directory to clean, already resolved (see [`resolve_dir`]).
    #[builder(into)]
    pub dir: PathBuf,

    #[builder(default, into)]
    pub suffix: Suffix,
}

/// Resolve the directory argument into an existing directory path.
///
/// Without an argument, the current directory is used as is. Absolute paths are cleaned,
/// relative ones are joined to the current directory first.
pub fn resolve_dir(arg: Option<&Path>) -> Result<PathBuf> {
    let cwd = || env::current_dir().map_err(TildeError::CurrentDir);
    let dir = match arg {
        None => return cwd(),
        Some(path) if path.is_absolute() => clean_path(path),
        Some(path) => clean_path(&cwd()?.join(path)),
    };
    let metadata =
        fs::metadata(&dir).map_err(|source| TildeError::Stat { path: dir.clone(), source })?;
    if !metadata.is_dir() {
        return Err(TildeError::NotADirectory(dir));
    }
    Ok(dir)
}

/// Lexically normalize a path, dropping `.` and resolving `..` against preceding components.
///
/// The filesystem is not consulted, so symlinks are not taken into account.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}
