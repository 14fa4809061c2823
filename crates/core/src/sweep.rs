//! Find backup files in the target directory and remove them.
use crate::{
    config::{Config, Verbosity},
    errors::TildeError,
    matcher::glob_candidates,
    prompt::Console,
    status::ExitStatus,
    Result,
};
use ignore::{DirEntry, WalkBuilder};
use log::{debug, error, info};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// Remove a single file from the filesystem.
pub trait Unlink {
    fn unlink(&mut self, path: &Path) -> io::Result<()>;
}

/// Removes files for real with [`fs::remove_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl Unlink for RealFs {
    fn unlink(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

impl<U: Unlink + ?Sized> Unlink for &mut U {
    fn unlink(&mut self, path: &Path) -> io::Result<()> {
        (**self).unlink(path)
    }
}

/// Walks the configured directory and removes the files ending with the configured suffix.
///
/// IO errors either stop the sweep, in which case they are returned, or are logged and folded
/// into the exit status when `continue_on_error` is set.
#[derive(Debug)]
pub struct Sweeper<'c, 'io, U = RealFs> {
    config: &'c Config,
    console: Console<'io>,
    unlink: U,
    status: ExitStatus,
}

impl<'c, 'io> Sweeper<'c, 'io, RealFs> {
    pub fn new(config: &'c Config, console: Console<'io>) -> Self {
        Self { config, console, unlink: RealFs, status: ExitStatus::Ok }
    }
}

impl<'c, 'io, U: Unlink> Sweeper<'c, 'io, U> {
    /// Replace the way files get removed.
    pub fn with_unlink<V: Unlink>(self, unlink: V) -> Sweeper<'c, 'io, V> {
        Sweeper { config: self.config, console: self.console, unlink, status: self.status }
    }

    /// Start from a status accumulated before the sweep, e.g. while parsing flags.
    pub fn with_status(mut self, status: ExitStatus) -> Self {
        self.status = status;
        self
    }

    /// Run the sweep and return the worst status seen.
    pub fn run(mut self) -> Result<ExitStatus> {
        if self.config.recursive {
            self.sweep_tree()?;
        } else {
            self.sweep_dir()?;
        }
        Ok(self.status)
    }

    /// Remove the matching regular files directly inside the target directory.
    fn sweep_dir(&mut self) -> Result<()> {
        let config = self.config;
        for candidate in glob_candidates(&config.dir, &config.suffix)? {
            let path = match candidate {
                Ok(path) => path,
                Err(err) => {
                    self.fail(err.into())?;
                    continue;
                }
            };
            let metadata = match fs::symlink_metadata(&path) {
                Ok(metadata) => metadata,
                Err(source) => {
                    self.fail(TildeError::Stat { path, source })?;
                    continue;
                }
            };
            let label = base_name(&path);
            if !metadata.is_file() {
                info!("{label} is not a regular file - skipping");
                continue;
            }
            self.remove(&path, &label)?;
        }
        Ok(())
    }

    /// Remove the matching regular files anywhere below the target directory.
    fn sweep_tree(&mut self) -> Result<()> {
        let walker =
            WalkBuilder::new(&self.config.dir).standard_filters(false).follow_links(false).build();
        self.sweep_entries(walker)
    }

    /// Handle the entries of a directory walk, in order.
    fn sweep_entries<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = std::result::Result<DirEntry, ignore::Error>>,
    {
        let config = self.config;
        for result in entries {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    self.fail(err.into())?;
                    continue;
                }
            };
            let path = entry.path();
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_file() {
                if config.suffix.matches(path) {
                    self.remove(path, &path.display().to_string())?;
                }
            } else if file_type.is_dir() {
                self.notice(Verbosity::VERBOSE, format_args!("Entering {}", path.display()));
            } else {
                info!("{} is not a regular file - skipping", base_name(path));
            }
        }
        Ok(())
    }

    /// Remove a regular file, asking first in interactive mode.
    ///
    /// `label` is how the file is presented to the operator.
    fn remove(&mut self, path: &Path, label: &str) -> Result<()> {
        if self.config.interactive {
            match self.console.confirm(label) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("keeping {label}");
                    return Ok(());
                }
                Err(source) => {
                    return self.fail(TildeError::Prompt { path: path.to_path_buf(), source });
                }
            }
        }
        match self.unlink.unlink(path) {
            Ok(()) => {
                self.notice(Verbosity::NORMAL, format_args!("Removed {label}"));
                Ok(())
            }
            Err(source) => self.fail(TildeError::Remove { path: path.to_path_buf(), source }),
        }
    }

    /// Record an IO error. Returns it back unless the sweep should keep going.
    fn fail(&mut self, err: TildeError) -> Result<()> {
        self.status.escalate(err.exit_status());
        if !self.config.continue_on_error {
            return Err(err);
        }
        error!("{err}");
        Ok(())
    }

    fn notice(&mut self, level: Verbosity, message: fmt::Arguments<'_>) {
        if self.config.verbosity >= level {
            self.console.say(message);
        }
    }
}

fn base_name(path: &Path) -> String {
    path.file_name().map(PathBuf::from).unwrap_or_else(|| path.to_path_buf()).display().to_string()
}
