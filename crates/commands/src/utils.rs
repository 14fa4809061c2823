//! Utils for the commands crate
use rtilde_core::config::Verbosity;
use std::{env, ffi::OsStr, path::Path};

/// Set up the logger backend.
///
/// If `RUST_LOG` is set, it drives the logger entirely. Otherwise every record is let through
/// by the backend and the global max level decides, see [`apply_verbosity`]. Safe to call more
/// than once.
pub fn init_logger() {
    if env::var("RUST_LOG").is_ok() {
        env_logger::builder().format_timestamp(None).try_init().ok();
        return;
    }
    // init logger if possible (not already initialized)
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .ok();
    log::set_max_level(Verbosity::default().level_filter());
}

/// Adjust the max log level to the requested verbosity, unless `RUST_LOG` is in charge.
pub fn apply_verbosity(verbosity: Verbosity) {
    if env::var("RUST_LOG").is_err() {
        log::set_max_level(verbosity.level_filter());
    }
}

/// The name the program was invoked with, without its directory.
pub fn program_name(argv0: Option<&OsStr>) -> String {
    argv0
        .and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rtilde".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name() {
        assert_eq!(program_name(Some(OsStr::new("/usr/local/bin/r~"))), "r~");
        assert_eq!(program_name(Some(OsStr::new("rtilde"))), "rtilde");
        assert_eq!(program_name(None), "rtilde");
    }
}
