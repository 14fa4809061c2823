//! Command-line entry points for rtilde
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use crate::args::{continue_on_error_requested, parse_args, usage, Args};
use log::debug;
pub use rtilde_core::{prompt::Console, Aborted, ExitStatus, Result, TildeError};
use rtilde_core::{
    config::{resolve_dir, Config, Suffix, Verbosity},
    sweep::Sweeper,
};
use std::{
    ffi::OsString,
    io::{self, IsTerminal as _},
};
use utils::{apply_verbosity, init_logger, program_name};

pub mod args;
pub mod utils;

/// Run with the process' standard streams.
pub fn run<I, T>(argv: I) -> std::result::Result<ExitStatus, Aborted>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let stdin = io::stdin();
    let newline_after_answer = !stdin.is_terminal();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    let mut errors = io::stderr().lock();
    let console = Console::new(&mut input, &mut output)
        .with_errors(&mut errors)
        .newline_after_answer(newline_after_answer);
    run_with(argv, console)
}

/// Run with the given console.
///
/// `Ok` carries the final status, which is not necessarily [`ExitStatus::Ok`]: errors which
/// were continued past are folded into it. `Err` carries the error that ended the run together
/// with the worst status seen, including errors continued past before it.
pub fn run_with<I, T>(
    argv: I,
    mut console: Console<'_>,
) -> std::result::Result<ExitStatus, Aborted>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    init_logger();
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let (args, mut status) = parse_args(&argv).map_err(|err| err.abort(ExitStatus::Ok))?;
    let verbosity = args.validate(&mut status).map_err(|err| err.abort(status))?;
    apply_verbosity(verbosity);
    debug!("{args:?}");

    if args.help {
        if status.is_ok() {
            console.say(usage().trim_end());
        } else {
            console.complain(usage().trim_end());
        }
        return Ok(status);
    }
    if args.version {
        console.say(format_args!(
            "{} v{}",
            program_name(argv.first().map(OsString::as_os_str)),
            env!("CARGO_PKG_VERSION")
        ));
        return Ok(status);
    }

    let dir =
        resolve_dir(args.dirs.first().map(|d| d.as_path())).map_err(|err| err.abort(status))?;
    if verbosity >= Verbosity::VERBOSE {
        console.say(format_args!("Working directory: {}", dir.display()));
    }
    let config = Config::builder()
        .verbosity(verbosity)
        .recursive(args.recursive)
        .continue_on_error(args.continue_on_error)
        .interactive(args.interactive)
        .dir(dir)
        .suffix(Suffix::from_env())
        .build();
    debug!("{config:?}");
    Sweeper::new(&config, console).with_status(status).run().map_err(|err| err.abort(status))
}
