//! rtilde removes editor backup files ending in ~ from a directory
use rtilde_commands::{run, usage, Aborted, TildeError};
use std::{env, process::ExitCode};
use yansi::Paint as _;

fn main() -> ExitCode {
    match run(env::args_os()) {
        Ok(status) => status.into(),
        Err(Aborted { error, status }) => {
            eprintln!("{}", error.to_string().red());
            if matches!(error, TildeError::Usage(_)) {
                eprintln!("{}", usage().trim_end());
            }
            status.into()
        }
    }
}
