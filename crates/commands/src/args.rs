//! Command-line arguments and their validation
use clap::{ArgMatches, CommandFactory as _, Parser};
use log::error;
use rtilde_core::{config::Verbosity, ExitStatus, Result, TildeError};
use std::{ffi::OsString, path::PathBuf};

const EXIT_VALUES: &str = "Exit value:
  0 OK
  1 Usage error
  2 Flag parsing error
  3 IO error";

/// Remove regular files ending in ~ from a directory
///
/// DIR defaults to the current working directory, relative paths are resolved with respect to
/// the current working directory. The suffix can be changed with the RTILDE_SUFFIX environment
/// variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[clap(
    name = "rtilde",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true,
    after_help = EXIT_VALUES
)]
#[non_exhaustive]
pub struct Args {
    /// Give more verbose output (i.e. set verbosity=2)
    #[arg(short, long)]
    pub verbose: bool,

    /// Control verbosity level: 0=error-only, 1=normal, 2=verbose, 3=debug
    #[arg(short = 'y', long, value_name = "N", allow_negative_numbers = true)]
    pub verbosity: Option<i64>,

    /// Print brief usage info and exit
    #[arg(short, long)]
    pub help: bool,

    /// Print version and exit
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Recurse through all subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Keep going in case of IO error (or flag parsing errors if supplied before the error occurs)
    #[arg(short, long, visible_alias = "keep-going", visible_short_alias = 'k')]
    pub continue_on_error: bool,

    /// Prompt for each deletion
    #[arg(short, long)]
    pub interactive: bool,

    /// The directory to clean
    #[arg(value_name = "DIR")]
    pub dirs: Vec<PathBuf>,
}

impl Args {
    /// Build the arguments from a parse that may have stopped early.
    ///
    /// Defaults are not filled in when clap ignores an error, so missing values are read as unset.
    fn from_partial_matches(matches: &ArgMatches) -> Self {
        let flag = |id: &str| matches.get_one::<bool>(id).copied().unwrap_or_default();
        Self {
            verbose: flag("verbose"),
            verbosity: matches.get_one::<i64>("verbosity").copied(),
            help: flag("help"),
            version: flag("version"),
            recursive: flag("recursive"),
            continue_on_error: flag("continue_on_error"),
            interactive: flag("interactive"),
            dirs: matches
                .get_many::<PathBuf>("dirs")
                .map(|dirs| dirs.cloned().collect())
                .unwrap_or_default(),
        }
    }

    /// Number of distinct options which were supplied.
    ///
    /// Each option counts once however it was spelled or repeated: `-v --verbose` is one flag,
    /// and so are `-c` and `--keep-going`. Counting every occurrence instead would make a repeated
    /// help request such as `-h --help` count as not alone.
    pub fn flag_count(&self) -> usize {
        [
            self.verbose,
            self.verbosity.is_some(),
            self.help,
            self.version,
            self.recursive,
            self.continue_on_error,
            self.interactive,
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// Combine `--verbose` and `--verbosity` into a single level.
    pub fn resolve_verbosity(&self) -> Result<Verbosity> {
        match (self.verbose, self.verbosity) {
            (true, Some(level)) if level != 2 => Err(TildeError::Usage(
                "If both --verbose and --verbosity=N are supplied, then N must equal 2.".to_string(),
            )),
            (true, _) => Ok(Verbosity::VERBOSE),
            (false, None) => Ok(Verbosity::default()),
            (false, Some(level)) => Verbosity::new(level).ok_or_else(|| {
                TildeError::Usage(format!(
                    "Option --verbosity=N must be in range 0 <= N <= 3, got {level}."
                ))
            }),
        }
    }

    /// Check the combination of arguments.
    ///
    /// Asking for help or the version together with other options is not fatal, the returned
    /// status is upgraded instead so the request can still be served.
    pub fn validate(&self, status: &mut ExitStatus) -> Result<Verbosity> {
        if self.dirs.len() > 1 {
            return Err(TildeError::Usage(format!(
                "rtilde takes at most one directory argument, got {}.",
                self.dirs.len()
            )));
        }
        if (self.help || self.version) && self.flag_count() > 1 {
            error!("Options --help and --version should be supplied alone.");
            status.escalate(ExitStatus::Usage);
        }
        self.resolve_verbosity()
    }
}

/// Parse partially, stopping at the first malformed token but keeping what came before.
fn parse_partial(argv: &[OsString]) -> Option<Args> {
    let matches = Args::command().ignore_errors(true).try_get_matches_from(argv).ok()?;
    Some(Args::from_partial_matches(&matches))
}

/// Parse the command line.
///
/// A malformed command line is fatal, unless continue-on-error was requested before the
/// offending token. In that case the error is logged, the options parsed so far are used and
/// the returned status is [`ExitStatus::FlagParse`].
pub fn parse_args(argv: &[OsString]) -> Result<(Args, ExitStatus)> {
    match Args::try_parse_from(argv) {
        Ok(args) => Ok((args, ExitStatus::Ok)),
        Err(err) => match parse_partial(argv) {
            Some(args) if args.continue_on_error => {
                error!("{}", err.to_string().trim_end());
                Ok((args, ExitStatus::FlagParse))
            }
            _ => Err(TildeError::FlagParse(err.to_string().trim_end().to_string())),
        },
    }
}

/// Whether continue-on-error appears among the arguments before any malformed token.
///
/// The first item of `argv` is the program name and is never considered.
pub fn continue_on_error_requested<I, T>(argv: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    parse_partial(&argv).is_some_and(|args| args.continue_on_error)
}

/// Render the full help text.
pub fn usage() -> String {
    Args::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_continue_on_error_requested() {
        let cases: &[(&[&str], bool)] = &[
            (&["rtilde"], false),
            (&["rtilde", "--continue-on-error"], true),
            (&["rtilde", "--keep-going"], true),
            (&["rtilde", "-c"], true),
            (&["rtilde", "-k"], true),
            (&["--keep-going", "this", "is", "silly"], false),
            (&["rtilde", "-i", "-r", "-y", "3", "-k"], true),
            (&["rtilde", "-i", "-r", "-y", "3"], false),
            (&["rtilde", "find", "me", "--keep-going", "in", "the", "middle"], true),
            (&["rtilde", "-k", "-r", "--keep-going"], true),
            (&["rtilde", "-c", "--bogus"], true),
            (&["rtilde", "--bogus", "-c"], false),
            (&["rtilde", "-ic"], true),
        ];
        for (args, want) in cases {
            assert_eq!(continue_on_error_requested(args.iter().copied()), *want, "args {args:?}");
        }
    }

    #[test]
    fn test_parse_args() {
        let (args, status) = parse_args(&argv(&["rtilde", "-r", "-i", "-y", "3", "dir"])).unwrap();
        assert_eq!(status, ExitStatus::Ok);
        assert!(args.recursive);
        assert!(args.interactive);
        assert!(!args.continue_on_error);
        assert_eq!(args.verbosity, Some(3));
        assert_eq!(args.dirs, vec![PathBuf::from("dir")]);
        assert_eq!(args.flag_count(), 3);
    }

    #[test]
    fn test_flag_count_spellings() {
        let (args, _) = parse_args(&argv(&["rtilde", "-v", "--verbose", "-c", "-k"])).unwrap();
        assert_eq!(args.flag_count(), 2);

        let mut status = ExitStatus::Ok;
        let (args, _) = parse_args(&argv(&["rtilde", "-h", "--help"])).unwrap();
        assert_eq!(args.flag_count(), 1);
        assert!(args.validate(&mut status).is_ok());
        assert_eq!(status, ExitStatus::Ok);

        let (args, _) = parse_args(&argv(&["rtilde", "-h", "--verbose", "--verbose"])).unwrap();
        assert_eq!(args.flag_count(), 2);
        assert!(args.validate(&mut status).is_ok());
        assert_eq!(status, ExitStatus::Usage);
    }

    #[test]
    fn test_parse_args_long_forms() {
        let (args, status) = parse_args(&argv(&[
            "rtilde",
            "--recursive",
            "--verbosity=0",
            "--continue-on-error",
            "--",
            "-dir-",
        ]))
        .unwrap();
        assert_eq!(status, ExitStatus::Ok);
        assert!(args.recursive);
        assert!(args.continue_on_error);
        assert_eq!(args.verbosity, Some(0));
        assert_eq!(args.dirs, vec![PathBuf::from("-dir-")]);
    }

    #[test]
    fn test_parse_args_repeated_flags() {
        let (args, status) = parse_args(&argv(&["rtilde", "-r", "--recursive", "-y", "1", "-y", "2"]))
            .unwrap();
        assert_eq!(status, ExitStatus::Ok);
        assert!(args.recursive);
        assert_eq!(args.verbosity, Some(2));
    }

    #[test]
    fn test_parse_args_negative_verbosity() {
        let (args, _) = parse_args(&argv(&["rtilde", "-y", "-1"])).unwrap();
        assert_eq!(args.verbosity, Some(-1));
        assert!(matches!(args.resolve_verbosity(), Err(TildeError::Usage(_))));
    }

    #[test]
    fn test_parse_args_flag_error() {
        let res = parse_args(&argv(&["rtilde", "--bogus"]));
        assert!(matches!(res, Err(TildeError::FlagParse(_))), "{res:?}");
        let res = parse_args(&argv(&["rtilde", "-y", "three"]));
        assert!(matches!(res, Err(TildeError::FlagParse(_))), "{res:?}");
    }

    #[test]
    fn test_parse_args_flag_error_continued() {
        let (args, status) = parse_args(&argv(&["rtilde", "-r", "-c", "--bogus", "-i"])).unwrap();
        assert_eq!(status, ExitStatus::FlagParse);
        assert!(args.recursive);
        assert!(args.continue_on_error);
        // parsing stopped at the bad flag
        assert!(!args.interactive);
    }

    #[test]
    fn test_resolve_verbosity() {
        let args = Args { verbose: true, ..Default::default() };
        assert_eq!(args.resolve_verbosity().unwrap(), Verbosity::VERBOSE);
        let args = Args { verbose: true, verbosity: Some(2), ..Default::default() };
        assert_eq!(args.resolve_verbosity().unwrap(), Verbosity::VERBOSE);
        let args = Args { verbose: true, verbosity: Some(3), ..Default::default() };
        assert!(matches!(args.resolve_verbosity(), Err(TildeError::Usage(_))));
        let args = Args::default();
        assert_eq!(args.resolve_verbosity().unwrap(), Verbosity::NORMAL);
        for level in [-1, 4, 100] {
            let args = Args { verbosity: Some(level), ..Default::default() };
            assert!(matches!(args.resolve_verbosity(), Err(TildeError::Usage(_))), "{level}");
        }
    }

    #[test]
    fn test_validate() {
        let mut status = ExitStatus::Ok;
        let args = Args { dirs: vec!["a".into(), "b".into()], ..Default::default() };
        assert!(matches!(args.validate(&mut status), Err(TildeError::Usage(_))));

        let args = Args { help: true, ..Default::default() };
        assert!(args.validate(&mut status).is_ok());
        assert_eq!(status, ExitStatus::Ok);

        let args = Args { version: true, recursive: true, ..Default::default() };
        assert!(args.validate(&mut status).is_ok());
        assert_eq!(status, ExitStatus::Usage);
    }

    #[test]
    fn test_usage() {
        let usage = usage();
        assert!(usage.contains("--continue-on-error"));
        assert!(usage.contains("--verbosity <N>"));
        assert!(usage.contains("3 IO error"));
    }
}
