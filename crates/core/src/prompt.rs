//! Operator-facing output and the yes/no confirmation.
use log::debug;
use regex::Regex;
use std::{
    fmt,
    io::{self, BufRead, Write},
    sync::LazyLock,
};

static YES_OR_BLANK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:^[[:blank:]]*y(?:es)?(?:\W|$))|(?:^\s*$)")
        .expect("yes/no regex should compile")
});

/// Whether an answer to the confirmation prompt means "yes".
///
/// `y` and `yes` in any case, optionally indented and followed by anything but a word character,
/// are a yes. So is a blank answer, which picks the default.
pub fn is_affirmative(answer: &str) -> bool {
    YES_OR_BLANK_REGEX.is_match(answer)
}

/// The input and output streams used for notices and prompts.
///
/// Messages for the error stream go to standard error unless another writer is set with
/// [`Console::with_errors`].
pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    errors: Option<&'a mut dyn Write>,
    newline_after_answer: bool,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output, errors: None, newline_after_answer: false }
    }

    /// Send error stream messages to `errors` instead of standard error.
    pub fn with_errors(mut self, errors: &'a mut dyn Write) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Print a newline once an answer has been read.
    ///
    /// When the input is not a terminal the operator's answer is not echoed, so without this the
    /// next line of output would follow the prompt directly.
    pub fn newline_after_answer(mut self, enabled: bool) -> Self {
        self.newline_after_answer = enabled;
        self
    }

    /// Print a line. Failing to write to the output is not an error worth stopping for.
    pub fn say(&mut self, message: impl fmt::Display) {
        writeln!(self.output, "{message}").ok();
    }

    /// Print a line to the error stream.
    pub fn complain(&mut self, message: impl fmt::Display) {
        match self.errors.as_mut() {
            Some(errors) => writeln!(errors, "{message}"),
            None => writeln!(io::stderr().lock(), "{message}"),
        }
        .ok();
    }

    /// Ask whether `label` should be removed and wait for a line of input.
    ///
    /// Reaching the end of the input before any byte is read is an error.
    pub fn confirm(&mut self, label: &str) -> io::Result<bool> {
        write!(self.output, "Remove {label}? [Y/n] ")?;
        self.output.flush()?;
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no answer on standard input"));
        }
        debug!("read {answer:?}");
        if self.newline_after_answer {
            writeln!(self.output)?;
        }
        Ok(is_affirmative(&answer))
    }
}

impl fmt::Debug for Console<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("newline_after_answer", &self.newline_after_answer)
            .field("redirected_errors", &self.errors.is_some())
            .finish_non_exhaustive()
    }
}
