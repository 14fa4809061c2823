//! Process exit status, accumulated over a run
use std::{fmt, process::ExitCode};

/// How the run ended.
///
/// Variants are ordered from best to worst so that merging two statuses is a simple maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ExitStatus {
    #[default]
    Ok = 0,
    Usage = 1,
    FlagParse = 2,
    Io = 3,
}

impl ExitStatus {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// Upgrade to `other` if it is worse. A status never gets better.
    pub fn escalate(&mut self, other: Self) {
        *self = (*self).max(other);
    }

    #[must_use]
    pub fn worst(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Ok => "OK",
            Self::Usage => "usage error",
            Self::FlagParse => "flag parsing error",
            Self::Io => "IO error",
        };
        f.write_str(text)
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(value: ExitStatus) -> Self {
        ExitCode::from(value.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ExitStatus::Ok.code(), 0);
        assert_eq!(ExitStatus::Usage.code(), 1);
        assert_eq!(ExitStatus::FlagParse.code(), 2);
        assert_eq!(ExitStatus::Io.code(), 3);
    }

    #[test]
    fn test_escalate_never_downgrades() {
        let mut status = ExitStatus::default();
        assert!(status.is_ok());
        status.escalate(ExitStatus::FlagParse);
        assert_eq!(status, ExitStatus::FlagParse);
        status.escalate(ExitStatus::Ok);
        assert_eq!(status, ExitStatus::FlagParse);
        status.escalate(ExitStatus::Usage);
        assert_eq!(status, ExitStatus::FlagParse);
        status.escalate(ExitStatus::Io);
        assert_eq!(status, ExitStatus::Io);
        status.escalate(ExitStatus::FlagParse);
        assert_eq!(status, ExitStatus::Io);
    }

    #[test]
    fn test_worst() {
        assert_eq!(ExitStatus::Ok.worst(ExitStatus::Usage), ExitStatus::Usage);
        assert_eq!(ExitStatus::Io.worst(ExitStatus::Ok), ExitStatus::Io);
    }
}
