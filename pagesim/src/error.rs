/*!
Specialized `Error` and `Result` types for pagesim.
*/

use std::{error, fmt, result};

use log::{debug, error, info, trace, warn};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Error(pub ErrorOrigin, pub ErrorKind);

impl Error {
    /// Returns a static string representing the type of error.
    pub fn as_str(&self) -> &'static str {
        self.1.to_str()
    }

    /// Returns a static string representing the type of error.
    pub fn into_str(self) -> &'static str {
        self.as_str()
    }

    /// Returns true if this error rejects a configuration before any simulation ran.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self.1,
            ErrorKind::InvalidPageSize
                | ErrorKind::InvalidFrameCount
                | ErrorKind::InvalidInstructionCount
                | ErrorKind::NotPageMultiple
                | ErrorKind::InvalidLocalityFactor
                | ErrorKind::InvalidSequenceLength
                | ErrorKind::UnknownAlgorithm
                | ErrorKind::UnknownAccessPattern
        )
    }

    pub fn log_error(self, err: impl fmt::Display) -> Self {
        error!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }

    pub fn log_warn(self, err: impl fmt::Display) -> Self {
        warn!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }

    pub fn log_info(self, err: impl fmt::Display) -> Self {
        info!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }

    pub fn log_debug(self, err: impl fmt::Display) -> Self {
        debug!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }

    pub fn log_trace(self, err: impl fmt::Display) -> Self {
        trace!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.0.to_str(), self.1.to_str())
    }
}

impl error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(ErrorOrigin::Other, kind)
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_err: std::collections::TryReserveError) -> Self {
        Error(ErrorOrigin::Simulator, ErrorKind::AllocationFailed)
    }
}

#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorOrigin {
    Config,
    ConfigFile,

    Workload,
    FrameTable,
    Policy,
    Simulator,

    Other,
}

impl ErrorOrigin {
    /// Returns a static string representing the type of error.
    pub fn to_str(self) -> &'static str {
        match self {
            ErrorOrigin::Config => "config",
            ErrorOrigin::ConfigFile => "config file",

            ErrorOrigin::Workload => "workload",
            ErrorOrigin::FrameTable => "frame table",
            ErrorOrigin::Policy => "policy",
            ErrorOrigin::Simulator => "simulator",

            ErrorOrigin::Other => "other",
        }
    }
}

#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    InvalidPageSize,
    InvalidFrameCount,
    InvalidInstructionCount,
    NotPageMultiple,
    InvalidLocalityFactor,
    InvalidSequenceLength,
    UnknownAlgorithm,
    UnknownAccessPattern,

    OutOfBounds,
    AllocationFailed,
    InvariantViolation,

    UnableToReadFile,
    Encoding,
}

impl ErrorKind {
    /// Returns a static string representing the type of error.
    pub fn to_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidPageSize => "page size must be positive",
            ErrorKind::InvalidFrameCount => "frame count must be positive",
            ErrorKind::InvalidInstructionCount => "total instruction count must be positive",
            ErrorKind::NotPageMultiple => {
                "total instruction count must be a multiple of the page size"
            }
            ErrorKind::InvalidLocalityFactor => "locality factor must be within 0 and 1",
            ErrorKind::InvalidSequenceLength => "sequence length must be positive",
            ErrorKind::UnknownAlgorithm => "unknown algorithm (expected fifo, lru or opt)",
            ErrorKind::UnknownAccessPattern => "access pattern must be within 0 and 4",

            ErrorKind::OutOfBounds => "out of bounds",
            ErrorKind::AllocationFailed => "unable to allocate simulator storage",
            ErrorKind::InvariantViolation => "frame table and page table are out of sync",

            ErrorKind::UnableToReadFile => "unable to read file",
            ErrorKind::Encoding => "encoding error",
        }
    }
}

/// Specialized `Result` type for pagesim results.
pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_classified() {
        let err = Error(ErrorOrigin::Config, ErrorKind::NotPageMultiple);
        assert!(err.is_config_error());

        let err = Error(ErrorOrigin::Simulator, ErrorKind::AllocationFailed);
        assert!(!err.is_config_error());

        let err = Error(ErrorOrigin::FrameTable, ErrorKind::InvariantViolation);
        assert!(!err.is_config_error());
    }

    #[test]
    fn display_contains_origin_and_kind() {
        let err = Error(ErrorOrigin::Config, ErrorKind::InvalidFrameCount);
        assert_eq!(err.to_string(), "config: frame count must be positive");
        assert_eq!(err.as_str(), "frame count must be positive");
    }
}
