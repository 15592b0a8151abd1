use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SweepError {
    Io(io::Error),
    Pattern(globset::Error),
    NotADirectory(PathBuf),
    ThresholdOutOfRange { days: u32, max: u32 },
    Report { path: PathBuf, message: String },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::Io(err) => write!(f, "console i/o failed: {err}"),
            SweepError::Pattern(err) => write!(f, "invalid match pattern: {err}"),
            SweepError::NotADirectory(path) => {
                write!(f, "{} is not a directory", path.display())
            }
            SweepError::ThresholdOutOfRange { days, max } => {
                write!(f, "threshold of {days} days exceeds the maximum of {max}")
            }
            SweepError::Report { path, message } => {
                write!(f, "failed to write report {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::Io(err) => Some(err),
            SweepError::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SweepError {
    fn from(value: io::Error) -> Self {
        SweepError::Io(value)
    }
}

impl From<globset::Error> for SweepError {
    fn from(value: globset::Error) -> Self {
        SweepError::Pattern(value)
    }
}
