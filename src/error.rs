use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum LyricrollError {
    InputNotFound(PathBuf),
    NoValidInput,
    MalformedTimestamp { line: usize, reason: String },
    WriteFailure { path: PathBuf, source: io::Error },
}

impl Error for LyricrollError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LyricrollError::WriteFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for LyricrollError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LyricrollError::InputNotFound(path) => {
                write!(fmt, "Input file not found: '{}'", path.display())
            }
            LyricrollError::NoValidInput => {
                write!(fmt, "No line carries a valid [mm:ss.xx] timestamp")
            }
            LyricrollError::MalformedTimestamp { line, reason } => {
                write!(fmt, "Malformed timestamp on line {}: {}", line, reason)
            }
            LyricrollError::WriteFailure { path, .. } => {
                write!(fmt, "Failed to write output file: '{}'", path.display())
            }
        }
    }
}
