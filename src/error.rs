use std::path::PathBuf;

/// Errors raised by the layers around the rank tree: reading sequences,
/// managing frames and validating per-frame queries.
///
/// The tree and the range counting functions themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A sequence file could not be opened or read.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to an already-open stream failed.
    #[error("i/o error: {0}")]
    Stream(#[from] std::io::Error),

    /// A token in a sequence file is not an integer.
    #[error("line {line}: invalid symbol {token:?}")]
    Parse { line: usize, token: String },

    /// A frame was given no symbols.
    #[error("no data loaded from {name}")]
    EmptySequence { name: String },

    /// A query that needs frames was issued against an empty frame set.
    #[error("no frames loaded")]
    NoFrames,

    /// A frame index does not refer to a loaded frame.
    #[error("invalid frame index {index} ({count} frames loaded)")]
    UnknownFrame { index: usize, count: usize },

    /// A position is not inside the frame.
    #[error("index {index} out of range for frame of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An interval is empty or extends past the end of the frame.
    #[error("invalid range [{start}, {end}] for frame of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
