use std::io;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
    #[error("no UTF-16 BOM found")]
    NoBom,
    #[error("transcoding cancelled")]
    Cancelled,
}

impl Error {
    /// True when the source ran dry before the bytes a step needed.
    pub fn is_eof(&self) -> bool {
        matches!(self, Error::Read(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    pub(crate) fn eof() -> Self {
        Error::Read(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended before the first code point",
        ))
    }
}
