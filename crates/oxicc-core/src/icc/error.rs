//! Primitive decode errors
//!
//! Raised by the big-endian readers in [`super::types`]. Callers translate
//! these into the public [`crate::IccError`] taxonomy depending on where the
//! read happened: header and tag table reads become `NotEnoughBytes`,
//! element payload reads become `NotParseable`.

use thiserror::Error;

use crate::error::IccError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// `offset + width` runs past the end of the buffer
    #[error("read of {width} bytes at offset {offset} exceeds buffer length {len}")]
    OutOfRange {
        offset: usize,
        width: usize,
        len: usize,
    },
}

impl DecodeError {
    /// Surface as a structural "not enough bytes" failure
    pub(crate) fn into_not_enough_bytes(self) -> IccError {
        match self {
            Self::OutOfRange { offset, width, len } => IccError::NotEnoughBytes {
                expected: offset.saturating_add(width),
                actual: len,
            },
        }
    }

    /// Surface as an inconsistent element payload, with context
    pub(crate) fn into_not_parseable(self, context: &str) -> IccError {
        IccError::NotParseable(format!("{context}: {self}"))
    }
}
