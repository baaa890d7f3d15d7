//! Error types for oxicc

use thiserror::Error;

use crate::pipeline::Intent;

/// Result type for oxicc operations
pub type Result<T> = std::result::Result<T, IccError>;

/// Errors that can occur while loading, validating or evaluating a profile
///
/// Construction failures (`FileNotFound`, `NotEnoughBytes`, `NotParseable`)
/// are returned by [`crate::Profile`] constructors. The remaining kinds are
/// produced by the compatibility checks and by pipeline assembly.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum IccError {
    /// The path does not resolve to a readable file
    #[error("Profile file not found: {path}")]
    FileNotFound { path: String },

    /// Buffer shorter than the declared or minimum structure size
    #[error("Not enough bytes: expected {expected}, got {actual}")]
    NotEnoughBytes { expected: usize, actual: usize },

    /// Tag table or element payload is internally inconsistent
    #[error("Profile not parseable: {0}")]
    NotParseable(String),

    /// The file signature at bytes 36..40 is not 'acsp'
    #[error("Wrong profile signature: 0x{0:08X} (expected 'acsp')")]
    WrongSignature(u32),

    /// Profile class, colour space or PCS combination is not evaluated here
    #[error("Unsupported profile header: {0}")]
    UnsupportedHeader(String),

    /// A tag required by the requested intent is missing
    #[error("Unsupported rendering intent {intent:?}: {reason}")]
    UnsupportedIntent { intent: Intent, reason: String },

    /// A LUT tag uses an element combination that is not implemented
    #[error("Unsupported LUT structure: {0}")]
    UnsupportedLut(String),

    /// A pipeline stage received a vector of the wrong length
    #[error("Shape mismatch in {stage} stage: expected {expected} channels, got {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Category of an [`IccError`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IccErrorKind {
    FileNotFound,
    NotEnoughBytes,
    NotParseable,
    WrongSignature,
    UnsupportedHeader,
    UnsupportedIntent,
    UnsupportedLut,
    ShapeMismatch,
}

impl IccError {
    /// The category of this error
    pub fn kind(&self) -> IccErrorKind {
        match self {
            Self::FileNotFound { .. } => IccErrorKind::FileNotFound,
            Self::NotEnoughBytes { .. } => IccErrorKind::NotEnoughBytes,
            Self::NotParseable(_) => IccErrorKind::NotParseable,
            Self::WrongSignature(_) => IccErrorKind::WrongSignature,
            Self::UnsupportedHeader(_) => IccErrorKind::UnsupportedHeader,
            Self::UnsupportedIntent { .. } => IccErrorKind::UnsupportedIntent,
            Self::UnsupportedLut(_) => IccErrorKind::UnsupportedLut,
            Self::ShapeMismatch { .. } => IccErrorKind::ShapeMismatch,
        }
    }

    /// True for the kinds raised while constructing a profile
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self.kind(),
            IccErrorKind::FileNotFound | IccErrorKind::NotEnoughBytes | IccErrorKind::NotParseable
        )
    }

    pub(crate) fn not_parseable(msg: impl Into<String>) -> Self {
        Self::NotParseable(msg.into())
    }

    pub(crate) fn unsupported_lut(msg: impl Into<String>) -> Self {
        Self::UnsupportedLut(msg.into())
    }
}
