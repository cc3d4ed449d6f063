//! Error types for sheet generation

use crate::pack::SheetKind;
use thiserror::Error;

/// A non-fatal problem noticed while generating a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Fatal sheet generation failure.
///
/// A kind the pack has no cell map for is not an error: the generator
/// returns `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A procedural entrypoint was invoked for a file-backed pack
    #[error("Pack '{pack_id}' is not procedural")]
    NotProcedural { pack_id: String },
    /// No drawing surface can be allocated at this size
    #[error("Cannot allocate a {width}x{height} sheet")]
    InvalidSurface { width: u64, height: u64 },
    /// The variant entrypoint only accepts main, construction and abandoned
    #[error("'{kind}' is not a main-grid variant")]
    InvalidVariant { kind: SheetKind },
}
