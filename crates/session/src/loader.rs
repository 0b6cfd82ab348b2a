//! File loading with encoding fallback.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::encoding::{Encoding, FALLBACK_LADDER};

/// Why a file could not be turned into text.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("content is binary or uses an unsupported encoding")]
    BinaryOrUndecodable,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Decoded file content and the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: Encoding,
}

/// Read `path` from disk and decode it.
///
/// Size limits are the caller's business; this reads the whole file.
pub fn load(path: &Path) -> Result<Decoded, LoadError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Decode raw bytes: strict UTF-8 first, then each fallback encoding in
/// order. The first success wins.
pub fn decode(bytes: &[u8]) -> Result<Decoded, LoadError> {
    std::iter::once(Encoding::Utf8)
        .chain(FALLBACK_LADDER)
        .find_map(|encoding| {
            encoding
                .decode(bytes)
                .map(|text| Decoded { text, encoding })
        })
        .ok_or(LoadError::BinaryOrUndecodable)
}
