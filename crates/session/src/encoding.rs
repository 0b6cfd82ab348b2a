//! Strict text decoders used by the loader.
//!
//! Single-byte decoders never accept characters that only appear in
//! binary data (C0 controls other than whitespace, DEL, the C1 range).
//! Without that rule Latin-1 would accept every byte sequence and
//! nothing could ever be reported as binary.

use encoding_rs::WINDOWS_1252;

/// Text encodings the loader knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
    Windows1252,
}

/// Fallback order after UTF-8 fails.
pub(crate) const FALLBACK_LADDER: [Encoding; 2] = [Encoding::Latin1, Encoding::Windows1252];

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
            Encoding::Windows1252 => "windows-1252",
        }
    }

    /// Decode `bytes`, or `None` if they are not text in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => {
                let text = std::str::from_utf8(bytes).ok()?;
                if text.contains('\0') {
                    return None;
                }
                Some(text.to_string())
            }
            Encoding::Latin1 => bytes
                .iter()
                .map(|&b| Some(b as char).filter(|&c| !is_binary_char(c)))
                .collect(),
            Encoding::Windows1252 => {
                // Undefined bytes decode to their C1 code point and are rejected below
                let text = WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)?;
                if text.chars().any(is_binary_char) {
                    return None;
                }
                Some(text.into_owned())
            }
        }
    }
}

fn is_binary_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' | '\u{0C}' | '\u{1B}' => false,
        '\0'..='\u{1F}' | '\u{7F}'..='\u{9F}' => true,
        _ => false,
    }
}
