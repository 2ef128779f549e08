//! Character encodings and field delimiters supported for CSV exchange.
//!
//! Windows-1252, UTF-8 and UTF-16 go through `encoding_rs`. ASCII, Latin-1
//! and UTF-32 are simple enough to map directly. Decoding is strict: bytes
//! that are not valid in the chosen encoding fail instead of being replaced.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use encoding_rs::{UTF_8, UTF_16LE, WINDOWS_1252};

use crate::error::Error;

const UTF32LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
const UTF32BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Text encoding of a CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// 7-bit ASCII.
    #[default]
    Ascii,
    Utf8,
    /// UTF-16, little endian.
    Utf16,
    /// UTF-32, little endian.
    Utf32,
    Windows1252,
    /// ISO-8859-1 (Latin-1): every byte maps to the code point of the same value.
    Iso88591,
}

impl TextEncoding {
    pub const ALL: [TextEncoding; 6] = [
        TextEncoding::Ascii,
        TextEncoding::Utf8,
        TextEncoding::Utf16,
        TextEncoding::Utf32,
        TextEncoding::Windows1252,
        TextEncoding::Iso88591,
    ];

    /// Decodes `bytes` into a string.
    ///
    /// A leading byte-order mark wins over the configured encoding and is
    /// stripped from the result.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, Error> {
        if bytes.starts_with(&UTF32LE_BOM) {
            return decode_utf32(&bytes[4..], u32::from_le_bytes, "UTF-32");
        }
        if bytes.starts_with(&UTF32BE_BOM) {
            return decode_utf32(&bytes[4..], u32::from_be_bytes, "UTF-32BE");
        }
        if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(bytes) {
            return decode_strict(encoding, &bytes[bom_len..]);
        }

        match self {
            TextEncoding::Ascii => {
                if bytes.is_ascii() {
                    // ASCII is a subset of UTF-8.
                    Ok(bytes.iter().map(|&b| b as char).collect())
                } else {
                    Err(self.decode_error())
                }
            }
            TextEncoding::Utf8 => decode_strict(UTF_8, bytes),
            TextEncoding::Utf16 => decode_strict(UTF_16LE, bytes),
            TextEncoding::Utf32 => decode_utf32(bytes, u32::from_le_bytes, "UTF-32"),
            TextEncoding::Windows1252 => decode_strict(WINDOWS_1252, bytes),
            TextEncoding::Iso88591 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    /// Encodes `text`. UTF-16 and UTF-32 output starts with a byte-order mark.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, Error> {
        match self {
            TextEncoding::Ascii => {
                if let Some(c) = text.chars().find(|c| !c.is_ascii()) {
                    return Err(self.encode_error(c));
                }
                Ok(text.as_bytes().to_vec())
            }
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf16 => {
                let mut out = Vec::with_capacity(2 + text.len() * 2);
                out.extend_from_slice(&[0xFF, 0xFE]);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                Ok(out)
            }
            TextEncoding::Utf32 => {
                let mut out = Vec::with_capacity(4 + text.len() * 4);
                out.extend_from_slice(&UTF32LE_BOM);
                for c in text.chars() {
                    out.extend_from_slice(&(c as u32).to_le_bytes());
                }
                Ok(out)
            }
            TextEncoding::Windows1252 => {
                let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
                if had_errors {
                    let mut buf = [0u8; 4];
                    let bad = text
                        .chars()
                        .find(|c| WINDOWS_1252.encode(c.encode_utf8(&mut buf)).2)
                        .unwrap_or(char::REPLACEMENT_CHARACTER);
                    return Err(self.encode_error(bad));
                }
                Ok(bytes.into_owned())
            }
            TextEncoding::Iso88591 => text
                .chars()
                .map(|c| u8::try_from(c as u32).map_err(|_| self.encode_error(c)))
                .collect(),
        }
    }

    /// Human readable name, as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Ascii => "ASCII",
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16 => "UTF-16",
            TextEncoding::Utf32 => "UTF-32",
            TextEncoding::Windows1252 => "Windows-1252",
            TextEncoding::Iso88591 => "ISO-8859-1",
        }
    }

    fn decode_error(&self) -> Error {
        Error::Decode {
            encoding: self.name().to_string(),
        }
    }

    fn encode_error(&self, character: char) -> Error {
        Error::Encode {
            encoding: self.name().to_string(),
            character,
        }
    }
}

fn decode_strict(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> Result<String, Error> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| Error::Decode {
            encoding: encoding.name().to_string(),
        })
}

fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32, name: &str) -> Result<String, Error> {
    let error = || Error::Decode {
        encoding: name.to_string(),
    };
    let chunks = bytes.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        return Err(error());
    }
    chunks
        .map(|chunk| {
            let code = unit([chunk[0], chunk[1], chunk[2], chunk[3]]);
            char::from_u32(code).ok_or_else(error)
        })
        .collect()
}

impl Display for TextEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts the keys offered by the import form, case-insensitively:
/// `ansi`/`ascii`, `utf-8`, `unicode`/`utf-16`, `utf-32`, `windows-1252`,
/// `iso-8859-1`. Dashes and underscores are optional.
impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "ansi" | "ascii" | "usascii" => Ok(TextEncoding::Ascii),
            "utf8" => Ok(TextEncoding::Utf8),
            "unicode" | "utf16" | "utf16le" => Ok(TextEncoding::Utf16),
            "utf32" | "utf32le" => Ok(TextEncoding::Utf32),
            "windows1252" | "cp1252" => Ok(TextEncoding::Windows1252),
            "iso88591" | "latin1" => Ok(TextEncoding::Iso88591),
            _ => Err(Error::InvalidOption(format!(
                "unknown encoding '{}'. Supported: ascii, utf-8, utf-16, utf-32, windows-1252, iso-8859-1",
                s
            ))),
        }
    }
}

/// Single-character CSV field delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
    Caret,
    Tilde,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Caret => '^',
            Delimiter::Tilde => '~',
        }
    }

    /// The delimiter as the byte the `csv` crate expects.
    pub fn as_byte(&self) -> u8 {
        self.as_char() as u8
    }
}

impl Display for Delimiter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Delimiter::Tab => write!(f, "tab"),
            other => write!(f, "{}", other.as_char()),
        }
    }
}

impl FromStr for Delimiter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A lone tab must not be trimmed away.
        if s == "\t" {
            return Ok(Delimiter::Tab);
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "," | "comma" => Ok(Delimiter::Comma),
            ";" | "semicolon" => Ok(Delimiter::Semicolon),
            "tab" | "\\t" => Ok(Delimiter::Tab),
            "|" | "pipe" => Ok(Delimiter::Pipe),
            "^" | "caret" => Ok(Delimiter::Caret),
            "~" | "tilde" => Ok(Delimiter::Tilde),
            _ => Err(Error::InvalidOption(format!(
                "unsupported delimiter '{}'. Supported: , ; tab | ^ ~",
                s
            ))),
        }
    }
}
