//! Options for CSV export and import.

use tracing::warn;

use crate::encoding::{Delimiter, TextEncoding};

/// Options for [`crate::export::export_csv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub encoding: TextEncoding,
    pub delimiter: Delimiter,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Utf8,
            delimiter: Delimiter::Comma,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Options for one import pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOptions {
    /// Defaults to ASCII.
    pub encoding: TextEncoding,
    pub delimiter: Delimiter,
    /// Replace existing, non-empty, differing translations.
    pub override_existing: bool,
    /// Persist the touched items at the end of the pass.
    pub confirmed: bool,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_override(mut self, override_existing: bool) -> Self {
        self.override_existing = override_existing;
        self
    }

    pub fn with_confirmed(mut self, confirmed: bool) -> Self {
        self.confirmed = confirmed;
        self
    }

    /// Reads the string fields posted alongside an uploaded file.
    ///
    /// `override` and `confirmed` are on only for `"1"` or `"true"`. Unknown
    /// encodings fall back to ASCII and unknown delimiters to a comma, with
    /// a warning. Missing fields keep their defaults.
    pub fn from_form<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (name, value) in fields {
            match name {
                "override" => options.override_existing = form_flag(value),
                "confirmed" => options.confirmed = form_flag(value),
                "encoding" => {
                    options.encoding = value.parse().unwrap_or_else(|_| {
                        warn!(encoding = value, "unknown encoding, falling back to ASCII");
                        TextEncoding::Ascii
                    })
                }
                "delimiter" => {
                    options.delimiter = value.parse().unwrap_or_else(|_| {
                        warn!(delimiter = value, "unknown delimiter, falling back to comma");
                        Delimiter::Comma
                    })
                }
                _ => {}
            }
        }
        options
    }
}

fn form_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "True" | "TRUE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let import = ImportOptions::default();
        assert_eq!(import.encoding, TextEncoding::Ascii);
        assert_eq!(import.delimiter, Delimiter::Comma);
        assert!(!import.override_existing);
        assert!(!import.confirmed);

        assert_eq!(ExportOptions::default().encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_from_form() {
        let options = ImportOptions::from_form([
            ("override", "1"),
            ("encoding", "UTF-8"),
            ("delimiter", ";"),
            ("confirmed", "0"),
        ]);
        assert!(options.override_existing);
        assert!(!options.confirmed);
        assert_eq!(options.encoding, TextEncoding::Utf8);
        assert_eq!(options.delimiter, Delimiter::Semicolon);
    }

    #[test]
    fn test_from_form_fallbacks() {
        let options = ImportOptions::from_form([("encoding", "0"), ("delimiter", "0")]);
        assert_eq!(options.encoding, TextEncoding::Ascii);
        assert_eq!(options.delimiter, Delimiter::Comma);
        assert!(!options.override_existing);
    }

    #[test]
    fn test_builder() {
        let options = ImportOptions::new()
            .with_override(true)
            .with_confirmed(true)
            .with_delimiter(Delimiter::Tab);
        assert!(options.override_existing && options.confirmed);
        assert_eq!(options.delimiter, Delimiter::Tab);
    }
}
