//! `dictsync.toml` loading and flag/config/default layering.

use dictsync::{Delimiter, ExportOptions, ImportOptions, TextEncoding};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "dictsync.toml";
pub const DEFAULT_STORE: &str = "dictionary.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DictsyncConfig {
    /// Path of the JSON dictionary store.
    pub store: Option<String>,
    pub export: Option<ExportCfg>,
    pub import: Option<ImportCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportCfg {
    /// Culture names, in column order.
    pub languages: Option<Vec<String>>,
    pub encoding: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportCfg {
    pub encoding: Option<String>,
    pub delimiter: Option<String>,
    #[serde(rename = "override")]
    pub override_existing: Option<bool>,
}

/// Loads the configuration.
///
/// An explicit `path` must exist. Without one, `dictsync.toml` in the
/// current directory is used when present and defaults apply otherwise.
pub fn load_config(path: Option<&Path>) -> Result<DictsyncConfig, String> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let implicit = PathBuf::from(CONFIG_FILE_NAME);
            if !implicit.is_file() {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(DictsyncConfig::default());
            }
            implicit
        }
    };

    let text = std::fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
    let config = parse_config(&text)
        .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<DictsyncConfig, String> {
    toml::from_str(text).map_err(|e| e.to_string())
}

impl DictsyncConfig {
    pub fn store_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.store.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE))
    }

    /// Culture names requested for export when no `--lang` is given.
    pub fn export_languages(&self) -> Vec<String> {
        self.export
            .as_ref()
            .and_then(|cfg| cfg.languages.clone())
            .unwrap_or_default()
    }

    pub fn export_options(
        &self,
        encoding: Option<&str>,
        delimiter: Option<&str>,
    ) -> Result<ExportOptions, String> {
        let cfg = self.export.clone().unwrap_or_default();
        let mut options = ExportOptions::new();
        if let Some(encoding) = encoding.or(cfg.encoding.as_deref()) {
            options = options.with_encoding(parse_encoding(encoding)?);
        }
        if let Some(delimiter) = delimiter.or(cfg.delimiter.as_deref()) {
            options = options.with_delimiter(parse_delimiter(delimiter)?);
        }
        Ok(options)
    }

    /// `override_flag` can only switch override on; leaving it off defers
    /// to the config file.
    pub fn import_options(
        &self,
        encoding: Option<&str>,
        delimiter: Option<&str>,
        override_flag: bool,
        confirmed: bool,
    ) -> Result<ImportOptions, String> {
        let cfg = self.import.clone().unwrap_or_default();
        let mut options = ImportOptions::new()
            .with_override(override_flag || cfg.override_existing.unwrap_or(false))
            .with_confirmed(confirmed);
        if let Some(encoding) = encoding.or(cfg.encoding.as_deref()) {
            options = options.with_encoding(parse_encoding(encoding)?);
        }
        if let Some(delimiter) = delimiter.or(cfg.delimiter.as_deref()) {
            options = options.with_delimiter(parse_delimiter(delimiter)?);
        }
        Ok(options)
    }
}

fn parse_encoding(value: &str) -> Result<TextEncoding, String> {
    value.parse::<TextEncoding>().map_err(|e| e.to_string())
}

fn parse_delimiter(value: &str) -> Result<Delimiter, String> {
    value.parse::<Delimiter>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
store = "data/dictionary.json"

[export]
languages = ["en-US", "fr-FR"]
encoding = "utf-16"
delimiter = ";"

[import]
encoding = "utf-8"
delimiter = "tab"
override = true
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.store.as_deref(), Some("data/dictionary.json"));
        assert_eq!(config.export_languages(), vec!["en-US", "fr-FR"]);

        let export = config.export_options(None, None).unwrap();
        assert_eq!(export.encoding, TextEncoding::Utf16);
        assert_eq!(export.delimiter, Delimiter::Semicolon);

        let import = config.import_options(None, None, false, false).unwrap();
        assert_eq!(import.encoding, TextEncoding::Utf8);
        assert_eq!(import.delimiter, Delimiter::Tab);
        assert!(import.override_existing);
        assert!(!import.confirmed);
    }

    #[test]
    fn test_flags_win_over_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(
            config.store_path(Some(PathBuf::from("other.json"))),
            PathBuf::from("other.json")
        );
        let export = config.export_options(Some("windows-1252"), Some("|")).unwrap();
        assert_eq!(export.encoding, TextEncoding::Windows1252);
        assert_eq!(export.delimiter, Delimiter::Pipe);
    }

    #[test]
    fn test_defaults_without_config() {
        let config = DictsyncConfig::default();
        assert_eq!(config.store_path(None), PathBuf::from(DEFAULT_STORE));
        assert!(config.export_languages().is_empty());

        let export = config.export_options(None, None).unwrap();
        assert_eq!(export.encoding, TextEncoding::Utf8);
        let import = config.import_options(None, None, false, true).unwrap();
        assert_eq!(import.encoding, TextEncoding::Ascii);
        assert_eq!(import.delimiter, Delimiter::Comma);
        assert!(!import.override_existing);
        assert!(import.confirmed);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let config = parse_config("[import]\nencoding = \"ebcdic\"\n").unwrap();
        let err = config.import_options(None, None, false, false).unwrap_err();
        assert!(err.contains("ebcdic"));

        assert!(parse_config("stor = \"typo.json\"\n").is_err());
    }
}
