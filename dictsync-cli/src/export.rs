use chrono::NaiveDate;
use dictsync::{DictionaryStore, ExportOptions, LanguageId, LanguageRegistry, export_csv};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::validation::validate_output_path;

/// Which languages to put in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSelection {
    All,
    /// Culture names, in column order.
    Named(Vec<String>),
}

impl LanguageSelection {
    /// `--all-languages` wins, then `--lang`, then the config list; with
    /// none of them every language is exported.
    pub fn from_sources(all: bool, flags: Vec<String>, configured: Vec<String>) -> Self {
        if all {
            LanguageSelection::All
        } else if !flags.is_empty() {
            LanguageSelection::Named(flags)
        } else if !configured.is_empty() {
            LanguageSelection::Named(configured)
        } else {
            LanguageSelection::All
        }
    }

    /// Culture names unknown to the registry are skipped with a warning.
    pub fn resolve(&self, registry: &LanguageRegistry) -> Vec<LanguageId> {
        match self {
            LanguageSelection::All => registry.ids(),
            LanguageSelection::Named(names) => names
                .iter()
                .filter_map(|name| match registry.by_culture_name(name) {
                    Some(language) => Some(language.id),
                    None => {
                        warn!(culture = %name, "unknown language, left out of the export");
                        None
                    }
                })
                .collect(),
        }
    }
}

/// Where the export lands: `output` if it names a file, inside `output` if
/// it is a directory, otherwise the dated default name in the current
/// directory.
pub fn output_path(output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

/// Run the export command. Returns the written path and row count.
pub fn run_export_command<S: DictionaryStore>(
    store: &S,
    selection: &LanguageSelection,
    output: Option<&Path>,
    options: &ExportOptions,
    date: NaiveDate,
) -> Result<(PathBuf, usize), String> {
    let registry = store.languages().map_err(|e| e.to_string())?;
    let tree = store.load_tree().map_err(|e| e.to_string())?;
    let ids = selection.resolve(&registry);

    let export = export_csv(&tree, &registry, &ids, options, date).map_err(|e| e.to_string())?;

    let path = output_path(output, &export.file_name);
    validate_output_path(&path)?;
    std::fs::write(&path, &export.bytes)
        .map_err(|e| format!("Error writing to {}: {}", path.display(), e))?;
    Ok((path, export.rows))
}
