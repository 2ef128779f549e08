use dictsync::{
    ChangeSet, DictionaryStore, Error, ImportOptions, ImportSession, StagedUpload, TextEncoding,
};
use std::fs::File;
use std::path::Path;
use tracing::info;

use crate::validation::validate_import_input;

/// Reads a change set previously printed with `import --json`.
pub fn read_expected_changes(path: &Path) -> Result<ChangeSet, String> {
    let file = File::open(path).map_err(|e| format!("Error reading {}: {}", path.display(), e))?;
    serde_json::from_reader(file)
        .map_err(|e| format!("Invalid change set in {}: {}", path.display(), e))
}

/// Run the import command.
///
/// The input is staged like an upload so the same extension rules apply.
/// With `expected`, the import is only confirmed if it still produces
/// exactly those changes.
pub fn run_import_command<S: DictionaryStore>(
    store: &mut S,
    input: &Path,
    options: ImportOptions,
    expected: Option<&ChangeSet>,
) -> Result<ChangeSet, String> {
    validate_import_input(input)?;
    let file_name = input.file_name().and_then(|name| name.to_str());
    let file = File::open(input).map_err(|e| format!("Error reading {}: {}", input.display(), e))?;
    let mut upload = StagedUpload::stage(file_name, file).map_err(|e| e.to_string())?;
    let bytes = upload.read_bytes().map_err(|e| e.to_string())?;

    let mut session = ImportSession::new(store);
    let changes = match expected {
        Some(expected) => session.confirm_expected(&bytes, options, expected),
        None => session.run(&bytes, options),
    }
    .map_err(|e| describe_import_error(&e, &options))?;

    info!(
        file = upload.file_name(),
        changes = changes.len(),
        confirmed = options.confirmed,
        "import finished"
    );
    Ok(changes)
}

/// Error text for the terminal. Decoding failures under the default ASCII
/// encoding point at `--encoding`, since exports are written as UTF-8.
pub fn describe_import_error(error: &Error, options: &ImportOptions) -> String {
    match error {
        Error::Decode { .. } if options.encoding == TextEncoding::Ascii => format!(
            "{}. Files exported by dictsync are UTF-8: pass --encoding utf-8 (or set `encoding` under [import] in dictsync.toml)",
            error
        ),
        _ => error.to_string(),
    }
}
