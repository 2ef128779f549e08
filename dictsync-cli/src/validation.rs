use std::path::Path;

/// Validate file path exists and is readable
pub fn validate_file_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("File does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Path is not a file: {}", path.display()));
    }

    Ok(())
}

/// Validate the output directory exists or can be created
pub fn validate_output_path(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Cannot create output directory: {}", e))?;
        }
    }

    Ok(())
}

/// Validate an import input: readable file with a `.csv` extension
pub fn validate_import_input(path: &Path) -> Result<(), String> {
    validate_file_path(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    dictsync::upload::validate_extension(file_name).map_err(|e| e.to_string())
}

/// Validate the store file exists before reading from it
pub fn validate_store_path(path: &Path) -> Result<(), String> {
    validate_file_path(path).map_err(|_| {
        format!(
            "Dictionary store not found: {}. Pass --store or set `store` in dictsync.toml",
            path.display()
        )
    })
}
