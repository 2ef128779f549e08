//! Staging of uploaded CSV files.
//!
//! An upload is copied into a temporary file that is removed when the
//! [`StagedUpload`] is dropped, whether the import succeeded or not.

use std::{
    io::{Read, Seek, SeekFrom},
    path::Path,
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Error;

/// Checks that `file_name` has a `.csv` extension (any case).
pub fn validate_extension(file_name: &str) -> Result<(), Error> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    if extension.eq_ignore_ascii_case("csv") {
        Ok(())
    } else {
        Err(Error::UnsupportedExtension(extension.to_string()))
    }
}

/// An uploaded file held on disk for the duration of one request.
#[derive(Debug)]
pub struct StagedUpload {
    file_name: String,
    staged: NamedTempFile,
}

impl StagedUpload {
    /// Validates the upload and copies it into a temporary file.
    ///
    /// `file_name` is the name the client sent; `None` means no file was
    /// part of the request.
    pub fn stage<R: Read>(file_name: Option<&str>, reader: R) -> Result<Self, Error> {
        Self::stage_in(std::env::temp_dir(), file_name, reader)
    }

    /// Like [`Self::stage`], staging inside `dir`.
    pub fn stage_in<P: AsRef<Path>, R: Read>(
        dir: P,
        file_name: Option<&str>,
        mut reader: R,
    ) -> Result<Self, Error> {
        let file_name = file_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(Error::MissingFile)?;
        validate_extension(file_name)?;

        let mut staged = tempfile::Builder::new()
            .prefix("dictsync-upload-")
            .suffix(".csv")
            .tempfile_in(dir)
            .map_err(Error::Io)?;
        let size = std::io::copy(&mut reader, staged.as_file_mut()).map_err(Error::Io)?;
        debug!(file = file_name, bytes = size, path = %staged.path().display(), "staged upload");

        Ok(Self {
            file_name: file_name.to_string(),
            staged,
        })
    }

    /// Name of the file as sent by the client.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Location of the staged copy. Only valid while `self` is alive.
    pub fn path(&self) -> &Path {
        self.staged.path()
    }

    /// Reads the staged content back.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, Error> {
        let file = self.staged.as_file_mut();
        file.seek(SeekFrom::Start(0)).map_err(Error::Io)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(Error::Io)?;
        Ok(bytes)
    }
}
