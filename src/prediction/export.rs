//! Saving the detailed CSV export the way a browser download would.

use std::path::{Path, PathBuf};

use super::api::{PredictionApi, PredictionError};
use super::input::CsvUpload;

/// File name offered for the detailed export.
pub const EXPORT_FILE_NAME: &str = "exoplanet_predictions.csv";

const MAX_NAME_ATTEMPTS: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Request(#[from] PredictionError),
    #[error("Failed to prepare download folder {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("No free file name for exoplanet_predictions.csv in {0}")]
    NameExhausted(PathBuf),
}

/// Candidate name for the `attempt`-th collision: `name.csv`, `name (1).csv`, ...
pub fn numbered_file_name(file_name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({attempt}).{ext}"),
        _ => format!("{file_name} ({attempt})"),
    }
}

/// Request the detailed export for `upload` and store it in `dir`.
///
/// The body is streamed into a hidden temporary file first, so a failed
/// transfer never leaves a truncated CSV behind. Existing files are kept and
/// the export takes the first free numbered name.
pub fn save_detailed_export(
    api: &dyn PredictionApi,
    upload: &CsvUpload,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut partial = tempfile::Builder::new()
        .prefix(".exoplanet_predictions")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(|source| ExportError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    let written = api.export_csv(upload, partial.as_file_mut())?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(numbered_file_name(EXPORT_FILE_NAME, attempt));
        match partial.persist_noclobber(&path) {
            Ok(_) => {
                tracing::info!("Saved detailed export ({written} bytes) to {}", path.display());
                return Ok(path);
            }
            Err(err) if err.error.kind() == std::io::ErrorKind::AlreadyExists => {
                partial = err.file;
            }
            Err(err) => {
                return Err(ExportError::Write {
                    path,
                    source: err.error,
                });
            }
        }
    }
    Err(ExportError::NameExhausted(dir.to_path_buf()))
}
