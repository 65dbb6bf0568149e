use std::fs::{self, File};
use std::path::{Path, PathBuf};

use thiserror::Error;
use wp_pest_core::merge_tree;
use zip::result::ZipError;
use zip::ZipArchive;

/// Failures while unpacking and assembling a downloaded archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed opening zip archive {}", .path.display())]
    CorruptArchive {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    #[error("Failed extracting zip file")]
    ExtractionFailed {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    #[error("Failed removing consumed zip archive {}", .path.display())]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed merging extracted files from {} into {}", .source_dir.display(), .destination.display())]
    MergeFailed {
        source_dir: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Unpacks `zip_path` into `extract_root`, deletes the consumed zip, then
/// flattens the nested `inner_dir` the archive wraps its content in into
/// `merge_into` (files overwrite on collision, the emptied wrapper
/// directory is removed). The overlay pass points `merge_into` at a
/// subdirectory of `extract_root`. Failures abort the whole operation
/// with no partial rollback.
pub fn extract_and_flatten(
    zip_path: &Path,
    extract_root: &Path,
    inner_dir: &str,
    merge_into: &Path,
) -> Result<(), ExtractError> {
    let file = File::open(zip_path).map_err(|source| ExtractError::CorruptArchive {
        path: zip_path.to_path_buf(),
        source: ZipError::Io(source),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|source| ExtractError::CorruptArchive {
        path: zip_path.to_path_buf(),
        source,
    })?;
    archive
        .extract(extract_root)
        .map_err(|source| ExtractError::ExtractionFailed {
            path: zip_path.to_path_buf(),
            source,
        })?;
    fs::remove_file(zip_path).map_err(|source| ExtractError::CleanupFailed {
        path: zip_path.to_path_buf(),
        source,
    })?;

    let nested = extract_root.join(inner_dir);
    merge_tree(&nested, merge_into).map_err(|source| ExtractError::MergeFailed {
        source_dir: nested.clone(),
        destination: merge_into.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        inner_dir,
        destination = %merge_into.display(),
        "flattened extracted archive"
    );
    Ok(())
}
