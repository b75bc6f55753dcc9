//! JPEG discovery and validation.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors raised while collecting the files of a batch.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported file type: {} (only JPEG supported)", .0.display())]
    Unsupported(PathBuf),

    #[error("no JPEG files found in {}", .0.display())]
    NoJpegFiles(PathBuf),

    #[error("failed to scan directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// True for `.jpg` / `.jpeg`, in any case.
pub fn is_jpeg(path: &Path) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => ["jpg", "jpeg"].contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Recursively list the JPEG files under `root`, sorted by path.
pub fn scan_directory(root: &Path) -> Result<Vec<PathBuf>, FileError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() && is_jpeg(entry.path()) {
            files.push(entry.into_path());
        }
    }
    log::debug!("Found {} JPEG files under {}", files.len(), root.display());
    Ok(files)
}

/// Collect the batch: a single file when given, otherwise a directory scan.
pub fn collect(file: Option<&Path>, dir: &Path) -> Result<Vec<PathBuf>, FileError> {
    let files = match file {
        Some(file) => vec![file.to_path_buf()],
        None => scan_directory(dir)?,
    };

    if files.is_empty() {
        return Err(FileError::NoJpegFiles(dir.to_path_buf()));
    }
    Ok(files)
}

/// Every file must exist and be a JPEG.
pub fn validate_files(files: &[PathBuf]) -> Result<(), FileError> {
    for file in files {
        if !file.exists() {
            return Err(FileError::NotFound(file.clone()));
        }
        if !is_jpeg(file) {
            return Err(FileError::Unsupported(file.clone()));
        }
    }
    Ok(())
}
