//! Top-level error type for filmtag.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::exiftool::ExifToolError;
use crate::files::FileError;
use crate::gear::GearError;
use crate::prompt::PromptError;

/// Everything that can end a filmtag run.
#[derive(Debug, thiserror::Error)]
pub enum FilmtagError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gear(#[from] GearError),

    #[error(transparent)]
    Files(#[from] FileError),

    #[error(transparent)]
    ExifTool(#[from] ExifToolError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("failed to strip metadata: {0}")]
    Strip(#[source] ExifToolError),

    #[error("failed to apply metadata: {0}")]
    Apply(#[source] ExifToolError),

    #[error("interrupted after stripping {0} files; film metadata was not applied")]
    Interrupted(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("gear file already exists: {}", .0.display())]
    GearFileExists(PathBuf),
}
