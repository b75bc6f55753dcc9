//! ExifTool process management for filmtag.
//!
//! All metadata reading and writing goes through the external `exiftool`
//! binary. This module builds its argument lists and runs it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::gear::{Camera, FilmStock, Lens};

/// Tags shown by `filmtag inspect`, in display order.
pub const INSPECT_TAGS: &[&str] = &[
    "Make",
    "Model",
    "LensModel",
    "FocalLength",
    "MaxApertureValue",
    "ISO",
    "UserComment",
];

/// Errors that can occur while running exiftool.
#[derive(Debug, thiserror::Error)]
pub enum ExifToolError {
    #[error("exiftool not found in PATH. Install from https://exiftool.org")]
    NotFound,

    #[error("exiftool test failed: {0}")]
    VersionCheckFailed(String),

    #[error("failed to run exiftool: {0}")]
    SpawnFailed(std::io::Error),

    #[error("exiftool exited with code {exit_code:?}")]
    ProcessFailed { exit_code: Option<i32> },

    #[error("could not parse exiftool output: {0}")]
    InvalidOutput(#[from] serde_json::Error),

    #[error("exiftool returned no metadata for {}", .0.display())]
    NoMetadata(PathBuf),
}

impl ExifToolError {
    fn from_spawn(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExifToolError::NotFound
        } else {
            ExifToolError::SpawnFailed(e)
        }
    }
}

/// Tag arguments that drop everything but the ICC colour profile.
pub fn strip_args() -> Vec<String> {
    [
        "-all=",
        "-tagsfromfile",
        "@",
        "-icc_profile",
        "-overwrite_original",
        "-P",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Tag arguments describing the camera, lens and film a roll was shot on.
pub fn apply_args(camera: &Camera, lens: &Lens, film: &FilmStock) -> Vec<String> {
    vec![
        format!("-make={}", camera.make),
        format!("-model={}", camera.model),
        format!("-lensmodel={}", lens.name),
        format!("-focallength={}", lens.focal_length),
        format!("-maxaperturevalue={:.1}", lens.max_aperture),
        format!("-iso={}", film.iso),
        format!("-usercomment={}", film.name),
        "-overwrite_original".to_string(),
        "-P".to_string(),
    ]
}

/// Arguments for reading the inspected tags of one file as JSON.
pub fn read_args() -> Vec<String> {
    let mut args = vec!["-j".to_string()];
    args.extend(INSPECT_TAGS.iter().map(|tag| format!("-{}", tag)));
    args
}

/// Metadata currently stored in a file, as reported by `exiftool -j`.
#[derive(Debug, Clone, PartialEq)]
pub struct TagReport {
    pub source_file: PathBuf,
    /// (tag, value) pairs for the inspected tags present in the file
    pub tags: Vec<(String, String)>,
}

/// Parse the JSON printed by `exiftool -j` for a single file.
pub fn parse_tag_report(json: &str, file: &Path) -> Result<TagReport, ExifToolError> {
    let mut entries: Vec<BTreeMap<String, serde_json::Value>> = serde_json::from_str(json)?;
    if entries.is_empty() {
        return Err(ExifToolError::NoMetadata(file.to_path_buf()));
    }
    let entry = entries.swap_remove(0);

    let source_file = entry
        .get("SourceFile")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .unwrap_or_else(|| file.to_path_buf());

    let tags = INSPECT_TAGS
        .iter()
        .filter_map(|&tag| {
            let value = match entry.get(tag)? {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((tag.to_string(), value))
        })
        .collect();

    Ok(TagReport { source_file, tags })
}

/// Handle on the exiftool binary.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: String,
    dry_run: bool,
}

impl Default for ExifTool {
    fn default() -> Self {
        Self {
            program: "exiftool".to_string(),
            dry_run: false,
        }
    }
}

impl ExifTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable (name on PATH or full path).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Print write commands instead of running them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Check that exiftool can be run. Returns its version string.
    pub fn check(&self) -> Result<String, ExifToolError> {
        let output = Command::new(&self.program)
            .arg("-ver")
            .stdin(Stdio::null())
            .output()
            .map_err(ExifToolError::from_spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExifToolError::VersionCheckFailed(format!(
                "exit code {:?} {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        log::debug!("Using exiftool {}", version);
        Ok(version)
    }

    /// Remove all metadata left by the scanner, keeping the colour profile.
    pub fn strip_scanner_metadata(&self, files: &[PathBuf]) -> Result<(), ExifToolError> {
        self.run(&strip_args(), files)
    }

    /// Write camera, lens and film metadata.
    pub fn apply_film_metadata(
        &self,
        camera: &Camera,
        lens: &Lens,
        film: &FilmStock,
        files: &[PathBuf],
    ) -> Result<(), ExifToolError> {
        self.run(&apply_args(camera, lens, film), files)
    }

    /// Read the inspected tags from a single file.
    pub fn read_tags(&self, file: &Path) -> Result<TagReport, ExifToolError> {
        let output = Command::new(&self.program)
            .args(read_args())
            .arg(file)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(ExifToolError::from_spawn)?;

        if !output.status.success() {
            return Err(ExifToolError::ProcessFailed {
                exit_code: output.status.code(),
            });
        }

        parse_tag_report(&String::from_utf8_lossy(&output.stdout), file)
    }

    /// Render the command line for display.
    pub fn command_line(&self, args: &[String], files: &[PathBuf]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(args.iter().map(|a| shell_quote(a)));
        parts.extend(files.iter().map(|f| shell_quote(&f.to_string_lossy())));
        parts.join(" ")
    }

    /// Run exiftool with inherited stdout/stderr. On unix the child gets its
    /// own process group so Ctrl+C is left to filmtag's handler.
    fn run(&self, args: &[String], files: &[PathBuf]) -> Result<(), ExifToolError> {
        let line = self.command_line(args, files);
        if self.dry_run {
            println!("{}", line);
            return Ok(());
        }
        log::debug!("Running: {}", line);

        let mut command = Command::new(&self.program);
        command.args(args).args(files).stdin(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // Own process group: a terminal Ctrl+C only reaches filmtag, and
            // the in-place rewrite runs to completion.
            command.process_group(0);
        }

        let status = command.status().map_err(ExifToolError::from_spawn)?;

        if !status.success() {
            log::warn!("exiftool failed on {} files", files.len());
            return Err(ExifToolError::ProcessFailed {
                exit_code: status.code(),
            });
        }
        Ok(())
    }
}

/// Single-quote an argument for display if it contains anything unusual.
fn shell_quote(arg: &str) -> String {
    let plain = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./@:,+".contains(c));
    if plain && !arg.is_empty() {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
