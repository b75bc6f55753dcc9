//! Command handlers: the tagging run and the gear/inspect subcommands.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::args::{Args, Command, GearAction};
use crate::config;
use crate::error::FilmtagError;
use crate::exiftool::ExifTool;
use crate::files;
use crate::gear::{CameraType, FilmFormat, GearConfig};
use crate::prompt::Prompter;
use crate::session::Session;

/// Dispatch parsed arguments.
pub fn run(mut args: Args) -> Result<(), FilmtagError> {
    let gear_path = args.gear_file.clone().unwrap_or_else(config::default_path);

    match args.command.take() {
        Some(Command::Gear { action }) => handle_gear_action(action, &gear_path),
        Some(Command::Inspect { file }) => {
            inspect(&ExifTool::new(), &file, &mut std::io::stdout().lock())
        }
        None => tag(&args, gear_path),
    }
}

/// Tag (or clean) a batch of JPEGs.
fn tag(args: &Args, gear_path: PathBuf) -> Result<(), FilmtagError> {
    let exiftool = ExifTool::new().with_dry_run(args.dry_run);
    if !exiftool.is_dry_run() {
        exiftool.check()?;
    }

    let gear = if exiftool.is_dry_run() {
        GearConfig::load_or_builtin(&gear_path)?
    } else {
        GearConfig::load_or_init(&gear_path)?
    };

    let dir = args.directory.as_deref().unwrap_or(Path::new("."));
    let batch = files::collect(args.file.as_deref(), dir)?;
    match &args.file {
        Some(file) => println!("Found {} JPEG files ({})", batch.len(), file.display()),
        None => println!("Found {} JPEG files in {}", batch.len(), dir.display()),
    }
    println!();

    let mut session =
        Session::new(gear, gear_path, exiftool, Prompter::stdio()).with_assume_yes(args.yes);

    let outcome = if args.clean {
        session.run_clean(&batch)?
    } else if let (Some(camera), Some(film)) = (&args.camera, &args.film) {
        session.run_flags(camera, args.lens.as_deref(), film, &batch)?
    } else {
        session.run_interactive(&batch)?
    };
    log::info!("Run finished: {:?}", outcome);
    Ok(())
}

/// Handle gear subcommand actions.
fn handle_gear_action(action: GearAction, gear_path: &Path) -> Result<(), FilmtagError> {
    match action {
        GearAction::List { format } => {
            let gear = GearConfig::load_or_init(gear_path)?;
            let mut stdout = std::io::stdout().lock();
            write_gear_listing(&gear, format.map(FilmFormat::from), &mut stdout)?;
        }
        GearAction::Path => {
            if gear_path.exists() {
                println!("Gear file: {} (exists)", gear_path.display());
            } else {
                println!("Gear file: {} (not found)", gear_path.display());
            }
        }
        GearAction::Init { force } => {
            if gear_path.exists() && !force {
                return Err(FilmtagError::GearFileExists(gear_path.to_path_buf()));
            }
            GearConfig::builtin().save(gear_path)?;
            println!("Created gear file: {}", gear_path.display());
        }
    }
    Ok(())
}

/// Print cameras with their lenses, then film stocks grouped by format.
pub fn write_gear_listing(
    gear: &GearConfig,
    format: Option<FilmFormat>,
    out: &mut impl Write,
) -> std::io::Result<()> {
    if format.is_none() {
        writeln!(out, "Cameras:")?;
        for (key, camera) in &gear.cameras {
            writeln!(out, "  {}", camera.label())?;
            match camera.camera_type {
                CameraType::Fixed => {
                    if camera.fixed_lens.is_none() {
                        writeln!(out, "      (no lens recorded; edit the gear file for '{}')", key)?;
                    }
                }
                _ => {
                    for lens in &camera.compatible_lenses {
                        writeln!(out, "      {}", lens)?;
                    }
                }
            }
        }
        writeln!(out)?;
    }

    let formats = match format {
        Some(format) => vec![format],
        None => vec![FilmFormat::ThirtyFive, FilmFormat::MediumFormat],
    };
    for format in formats {
        writeln!(out, "Film stocks ({}):", format)?;
        for film in gear.films_for_format(format) {
            writeln!(out, "  {} (ISO {})", film.name, film.iso)?;
        }
    }
    Ok(())
}

/// Print the camera, lens and film tags currently stored in a file.
fn inspect(exiftool: &ExifTool, file: &Path, out: &mut impl Write) -> Result<(), FilmtagError> {
    files::validate_files(&[file.to_path_buf()])?;
    let report = exiftool.read_tags(file)?;

    writeln!(out, "{}", report.source_file.display())?;
    if report.tags.is_empty() {
        writeln!(out, "  (no camera, lens or film tags)")?;
    }
    for (tag, value) in &report.tags {
        writeln!(out, "  {:<18} {}", format!("{}:", tag), value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::Camera;
    use clap::Parser;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn listing(gear: &GearConfig, format: Option<FilmFormat>) -> String {
        let mut out = Vec::new();
        write_gear_listing(gear, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_listing_shows_cameras_and_both_formats() {
        let text = listing(&GearConfig::builtin(), None);
        assert!(text.contains("Cameras:"));
        assert!(text.contains("  Contax T3 (Carl Zeiss Sonnar T 35mm f/2.8)"));
        assert!(text.contains("      Mamiya Sekor C 150mm f/4 (150mm f/4.0)"));
        assert!(text.contains("Film stocks (35mm):"));
        assert!(text.contains("Film stocks (120):"));
    }

    #[test]
    fn test_listing_format_filter_hides_cameras() {
        let text = listing(&GearConfig::builtin(), Some(FilmFormat::MediumFormat));
        assert!(!text.contains("Cameras:"));
        assert!(!text.contains("(35mm)"));
        assert!(text.contains("  Kodak Vision3 500T (ISO 500)"));
    }

    #[test]
    fn test_listing_flags_manual_camera_without_lens() {
        let mut gear = GearConfig::default();
        gear.add_camera(Camera::manual("Olympus", "XA"));
        let text = listing(&gear, None);
        assert!(text.contains("no lens recorded"));
    }

    #[test]
    fn test_gear_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gear.toml");
        std::fs::write(&path, "").unwrap();

        let err = handle_gear_action(GearAction::Init { force: false }, &path).unwrap_err();
        assert!(matches!(err, FilmtagError::GearFileExists(_)));

        handle_gear_action(GearAction::Init { force: true }, &path).unwrap();
        assert_eq!(GearConfig::load(&path).unwrap(), GearConfig::builtin());
    }

    #[cfg(unix)]
    fn json_exiftool(dir: &TempDir, json: &str) -> ExifTool {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.path().join("fake-exiftool");
        std::fs::write(&script, format!("#!/bin/sh\ncat <<'EOF'\n{}\nEOF\n", json)).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        ExifTool::with_program(script.to_string_lossy())
    }

    #[cfg(unix)]
    #[test]
    fn test_inspect_prints_tags() {
        let dir = TempDir::new().unwrap();
        let frame = dir.path().join("01.jpg");
        std::fs::write(&frame, b"\xFF\xD8\xFF").unwrap();
        let tool = json_exiftool(
            &dir,
            r#"[{"SourceFile": "01.jpg", "Make": "Contax", "Model": "T3", "ISO": 400}]"#,
        );

        let mut out = Vec::new();
        inspect(&tool, &frame, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "01.jpg\n  Make:              Contax\n  Model:             T3\n  ISO:               400\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_inspect_stripped_file() {
        let dir = TempDir::new().unwrap();
        let frame = dir.path().join("01.jpg");
        std::fs::write(&frame, b"\xFF\xD8\xFF").unwrap();
        let tool = json_exiftool(&dir, r#"[{"SourceFile": "01.jpg"}]"#);

        let mut out = Vec::new();
        inspect(&tool, &frame, &mut out).unwrap();
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("(no camera, lens or film tags)"));
    }

    #[test]
    fn test_inspect_rejects_non_jpeg() {
        let dir = TempDir::new().unwrap();
        let tiff = dir.path().join("scan.tif");
        std::fs::write(&tiff, b"II*\0").unwrap();

        let tool = ExifTool::with_program("filmtag-no-such-binary");
        let err = inspect(&tool, &tiff, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, FilmtagError::Files(_)));
    }

    #[test]
    fn test_run_clean_dry_run_leaves_gear_file_alone() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("01.jpg"), b"\xFF\xD8\xFF").unwrap();
        let gear = dir.path().join("gear.toml");

        let args = Args::parse_from([
            OsString::from("filmtag"),
            OsString::from("--clean"),
            OsString::from("--yes"),
            OsString::from("--dry-run"),
            OsString::from("--gear"),
            gear.clone().into_os_string(),
            dir.path().as_os_str().to_owned(),
        ]);
        run(args).unwrap();
        assert!(!gear.exists());
    }
}
