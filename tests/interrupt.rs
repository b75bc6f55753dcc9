//! Ctrl+C during processing. Kept in its own test binary: the signal goes to
//! the whole test process and the interrupt flag is process-wide.

#![cfg(unix)]

use std::io::Cursor;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use filmtag::exiftool::ExifTool;
use filmtag::gear::GearConfig;
use filmtag::prompt::Prompter;
use filmtag::session::{self, Session};
use filmtag::FilmtagError;

/// A stand-in exiftool that records its call, sends SIGINT to filmtag as a
/// terminal Ctrl+C would, and still finishes its run successfully.
fn interrupting_exiftool(dir: &Path, log: &Path) -> PathBuf {
    let script = dir.join("fake-exiftool");
    let body = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$1\" >> '{}'\nkill -INT $PPID\nsleep 1\nexit 0\n",
        log.display()
    );
    std::fs::write(&script, body).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[test]
fn test_ctrl_c_during_strip_skips_apply() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("calls.log");
    let tool = ExifTool::with_program(interrupting_exiftool(dir.path(), &log).to_string_lossy());

    let frame = dir.path().join("01.jpg");
    std::fs::write(&frame, b"\xFF\xD8\xFF").unwrap();

    let prompter = Prompter::new(Cursor::new(Vec::new()), Vec::new());
    let mut s = Session::new(
        GearConfig::builtin(),
        dir.path().join("gear.toml"),
        tool,
        prompter,
    )
    .with_assume_yes(true);

    let err = s
        .run_flags("Contax T3", None, "Kodak Gold 200", &[frame])
        .unwrap_err();

    assert!(matches!(err, FilmtagError::Interrupted(1)));
    assert!(session::interrupted());

    let calls = std::fs::read_to_string(&log).unwrap();
    assert_eq!(calls.lines().collect::<Vec<_>>(), vec!["-all="]);
}
