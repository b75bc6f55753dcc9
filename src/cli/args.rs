//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::FormatArg;

/// Strip scanner EXIF data and apply film camera metadata to JPEG files
#[derive(Parser, Debug)]
#[command(name = "filmtag")]
#[command(version, about = "CLI tool to manage film photography metadata using ExifTool", long_about = None)]
#[command(subcommand_negates_reqs = true)]
#[command(after_help = "EXAMPLES:
    filmtag ./roll-001/                      # Interactive mode
    filmtag --clean ./scanned-negs/          # Strip scanner data only
    filmtag -c \"Contax T3\" --film \"Kodak Portra 400\" ./roll-001/
    filmtag -f photo.jpg -c \"Minolta CLE\" -l \"Leica APO-Summicron-M 35mm f/2 ASPH.\" --film \"Kodak Portra 800\"
    filmtag gear list --format 120")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory of scanned JPEGs (searched recursively)
    #[arg(required_unless_present = "file")]
    pub directory: Option<PathBuf>,

    /// Camera name as stored in the gear file (e.g. 'Contax T3')
    #[arg(short, long, requires = "film")]
    pub camera: Option<String>,

    /// Lens name (for interchangeable lens cameras)
    #[arg(short, long, requires = "camera")]
    pub lens: Option<String>,

    /// Film stock name (e.g. 'Kodak Portra 400')
    #[arg(long, requires = "camera")]
    pub film: Option<String>,

    /// Process a single file instead of a directory
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Strip scanner EXIF data only (no film metadata)
    #[arg(long, conflicts_with_all = ["camera", "lens", "film"])]
    pub clean: bool,

    /// Don't ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Print the exiftool commands instead of running them (the gear file is not written)
    #[arg(long)]
    pub dry_run: bool,

    /// Gear file path
    #[arg(long = "gear", value_name = "PATH", global = true)]
    pub gear_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Gear file management
    Gear {
        #[command(subcommand)]
        action: GearAction,
    },
    /// Show the camera, lens and film tags stored in a JPEG
    Inspect {
        /// JPEG file to read
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum GearAction {
    /// List cameras, lenses and film stocks
    List {
        /// Only show film stocks of this format
        #[arg(long)]
        format: Option<FormatArg>,
    },
    /// Show where the gear file lives
    Path,
    /// Write the built-in gear to the gear file
    Init {
        /// Overwrite an existing gear file
        #[arg(long)]
        force: bool,
    },
}
