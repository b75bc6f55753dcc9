//! The tagging workflow: choose camera, lens and film, confirm, then run
//! exiftool over the batch.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use crate::error::FilmtagError;
use crate::exiftool::ExifTool;
use crate::files;
use crate::gear::{Camera, FilmStock, GearConfig, Lens};
use crate::prompt::Prompter;

const MANUAL_CAMERA: &str = "Other (manual entry)";
const MANUAL_LENS: &str = "Manual entry";
const MANUAL_FILM: &str = "Other (manual entry)";

/// Global flag for Ctrl+C received while exiftool is running.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static HANDLER: Once = Once::new();

/// Check if Ctrl+C has been received.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Install the Ctrl+C handler. Only done once processing starts, so that
/// Ctrl+C at a prompt still exits immediately.
fn install_interrupt_handler() {
    HANDLER.call_once(|| {
        let result = ctrlc::set_handler(|| {
            INTERRUPTED.store(true, Ordering::SeqCst);
            eprintln!("\nReceived Ctrl+C, finishing the current exiftool run...");
        });
        if let Err(e) = result {
            log::warn!("Could not install Ctrl+C handler: {}", e);
        }
    });
}

/// The camera, lens and film a batch is tagged with.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub camera: Camera,
    pub lens: Lens,
    pub film: FilmStock,
}

/// Resolve a selection from names given on the command line.
pub fn resolve_selection(
    gear: &GearConfig,
    camera: &str,
    lens: Option<&str>,
    film: &str,
) -> Result<Selection, FilmtagError> {
    let camera = gear.find_camera(camera)?.clone();
    let lens = gear.find_lens(&camera, lens)?;
    let film = gear.find_film(film, camera.film_format())?.clone();
    Ok(Selection { camera, lens, film })
}

/// Result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Number of files written
    Completed(usize),
    Cancelled,
}

/// One tagging session over a batch of files.
pub struct Session<R, W> {
    gear: GearConfig,
    gear_path: PathBuf,
    exiftool: ExifTool,
    prompter: Prompter<R, W>,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        gear: GearConfig,
        gear_path: PathBuf,
        exiftool: ExifTool,
        prompter: Prompter<R, W>,
    ) -> Self {
        Self {
            gear,
            gear_path,
            exiftool,
            prompter,
            assume_yes: false,
        }
    }

    /// Skip confirmation prompts.
    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn gear(&self) -> &GearConfig {
        &self.gear
    }

    /// Tear down the session, giving back the prompter (tests read its output).
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Persist gear after a manual entry. Failure only costs the entry.
    /// Dry runs keep the entry in memory and leave the file alone.
    fn save_gear(&mut self) {
        if self.exiftool.is_dry_run() {
            log::info!("Dry run: not writing {}", self.gear_path.display());
            return;
        }
        if let Err(e) = self.gear.save(&self.gear_path) {
            log::warn!("{}", e);
            if let Err(e) = self
                .prompter
                .say(format!("Warning: could not save gear file: {}", e))
            {
                log::warn!("Could not print warning: {}", e);
            }
        }
    }

    /// Pick a camera from the gear, or enter a new one by hand.
    pub fn select_camera(&mut self) -> Result<Camera, FilmtagError> {
        let cameras: Vec<Camera> = self.gear.cameras.values().cloned().collect();
        let mut labels: Vec<String> = cameras.iter().map(Camera::label).collect();
        labels.push(MANUAL_CAMERA.to_string());

        let idx = self.prompter.select("Select Camera:", &labels)?;
        if let Some(camera) = cameras.get(idx) {
            return Ok(camera.clone());
        }

        let make = self.prompter.input("Enter camera make:")?;
        let model = self.prompter.input("Enter camera model:")?;
        // Fixed without a lens record; the gear file can be edited later.
        let camera = Camera::manual(make, model);
        let key = self.gear.add_camera(camera.clone());
        log::info!("Added camera '{}' to gear", key);
        self.save_gear();
        Ok(camera)
    }

    /// Pick the lens: fixed cameras answer directly, others get a menu.
    pub fn select_lens(&mut self, camera: &Camera) -> Result<Lens, FilmtagError> {
        if let Some(lens) = camera.built_in_lens() {
            return Ok(lens.clone());
        }

        let lenses = &camera.compatible_lenses;
        let mut labels: Vec<String> = lenses.iter().map(Lens::to_string).collect();
        labels.push(MANUAL_LENS.to_string());

        let title = format!("Select Lens for {}:", camera.model);
        let idx = self.prompter.select(&title, &labels)?;
        if let Some(lens) = lenses.get(idx) {
            return Ok(lens.clone());
        }

        let name = self.prompter.input("Enter lens name:")?;
        let focal_length = self
            .prompter
            .input_number("Enter focal length (mm):", "focal length")?;
        let max_aperture = self
            .prompter
            .input_number("Enter max aperture (f-number):", "aperture")?;
        let lens = Lens::new(name, focal_length, max_aperture);

        match self.gear.add_lens(&camera.key(), lens.clone()) {
            Ok(()) => {
                log::info!("Added lens '{}' to {}", lens.name, camera.key());
                self.save_gear();
            }
            Err(e) => log::warn!("Lens not saved: {}", e),
        }
        Ok(lens)
    }

    /// Pick a film stock in the camera's format, or enter a new one.
    pub fn select_film(&mut self, camera: &Camera) -> Result<FilmStock, FilmtagError> {
        let format = camera.film_format();
        let films: Vec<FilmStock> = self
            .gear
            .films_for_format(format)
            .into_iter()
            .cloned()
            .collect();
        let mut labels: Vec<String> = films.iter().map(FilmStock::to_string).collect();
        labels.push(MANUAL_FILM.to_string());

        let idx = self.prompter.select("Select Film Stock:", &labels)?;
        if let Some(film) = films.get(idx) {
            return Ok(film.clone());
        }

        let name = self.prompter.input("Enter film name:")?;
        let iso = self.prompter.input_number("Enter ISO speed:", "ISO value")?;
        let film = FilmStock::new(name, iso, format);
        self.gear.add_film(film.clone());
        log::info!("Added film '{}' to gear", film);
        self.save_gear();
        Ok(film)
    }

    fn confirm(&mut self, message: &str) -> Result<bool, FilmtagError> {
        if self.assume_yes {
            return Ok(true);
        }
        Ok(self.prompter.confirm(message, false)?)
    }

    /// Print the selection summary and ask before touching any file.
    pub fn confirm_configuration(
        &mut self,
        selection: &Selection,
        file_count: usize,
    ) -> Result<bool, FilmtagError> {
        let Selection { camera, lens, film } = selection;
        self.prompter.say("")?;
        self.prompter.say("Configuration:")?;
        self.prompter
            .say(format!("   Camera: {} {}", camera.make, camera.model))?;
        self.prompter.say(format!("   Lens: {}", lens))?;
        self.prompter
            .say(format!("   Film: {} (ISO {})", film.display_name(), film.iso))?;
        self.prompter.say(format!("   Files: {} JPEGs", file_count))?;
        self.prompter.say("")?;

        self.confirm("This will strip scanner EXIF data and add film camera metadata. Continue?")
    }

    /// Strip scanner metadata, then write the selection to every file.
    pub fn process_files(
        &mut self,
        files: &[PathBuf],
        selection: &Selection,
    ) -> Result<Outcome, FilmtagError> {
        files::validate_files(files)?;
        install_interrupt_handler();

        self.prompter.say("Processing...")?;
        self.exiftool
            .strip_scanner_metadata(files)
            .map_err(FilmtagError::Strip)?;

        if interrupted() {
            return Err(FilmtagError::Interrupted(files.len()));
        }

        let Selection { camera, lens, film } = selection;
        self.exiftool
            .apply_film_metadata(camera, lens, film, files)
            .map_err(FilmtagError::Apply)?;

        self.prompter
            .say(format!("Complete! Updated {} files.", files.len()))?;
        Ok(Outcome::Completed(files.len()))
    }

    fn cancelled(&mut self) -> Result<Outcome, FilmtagError> {
        self.prompter.say("Operation cancelled.")?;
        Ok(Outcome::Cancelled)
    }

    /// Menu-driven run.
    pub fn run_interactive(&mut self, files: &[PathBuf]) -> Result<Outcome, FilmtagError> {
        self.prompter.say("Film Metadata Tool")?;
        let camera = self.select_camera()?;
        let lens = self.select_lens(&camera)?;
        let film = self.select_film(&camera)?;
        let selection = Selection { camera, lens, film };

        if !self.confirm_configuration(&selection, files.len())? {
            return self.cancelled();
        }
        self.process_files(files, &selection)
    }

    /// Run with camera, lens and film named on the command line.
    pub fn run_flags(
        &mut self,
        camera: &str,
        lens: Option<&str>,
        film: &str,
        files: &[PathBuf],
    ) -> Result<Outcome, FilmtagError> {
        let selection = resolve_selection(&self.gear, camera, lens, film)?;
        self.prompter.say("Film Metadata Tool")?;

        if !self.confirm_configuration(&selection, files.len())? {
            return self.cancelled();
        }
        self.process_files(files, &selection)
    }

    /// Strip scanner metadata only.
    pub fn run_clean(&mut self, files: &[PathBuf]) -> Result<Outcome, FilmtagError> {
        self.prompter
            .say("Clean Mode: Strip scanner EXIF data only")?;

        if !self.confirm("This will remove all metadata except the color profile. Continue?")? {
            return self.cancelled();
        }

        files::validate_files(files)?;
        install_interrupt_handler();
        self.prompter.say("Processing...")?;
        self.exiftool.strip_scanner_metadata(files)?;
        self.prompter
            .say(format!("Complete! Cleaned {} files.", files.len()))?;
        Ok(Outcome::Completed(files.len()))
    }
}
