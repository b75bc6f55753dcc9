//! Gear database: the cameras, lenses and film stocks a photographer owns.
//!
//! - Lookups by name via [`GearConfig::find_camera`], [`GearConfig::find_lens`]
//!   and [`GearConfig::find_film`]
//! - Extension from manual entry via the `add_*` methods
//! - Persistence lives in [`crate::config`]

mod defaults;
mod types;

pub use defaults::{default_cameras, default_film_stocks};
pub use types::{Camera, CameraType, FilmFormat, FilmStock, Lens};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The full gear database as stored in the gear file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GearConfig {
    /// Cameras keyed by "Make Model"
    #[serde(default)]
    pub cameras: BTreeMap<String, Camera>,
    #[serde(default)]
    pub film_stocks: Vec<FilmStock>,
}

/// Errors from gear lookups.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GearError {
    #[error("camera not found: {0}")]
    CameraNotFound(String),

    #[error("lens not found: {0}")]
    LensNotFound(String),

    #[error("camera '{0}' takes interchangeable lenses; pass --lens")]
    LensRequired(String),

    #[error("film not found: {name} ({format})")]
    FilmNotFound { name: String, format: FilmFormat },
}

impl GearConfig {
    /// Gear shipped with the tool, written out on first run.
    pub fn builtin() -> Self {
        Self {
            cameras: default_cameras(),
            film_stocks: default_film_stocks(),
        }
    }

    /// Look up a camera by its exact key ("Contax T3").
    pub fn find_camera(&self, name: &str) -> Result<&Camera, GearError> {
        self.cameras
            .get(name)
            .ok_or_else(|| GearError::CameraNotFound(name.to_string()))
    }

    /// Resolve the lens for a camera.
    ///
    /// A fixed camera always yields its built-in lens, whatever name was given.
    /// Other cameras need an exact match among their compatible lenses.
    pub fn find_lens(&self, camera: &Camera, name: Option<&str>) -> Result<Lens, GearError> {
        if let Some(lens) = camera.built_in_lens() {
            return Ok(lens.clone());
        }

        let name = name.ok_or_else(|| GearError::LensRequired(camera.key()))?;
        camera
            .compatible_lenses
            .iter()
            .find(|lens| lens.name == name)
            .cloned()
            .ok_or_else(|| GearError::LensNotFound(name.to_string()))
    }

    /// Look up a film stock by exact name within a format.
    pub fn find_film(&self, name: &str, format: FilmFormat) -> Result<&FilmStock, GearError> {
        self.film_stocks
            .iter()
            .find(|film| film.name == name && film.format == format)
            .ok_or_else(|| GearError::FilmNotFound {
                name: name.to_string(),
                format,
            })
    }

    /// Stocks available in `format`, in gear file order.
    pub fn films_for_format(&self, format: FilmFormat) -> Vec<&FilmStock> {
        self.film_stocks
            .iter()
            .filter(|film| film.format == format)
            .collect()
    }

    /// Add (or replace) a camera under its key. Returns the key.
    pub fn add_camera(&mut self, camera: Camera) -> String {
        let key = camera.key();
        self.cameras.insert(key.clone(), camera);
        key
    }

    /// Append a lens to the compatible lenses of the camera stored at `camera_key`.
    pub fn add_lens(&mut self, camera_key: &str, lens: Lens) -> Result<(), GearError> {
        let camera = self
            .cameras
            .get_mut(camera_key)
            .ok_or_else(|| GearError::CameraNotFound(camera_key.to_string()))?;
        camera.compatible_lenses.push(lens);
        Ok(())
    }

    pub fn add_film(&mut self, film: FilmStock) {
        self.film_stocks.push(film);
    }
}
