//! Gear types: cameras, lenses and film stocks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A lens, either built into a camera or mountable on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lens {
    /// Full lens name as written into `LensModel`
    pub name: String,
    /// Focal length in millimetres
    pub focal_length: u32,
    /// Maximum aperture as an f-number (e.g. 2.8)
    pub max_aperture: f64,
}

impl Lens {
    pub fn new(name: impl Into<String>, focal_length: u32, max_aperture: f64) -> Self {
        Self {
            name: name.into(),
            focal_length,
            max_aperture,
        }
    }
}

impl fmt::Display for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}mm f/{:.1})",
            self.name, self.focal_length, self.max_aperture
        )
    }
}

/// How a camera takes lenses, and which film it loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraType {
    /// Compact with a single built-in lens
    #[default]
    Fixed,
    /// 35mm body with a lens mount
    Interchangeable,
    /// 120 body with a lens mount
    MediumFormat,
}

/// Film format. Closed set: a stock is either 35mm or 120.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilmFormat {
    #[default]
    #[serde(rename = "35mm")]
    ThirtyFive,
    #[serde(rename = "120")]
    MediumFormat,
}

impl FilmFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilmFormat::ThirtyFive => "35mm",
            FilmFormat::MediumFormat => "120",
        }
    }
}

impl fmt::Display for FilmFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A camera body.
///
/// Fixed cameras carry their lens in `fixed_lens`; the other types list the
/// lenses owned for the mount in `compatible_lenses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub make: String,
    pub model: String,
    #[serde(rename = "type", default)]
    pub camera_type: CameraType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_lens: Option<Lens>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compatible_lenses: Vec<Lens>,
}

impl Camera {
    /// A compact camera with a single built-in lens.
    pub fn fixed(make: impl Into<String>, model: impl Into<String>, lens: Lens) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            camera_type: CameraType::Fixed,
            fixed_lens: Some(lens),
            compatible_lenses: Vec::new(),
        }
    }

    /// A 35mm body with a lens mount.
    pub fn interchangeable(
        make: impl Into<String>,
        model: impl Into<String>,
        lenses: Vec<Lens>,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            camera_type: CameraType::Interchangeable,
            fixed_lens: None,
            compatible_lenses: lenses,
        }
    }

    /// A 120 body with a lens mount.
    pub fn medium_format(
        make: impl Into<String>,
        model: impl Into<String>,
        lenses: Vec<Lens>,
    ) -> Self {
        Self {
            camera_type: CameraType::MediumFormat,
            ..Self::interchangeable(make, model, lenses)
        }
    }

    /// A camera entered by hand: fixed type, no lens record yet.
    pub fn manual(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            camera_type: CameraType::Fixed,
            fixed_lens: None,
            compatible_lenses: Vec::new(),
        }
    }

    /// Key under which the camera is stored in the gear file ("Make Model").
    pub fn key(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// The built-in lens, if this is a fixed camera that has one recorded.
    pub fn built_in_lens(&self) -> Option<&Lens> {
        match self.camera_type {
            CameraType::Fixed => self.fixed_lens.as_ref(),
            _ => None,
        }
    }

    /// Film format this camera loads.
    pub fn film_format(&self) -> FilmFormat {
        match self.camera_type {
            CameraType::MediumFormat => FilmFormat::MediumFormat,
            _ => FilmFormat::ThirtyFive,
        }
    }

    /// One-line label used in menus and listings.
    pub fn label(&self) -> String {
        match (self.camera_type, self.built_in_lens()) {
            (CameraType::Fixed, Some(lens)) => {
                format!("{} {} ({})", self.make, self.model, lens.name)
            }
            (CameraType::MediumFormat, _) => {
                format!("{} {} (interchangeable - 120 film)", self.make, self.model)
            }
            _ => format!("{} {} (interchangeable)", self.make, self.model),
        }
    }
}

/// A film stock in a given format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmStock {
    pub name: String,
    pub iso: u32,
    pub format: FilmFormat,
}

impl FilmStock {
    pub fn new(name: impl Into<String>, iso: u32, format: FilmFormat) -> Self {
        Self {
            name: name.into(),
            iso,
            format,
        }
    }

    /// Name shown in summaries; 120 stocks carry their format.
    pub fn display_name(&self) -> String {
        match self.format {
            FilmFormat::MediumFormat => format!("{} ({})", self.name, self.format),
            FilmFormat::ThirtyFive => self.name.clone(),
        }
    }
}

impl fmt::Display for FilmStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ISO {}, {})", self.name, self.iso, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lens_display() {
        let lens = Lens::new("Canon 50mm f/1.4 LTM", 50, 1.4);
        assert_eq!(lens.to_string(), "Canon 50mm f/1.4 LTM (50mm f/1.4)");

        let lens = Lens::new("Leica APO-Summicron-M 35mm f/2 ASPH.", 35, 2.0);
        assert_eq!(
            lens.to_string(),
            "Leica APO-Summicron-M 35mm f/2 ASPH. (35mm f/2.0)"
        );
    }

    #[test]
    fn test_camera_key() {
        let camera = Camera::manual("Nikon", "FM2");
        assert_eq!(camera.key(), "Nikon FM2");
    }

    #[test]
    fn test_film_format_by_camera_type() {
        let compact = Camera::fixed("Contax", "T3", Lens::new("Sonnar", 35, 2.8));
        let rangefinder = Camera::interchangeable("Minolta", "CLE", vec![]);
        let mamiya = Camera::medium_format("Mamiya", "645E", vec![]);

        assert_eq!(compact.film_format(), FilmFormat::ThirtyFive);
        assert_eq!(rangefinder.film_format(), FilmFormat::ThirtyFive);
        assert_eq!(mamiya.film_format(), FilmFormat::MediumFormat);
    }

    #[test]
    fn test_built_in_lens_only_for_fixed() {
        let lens = Lens::new("Sonnar", 35, 2.8);
        let compact = Camera::fixed("Contax", "T3", lens.clone());
        assert_eq!(compact.built_in_lens(), Some(&lens));

        let mut odd = Camera::interchangeable("Canon", "7E", vec![]);
        odd.fixed_lens = Some(lens);
        assert!(odd.built_in_lens().is_none());

        assert!(Camera::manual("Olympus", "XA").built_in_lens().is_none());
    }

    #[test]
    fn test_camera_labels() {
        let compact = Camera::fixed(
            "Contax",
            "T3",
            Lens::new("Carl Zeiss Sonnar T 35mm f/2.8", 35, 2.8),
        );
        assert_eq!(compact.label(), "Contax T3 (Carl Zeiss Sonnar T 35mm f/2.8)");

        let cle = Camera::interchangeable("Minolta", "CLE", vec![]);
        assert_eq!(cle.label(), "Minolta CLE (interchangeable)");

        let mamiya = Camera::medium_format("Mamiya", "645E", vec![]);
        assert_eq!(mamiya.label(), "Mamiya 645E (interchangeable - 120 film)");
    }

    #[test]
    fn test_film_display_name() {
        let film = FilmStock::new("Kodak Portra 400", 400, FilmFormat::ThirtyFive);
        assert_eq!(film.display_name(), "Kodak Portra 400");
        assert_eq!(film.to_string(), "Kodak Portra 400 (ISO 400, 35mm)");

        let film = FilmStock::new("Kodak Portra 400", 400, FilmFormat::MediumFormat);
        assert_eq!(film.display_name(), "Kodak Portra 400 (120)");
    }
}
