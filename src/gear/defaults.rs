//! Built-in gear written to the gear file on first run.

use std::collections::BTreeMap;

use super::types::{Camera, FilmFormat, FilmStock, Lens};

/// Stocks shipped for both 35mm and 120.
const DEFAULT_STOCKS: &[(&str, u32)] = &[
    ("Cinestill 50D", 50),
    ("Cinestill 800T", 800),
    ("Kodak Portra 400", 400),
    ("Kodak Portra 800", 800),
    ("Kodak Gold 200", 200),
    ("Kodak Ultramax 400", 400),
    ("Kodak Vision3 250D", 250),
    ("Kodak Vision3 500T", 500),
];

pub fn default_cameras() -> BTreeMap<String, Camera> {
    let cameras = [
        Camera::fixed(
            "Contax",
            "T3",
            Lens::new("Carl Zeiss Sonnar T 35mm f/2.8", 35, 2.8),
        ),
        Camera::interchangeable(
            "Minolta",
            "CLE",
            vec![
                Lens::new("Leica APO-Summicron-M 35mm f/2 ASPH.", 35, 2.0),
                Lens::new("Minolta 28mm 2.8 M-Rokkor", 28, 2.8),
                Lens::new("Canon 50mm f/1.4 LTM", 50, 1.4),
            ],
        ),
        Camera::interchangeable(
            "Canon",
            "7E",
            vec![
                Lens::new("Canon 50mm f/1.8 LTM", 50, 1.8),
                Lens::new("Canon 35mm f/2.8 LTM", 35, 2.8),
            ],
        ),
        Camera::medium_format(
            "Mamiya",
            "645E",
            vec![
                Lens::new("Mamiya Sekor C 80mm f/2.8", 80, 2.8),
                Lens::new("Mamiya Sekor C 55mm f/2.8", 55, 2.8),
                Lens::new("Mamiya Sekor C 150mm f/4", 150, 4.0),
            ],
        ),
    ];

    cameras
        .into_iter()
        .map(|camera| (camera.key(), camera))
        .collect()
}

/// Every default stock in 35mm, followed by the same list in 120.
pub fn default_film_stocks() -> Vec<FilmStock> {
    [FilmFormat::ThirtyFive, FilmFormat::MediumFormat]
        .into_iter()
        .flat_map(|format| {
            DEFAULT_STOCKS
                .iter()
                .map(move |&(name, iso)| FilmStock::new(name, iso, format))
        })
        .collect()
}
