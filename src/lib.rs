//! filmtag library crate.
//!
//! Strips scanner metadata from scanned film photographs and tags them with
//! the camera, lens and film stock they were shot on, by driving `exiftool`.

pub mod cli;
pub mod config;
pub mod error;
pub mod exiftool;
pub mod files;
pub mod gear;
pub mod prompt;
pub mod session;

pub use error::FilmtagError;
