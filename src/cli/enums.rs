//! CLI enum types.

use clap::ValueEnum;

use crate::gear::FilmFormat;

/// Film format filter for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    #[value(name = "35mm")]
    ThirtyFive,
    #[value(name = "120")]
    MediumFormat,
}

impl From<FormatArg> for FilmFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::ThirtyFive => FilmFormat::ThirtyFive,
            FormatArg::MediumFormat => FilmFormat::MediumFormat,
        }
    }
}
