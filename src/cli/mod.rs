//! Command-line interface: argument parsing and command handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, GearAction};
pub use commands::{run, write_gear_listing};
pub use enums::FormatArg;
