#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod constants;
mod load_settings;
mod settings;

pub use load_settings::*;
pub use settings::*;
