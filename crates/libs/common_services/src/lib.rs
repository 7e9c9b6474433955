#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_inception,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]

pub mod api;
pub mod database;
pub mod storage;
pub mod utils;
