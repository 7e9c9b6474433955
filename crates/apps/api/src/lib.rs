#![deny(clippy::unwrap_used)]
#![allow(
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod api_state;
mod routes;
mod server;

pub use routes::*;
pub use server::*;
