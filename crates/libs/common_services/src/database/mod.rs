mod error;
mod stores;
mod tables;

pub use error::*;
pub use stores::*;
pub use tables::*;

/// Embedded SQL migrations, run by the API server on startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
