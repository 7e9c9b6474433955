//! Fixed application constants that are part of wire or storage contracts.

/// Length of generated album IDs.
pub const ALBUM_ID_LENGTH: usize = 12;

/// Length of generated photo IDs.
pub const PHOTO_ID_LENGTH: usize = 12;

/// Random bytes behind a public album token.
pub const PUBLIC_TOKEN_BYTES: usize = 32;

/// Hex rendering of [`PUBLIC_TOKEN_BYTES`]; public-read requests with any
/// other token length are rejected before touching the database.
pub const PUBLIC_TOKEN_HEX_LENGTH: usize = PUBLIC_TOKEN_BYTES * 2;
