pub mod album;
pub mod album_share;
