pub mod albums;
pub mod auth;
pub mod envelope;
pub mod photos;
pub mod users;
