pub mod error;
pub mod interfaces;
pub mod jwks;
pub mod service;
