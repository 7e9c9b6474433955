//! Public album tokens.
//!
//! A token is 32 random bytes rendered as 64 lowercase hex characters.
//! The length is part of the wire contract: the public-read endpoint
//! rejects any other length before touching the database.

use app_state::constants::{PUBLIC_TOKEN_BYTES, PUBLIC_TOKEN_HEX_LENGTH};
use rand::RngCore;
use std::fmt::Write;

/// Generates a fresh public token. Every call produces new material; a
/// superseded token is never extended or resurrected.
#[must_use]
pub fn generate_public_token() -> String {
    let mut bytes = [0u8; PUBLIC_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    let mut token = String::with_capacity(PUBLIC_TOKEN_HEX_LENGTH);
    for byte in bytes {
        let _ = write!(token, "{byte:02x}");
    }
    token
}

/// Cheap shape check, run before any persistence lookup.
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token.len() == PUBLIC_TOKEN_HEX_LENGTH && token.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_64_hex_chars() {
        let token = generate_public_token();
        assert_eq!(token.len(), 64);
        assert!(token.bytes().all(|b| b.is_ascii_hexdigit()));
        assert!(is_well_formed(&token));
    }

    #[test]
    fn consecutive_tokens_differ() {
        assert_ne!(generate_public_token(), generate_public_token());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed(&"a".repeat(63)));
        assert!(!is_well_formed(&"a".repeat(65)));
        assert!(!is_well_formed(&"g".repeat(64)));
        assert!(is_well_formed(&"0".repeat(64)));
    }
}
