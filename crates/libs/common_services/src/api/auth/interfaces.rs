use serde::{Deserialize, Serialize};

/// The claims PhotoVault consumes from identity-provider access tokens.
///
/// `sub` is the provider-side subject and keys the local user record.
/// Everything else is optional profile material used on first sight.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IdentityClaims {
    pub sub: String,
    pub exp: i64,
    pub email: Option<String>,
    pub name: Option<String>,
    pub preferred_username: Option<String>,
    pub picture: Option<String>,
}

impl IdentityClaims {
    /// Preferred username, falling back to the email local part.
    #[must_use]
    pub fn username_hint(&self) -> Option<String> {
        if let Some(username) = &self.preferred_username {
            let trimmed = username.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_owned());
            }
        }
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .map(ToOwned::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(email: Option<&str>, preferred_username: Option<&str>) -> IdentityClaims {
        IdentityClaims {
            sub: "auth0|abc".into(),
            exp: 0,
            email: email.map(ToOwned::to_owned),
            name: None,
            preferred_username: preferred_username.map(ToOwned::to_owned),
            picture: None,
        }
    }

    #[test]
    fn preferred_username_wins_over_email() {
        let hint = claims(Some("alice@example.com"), Some("wanderer")).username_hint();
        assert_eq!(hint.as_deref(), Some("wanderer"));
    }

    #[test]
    fn email_local_part_is_the_fallback() {
        let hint = claims(Some("alice@example.com"), None).username_hint();
        assert_eq!(hint.as_deref(), Some("alice"));
    }

    #[test]
    fn no_usable_claims_yields_no_hint() {
        assert!(claims(None, None).username_hint().is_none());
        assert!(claims(None, Some("  ")).username_hint().is_none());
    }
}
