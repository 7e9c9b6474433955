//! Per-caller album authorization.

use crate::database::album::album::Album;
use crate::database::album::album_share::{AlbumShare, SharePermission};
use crate::database::app_user::User;
use chrono::{DateTime, Utc};

/// What a caller may do with a given album.
///
/// Denied callers get responses indistinguishable from "does not exist";
/// the distinction never crosses the service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumAccess {
    Owner,
    Edit,
    View,
    Denied,
}

impl AlbumAccess {
    /// Resolves the caller's access from the album row and its share rows.
    #[must_use]
    pub fn resolve(album: &Album, shares: &[AlbumShare], user: &User, now: DateTime<Utc>) -> Self {
        if album.owner_id == user.id {
            return Self::Owner;
        }

        let mut access = Self::Denied;
        for share in shares {
            if !share.applies_to(user, now) {
                continue;
            }
            match share.permission {
                SharePermission::Edit => return Self::Edit,
                SharePermission::View => access = Self::View,
            }
        }
        access
    }

    #[must_use]
    pub fn can_view(self) -> bool {
        self != Self::Denied
    }

    /// Edit grantees may change membership, nothing else.
    #[must_use]
    pub fn can_edit_membership(self) -> bool {
        matches!(self, Self::Owner | Self::Edit)
    }

    /// Title, description, cover, shares, token management and deletion
    /// stay owner-only.
    #[must_use]
    pub fn is_owner(self) -> bool {
        self == Self::Owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn owner() -> User {
        user(1, "owner@example.com", "owner")
    }

    fn user(id: i32, email: &str, username: &str) -> User {
        User {
            id,
            auth_provider_id: format!("auth0|{id}"),
            username: username.into(),
            email: email.into(),
            display_name: username.into(),
            avatar_url: None,
            profile: serde_json::json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn album() -> Album {
        Album {
            id: "a1".into(),
            owner_id: 1,
            title: "Trip".into(),
            description: None,
            cover_photo_id: None,
            is_public: false,
            public_token: None,
            public_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn share(email: &str, permission: SharePermission, expires_at: Option<DateTime<Utc>>) -> AlbumShare {
        AlbumShare {
            id: 1,
            album_id: "a1".into(),
            grantee_email: Some(email.into()),
            grantee_username: None,
            permission,
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_has_full_access() {
        let access = AlbumAccess::resolve(&album(), &[], &owner(), Utc::now());
        assert_eq!(access, AlbumAccess::Owner);
        assert!(access.is_owner());
        assert!(access.can_edit_membership());
        assert!(access.can_view());
    }

    #[test]
    fn view_grantee_can_read_but_not_mutate() {
        let alice = user(2, "alice@example.com", "alice");
        let shares = [share("alice@example.com", SharePermission::View, None)];
        let access = AlbumAccess::resolve(&album(), &shares, &alice, Utc::now());
        assert_eq!(access, AlbumAccess::View);
        assert!(access.can_view());
        assert!(!access.can_edit_membership());
        assert!(!access.is_owner());
    }

    #[test]
    fn edit_grantee_can_change_membership_only() {
        let alice = user(2, "alice@example.com", "alice");
        let shares = [share("alice@example.com", SharePermission::Edit, None)];
        let access = AlbumAccess::resolve(&album(), &shares, &alice, Utc::now());
        assert_eq!(access, AlbumAccess::Edit);
        assert!(access.can_edit_membership());
        assert!(!access.is_owner());
    }

    #[test]
    fn stranger_is_denied() {
        let bob = user(3, "bob@example.com", "bob");
        let shares = [share("alice@example.com", SharePermission::Edit, None)];
        let access = AlbumAccess::resolve(&album(), &shares, &bob, Utc::now());
        assert_eq!(access, AlbumAccess::Denied);
        assert!(!access.can_view());
    }

    #[test]
    fn expired_share_denies_access() {
        let alice = user(2, "alice@example.com", "alice");
        let now = Utc::now();
        let shares = [share(
            "alice@example.com",
            SharePermission::Edit,
            Some(now - Duration::seconds(1)),
        )];
        assert_eq!(
            AlbumAccess::resolve(&album(), &shares, &alice, now),
            AlbumAccess::Denied
        );
    }

    #[test]
    fn strongest_applicable_share_wins() {
        let alice = user(2, "alice@example.com", "alice");
        let mut view = share("alice@example.com", SharePermission::View, None);
        view.grantee_email = None;
        view.grantee_username = Some("alice".into());
        let shares = [
            view,
            share("alice@example.com", SharePermission::Edit, None),
        ];
        assert_eq!(
            AlbumAccess::resolve(&album(), &shares, &alice, Utc::now()),
            AlbumAccess::Edit
        );
    }
}
