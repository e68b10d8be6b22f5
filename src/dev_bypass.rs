//! Reserved development token. Only compiled with the `dev-bypass` feature.

use uuid::Uuid;

use crate::entities;

pub const DEV_TOKEN: &str = "dev-token-root-user";
pub const DEV_USER_EMAIL: &str = "void@iron-scribe.local";

pub fn dev_user() -> entities::AuthUser {
    entities::AuthUser {
        id: entities::UserId::from(Uuid::nil()),
        email: Some(DEV_USER_EMAIL.to_string()),
    }
}

/// Matches the reserved literal exactly.
pub fn resolve(token: &str) -> Option<entities::AuthUser> {
    (token == DEV_TOKEN).then(dev_user)
}
