use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::entities;

/// The signed-in player, kept for the lifetime of one client session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSession {
    pub user_id: entities::UserId,
    pub email: Option<String>,
    pub access_token: String,
}

impl PlayerSession {
    pub fn new(user: entities::AuthUser, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            access_token: access_token.into(),
        }
    }

    #[cfg(any(test, feature = "dev-bypass"))]
    pub fn dev() -> Self {
        Self::new(crate::dev_bypass::dev_user(), crate::dev_bypass::DEV_TOKEN)
    }

    /// Reads a session saved by [`PlayerSession::save`]. A missing file is `None`.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .with_context(|| format!("decode session {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read session {}", path.display())),
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string(self)?;
        std::fs::write(path, content).with_context(|| format!("write session {}", path.display()))
    }

    /// Signs out by removing the saved session, if any.
    pub fn forget(path: &Path) -> anyhow::Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                Err(e).with_context(|| format!("remove session {}", path.display()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_persistence() {
        let path = std::env::temp_dir()
            .join(format!("iron-scribe-session-{}.json", uuid::Uuid::new_v4()));
        assert_eq!(PlayerSession::load(&path).unwrap(), None);

        let session = PlayerSession::dev();
        session.save(&path).unwrap();
        assert_eq!(PlayerSession::load(&path).unwrap(), Some(session));

        PlayerSession::forget(&path).unwrap();
        PlayerSession::forget(&path).unwrap();
        assert_eq!(PlayerSession::load(&path).unwrap(), None);
    }
}
