//! Persisted login session

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::ClientError;
use crate::models::Role;

/// The logged-in user as returned by `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Bearer token plus the user it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    pub fn is_company(&self) -> bool {
        self.user.role == Role::Company
    }
}

/// Where a client keeps its session between calls
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>, ClientError>;

    async fn save(&self, session: &Session) -> Result<(), ClientError>;

    async fn clear(&self) -> Result<(), ClientError>;
}

/// Session kept in process memory
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, ClientError> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), ClientError> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        self.session.write().await.take();
        Ok(())
    }
}

/// Session serialized as JSON in a single file.
///
/// A missing file means logged out. A file that no longer parses is
/// treated the same way and gets replaced on the next login.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, ClientError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::Storage(e.to_string())),
        };

        match serde_json::from_slice(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ClientError::Storage(e.to_string()))?;
        }

        let raw = serde_json::to_vec_pretty(session).map_err(|e| ClientError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| ClientError::Storage(e.to_string()))
    }

    async fn clear(&self) -> Result<(), ClientError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            token: "tok".to_string(),
            user: SessionUser {
                id: Uuid::new_v4(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role,
            },
        }
    }

    #[tokio::test]
    async fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::new();
        assert!(store.load().await.unwrap().is_none());

        let saved = session(Role::Company);
        store.save(&saved).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert!(loaded.is_company());

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let saved = session(Role::Candidate);

        FileSessionStore::new(&path).save(&saved).await.unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.load().await.unwrap(), Some(saved));

        reopened.clear().await.unwrap();
        assert!(!path.exists());
        reopened.clear().await.unwrap();
        assert!(reopened.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        assert!(FileSessionStore::new(&path).load().await.unwrap().is_none());
    }

    #[test]
    fn test_session_json_shape() {
        let value = serde_json::to_value(session(Role::Company)).unwrap();
        assert_eq!(value["token"], "tok");
        assert_eq!(value["user"]["role"], "company");
    }
}
