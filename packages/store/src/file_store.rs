//! # Filesystem-backed session store
//!
//! [`FileStore`] keeps the login snapshot as a JSON file so native builds
//! resume the session after a restart, like `localStorage` does on the web.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── user.json
//! ```
//!
//! Use `dirs::data_dir()` joined with `trench-social` as the base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/trench-social/` |
//! | Linux | `~/.local/share/trench-social/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\trench-social\` |

use std::path::PathBuf;

use crate::session::{SessionSnapshot, SessionStore, SNAPSHOT_KEY};

/// Filesystem-backed SessionStore for native builds.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn snapshot_path(&self) -> PathBuf {
        self.base.join(format!("{SNAPSHOT_KEY}.json"))
    }
}

impl SessionStore for FileStore {
    async fn load(&self) -> Option<SessionSnapshot> {
        let text = std::fs::read_to_string(self.snapshot_path()).ok()?;
        match serde_json::from_str(&text) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("discarding unreadable session snapshot: {e}");
                None
            }
        }
    }

    async fn save(&self, snapshot: &SessionSnapshot) {
        let path = self.snapshot_path();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string(snapshot) {
            Ok(text) => {
                if let Err(e) = std::fs::write(path, text) {
                    tracing::warn!("failed to persist session: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to encode session: {e}"),
        }
    }

    async fn clear(&self) {
        let _ = std::fs::remove_file(self.snapshot_path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("trench_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        assert!(store.load().await.is_none());

        let snapshot: SessionSnapshot =
            serde_json::from_str(r#"{"id": "u1", "email": "ann@example.com"}"#).unwrap();
        store.save(&snapshot).await;

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        let loaded = reopened.load().await.unwrap();
        assert_eq!(loaded, snapshot);

        reopened.clear().await;
        assert!(store.load().await.is_none());

        // Corrupt files read as empty
        std::fs::write(dir.join("user.json"), "{not json").unwrap();
        assert!(store.load().await.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
