use std::sync::{Arc, Mutex};

use crate::session::{SessionSnapshot, SessionStore};

/// In-memory SessionStore for tests and platforms without persistence.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<SessionSnapshot>> {
        self.snapshot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemoryStore {
    async fn load(&self) -> Option<SessionSnapshot> {
        self.slot().clone()
    }

    async fn save(&self, snapshot: &SessionSnapshot) {
        *self.slot() = Some(snapshot.clone());
    }

    async fn clear(&self) {
        *self.slot() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str) -> SessionSnapshot {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "username": "ann",
            "verified": false
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = MemoryStore::new();
        assert!(store.load().await.is_none());

        store.save(&snapshot("u1")).await;
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.id, "u1");
        assert_eq!(loaded.rest["username"], "ann");

        store.clear().await;
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.save(&snapshot("u1")).await;
        assert_eq!(other.load().await.unwrap().id, "u1");
    }
}
