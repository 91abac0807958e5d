//! # Browser `localStorage` session store
//!
//! [`LocalStorageStore`] is the [`SessionStore`] used on the web. The snapshot
//! lives as a JSON string under the `user` key, the same place returning
//! visitors' sessions have always been kept.
//!
//! All methods swallow errors. Private browsing modes can refuse storage
//! access entirely; that degrades to "not logged in".

use crate::session::{SessionSnapshot, SessionStore, SNAPSHOT_KEY};

#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStore for LocalStorageStore {
    async fn load(&self) -> Option<SessionSnapshot> {
        let text = Self::storage()?.get_item(SNAPSHOT_KEY).ok()??;
        serde_json::from_str(&text).ok()
    }

    async fn save(&self, snapshot: &SessionSnapshot) {
        let Some(storage) = Self::storage() else {
            return;
        };
        let Ok(text) = serde_json::to_string(snapshot) else {
            return;
        };
        if storage.set_item(SNAPSHOT_KEY, &text).is_err() {
            tracing::warn!("localStorage refused the session snapshot");
        }
    }

    async fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(SNAPSHOT_KEY);
        }
    }
}
