//! Platform-appropriate [`store::SessionStore`] for the login snapshot.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Desktop** (native): a JSON file via [`store::FileStore`]
//! - Anything else: [`store::MemoryStore`], so the session lasts until exit

/// Create the session store for this platform.
pub fn make_session_store() -> impl store::SessionStore + Clone + 'static {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("trench-social");
        store::FileStore::new(base)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
}
