//! Key/value storage
//!
//! LocalStorage on web. Natively there is nowhere to persist to, so reads
//! return nothing and writes are dropped.

/// Read a stored string (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load_item(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}

/// Write a string to storage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save_item(key: &str, value: &str) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    match storage {
        Some(storage) => {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to write {} to LocalStorage", key);
            }
        }
        None => log::warn!("LocalStorage unavailable, {} not saved", key),
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_item(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_item(_key: &str, _value: &str) {
    // No-op for native
}
