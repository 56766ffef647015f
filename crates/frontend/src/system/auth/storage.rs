use view_model::TokenProvider;
use web_sys::window;

const ADMIN_TOKEN_KEY: &str = "adminToken";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save the admin token to localStorage
pub fn save_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ADMIN_TOKEN_KEY, token);
    }
}

/// Get the admin token from localStorage
pub fn get_token() -> Option<String> {
    get_local_storage()?
        .get_item(ADMIN_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

pub fn clear_token() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ADMIN_TOKEN_KEY);
    }
}

/// Token source for list controllers; reads storage on every call so a
/// logout takes effect immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageTokenSource;

impl TokenProvider for StorageTokenSource {
    fn current_token(&self) -> Option<String> {
        get_token()
    }
}
