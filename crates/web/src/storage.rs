//! Browser `localStorage` token store.

/// Storage key holding the bearer credential.
pub const TOKEN_KEY: &str = "token";

/// Whether a `storage` event from another tab touched the credential.
/// A missing key means the whole storage area was cleared.
pub fn is_token_change(key: Option<&str>) -> bool {
    key.is_none_or(|key| key == TOKEN_KEY)
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorageTokenStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use ems_auth::{StoreError, TokenStore};

    use super::TOKEN_KEY;

    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorageTokenStore;

    impl LocalStorageTokenStore {
        fn storage() -> Result<web_sys::Storage, StoreError> {
            web_sys::window()
                .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
                .local_storage()
                .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
                .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))
        }
    }

    impl TokenStore for LocalStorageTokenStore {
        fn save(&self, token: &str) -> Result<(), StoreError> {
            Self::storage()?
                .set_item(TOKEN_KEY, token)
                .map_err(|e| StoreError::Write(format!("{e:?}")))
        }

        fn get(&self) -> Option<String> {
            Self::storage()
                .ok()?
                .get_item(TOKEN_KEY)
                .ok()
                .flatten()
                .filter(|token| !token.is_empty())
        }

        fn clear(&self) -> Result<(), StoreError> {
            Self::storage()?
                .remove_item(TOKEN_KEY)
                .map_err(|e| StoreError::Write(format!("{e:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_credential_changes_count() {
        assert!(is_token_change(Some(TOKEN_KEY)));
        assert!(is_token_change(None));
        assert!(!is_token_change(Some("theme")));
    }
}
