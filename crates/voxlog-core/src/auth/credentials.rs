use std::sync::Mutex;

use anyhow::{Context, Result};
use keyring::Entry;

/// Keychain service name shared by every voxlog process on the machine.
const SERVICE_NAME: &str = "voxlog";

/// Fixed entry name for the single persisted bearer token.
const TOKEN_ENTRY: &str = "api-token";

/// Durable storage for the bearer token.
///
/// Exactly one token is persisted under a fixed name. `save` overwrites any
/// existing value. A missing token is a normal result (`Ok(None)`), never an
/// error, and clearing an empty store is a no-op.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str) -> Result<()>;
    fn load(&self) -> Result<Option<String>>;
    fn clear(&self) -> Result<()>;
}

/// Production store backed by the OS keychain.
pub struct KeyringTokenStore;

impl KeyringTokenStore {
    fn entry() -> Result<Entry> {
        Entry::new(SERVICE_NAME, TOKEN_ENTRY).context("Failed to create keyring entry")
    }
}

impl TokenStore for KeyringTokenStore {
    fn save(&self, token: &str) -> Result<()> {
        Self::entry()?
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn load(&self) -> Result<Option<String>> {
        match Self::entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to read token from keychain"),
        }
    }

    fn clear(&self) -> Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

/// In-process store with the same contract, for tests and runs where the
/// keychain is unavailable.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().expect("token store lock poisoned") = Some(token.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().expect("token store lock poisoned").clone())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().expect("token store lock poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_returns_token() {
        let store = MemoryTokenStore::new();
        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn save_overwrites_existing_token() {
        let store = MemoryTokenStore::new();
        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn clear_then_load_returns_none() {
        let store = MemoryTokenStore::new();
        store.save("abc123").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn clearing_empty_store_is_a_noop() {
        let store = MemoryTokenStore::new();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
