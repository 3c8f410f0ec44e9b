//! Session accessor built from a [`TokenStore`] and the decoder.

use ems_core::Role;

use crate::claims::{decode, Claims};
use crate::token_store::{StoreError, TokenStore};

/// The one session capability every component depends on.
///
/// Claims are recomputed from the stored credential on every call and never
/// cached, so they can only be as stale as the credential itself.
pub trait SessionAccess {
    /// Current bearer credential, if any.
    fn token(&self) -> Option<String>;

    /// Persist a freshly issued credential.
    fn login(&self, token: &str) -> Result<(), StoreError>;

    /// Drop the credential. Navigation afterwards is the caller's job.
    fn logout(&self) -> Result<(), StoreError>;

    /// True iff a non-empty credential is held. Expiry and signature are
    /// not checked.
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn claims(&self) -> Option<Claims> {
        decode(self.token().as_deref())
    }

    /// Raw role label for display.
    fn role_label(&self) -> Option<String> {
        self.claims().and_then(|c| c.role)
    }

    fn current_role(&self) -> Option<Role> {
        self.claims().and_then(|c| c.role())
    }
}

/// Session over a concrete store.
#[derive(Debug, Clone, Default)]
pub struct Session<S> {
    store: S,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: TokenStore> SessionAccess for Session<S> {
    fn token(&self) -> Option<String> {
        self.store.get()
    }

    fn login(&self, token: &str) -> Result<(), StoreError> {
        self.store.save(token)?;
        tracing::info!(role = ?self.role_label(), "session started");
        Ok(())
    }

    fn logout(&self) -> Result<(), StoreError> {
        self.store.clear()?;
        tracing::info!("session cleared");
        Ok(())
    }
}
