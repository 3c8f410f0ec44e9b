//! `ems-auth`: client-side session and authorization model.
//!
//! This crate is intentionally decoupled from HTTP and from any particular
//! storage backend. Roles decoded here drive navigation and display only;
//! the server remains the authority for every authorization decision.

pub mod authorize;
pub mod claims;
pub mod session;
pub mod token_store;

pub use authorize::{authorize, AuthzError, Requirement};
pub use claims::{decode, try_decode, Claims, DecodeError};
pub use ems_core::Role;
pub use session::{Session, SessionAccess};
pub use token_store::{MemoryTokenStore, StoreError, TokenStore};
