//! `ems-client`: everything between the session and the pixels.
//!
//! This crate provides:
//! - Client configuration
//! - A `Transport` seam with a reqwest implementation
//! - `ApiClient`, one method per REST endpoint
//! - Screen controllers driving a fetch/render/mutate state machine
//! - The route table and its guard
//!
//! It compiles for native targets and for `wasm32`; the browser shell lives
//! in `ems-web`.

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod screen;
pub mod screens;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use api::{AdminOverview, ApiClient};
pub use config::ClientConfig;
pub use error::ApiError;
pub use routes::{guard, Route};
pub use screen::{FormScreen, FormState, Lifecycle, MessageKind, Screen, ScreenState, StatusMessage, SubmitOutcome};
pub use transport::{ApiRequest, ApiResponse, FormField, FormValue, HttpTransport, Method, RequestBody, Transport};
