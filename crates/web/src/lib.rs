//! `ems-web`
//!
//! **Responsibility:** the browser shell of the expense management client.
//!
//! This crate provides:
//! - The Leptos router, with every protected route behind the session guard
//! - One page per screen, each a thin view over its `ems-client` controller
//! - The header (role label, logout)
//! - A `localStorage`-backed token store
//!
//! All server state lives in the controllers; pages only render snapshots
//! and forward user intent.

pub mod format;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod context;
#[cfg(target_arch = "wasm32")]
mod pages;
pub mod storage;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// WASM entry point; runs when the module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    ems_observability::init();
    leptos::mount_to_body(app::App);
}
