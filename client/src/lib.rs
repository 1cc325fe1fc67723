//! # client
//!
//! Leptos + WASM frontend for the IAM-X policy console.
//!
//! This crate contains pages, components, application state and the HTTP
//! adapter for the host's `/api` routes. Policy records and their wire codec
//! come from the `policies` crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs logging and hydrates the server-rendered
/// shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
