//! Networking modules for the host's HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the `/api/policy` and `/api/auth/*` calls and `types` holds
//! the session DTOs. Policy records themselves live in the `policies` crate.

pub mod api;
pub mod types;
