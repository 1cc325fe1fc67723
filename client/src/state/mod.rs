//! Client-side state shared through Leptos context.
//!
//! DESIGN
//! ======
//! State types are plain structs wrapped in `RwSignal` by the app shell and
//! pages. Transitions live on the structs so they can be tested without a
//! reactive runtime.

pub mod auth;
pub mod notifications;
pub mod policy_form;
pub mod policy_list;

#[cfg(test)]
pub(crate) mod fake_api;
