//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub(crate) mod policy_form;
pub mod policies;
pub mod policy_create;
pub mod policy_edit;
