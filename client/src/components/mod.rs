//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render console chrome and policy views while reading/writing
//! shared state from Leptos context providers or signals handed in by pages.

pub mod delete_policy_modal;
pub mod empty_state;
pub mod flashbar;
pub mod policy_form_fields;
pub mod policy_table;
pub mod side_navigation;
pub mod top_navigation;
