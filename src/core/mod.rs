//! Core types shared across assetrev.
//!
//! Currently this is the error layer: [`RevError`] for typed failures and
//! [`ErrorContext`] / [`user_friendly_error`] for CLI reporting.

pub mod error;

pub use error::{ErrorContext, RevError, user_friendly_error};
