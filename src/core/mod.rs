//! Core types shared across kubectl-save.
//!
//! - [`SaveError`] - every failure the library can report
//! - [`ErrorContext`] and [`user_friendly_error`] - how the binary presents them

pub mod error;

pub use error::{ErrorContext, SaveError, user_friendly_error};
