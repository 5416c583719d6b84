//! Shared helpers for input validation.

pub mod validation;
