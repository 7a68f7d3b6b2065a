//! Shared helpers for validating inputs.

pub mod validation;
