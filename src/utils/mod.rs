//! Shared helpers for validating command-line input.

pub mod validation;
