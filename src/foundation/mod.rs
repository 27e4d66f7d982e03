//! Core value types and the crate error type.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
