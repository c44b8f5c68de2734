//! # hookline-core
//!
//! Shared foundation for hookline: the unified error type, the result
//! alias, and the configuration schemas consumed by the registry and the
//! demo binary.
//!
//! This crate has **no** dependency on the registry crate.

pub mod config;
pub mod error;
pub mod result;

pub use error::{ErrorKind, HookError};
pub use result::HookResult;
