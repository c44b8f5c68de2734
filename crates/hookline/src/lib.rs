//! # hookline
//!
//! Named registry of asynchronous hooks. Provides:
//!
//! - Registration of one or more hooks under a name, in insertion order
//! - Identity-based unregistration through [`Hook`] handles
//! - Sequential execution that threads a context value through the chain
//! - Typed hook points via [`HookPoint`] and the [`hook_points!`] macro

pub mod hooks;
pub mod macros;
pub mod prelude;

pub use hookline_core::{ErrorKind, HookError, HookResult};
pub use hooks::definitions::{HookId, HookPoint};
pub use hooks::handler::{Hook, HookHandler};
pub use hooks::registry::HookRegistry;
