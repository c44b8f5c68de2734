//! Prelude for convenient imports.

pub use async_trait::async_trait;
pub use futures::future::BoxFuture;

pub use hookline_core::config::registry::RegistryConfig;
pub use hookline_core::{ErrorKind, HookError, HookResult};

pub use crate::hooks::definitions::{HookId, HookPoint};
pub use crate::hooks::handler::{Hook, HookHandler};
pub use crate::hooks::registry::HookRegistry;

pub use crate::hook_points;
