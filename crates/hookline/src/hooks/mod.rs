//! Hook system — handles, registry, and sequential chain dispatch.

pub mod definitions;
pub mod dispatcher;
pub mod handler;
pub mod registry;

pub use definitions::{HookId, HookPoint};
pub use handler::{Hook, HookHandler};
pub use registry::HookRegistry;
