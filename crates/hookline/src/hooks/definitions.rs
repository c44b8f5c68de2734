//! Hook identifiers and typed hook point definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a [`Hook`](super::handler::Hook) handle.
///
/// Assigned once when the handle is built and shared by all of its clones.
/// Unregistration matches on this id, never on the handler itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookId(pub Uuid);

impl HookId {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for HookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named extension point bound to the context type its hooks receive.
///
/// Implementors are usually zero-sized markers declared with
/// [`hook_points!`](crate::hook_points). The registry stores every name in
/// one map; this trait only recovers static typing at the call boundary.
pub trait HookPoint: 'static {
    /// Name the hooks are registered under.
    const NAME: &'static str;

    /// Context threaded through the hooks of this point.
    type Context: Send + 'static;
}
