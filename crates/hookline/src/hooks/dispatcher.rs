//! Hook dispatcher — runs a snapshot of one name's hooks against a context.
//!
//! - Hooks are called strictly in list order, each awaited before the next.
//! - `Ok(Some(next))` replaces the context; `Ok(None)` leaves it as is.
//! - The first `Err` aborts the chain and is returned to the caller; hooks
//!   after it do not run.
//! - Hooks are never timed out. A hook slower than the configured threshold
//!   is reported once it finishes.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace, warn};

use hookline_core::{ErrorKind, HookError, HookResult};

use super::registry::HookEntry;

/// Runs the hook chain registered under one name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HookDispatcher<'a> {
    /// Hook name being executed.
    name: &'a str,
    /// Hooks slower than this are reported.
    slow_hook_threshold: Option<Duration>,
}

impl<'a> HookDispatcher<'a> {
    pub(crate) fn new(name: &'a str, slow_hook_threshold: Option<Duration>) -> Self {
        Self {
            name,
            slow_hook_threshold,
        }
    }

    /// Threads `ctx` through every entry and returns the final context.
    pub(crate) async fn dispatch<C>(&self, entries: &[HookEntry], mut ctx: C) -> HookResult<C>
    where
        C: Send + 'static,
    {
        debug!(
            hook = %self.name,
            hook_count = entries.len(),
            "Executing hook chain"
        );

        for (position, entry) in entries.iter().enumerate() {
            let hook = entry.downcast::<C>().ok_or_else(|| {
                HookError::context_mismatch(format!(
                    "hook '{}' at position {} expects context `{}` but was executed with `{}`",
                    self.name,
                    position,
                    entry.context_type_name(),
                    std::any::type_name::<C>()
                ))
            })?;

            trace!(
                hook = %self.name,
                position,
                hook_id = %hook.id(),
                label = %hook.label(),
                "Invoking hook"
            );

            let started = Instant::now();
            let outcome = hook.call(&mut ctx).await;
            self.report_if_slow(position, hook.label(), started.elapsed());

            match outcome {
                Ok(Some(next)) => {
                    trace!(hook = %self.name, position, "Hook replaced context");
                    ctx = next;
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        hook = %self.name,
                        position,
                        label = %hook.label(),
                        error = %err,
                        "Hook failed, aborting chain"
                    );
                    return Err(HookError::with_source(
                        ErrorKind::HookFailed,
                        format!(
                            "hook '{}' at position {} ({}) failed",
                            self.name,
                            position,
                            hook.label()
                        ),
                        err,
                    ));
                }
            }
        }

        Ok(ctx)
    }

    fn report_if_slow(&self, position: usize, label: &str, elapsed: Duration) {
        let Some(threshold) = self.slow_hook_threshold else {
            return;
        };

        if elapsed > threshold {
            warn!(
                hook = %self.name,
                position,
                label = %label,
                elapsed_ms = elapsed.as_millis() as u64,
                threshold_ms = threshold.as_millis() as u64,
                "Hook exceeded slow threshold"
            );
        }
    }
}
