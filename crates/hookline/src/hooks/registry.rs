//! Hook registry — hooks are kept per name in registration order.
//!
//! Every name shares one map of type-erased entries. The context type of a
//! name is checked when its hooks run, not when they are stored.
//!
//! `execute` copies the list for a name and releases the lock before the
//! first hook runs, so `register`/`unregister` never disturb an in-flight
//! execution. A mutation made during an execution is seen by the next one.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, trace, warn};

use hookline_core::HookResult;
use hookline_core::config::registry::RegistryConfig;

use super::definitions::{HookId, HookPoint};
use super::dispatcher::HookDispatcher;
use super::handler::Hook;

/// Entry in the hook registry.
#[derive(Clone)]
pub(crate) struct HookEntry {
    /// Identity of the registered handle.
    id: HookId,
    /// The `Hook<C>` handle, erased.
    hook: Arc<dyn Any + Send + Sync>,
    /// `TypeId` of `C`.
    context_type: TypeId,
    /// Type name of `C`, for diagnostics.
    context_type_name: &'static str,
}

impl HookEntry {
    fn new<C>(hook: Hook<C>) -> Self
    where
        C: Send + 'static,
    {
        Self {
            id: hook.id(),
            hook: Arc::new(hook),
            context_type: TypeId::of::<C>(),
            context_type_name: std::any::type_name::<C>(),
        }
    }

    /// Recovers the typed handle, or `None` if `C` is not the stored type.
    pub(crate) fn downcast<C>(&self) -> Option<Hook<C>>
    where
        C: Send + 'static,
    {
        self.hook.downcast_ref::<Hook<C>>().cloned()
    }

    pub(crate) fn context_type_name(&self) -> &'static str {
        self.context_type_name
    }
}

/// Registry of hooks organized by name.
///
/// Usually shared behind an `Arc`. Registration methods return `&Self` so
/// calls can be chained:
///
/// ```rust,ignore
/// registry
///     .register::<BeforeExecute>([audit.clone()])
///     .await
///     .register::<AfterExecute>([notify])
///     .await;
/// ```
pub struct HookRegistry {
    /// Hook name → hooks in registration order.
    hooks: RwLock<HashMap<String, Vec<HookEntry>>>,
    /// Settings applied to every execution.
    config: RegistryConfig,
}

impl HookRegistry {
    /// Creates a new empty hook registry with default settings.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates a new empty hook registry.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            hooks: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the registry settings.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Appends hooks to the hook point `P`.
    pub async fn register<P: HookPoint>(
        &self,
        hooks: impl IntoIterator<Item = Hook<P::Context>>,
    ) -> &Self {
        self.register_named(P::NAME, hooks).await
    }

    /// Removes one occurrence of each given hook from the hook point `P`.
    pub async fn unregister<'h, P: HookPoint>(
        &self,
        hooks: impl IntoIterator<Item = &'h Hook<P::Context>>,
    ) -> &Self {
        self.unregister_named(P::NAME, hooks).await
    }

    /// Runs the hooks of `P` against `ctx` and returns the resulting context.
    pub async fn execute<P: HookPoint>(&self, ctx: P::Context) -> HookResult<P::Context> {
        self.execute_named(P::NAME, ctx).await
    }

    /// Appends hooks to the list for `name`, creating the list if absent.
    ///
    /// The same hook may be registered any number of times; every occurrence
    /// runs.
    pub async fn register_named<C>(
        &self,
        name: &str,
        hooks: impl IntoIterator<Item = Hook<C>>,
    ) -> &Self
    where
        C: Send + 'static,
    {
        let new_entries: Vec<HookEntry> = hooks.into_iter().map(HookEntry::new).collect();
        if new_entries.is_empty() {
            return self;
        }

        let mut map = self.hooks.write().await;
        let entries = map.entry(name.to_string()).or_default();

        if let Some(existing) = entries.first() {
            if existing.context_type != TypeId::of::<C>() {
                warn!(
                    hook = %name,
                    registered = existing.context_type_name,
                    incoming = std::any::type_name::<C>(),
                    "Registering hook with a different context type"
                );
            }
        }

        let added = new_entries.len();
        entries.extend(new_entries);

        debug!(
            hook = %name,
            added,
            hook_count = entries.len(),
            "Hooks registered"
        );

        self
    }

    /// Removes the first occurrence of each given hook from the list for
    /// `name`.
    ///
    /// Unknown names and hooks that are not registered are skipped.
    pub async fn unregister_named<'h, C>(
        &self,
        name: &str,
        hooks: impl IntoIterator<Item = &'h Hook<C>>,
    ) -> &Self
    where
        C: Send + 'static,
    {
        let ids: Vec<HookId> = hooks.into_iter().map(Hook::id).collect();

        let mut map = self.hooks.write().await;
        let Some(entries) = map.get_mut(name) else {
            trace!(hook = %name, "Unregister on unknown hook name ignored");
            return self;
        };

        let mut removed = 0usize;
        for id in ids {
            if let Some(index) = entries.iter().position(|e| e.id == id) {
                entries.remove(index);
                removed += 1;
            }
        }

        let remaining = entries.len();
        if remaining == 0 {
            map.remove(name);
        }

        debug!(
            hook = %name,
            removed,
            hook_count = remaining,
            "Hooks unregistered"
        );

        self
    }

    /// Runs the hooks registered under `name` in order and returns the final
    /// context.
    ///
    /// A name without hooks returns `ctx` untouched.
    pub async fn execute_named<C>(&self, name: &str, ctx: C) -> HookResult<C>
    where
        C: Send + 'static,
    {
        let snapshot = self.snapshot(name).await;
        if snapshot.is_empty() {
            trace!(hook = %name, "No hooks registered, returning context unchanged");
            return Ok(ctx);
        }

        HookDispatcher::new(name, self.config.slow_hook_threshold())
            .dispatch(&snapshot, ctx)
            .await
    }

    /// Removes every hook registered under `name`. Returns how many were
    /// dropped.
    pub async fn clear(&self, name: &str) -> usize {
        let mut map = self.hooks.write().await;
        let dropped = map.remove(name).map(|entries| entries.len()).unwrap_or(0);

        if dropped > 0 {
            debug!(hook = %name, dropped, "Hooks cleared");
        }

        dropped
    }

    /// Returns whether any hooks are registered under `name`.
    pub async fn has_hooks(&self, name: &str) -> bool {
        let map = self.hooks.read().await;
        map.get(name)
            .map(|entries| !entries.is_empty())
            .unwrap_or(false)
    }

    /// Returns the number of hooks registered under `name`, duplicates
    /// included.
    pub async fn hook_count(&self, name: &str) -> usize {
        let map = self.hooks.read().await;
        map.get(name).map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns every name that currently has hooks, sorted.
    pub async fn registered_names(&self) -> Vec<String> {
        let map = self.hooks.read().await;
        let mut names: Vec<String> = map
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    async fn snapshot(&self, name: &str) -> Vec<HookEntry> {
        let map = self.hooks.read().await;
        map.get(name).cloned().unwrap_or_default()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use hookline_core::ErrorKind;

    use crate::hooks::handler::HookHandler;

    #[derive(Debug, Default)]
    struct Tally {
        hits: Vec<&'static str>,
    }

    struct Mark(&'static str);

    #[async_trait]
    impl HookHandler<Tally> for Mark {
        async fn handle(&self, ctx: &mut Tally) -> HookResult<Option<Tally>> {
            ctx.hits.push(self.0);
            Ok(None)
        }
    }

    /// Registers `extra` under the same name while the chain is running.
    struct RegisterDuringRun {
        registry: Arc<HookRegistry>,
        extra: Hook<Tally>,
    }

    #[async_trait]
    impl HookHandler<Tally> for RegisterDuringRun {
        async fn handle(&self, ctx: &mut Tally) -> HookResult<Option<Tally>> {
            self.registry
                .register_named("run", [self.extra.clone()])
                .await;
            ctx.hits.push("registrar");
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_register_creates_list_lazily() {
        let registry = HookRegistry::new();
        assert!(!registry.has_hooks("run").await);

        registry
            .register_named("run", [Hook::new(Mark("a")), Hook::new(Mark("b"))])
            .await;

        assert!(registry.has_hooks("run").await);
        assert_eq!(registry.hook_count("run").await, 2);
    }

    #[tokio::test]
    async fn test_register_nothing_leaves_name_absent() {
        let registry = HookRegistry::new();
        registry
            .register_named::<Tally>("run", Vec::new())
            .await;
        assert!(registry.registered_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_registered_names_sorted() {
        let registry = HookRegistry::new();
        registry
            .register_named("zeta", [Hook::new(Mark("z"))])
            .await
            .register_named("alpha", [Hook::new(Mark("a"))])
            .await;

        assert_eq!(registry.registered_names().await, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_unregister_last_hook_drops_name() {
        let registry = HookRegistry::new();
        let hook = Hook::new(Mark("a"));
        registry.register_named("run", [hook.clone()]).await;

        registry.unregister_named("run", [&hook]).await;

        assert!(!registry.has_hooks("run").await);
        assert!(registry.registered_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_reports_dropped_count() {
        let registry = HookRegistry::new();
        let hook = Hook::new(Mark("a"));
        registry
            .register_named("run", [hook.clone(), hook.clone(), hook])
            .await;

        assert_eq!(registry.clear("run").await, 3);
        assert_eq!(registry.clear("run").await, 0);

        let ctx = registry.execute_named("run", Tally::default()).await.unwrap();
        assert!(ctx.hits.is_empty());
    }

    #[tokio::test]
    async fn test_context_type_mismatch_is_reported() {
        let registry = HookRegistry::new();
        registry.register_named("run", [Hook::new(Mark("a"))]).await;

        let err = registry.execute_named("run", 7_u32).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::ContextMismatch);
        assert!(err.message.contains("Tally"));
        assert!(err.message.contains("u32"));
    }

    #[tokio::test]
    async fn test_registration_during_execute_applies_to_next_run() {
        let registry = Arc::new(HookRegistry::new());
        let registrar = Hook::new(RegisterDuringRun {
            registry: Arc::clone(&registry),
            extra: Hook::new(Mark("late")),
        });
        registry
            .register_named("run", [registrar.clone(), Hook::new(Mark("tail"))])
            .await;

        let first = registry.execute_named("run", Tally::default()).await.unwrap();
        assert_eq!(first.hits, vec!["registrar", "tail"]);

        // Stop the registrar from adding more before the second run.
        registry.unregister_named("run", [&registrar]).await;

        let second = registry.execute_named("run", Tally::default()).await.unwrap();
        assert_eq!(second.hits, vec!["tail", "late"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_hook_is_not_cancelled() {
        let registry = HookRegistry::with_config(RegistryConfig {
            slow_hook_threshold_ms: 10,
        });
        let slow = Hook::<Tally>::from_fn_named("slow", |ctx| {
            Box::pin(async move {
                tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                ctx.hits.push("slow");
                Ok(None)
            })
        });
        registry.register_named("run", [slow]).await;

        let ctx = registry.execute_named("run", Tally::default()).await.unwrap();
        assert_eq!(ctx.hits, vec!["slow"]);
    }
}
