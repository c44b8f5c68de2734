//! Hook handlers and the cloneable [`Hook`] handle the registry stores.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use hookline_core::HookResult;

use super::definitions::HookId;

/// Trait for hook handler implementations.
///
/// A handler may mutate the context in place and return `Ok(None)`, or
/// return `Ok(Some(next))` to replace the context for every later hook.
/// Returning `Err` aborts the chain.
#[async_trait]
pub trait HookHandler<C>: Send + Sync {
    /// Handles a hook invocation.
    async fn handle(&self, ctx: &mut C) -> HookResult<Option<C>>;

    /// Name used in logs and error messages.
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Adapts a closure returning a boxed future into a [`HookHandler`].
struct FnHandler<F> {
    f: F,
    label: String,
}

#[async_trait]
impl<C, F> HookHandler<C> for FnHandler<F>
where
    C: Send + 'static,
    F: for<'a> Fn(&'a mut C) -> BoxFuture<'a, HookResult<Option<C>>> + Send + Sync + 'static,
{
    async fn handle(&self, ctx: &mut C) -> HookResult<Option<C>> {
        (self.f)(ctx).await
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Handle to a registered (or registrable) hook.
///
/// Cloning is cheap and keeps the same [`HookId`], so a clone kept by the
/// caller can later unregister the hook. Two handles built from the same
/// handler value separately are distinct hooks.
pub struct Hook<C> {
    id: HookId,
    handler: Arc<dyn HookHandler<C>>,
}

impl<C> Hook<C>
where
    C: Send + 'static,
{
    /// Wraps a handler into a new hook with a fresh identity.
    pub fn new(handler: impl HookHandler<C> + 'static) -> Self {
        Self::from_arc(Arc::new(handler))
    }

    /// Wraps a shared handler into a new hook with a fresh identity.
    pub fn from_arc(handler: Arc<dyn HookHandler<C>>) -> Self {
        Self {
            id: HookId::new(),
            handler,
        }
    }

    /// Builds a hook from a closure.
    ///
    /// ```rust,ignore
    /// let bump = Hook::from_fn(|ctx: &mut Counter| Box::pin(async move {
    ///     ctx.a += 10;
    ///     Ok(None)
    /// }));
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a mut C) -> BoxFuture<'a, HookResult<Option<C>>> + Send + Sync + 'static,
    {
        Self::from_fn_named("closure", f)
    }

    /// Builds a hook from a closure with a label for logs.
    pub fn from_fn_named<F>(label: impl Into<String>, f: F) -> Self
    where
        F: for<'a> Fn(&'a mut C) -> BoxFuture<'a, HookResult<Option<C>>> + Send + Sync + 'static,
    {
        Self::new(FnHandler {
            f,
            label: label.into(),
        })
    }

    /// Returns the identity of this handle.
    pub fn id(&self) -> HookId {
        self.id
    }

    /// Returns the handler label.
    pub fn label(&self) -> &str {
        self.handler.label()
    }

    /// Invokes the handler once.
    pub async fn call(&self, ctx: &mut C) -> HookResult<Option<C>> {
        self.handler.handle(ctx).await
    }
}

impl<C> Clone for Hook<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<C> PartialEq for Hook<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C> Eq for Hook<C> {}

impl<C> fmt::Debug for Hook<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook").field("id", &self.id).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Counter {
        value: i64,
    }

    struct Double;

    #[async_trait]
    impl HookHandler<Counter> for Double {
        async fn handle(&self, ctx: &mut Counter) -> HookResult<Option<Counter>> {
            ctx.value *= 2;
            Ok(None)
        }

        fn label(&self) -> &str {
            "double"
        }
    }

    #[tokio::test]
    async fn test_call_mutates_in_place() {
        let hook = Hook::new(Double);
        let mut ctx = Counter { value: 4 };
        let outcome = hook.call(&mut ctx).await.unwrap();
        assert!(outcome.is_none());
        assert_eq!(ctx.value, 8);
    }

    #[tokio::test]
    async fn test_from_fn_can_replace_context() {
        let hook = Hook::<Counter>::from_fn(|ctx| {
            Box::pin(async move { Ok(Some(Counter { value: ctx.value + 1 })) })
        });
        let mut ctx = Counter { value: 1 };
        let outcome = hook.call(&mut ctx).await.unwrap();
        assert_eq!(outcome, Some(Counter { value: 2 }));
        assert_eq!(hook.label(), "closure");
    }

    #[test]
    fn test_clone_keeps_identity() {
        let hook = Hook::new(Double);
        let clone = hook.clone();
        assert_eq!(hook.id(), clone.id());
        assert_eq!(hook, clone);
        assert_eq!(clone.label(), "double");
    }

    #[test]
    fn test_shared_handler_gets_distinct_identities() {
        let handler: Arc<dyn HookHandler<Counter>> = Arc::new(Double);
        let first = Hook::from_arc(handler.clone());
        let second = Hook::from_arc(handler);
        assert_ne!(first, second);
    }
}
