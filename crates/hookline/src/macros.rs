//! Convenience macros for declaring hook points.

/// Declares zero-sized hook point markers.
///
/// # Example
/// ```rust,ignore
/// hook_points! {
///     /// Runs before a request is handled.
///     pub BeforeExecute => "beforeExecute": RequestContext;
///     pub AfterExecute => "afterExecute": ResponseContext;
/// }
///
/// registry.register::<BeforeExecute>([audit]).await;
/// let ctx = registry.execute::<BeforeExecute>(ctx).await?;
/// ```
#[macro_export]
macro_rules! hook_points {
    (
        $(
            $(#[$meta:meta])*
            $vis:vis $point:ident => $name:literal : $ctx:ty;
        )*
    ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            $vis struct $point;

            impl $crate::hooks::definitions::HookPoint for $point {
                const NAME: &'static str = $name;
                type Context = $ctx;
            }
        )*
    };
}
