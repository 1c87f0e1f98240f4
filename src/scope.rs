//! Provider scopes.

/// Caching policy of a provider node
///
/// # Examples
///
/// ```rust
/// use chain_di::{create_injector, Function, Scope};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let counter = Arc::new(AtomicUsize::new(0));
/// let c = counter.clone();
/// let next = Function::new("next", move |_| Ok(c.fetch_add(1, Ordering::SeqCst)));
///
/// let injector = create_injector()
///     .provide_factory_with_scope("id", next, Scope::Transient)
///     .unwrap();
///
/// assert_eq!(*injector.get::<usize>(&"id".into()).unwrap(), 0);
/// assert_eq!(*injector.get::<usize>(&"id".into()).unwrap(), 1);
/// assert_eq!(Scope::default(), Scope::Singleton);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Produced once per node, cached for the node's lifetime
    ///
    /// The first resolution of the node's token runs the provider; every later
    /// resolution through any descendant returns the same instance.
    #[default]
    Singleton,
    /// Produced again on every resolution, never cached
    Transient,
}
