//! Disposal traits for resource cleanup.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::BoxError;

/// Trait for synchronous resource disposal.
///
/// Implement this for values that need structured teardown (flushing caches,
/// closing handles). Values produced by class or factory providers are
/// disposed when the providing node is disposed.
///
/// # Examples
///
/// ```
/// use chain_di::{BoxError, Dispose};
///
/// struct Cache {
///     name: String,
/// }
///
/// impl Dispose for Cache {
///     fn dispose(&self) -> Result<(), BoxError> {
///         println!("Flushing cache: {}", self.name);
///         Ok(())
///     }
/// }
/// ```
pub trait Dispose: Send + Sync + 'static {
    /// Perform synchronous cleanup of resources.
    fn dispose(&self) -> Result<(), BoxError>;
}

/// Trait for asynchronous resource disposal.
///
/// Implement this for values that require async teardown (graceful connection
/// shutdown, async I/O cleanup).
///
/// # Examples
///
/// ```
/// use chain_di::{AsyncDispose, BoxError};
/// use async_trait::async_trait;
///
/// struct DatabaseClient {
///     connection_id: String,
/// }
///
/// #[async_trait]
/// impl AsyncDispose for DatabaseClient {
///     async fn dispose(&self) -> Result<(), BoxError> {
///         println!("Closing database connection: {}", self.connection_id);
///         Ok(())
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait AsyncDispose: Send + Sync + 'static {
    /// Perform asynchronous cleanup of resources.
    async fn dispose(&self) -> Result<(), BoxError>;
}

/// The disposal capability of a produced value.
///
/// Returned by [`Class::disposer`](crate::Class::disposer) and by
/// [`Function`](crate::Function) disposal probes.
#[derive(Clone)]
pub enum Disposer {
    Sync(Arc<dyn Dispose>),
    Async(Arc<dyn AsyncDispose>),
}

impl Disposer {
    /// Disposer for a value implementing [`Dispose`].
    pub fn sync<T: Dispose>(value: Arc<T>) -> Self {
        Disposer::Sync(value)
    }

    /// Disposer for a value implementing [`AsyncDispose`].
    pub fn from_async<T: AsyncDispose>(value: Arc<T>) -> Self {
        Disposer::Async(value)
    }

    /// Starts disposal. Sync disposers run when the future is first polled.
    pub(crate) fn dispose(self) -> BoxFuture<'static, Result<(), BoxError>> {
        match self {
            Disposer::Sync(value) => async move { value.dispose() }.boxed(),
            Disposer::Async(value) => async move { value.dispose().await }.boxed(),
        }
    }

    /// Disposes outside of any disposal walk, blocking on async disposers.
    pub(crate) fn dispose_now(self) -> Result<(), BoxError> {
        match self {
            Disposer::Sync(value) => value.dispose(),
            Disposer::Async(value) => futures::executor::block_on(value.dispose()),
        }
    }
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disposer::Sync(_) => f.write_str("Disposer::Sync"),
            Disposer::Async(_) => f.write_str("Disposer::Async"),
        }
    }
}
