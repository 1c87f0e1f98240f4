//! Internal disposal bag for values owned by a provider node.

use futures::future::join_all;

use crate::error::BoxError;
use crate::traits::Disposer;

/// Disposers of the values a node produced and is responsible for.
#[derive(Default)]
pub(crate) struct DisposeBag {
    disposers: Vec<Disposer>,
}

impl DisposeBag {
    pub(crate) fn push(&mut self, disposer: Disposer) {
        self.disposers.push(disposer);
    }

    /// Moves every disposer out, leaving the bag empty.
    pub(crate) fn take(&mut self) -> DisposeBag {
        std::mem::take(self)
    }

    pub(crate) fn len(&self) -> usize {
        self.disposers.len()
    }

    /// Starts every disposer at once and waits for all of them.
    ///
    /// All disposers run to completion even when one fails; the first failure
    /// in registration order is returned.
    pub(crate) async fn dispose_concurrently(self) -> Result<(), BoxError> {
        let results = join_all(self.disposers.into_iter().map(Disposer::dispose)).await;
        let mut first_error = None;
        for result in results {
            if let Err(err) = result {
                tracing::warn!(error = %err, "disposer failed");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
