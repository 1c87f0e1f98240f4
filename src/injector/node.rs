//! Provider node state: token, cache, disposal bag and disposed flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{DiError, DiResult, InjectAction};
use crate::injectable::Target;
use crate::internal::{AnyArc, DisposeBag};
use crate::scope::Scope;
use crate::token::Token;
use crate::traits::Disposer;

use super::Injector;

/// A freshly produced value and its disposal capability.
pub(crate) struct Produced {
    pub(crate) value: AnyArc,
    pub(crate) disposer: Option<Disposer>,
}

/// Produces a value by injecting through the given parent injector.
pub(crate) type Producer =
    Arc<dyn Fn(&Injector, Option<&Target>) -> DiResult<Produced> + Send + Sync>;

/// How a provider node obtains its value.
pub(crate) enum Source {
    Value(AnyArc),
    Factory(Producer),
    Class(Producer),
}

impl Source {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Source::Value(_) => "value",
            Source::Factory(_) => "factory",
            Source::Class(_) => "class",
        }
    }
}

/// One link of an injector chain.
pub(crate) enum Node {
    Root,
    Provider(ProviderNode),
}

pub(crate) struct ProviderNode {
    pub(crate) token: Token,
    pub(crate) scope: Scope,
    pub(crate) parent: Injector,
    source: Source,
    cache: Mutex<Option<AnyArc>>,
    disposables: Mutex<DisposeBag>,
    disposed: AtomicBool,
}

impl ProviderNode {
    pub(crate) fn new(token: Token, scope: Scope, parent: Injector, source: Source) -> Self {
        // A value never changes, so there is nothing to cache.
        let scope = match source {
            Source::Value(_) => Scope::Transient,
            _ => scope,
        };
        Self {
            token,
            scope,
            parent,
            source,
            cache: Mutex::new(None),
            disposables: Mutex::new(DisposeBag::default()),
            disposed: AtomicBool::new(false),
        }
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Closes the node and hands over everything it must dispose.
    ///
    /// Returns `None` if the node was already closed. Closing happens under
    /// the disposal bag lock, so a production either lands in the returned bag
    /// or sees the node closed.
    pub(crate) fn shut(&self) -> Option<DisposeBag> {
        let mut disposables = self.disposables.lock();
        if self.disposed.swap(true, Ordering::AcqRel) {
            return None;
        }
        self.cache.lock().take();
        Some(disposables.take())
    }

    /// Returns this node's value, producing it if needed.
    ///
    /// A production that finishes after the node was closed is disposed on
    /// the spot and reported as a disposed-injector error.
    pub(crate) fn value(&self, target: Option<&Target>) -> DiResult<AnyArc> {
        if let Some(cached) = self.cache.lock().clone() {
            tracing::trace!(token = %self.token, "cache hit");
            return Ok(cached);
        }

        let producer = match &self.source {
            Source::Value(value) => return Ok(value.clone()),
            Source::Factory(producer) | Source::Class(producer) => producer,
        };

        tracing::trace!(token = %self.token, kind = self.source.kind(), "producing");
        let Produced { value, disposer } = producer(&self.parent, target)?;

        let mut disposables = self.disposables.lock();
        if self.is_disposed() {
            drop(disposables);
            tracing::debug!(token = %self.token, "discarding value produced during disposal");
            if let Some(disposer) = disposer {
                if let Err(err) = disposer.dispose_now() {
                    tracing::warn!(token = %self.token, error = %err, "late disposer failed");
                }
            }
            return Err(DiError::Disposed(InjectAction::Resolve(self.token.clone())));
        }
        if let Some(disposer) = disposer {
            disposables.push(disposer);
        }

        match self.scope {
            Scope::Singleton => Ok(self.cache.lock().get_or_insert(value).clone()),
            Scope::Transient => Ok(value),
        }
    }

    pub(crate) fn source_kind(&self) -> &'static str {
        self.source.kind()
    }
}
