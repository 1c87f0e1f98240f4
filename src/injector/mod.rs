//! Injector chain: token resolution, injection, providers and disposal.
//!
//! An [`Injector`] is a handle to one node of a chain that starts at the
//! root. Every `provide_*` call returns a new child node; existing nodes are
//! never mutated, so a chain can be shared freely between threads.

use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, DiError, DiResult, InjectAction};
use crate::injectable::{Args, Class, Function, Target};
use crate::internal::AnyArc;
use crate::scope::Scope;
use crate::token::Token;

mod node;

use node::{Node, Produced, Producer, ProviderNode, Source};

/// Handle to a node of an injector chain.
///
/// Cloning is cheap and yields a handle to the same node. A child keeps its
/// ancestors alive; ancestors know nothing about their children.
///
/// # Examples
///
/// ```
/// use chain_di::{create_injector, Args, BoxError, Class, Token};
/// use std::sync::Arc;
///
/// struct Database {
///     url: String,
/// }
///
/// impl Class for Database {
///     const INJECT: &'static [Token] = &[Token::new("url")];
///
///     fn construct(args: Args) -> Result<Self, BoxError> {
///         Ok(Database { url: args.get::<String>(0)?.to_string() })
///     }
/// }
///
/// let injector = create_injector()
///     .provide_value("url", String::from("postgres://localhost"))
///     .unwrap()
///     .provide_class::<Database>("db")
///     .unwrap();
///
/// let a = injector.get::<Database>(&Token::new("db")).unwrap();
/// let b = injector.get::<Database>(&Token::new("db")).unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(a.url, "postgres://localhost");
/// ```
#[derive(Clone)]
pub struct Injector {
    node: Arc<Node>,
}

impl Injector {
    /// Creates a new, empty root.
    ///
    /// Most code should start from [`create_injector`](crate::create_injector);
    /// a separate root is only useful for isolation.
    pub fn new_root() -> Self {
        Self {
            node: Arc::new(Node::Root),
        }
    }

    /// Resolves `token` by walking up the chain.
    pub fn resolve(&self, token: &Token) -> DiResult<AnyArc> {
        self.resolve_for(token, None)
    }

    /// Resolves `token` on behalf of `target`.
    ///
    /// Factories that declare [`TARGET_TOKEN`](crate::TARGET_TOKEN) receive `target`.
    pub fn resolve_for(&self, token: &Token, target: Option<&Target>) -> DiResult<AnyArc> {
        self.ensure_open(|| InjectAction::Resolve(token.clone()))?;
        self.resolve_internal(token, target)
    }

    /// Resolves `token` and downcasts the value to `T`.
    pub fn get<T: Any + Send + Sync>(&self, token: &Token) -> DiResult<Arc<T>> {
        self.get_for(token, None)
    }

    /// Typed form of [`resolve_for`](Self::resolve_for).
    pub fn get_for<T: Any + Send + Sync>(
        &self,
        token: &Token,
        target: Option<&Target>,
    ) -> DiResult<Arc<T>> {
        self.resolve_for(token, target)?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch {
                token: token.clone(),
                expected: type_name::<T>(),
            })
    }

    /// Constructs `C` with its declared dependencies.
    ///
    /// The instance is not tracked for disposal.
    pub fn inject_class<C: Class>(&self) -> DiResult<C> {
        self.inject_class_for::<C>(None)
    }

    /// Constructs `C` on behalf of `target`.
    pub fn inject_class_for<C: Class>(&self, target: Option<&Target>) -> DiResult<C> {
        let name = type_name::<C>();
        self.ensure_open(|| InjectAction::Inject(Cow::Borrowed(name)))?;
        let this = Target::class::<C>();
        self.resolve_parameters(C::INJECT, &this, target)
            .map_err(BoxError::from)
            .and_then(C::construct)
            .map_err(|cause| DiError::injection(Cow::Borrowed(name), cause))
    }

    /// Calls `f` with its declared dependencies.
    ///
    /// The result is not tracked for disposal.
    pub fn inject_function<R: Send + Sync + 'static>(&self, f: &Function<R>) -> DiResult<R> {
        self.inject_function_for(f, None)
    }

    /// Calls `f` on behalf of `target`.
    pub fn inject_function_for<R: Send + Sync + 'static>(
        &self,
        f: &Function<R>,
        target: Option<&Target>,
    ) -> DiResult<R> {
        let this = f.target();
        self.ensure_open(|| InjectAction::Inject(this.name().to_owned().into()))?;
        self.resolve_parameters(f.inject(), &this, target)
            .map_err(BoxError::from)
            .and_then(|args| f.call(args))
            .map_err(|cause| DiError::injection(this.name().to_owned().into(), cause))
    }

    /// Returns a child providing `value` under `token`.
    ///
    /// Values handed in are never disposed by the injector.
    pub fn provide_value<T: Any + Send + Sync>(
        &self,
        token: impl Into<Token>,
        value: T,
    ) -> DiResult<Injector> {
        self.provide_shared_value(token, Arc::new(value))
    }

    /// Returns a child providing an already shared `value` under `token`.
    pub fn provide_shared_value<T: Any + Send + Sync>(
        &self,
        token: impl Into<Token>,
        value: Arc<T>,
    ) -> DiResult<Injector> {
        self.attach(token.into(), Scope::Transient, Source::Value(value))
    }

    /// Returns a child providing instances of `C` as singletons.
    pub fn provide_class<C: Class>(&self, token: impl Into<Token>) -> DiResult<Injector> {
        self.provide_class_with_scope::<C>(token, Scope::default())
    }

    /// Returns a child providing instances of `C` under `scope`.
    ///
    /// `C`'s dependencies resolve against this injector, so the child's own
    /// token is invisible to them.
    pub fn provide_class_with_scope<C: Class>(
        &self,
        token: impl Into<Token>,
        scope: Scope,
    ) -> DiResult<Injector> {
        let producer: Producer = Arc::new(|parent: &Injector, target: Option<&Target>| {
            let instance = Arc::new(parent.inject_class_for::<C>(target)?);
            let disposer = instance.clone().disposer();
            Ok(Produced { value: instance, disposer })
        });
        self.attach(token.into(), scope, Source::Class(producer))
    }

    /// Returns a child providing the result of `factory` as a singleton.
    pub fn provide_factory<R: Send + Sync + 'static>(
        &self,
        token: impl Into<Token>,
        factory: Function<R>,
    ) -> DiResult<Injector> {
        self.provide_factory_with_scope(token, factory, Scope::default())
    }

    /// Returns a child providing the result of `factory` under `scope`.
    pub fn provide_factory_with_scope<R: Send + Sync + 'static>(
        &self,
        token: impl Into<Token>,
        factory: Function<R>,
        scope: Scope,
    ) -> DiResult<Injector> {
        let producer: Producer = Arc::new(move |parent: &Injector, target: Option<&Target>| {
            let result = Arc::new(parent.inject_function_for(&factory, target)?);
            let disposer = factory.disposer_for(&result);
            Ok(Produced { value: result, disposer })
        });
        self.attach(token.into(), scope, Source::Factory(producer))
    }

    /// Disposes this node, then its ancestors.
    ///
    /// The node is closed before any disposer runs, so resolutions racing with
    /// disposal fail instead of producing values nobody will dispose. All of a
    /// node's disposers run concurrently; the parent is only disposed once
    /// they have all finished. Walking up stops at the root or at an ancestor
    /// that was already disposed. Disposing twice is a no-op.
    ///
    /// If a disposer fails, its error is returned and the ancestors are left
    /// undisposed.
    pub async fn dispose(&self) -> DiResult<()> {
        let mut current = self.clone();
        loop {
            let provider = match &*current.node {
                Node::Root => return Ok(()),
                Node::Provider(provider) => provider,
            };
            let Some(bag) = provider.shut() else {
                return Ok(());
            };

            tracing::debug!(token = %provider.token, disposables = bag.len(), "disposing injector");
            bag.dispose_concurrently().await.map_err(DiError::Disposal)?;

            current = provider.parent.clone();
        }
    }

    /// Token this node provides, `None` for the root.
    pub fn token(&self) -> Option<&Token> {
        self.provider().map(|provider| &provider.token)
    }

    /// Scope of this node, `None` for the root.
    pub fn scope(&self) -> Option<Scope> {
        self.provider().map(|provider| provider.scope)
    }

    pub fn is_root(&self) -> bool {
        matches!(&*self.node, Node::Root)
    }

    pub fn is_disposed(&self) -> bool {
        self.provider().is_some_and(ProviderNode::is_disposed)
    }

    /// Returns `true` if both handles point at the same node.
    pub fn same_node(a: &Injector, b: &Injector) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    fn provider(&self) -> Option<&ProviderNode> {
        match &*self.node {
            Node::Root => None,
            Node::Provider(provider) => Some(provider),
        }
    }

    /// Iterates over the provider nodes from this one up to the root.
    fn lineage(&self) -> impl Iterator<Item = &ProviderNode> {
        std::iter::successors(self.provider(), |&provider| provider.parent.provider())
    }

    fn ensure_open(&self, action: impl FnOnce() -> InjectAction) -> DiResult<()> {
        if self.is_disposed() {
            return Err(DiError::Disposed(action()));
        }
        Ok(())
    }

    fn attach(&self, token: Token, scope: Scope, source: Source) -> DiResult<Injector> {
        if self.lineage().any(|ancestor| ancestor.token == token) {
            return Err(DiError::DuplicateToken(token));
        }
        tracing::debug!(token = %token, ?scope, kind = source.kind(), "providing");
        Ok(Injector {
            node: Arc::new(Node::Provider(ProviderNode::new(
                token,
                scope,
                self.clone(),
                source,
            ))),
        })
    }

    fn resolve_parameters(
        &self,
        tokens: &[Token],
        injectable: &Target,
        target: Option<&Target>,
    ) -> DiResult<Args> {
        tokens
            .iter()
            .map(|token| match token {
                Token::Target => Ok(Arc::new(target.cloned()) as AnyArc),
                Token::Injector => Ok(Arc::new(self.clone()) as AnyArc),
                named => self.resolve_internal(named, Some(injectable)),
            })
            .collect::<DiResult<Vec<_>>>()
            .map(Args::new)
    }

    fn resolve_internal(&self, token: &Token, target: Option<&Target>) -> DiResult<AnyArc> {
        let mut current = self;
        loop {
            let provider = match &*current.node {
                Node::Root => return Err(DiError::NoProviderFound(token.clone())),
                Node::Provider(provider) => provider,
            };
            if provider.is_disposed() {
                return Err(DiError::Disposed(InjectAction::Resolve(token.clone())));
            }
            if provider.token == *token {
                return provider.value(target);
            }
            tracing::trace!(token = %token, via = %provider.token, "delegating");
            current = &provider.parent;
        }
    }
}

impl Default for Injector {
    fn default() -> Self {
        crate::create_injector()
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain: Vec<String> = self
            .lineage()
            .map(|provider| format!("{}({})", provider.token, provider.source_kind()))
            .collect();
        f.debug_struct("Injector")
            .field("chain", &chain)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
