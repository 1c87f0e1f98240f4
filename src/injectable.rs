//! Injectables: classes and functions that declare the tokens they need.

use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, DiError, DiResult};
use crate::internal::AnyArc;
use crate::injector::Injector;
use crate::token::Token;
use crate::traits::{AsyncDispose, Dispose, Disposer};

/// A type the injector can construct from declared dependencies.
///
/// `INJECT` lists the tokens to resolve, in the order `construct` receives
/// them. Leaving it out means the class has no dependencies.
///
/// # Examples
///
/// ```rust
/// use chain_di::{create_injector, Args, BoxError, Class, Token};
/// use std::sync::Arc;
///
/// struct Config {
///     url: String,
/// }
///
/// struct Repository {
///     config: Arc<Config>,
/// }
///
/// impl Class for Repository {
///     const INJECT: &'static [Token] = &[Token::new("config")];
///
///     fn construct(args: Args) -> Result<Self, BoxError> {
///         Ok(Repository { config: args.get(0)? })
///     }
/// }
///
/// let injector = create_injector()
///     .provide_value("config", Config { url: "postgres://localhost".into() })
///     .unwrap();
/// let repo = injector.inject_class::<Repository>().unwrap();
/// assert_eq!(repo.config.url, "postgres://localhost");
/// ```
pub trait Class: Sized + Send + Sync + 'static {
    /// Tokens resolved into the constructor arguments.
    const INJECT: &'static [Token] = &[];

    /// Builds an instance from the resolved arguments.
    fn construct(args: Args) -> Result<Self, BoxError>;

    /// Exposes the instance's disposal capability, if any.
    ///
    /// Only consulted for instances produced by a class provider node.
    fn disposer(self: Arc<Self>) -> Option<Disposer> {
        None
    }
}

type FnBody<R> = dyn Fn(Args) -> Result<R, BoxError> + Send + Sync;
type DisposerProbe<R> = dyn Fn(&Arc<R>) -> Option<Disposer> + Send + Sync;

/// A named function the injector can call with declared dependencies.
///
/// Cloning is cheap; the closure is shared.
///
/// # Examples
///
/// ```rust
/// use chain_di::{create_injector, Function};
///
/// let greet = Function::new("greet", |args| {
///     let name = args.get::<String>(0)?;
///     Ok(format!("hello {}", name))
/// })
/// .with_inject(["name"]);
///
/// let injector = create_injector().provide_value("name", String::from("world")).unwrap();
/// assert_eq!(injector.inject_function(&greet).unwrap(), "hello world");
/// ```
pub struct Function<R> {
    name: Cow<'static, str>,
    inject: Arc<[Token]>,
    body: Arc<FnBody<R>>,
    disposer: Option<Arc<DisposerProbe<R>>>,
}

impl<R: Send + Sync + 'static> Function<R> {
    /// Creates a function without dependencies.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, body: F) -> Self
    where
        F: Fn(Args) -> Result<R, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            inject: Arc::from(Vec::new()),
            body: Arc::new(body),
            disposer: None,
        }
    }

    /// Sets the tokens resolved into the function's arguments.
    pub fn with_inject<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        self.inject = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Sets how a produced value exposes its disposal capability.
    ///
    /// Only consulted for values produced by a factory provider node.
    pub fn with_disposer<P>(mut self, probe: P) -> Self
    where
        P: Fn(&Arc<R>) -> Option<Disposer> + Send + Sync + 'static,
    {
        self.disposer = Some(Arc::new(probe));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inject(&self) -> &[Token] {
        &self.inject
    }

    pub(crate) fn target(&self) -> Target {
        Target {
            name: self.name.clone(),
            kind: TargetKind::Function,
        }
    }

    pub(crate) fn call(&self, args: Args) -> Result<R, BoxError> {
        (self.body)(args)
    }

    pub(crate) fn disposer_for(&self, value: &Arc<R>) -> Option<Disposer> {
        self.disposer.as_ref().and_then(|probe| probe(value))
    }
}

impl<R: Dispose> Function<R> {
    /// Marks produced values as synchronously disposable.
    pub fn disposable(self) -> Self {
        self.with_disposer(|value| Some(Disposer::sync(value.clone())))
    }
}

impl<R: AsyncDispose> Function<R> {
    /// Marks produced values as asynchronously disposable.
    pub fn async_disposable(self) -> Self {
        self.with_disposer(|value| Some(Disposer::from_async(value.clone())))
    }
}

impl<R> Clone for Function<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            inject: self.inject.clone(),
            body: self.body.clone(),
            disposer: self.disposer.clone(),
        }
    }
}

impl<R> fmt::Debug for Function<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("inject", &self.inject)
            .finish()
    }
}

/// Whether an injectable is a class or a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Class,
    Function,
}

/// Identity of the injectable currently being injected.
///
/// This is what [`TARGET_TOKEN`](crate::TARGET_TOKEN) resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    name: Cow<'static, str>,
    kind: TargetKind,
}

impl Target {
    /// Target identity of class `C`.
    pub fn class<C: Class>() -> Self {
        Target {
            name: Cow::Borrowed(type_name::<C>()),
            kind: TargetKind::Class,
        }
    }

    /// Target identity of function `f`.
    pub fn function<R: Send + Sync + 'static>(f: &Function<R>) -> Self {
        f.target()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Resolved arguments, in the order the injectable declared its tokens.
pub struct Args {
    values: Vec<AnyArc>,
}

impl Args {
    pub(crate) fn new(values: Vec<AnyArc>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns argument `index` as `T`.
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> DiResult<Arc<T>> {
        self.values
            .get(index)
            .and_then(|value| value.clone().downcast::<T>().ok())
            .ok_or(DiError::Argument {
                index,
                expected: type_name::<T>(),
            })
    }

    /// Returns argument `index`, declared as [`TARGET_TOKEN`](crate::TARGET_TOKEN).
    pub fn target(&self, index: usize) -> DiResult<Option<Target>> {
        self.get::<Option<Target>>(index).map(|target| (*target).clone())
    }

    /// Returns argument `index`, declared as [`INJECTOR_TOKEN`](crate::INJECTOR_TOKEN).
    pub fn injector(&self, index: usize) -> DiResult<Injector> {
        self.get::<Injector>(index).map(|injector| (*injector).clone())
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.values.len()).finish()
    }
}
