//! Error types for the injector chain.

use std::borrow::Cow;
use std::fmt;

use crate::token::Token;

/// Boxed error produced by user code (constructors, factories, disposers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependency injection errors
///
/// Represents the failures that can occur while building an injector chain,
/// resolving tokens, injecting classes/functions or disposing nodes.
///
/// # Examples
///
/// ```rust
/// use chain_di::{create_injector, DiError, Token};
///
/// let injector = create_injector();
/// match injector.resolve(&Token::new("logger")) {
///     Err(DiError::NoProviderFound(token)) => assert_eq!(token, Token::new("logger")),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DiError {
    /// No node between the requesting node and the root provides the token
    #[error("No provider found for \"{0}\"!")]
    NoProviderFound(Token),

    /// Constructing a class or calling a function failed
    ///
    /// `path` is ordered outermost-first; `source` is the innermost cause.
    #[error("Could not inject [{}]. Cause: {source}", .path.join(" -> "))]
    Injection {
        path: Vec<Cow<'static, str>>,
        #[source]
        source: BoxError,
    },

    /// A disposed node was asked to resolve or inject
    #[error("Injector is already disposed. Please don't use it anymore. {0}")]
    Disposed(InjectAction),

    /// A new node reuses a token already provided by one of its ancestors
    #[error("Tokens must be unique in an injector chain: \"{0}\" is already provided by an ancestor")]
    DuplicateToken(Token),

    /// A resolved value could not be downcast to the requested type
    #[error("Type mismatch for \"{token}\": expected {expected}")]
    TypeMismatch { token: Token, expected: &'static str },

    /// A positional argument is missing or has a different type
    #[error("Argument #{index} is not available as {expected}")]
    Argument { index: usize, expected: &'static str },

    /// A disposer returned an error
    #[error(transparent)]
    Disposal(BoxError),
}

impl DiError {
    /// Wraps `cause` as the failure of injecting `name`.
    ///
    /// When the cause is itself an injection failure, its path is extended
    /// instead of nesting a second error, so the path reads `outer -> inner`.
    pub(crate) fn injection(name: Cow<'static, str>, cause: BoxError) -> Self {
        match cause.downcast::<DiError>() {
            Ok(inner) => match *inner {
                DiError::Injection { mut path, source } => {
                    path.insert(0, name);
                    DiError::Injection { path, source }
                }
                other => DiError::Injection {
                    path: vec![name],
                    source: Box::new(other),
                },
            },
            Err(cause) => DiError::Injection {
                path: vec![name],
                source: cause,
            },
        }
    }

    /// Returns the innermost error of an injection failure, or `self`.
    pub fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
        match self {
            DiError::Injection { source, .. } => source.as_ref(),
            other => other,
        }
    }

    /// Returns the injection path for injection failures.
    pub fn path(&self) -> Option<&[Cow<'static, str>]> {
        match self {
            DiError::Injection { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// What a caller was doing when it hit a disposed injector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectAction {
    /// `resolve` of a token
    Resolve(Token),
    /// `inject_class` / `inject_function` of the named injectable
    Inject(Cow<'static, str>),
}

impl fmt::Display for InjectAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectAction::Resolve(token) => write!(f, "Tried to resolve \"{}\".", token),
            InjectAction::Inject(name) => write!(f, "Tried to inject \"{}\".", name),
        }
    }
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
