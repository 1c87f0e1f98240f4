//! Tokens naming the dependencies an injector chain can supply.

use std::borrow::Cow;
use std::fmt;

/// Identifier for a dependency.
///
/// Tokens compare by value. Besides named tokens there are two reserved
/// tokens which live outside the named space and are only meaningful inside
/// an injectable's dependency list:
///
/// - [`TARGET_TOKEN`]: the class/function currently being injected
/// - [`INJECTOR_TOKEN`]: the injector performing the injection
///
/// # Examples
///
/// ```rust
/// use chain_di::{Token, TARGET_TOKEN};
///
/// const LOGGER: Token = Token::new("logger");
///
/// assert_eq!(LOGGER, Token::from("logger"));
/// assert_eq!(LOGGER, Token::from(String::from("logger")));
/// assert_ne!(Token::new("$target"), TARGET_TOKEN);
/// assert_eq!(TARGET_TOKEN.to_string(), "<TARGET>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    /// Reserved: resolves to the requesting injectable
    Target,
    /// Reserved: resolves to the injector performing the injection
    Injector,
    /// Ordinary named token
    Named(Cow<'static, str>),
}

/// Resolves to the [`Target`](crate::Target) being injected, or `None` when
/// the injectable was injected directly.
pub const TARGET_TOKEN: Token = Token::Target;

/// Resolves to the [`Injector`](crate::Injector) performing the injection.
pub const INJECTOR_TOKEN: Token = Token::Injector;

impl Token {
    /// Creates a named token from a static string.
    pub const fn new(name: &'static str) -> Self {
        Token::Named(Cow::Borrowed(name))
    }

    /// Returns `true` for [`TARGET_TOKEN`] and [`INJECTOR_TOKEN`].
    pub fn is_reserved(&self) -> bool {
        matches!(self, Token::Target | Token::Injector)
    }

    /// Human-readable name used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Token::Target => "<TARGET>",
            Token::Injector => "<INJECTOR>",
            Token::Named(name) => name,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&'static str> for Token {
    fn from(name: &'static str) -> Self {
        Token::new(name)
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Token::Named(Cow::Owned(name))
    }
}

impl From<&Token> for Token {
    fn from(token: &Token) -> Self {
        token.clone()
    }
}
