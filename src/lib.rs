//! # chain-di
//!
//! Hierarchical, token-based dependency injection for Rust.
//!
//! ## Features
//!
//! - **Injector chains**: every `provide_*` call extends the chain by one node
//! - **Token lookup**: dependencies are resolved by walking up to the root
//! - **Scopes**: Singleton (cached per node) and Transient providers
//! - **Ordered async disposal**: descendants are disposed before ancestors
//! - **Duplicate detection**: a token can appear only once per lineage
//!
//! ## Quick Start
//!
//! ```rust
//! use chain_di::{create_injector, Args, BoxError, Class, Function, Token};
//! use std::sync::Arc;
//!
//! struct Logger {
//!     prefix: String,
//! }
//!
//! struct UserService {
//!     logger: Arc<Logger>,
//! }
//!
//! impl Class for UserService {
//!     const INJECT: &'static [Token] = &[Token::new("logger")];
//!
//!     fn construct(args: Args) -> Result<Self, BoxError> {
//!         Ok(UserService { logger: args.get(0)? })
//!     }
//! }
//!
//! let logger = Function::new("logger", |args| {
//!     Ok(Logger { prefix: format!("[{}]", args.get::<String>(0)?) })
//! })
//! .with_inject(["app"]);
//!
//! let injector = create_injector()
//!     .provide_value("app", String::from("shop"))
//!     .unwrap()
//!     .provide_factory("logger", logger)
//!     .unwrap();
//!
//! let service = injector.inject_class::<UserService>().unwrap();
//! assert_eq!(service.logger.prefix, "[shop]");
//! ```
//!
//! ## Disposal
//!
//! ```rust
//! use chain_di::{create_injector, BoxError, Dispose, Function};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! struct Connection {
//!     closed: Arc<AtomicBool>,
//! }
//!
//! impl Dispose for Connection {
//!     fn dispose(&self) -> Result<(), BoxError> {
//!         self.closed.store(true, Ordering::SeqCst);
//!         Ok(())
//!     }
//! }
//!
//! # tokio_test_block(async {
//! let closed = Arc::new(AtomicBool::new(false));
//! let flag = closed.clone();
//! let injector = create_injector()
//!     .provide_factory(
//!         "connection",
//!         Function::new("connect", move |_| Ok(Connection { closed: flag.clone() })).disposable(),
//!     )
//!     .unwrap();
//!
//! injector.resolve(&"connection".into()).unwrap();
//! injector.dispose().await.unwrap();
//! assert!(closed.load(Ordering::SeqCst));
//! assert!(injector.resolve(&"connection".into()).is_err());
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

pub mod error;
pub mod injectable;
pub mod injector;
pub mod scope;
pub mod token;
pub mod traits;

// Internal modules
mod internal;

use once_cell::sync::Lazy;

pub use error::{BoxError, DiError, DiResult, InjectAction};
pub use injectable::{Args, Class, Function, Target, TargetKind};
pub use injector::Injector;
pub use internal::AnyArc;
pub use scope::Scope;
pub use token::{Token, INJECTOR_TOKEN, TARGET_TOKEN};
pub use traits::{AsyncDispose, Dispose, Disposer};

/// The process-wide root injector.
///
/// It provides nothing, holds no state and disposing it is a no-op.
pub static ROOT_INJECTOR: Lazy<Injector> = Lazy::new(Injector::new_root);

/// Returns a handle to [`ROOT_INJECTOR`], the start of every chain.
pub fn create_injector() -> Injector {
    ROOT_INJECTOR.clone()
}
