//! Core traits for the injector chain.

mod dispose;

pub use dispose::{AsyncDispose, Dispose, Disposer};
