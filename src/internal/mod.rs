//! Internal implementation details.

pub(crate) mod dispose_bag;

pub(crate) use dispose_bag::DisposeBag;

use std::any::Any;
use std::sync::Arc;

/// Type-erased shared value as stored by provider nodes.
pub type AnyArc = Arc<dyn Any + Send + Sync>;
