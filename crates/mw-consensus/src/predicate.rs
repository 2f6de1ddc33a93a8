use std::fmt;
use std::sync::Arc;

use mw_core::status::is_sentinel;
use mw_core::{BlockedPolicy, CellValue};

type BlockedFn = dyn Fn(&CellValue) -> bool + Send + Sync;

/// Per-table decision "is this status currently reported blocked".
///
/// Either a configured [`BlockedPolicy`] or a caller-supplied closure. The
/// sentinel is refused before either is consulted.
#[derive(Clone)]
pub enum BlockedPredicate {
    Policy(BlockedPolicy),
    Custom(Arc<BlockedFn>),
}

impl BlockedPredicate {
    pub fn custom(f: impl Fn(&CellValue) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    #[must_use]
    pub fn is_blocked(&self, value: &CellValue, sentinel: &str) -> bool {
        if is_sentinel(value, sentinel) {
            return false;
        }
        match self {
            Self::Policy(policy) => policy.is_blocked(value, sentinel),
            Self::Custom(f) => f(value),
        }
    }
}

impl From<BlockedPolicy> for BlockedPredicate {
    fn from(policy: BlockedPolicy) -> Self {
        Self::Policy(policy)
    }
}

impl fmt::Debug for BlockedPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Policy(policy) => f.debug_tuple("Policy").field(policy).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
