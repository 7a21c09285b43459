//! Identity of an issued poem lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one issued lookup.
///
/// Ids are allocated by the fetch lifecycle in strictly increasing order and
/// travel with the request through the host runtime, so a late completion can
/// be matched against the request the lifecycle is currently waiting on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl RequestId {
    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
