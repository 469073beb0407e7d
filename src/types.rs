use serde::{Deserialize, Serialize};
use std::fmt;

pub type Offset = usize;

/// Stable handle to a node in a [`RuleGraph`](crate::rule::RuleGraph) arena.
/// Carries the serial of the graph that issued it, so a handle from another
/// graph is rejected even when its index is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId {
    pub(crate) graph: u32,
    pub(crate) index: u32,
}

impl RuleId {
    #[inline]
    pub(crate) fn new(graph: u32, index: u32) -> Self {
        Self { graph, index }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Half-open byte range into the matched input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Offset,
    pub end: Offset,
}

impl Span {
    pub fn new(start: Offset, end: Offset) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
