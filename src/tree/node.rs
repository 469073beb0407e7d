use bitflags::bitflags;
use smallvec::SmallVec;
use std::sync::Arc;

use crate::rule::RuleKind;
use crate::types::RuleId;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RuleFlags: u8 {
        const NAMED = 0b00000001;
        const ROOT = 0b00000010;
        const REACHABLE = 0b00000100;
        // occurs more than once under at least one named ancestor
        const REPEATED = 0b00001000;
    }
}

/// One named node occurring `count` times inside a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub node: RuleId,
    pub count: u32,
}

/// Named nodes, in first-traversal order, that visiting a node contributes
/// to its enclosing scope.
pub type Footprint = SmallVec<[Occurrence; 4]>;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub(crate) kind: RuleKind,
    pub(crate) name: Option<Arc<str>>,
    pub(crate) flags: RuleFlags,
}

impl TreeNode {
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn flags(&self) -> RuleFlags {
        self.flags
    }

    #[inline(always)]
    pub fn is_named(&self) -> bool {
        self.flags.contains(RuleFlags::NAMED)
    }

    #[inline(always)]
    pub fn is_repeated(&self) -> bool {
        self.flags.contains(RuleFlags::REPEATED)
    }

    #[inline(always)]
    pub fn is_reachable(&self) -> bool {
        self.flags.contains(RuleFlags::REACHABLE)
    }
}
