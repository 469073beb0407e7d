use crate::pattern::LeafPattern;
use crate::types::RuleId;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Leaf(LeafPattern),
    Sequence(Vec<RuleId>),
    OneOf(Vec<RuleId>),
    Optional(RuleId),
}

impl RuleKind {
    /// Structural children in declaration order.
    pub fn children(&self) -> &[RuleId] {
        match self {
            RuleKind::Leaf(_) => &[],
            RuleKind::Sequence(items) | RuleKind::OneOf(items) => items,
            RuleKind::Optional(child) => std::slice::from_ref(child),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            RuleKind::Leaf(_) => "leaf",
            RuleKind::Sequence(_) => "sequence",
            RuleKind::OneOf(_) => "one_of",
            RuleKind::Optional(_) => "optional",
        }
    }
}

/// A declared rule. `kind` stays empty between `forward()` and the matching
/// `define_*` call.
#[derive(Debug, Clone, Default)]
pub struct RuleNode {
    pub(crate) kind: Option<RuleKind>,
    pub(crate) name: Option<Arc<str>>,
}

impl RuleNode {
    pub fn kind(&self) -> Option<&RuleKind> {
        self.kind.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_defined(&self) -> bool {
        self.kind.is_some()
    }
}
