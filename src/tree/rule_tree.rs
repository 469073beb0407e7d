use std::sync::Arc;

use crate::types::RuleId;

use super::layout::ScopeLayout;
use super::node::{Footprint, Occurrence, TreeNode};

/// Validated, immutable rule tree. Shared read-only by every match call.
#[derive(Debug)]
pub struct RuleTree {
    pub(crate) nodes: Vec<Option<TreeNode>>,
    pub(crate) footprints: Vec<Footprint>,
    pub(crate) scopes: Vec<Option<Arc<ScopeLayout>>>,
    pub(crate) root: RuleId,
}

impl RuleTree {
    pub fn root(&self) -> RuleId {
        self.root
    }

    pub fn node(&self, id: RuleId) -> Option<&TreeNode> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Layout of the scope owned by a named rule.
    pub fn scope(&self, id: RuleId) -> Option<&Arc<ScopeLayout>> {
        self.scopes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn root_scope(&self) -> Option<&Arc<ScopeLayout>> {
        self.scope(self.root)
    }

    pub fn footprint(&self, id: RuleId) -> &[Occurrence] {
        self.footprints
            .get(id.index())
            .map(|footprint| footprint.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn reachable_count(&self) -> usize {
        self.nodes
            .iter()
            .flatten()
            .filter(|node| node.is_reachable())
            .count()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.iter().flatten().count()
    }

    /// Failure label: the rule name, or the raw pattern of an unnamed leaf.
    pub fn label(&self, id: RuleId) -> String {
        match self.node(id) {
            Some(node) => match (node.name(), node.kind()) {
                (Some(name), _) => name.to_string(),
                (None, crate::rule::RuleKind::Leaf(leaf)) => leaf.raw().to_string(),
                (None, kind) => format!("{}{}", kind.kind_name(), id),
            },
            None => id.to_string(),
        }
    }
}
