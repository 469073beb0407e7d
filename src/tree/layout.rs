use hashbrown::HashMap as FastHashMap;
use std::sync::Arc;

use crate::types::RuleId;

use super::Footprint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpec {
    pub name: Arc<str>,
    pub node: RuleId,
    pub occurrences: u32,
}

impl SlotSpec {
    pub fn is_repeated(&self) -> bool {
        self.occurrences > 1
    }
}

/// Name slots owned by one named rule, resolved once at build time.
#[derive(Debug)]
pub struct ScopeLayout {
    owner: RuleId,
    name: Arc<str>,
    slots: Vec<SlotSpec>,
    by_name: FastHashMap<Arc<str>, usize>,
    by_node: FastHashMap<RuleId, usize>,
}

impl ScopeLayout {
    pub(crate) fn new(
        owner: RuleId,
        name: Arc<str>,
        body: &Footprint,
        name_of: impl Fn(RuleId) -> Arc<str>,
    ) -> Self {
        let mut slots = Vec::with_capacity(body.len());
        let mut by_name = FastHashMap::with_capacity(body.len());
        let mut by_node = FastHashMap::with_capacity(body.len());

        for occurrence in body.iter() {
            let slot_name = name_of(occurrence.node);
            by_name.insert(slot_name.clone(), slots.len());
            by_node.insert(occurrence.node, slots.len());
            slots.push(SlotSpec {
                name: slot_name,
                node: occurrence.node,
                occurrences: occurrence.count,
            });
        }

        Self {
            owner,
            name,
            slots,
            by_name,
            by_node,
        }
    }

    pub(crate) fn empty(owner: RuleId, name: impl Into<Arc<str>>) -> Self {
        Self {
            owner,
            name: name.into(),
            slots: Vec::new(),
            by_name: FastHashMap::new(),
            by_node: FastHashMap::new(),
        }
    }

    pub fn owner(&self) -> RuleId {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[SlotSpec] {
        &self.slots
    }

    pub fn slot(&self, name: &str) -> Option<&SlotSpec> {
        self.slot_index(name).map(|idx| &self.slots[idx])
    }

    pub fn slot_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub(crate) fn slot_of_node(&self, node: RuleId) -> Option<usize> {
        self.by_node.get(&node).copied()
    }
}
