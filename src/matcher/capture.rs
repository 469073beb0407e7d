use std::fmt;
use std::sync::Arc;

use crate::tree::{RuleTree, ScopeLayout};
use crate::types::{RuleId, Span};

/// Result of a successful match: the root rule's capture.
pub type MatchTree<'t> = MatchNode<'t>;

/// Capture of one named rule. Rules that did not take part in the match
/// (an optional that failed, an alternative that was not taken) are still
/// present with no span, so every declared name stays addressable.
#[derive(Clone)]
pub struct MatchNode<'t> {
    rule: RuleId,
    source: &'t str,
    span: Option<Span>,
    layout: Arc<ScopeLayout>,
    slots: Vec<CaptureSlot<'t>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureSlot<'t> {
    Single(MatchNode<'t>),
    Repeated(Vec<MatchNode<'t>>),
}

impl<'t> CaptureSlot<'t> {
    pub fn as_slice(&self) -> &[MatchNode<'t>] {
        match self {
            CaptureSlot::Single(node) => std::slice::from_ref(node),
            CaptureSlot::Repeated(nodes) => nodes,
        }
    }

    pub fn first(&self) -> Option<&MatchNode<'t>> {
        self.as_slice().first()
    }

    pub fn get(&self, index: usize) -> Option<&MatchNode<'t>> {
        self.as_slice().get(index)
    }

    pub fn is_repeated(&self) -> bool {
        matches!(self, CaptureSlot::Repeated(_))
    }
}

impl<'t> MatchNode<'t> {
    pub(crate) fn new(
        rule: RuleId,
        source: &'t str,
        span: Option<Span>,
        layout: Arc<ScopeLayout>,
        slots: Vec<CaptureSlot<'t>>,
    ) -> Self {
        Self {
            rule,
            source,
            span,
            layout,
            slots,
        }
    }

    /// Capture for a rule that did not match, with every nested name blank.
    pub(crate) fn blank(tree: &RuleTree, rule: RuleId, source: &'t str) -> Self {
        let layout = match tree.scope(rule) {
            Some(layout) => layout.clone(),
            None => Arc::new(ScopeLayout::empty(rule, tree.label(rule))),
        };
        let slots = layout
            .slots()
            .iter()
            .map(|spec| {
                if spec.is_repeated() {
                    CaptureSlot::Repeated(
                        (0..spec.occurrences)
                            .map(|_| MatchNode::blank(tree, spec.node, source))
                            .collect(),
                    )
                } else {
                    CaptureSlot::Single(MatchNode::blank(tree, spec.node, source))
                }
            })
            .collect();

        Self::new(rule, source, None, layout, slots)
    }

    pub fn rule(&self) -> RuleId {
        self.rule
    }

    pub fn name(&self) -> &str {
        self.layout.name()
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn matched(&self) -> Option<&'t str> {
        let source: &'t str = self.source;
        self.span.and_then(|span| source.get(span.start..span.end))
    }

    pub fn is_matched(&self) -> bool {
        self.span.is_some()
    }

    /// Slot for a direct named child. `None` means the name is not declared
    /// under this rule.
    pub fn get(&self, name: &str) -> Option<&CaptureSlot<'t>> {
        self.layout
            .slot_index(name)
            .and_then(|idx| self.slots.get(idx))
    }

    /// Single child capture; for a repeated rule, its first entry.
    pub fn child(&self, name: &str) -> Option<&MatchNode<'t>> {
        self.get(name).and_then(CaptureSlot::first)
    }

    pub fn children(&self, name: &str) -> &[MatchNode<'t>] {
        self.get(name).map(CaptureSlot::as_slice).unwrap_or(&[])
    }

    /// Follows a dotted path such as `who.person[1]` or `what.tea.milk`.
    pub fn descend(&self, path: &str) -> Option<&MatchNode<'t>> {
        let mut current = self;
        for step in path.split('.') {
            let (name, index) = split_index(step)?;
            let slot = current.get(name)?;
            current = match index {
                Some(index) => slot.get(index)?,
                None => slot.first()?,
            };
        }
        Some(current)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CaptureSlot<'t>)> {
        self.layout
            .slots()
            .iter()
            .zip(self.slots.iter())
            .map(|(spec, slot)| (&*spec.name, slot))
    }
}

fn split_index(step: &str) -> Option<(&str, Option<usize>)> {
    match step.strip_suffix(']').and_then(|rest| rest.split_once('[')) {
        Some((name, index)) => Some((name, Some(index.parse().ok()?))),
        None => Some((step, None)),
    }
}

impl PartialEq for MatchNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.rule == other.rule
            && self.span == other.span
            && self.matched() == other.matched()
            && self.slots == other.slots
    }
}

impl fmt::Debug for MatchNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("MatchNode");
        out.field("name", &self.name())
            .field("matched", &self.matched())
            .field("span", &self.span);
        if !self.slots.is_empty() {
            out.field("children", &self.iter().collect::<Vec<_>>());
        }
        out.finish()
    }
}

impl fmt::Display for MatchNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.matched().unwrap_or(""))
    }
}
