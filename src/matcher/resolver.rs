use smallvec::SmallVec;

use crate::grammar::GrammarOptions;
use crate::rule::RuleKind;
use crate::tree::{Occurrence, RuleTree, ScopeLayout, TreeNode};
use crate::types::{Offset, RuleId, Span};

use super::capture::{CaptureSlot, MatchNode};
use super::mismatch::{Failure, FailureSite, MismatchReport};
use super::MatchOutcome;

type Step = Result<Offset, Failure>;

/// Matches `text` against `tree` from offset 0. Trailing text after the root
/// match is allowed unless `require_full_match` is set.
#[tracing::instrument(
    level = "trace",
    skip(tree, text, options),
    fields(text_len = text.len() as u64)
)]
pub fn match_tree<'t>(
    tree: &RuleTree,
    text: &'t str,
    options: &GrammarOptions,
) -> MatchOutcome<'t> {
    let resolver = Resolver { tree, text };

    let matched = resolver.match_root(tree.root()).and_then(|node| match node.span() {
        Some(span) if options.require_full_match && span.end < text.len() => {
            Err(Failure::at(span.end, FailureSite::EndOfInput))
        }
        _ => Ok(node),
    });

    match matched {
        Ok(node) => MatchOutcome::Matched(node),
        Err(failure) => {
            tracing::event!(
                tracing::Level::TRACE,
                operation = "match_tree",
                position = failure.position() as u64
            );
            MatchOutcome::Mismatched(MismatchReport::from_failure(
                failure,
                tree,
                text,
                options.snippet_preview_len,
            ))
        }
    }
}

struct Resolver<'g, 't> {
    tree: &'g RuleTree,
    text: &'t str,
}

impl<'g, 't> Resolver<'g, 't> {
    fn match_root(&self, root: RuleId) -> Result<MatchNode<'t>, Failure> {
        let tree = self.tree;
        let (Some(node), Some(layout)) = (tree.node(root), tree.scope(root)) else {
            return Err(Failure::at(0, FailureSite::Rule(root)));
        };

        let mut frame = Frame::new(layout);
        let end = self.match_body(root, node, 0, &mut frame)?;
        Ok(frame.into_node(tree, root, self.text, Span::new(0, end)))
    }

    /// Matches one rule occurring inside `frame`'s scope. A named rule gets
    /// its own frame and lands in the next entry of its slot.
    fn match_rule(&self, id: RuleId, offset: Offset, frame: &mut Frame<'g, 't>) -> Step {
        let tree = self.tree;
        let missing = || Failure::at(offset, FailureSite::Rule(id));
        let node = tree.node(id).ok_or_else(missing)?;

        if !node.is_named() {
            return self.match_body(id, node, offset, frame);
        }

        let slot = frame.layout.slot_of_node(id).ok_or_else(missing)?;
        let entry = frame.counters[slot];
        frame.counters[slot] += 1;

        let mut inner = Frame::new(tree.scope(id).ok_or_else(missing)?);

        // A named optional whose child fails still succeeds, but its capture
        // stays unmatched rather than an empty match.
        if let RuleKind::Optional(child) = node.kind() {
            let Ok(end) = self.match_rule(*child, offset, &mut inner) else {
                return Ok(offset);
            };
            let captured = inner.into_node(tree, id, self.text, Span::new(offset, end));
            frame.filled.push((slot, entry, captured));
            return Ok(end);
        }

        let end = self.match_body(id, node, offset, &mut inner)?;
        let captured = inner.into_node(tree, id, self.text, Span::new(offset, end));
        frame.filled.push((slot, entry, captured));
        Ok(end)
    }

    fn match_body(
        &self,
        id: RuleId,
        node: &'g TreeNode,
        offset: Offset,
        frame: &mut Frame<'g, 't>,
    ) -> Step {
        match node.kind() {
            RuleKind::Leaf(leaf) => leaf
                .try_match(self.text, offset)
                .map(|consumed| offset + consumed)
                .ok_or_else(|| Failure::at(offset, FailureSite::Rule(id))),
            RuleKind::Sequence(items) => {
                let mut cursor = offset;
                for item in items {
                    cursor = self.match_rule(*item, cursor, frame)?;
                }
                Ok(cursor)
            }
            RuleKind::OneOf(alternatives) => {
                let mut failed: Option<Failure> = None;
                for (idx, alternative) in alternatives.iter().enumerate() {
                    let checkpoint = frame.checkpoint();
                    match self.match_rule(*alternative, offset, frame) {
                        Ok(end) => {
                            for skipped in &alternatives[idx + 1..] {
                                frame.skip(self.tree.footprint(*skipped));
                            }
                            return Ok(end);
                        }
                        Err(failure) => {
                            frame.rollback(checkpoint, self.tree.footprint(*alternative));
                            match failed.as_mut() {
                                Some(acc) => acc.merge(failure),
                                None => failed = Some(failure),
                            }
                        }
                    }
                }
                Err(failed.unwrap_or_else(|| Failure::at(offset, FailureSite::Rule(id))))
            }
            RuleKind::Optional(child) => {
                let checkpoint = frame.checkpoint();
                match self.match_rule(*child, offset, frame) {
                    Ok(end) => Ok(end),
                    Err(_) => {
                        frame.rollback(checkpoint, self.tree.footprint(*child));
                        Ok(offset)
                    }
                }
            }
        }
    }
}

struct Checkpoint {
    counters: SmallVec<[u32; 8]>,
    filled: usize,
}

/// Per-scope match state: how many occurrences of each slot have been
/// passed, and the captures recorded so far.
struct Frame<'g, 't> {
    layout: &'g ScopeLayout,
    counters: SmallVec<[u32; 8]>,
    filled: Vec<(usize, u32, MatchNode<'t>)>,
}

impl<'g, 't> Frame<'g, 't> {
    fn new(layout: &'g ScopeLayout) -> Self {
        Self {
            layout,
            counters: SmallVec::from_elem(0, layout.slots().len()),
            filled: Vec::new(),
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            counters: self.counters.clone(),
            filled: self.filled.len(),
        }
    }

    /// Counts the occurrences inside a branch that was not taken.
    fn skip(&mut self, footprint: &[Occurrence]) {
        for occurrence in footprint {
            if let Some(slot) = self.layout.slot_of_node(occurrence.node) {
                self.counters[slot] += occurrence.count;
            }
        }
    }

    /// Drops everything a failed branch recorded, then counts the branch as
    /// skipped.
    fn rollback(&mut self, checkpoint: Checkpoint, footprint: &[Occurrence]) {
        self.counters = checkpoint.counters;
        self.filled.truncate(checkpoint.filled);
        self.skip(footprint);
    }

    fn into_node(
        self,
        tree: &RuleTree,
        rule: RuleId,
        source: &'t str,
        span: Span,
    ) -> MatchNode<'t> {
        let specs = self.layout.slots();
        let mut entries: Vec<Vec<Option<MatchNode<'t>>>> = specs
            .iter()
            .map(|spec| (0..spec.occurrences).map(|_| None).collect())
            .collect();

        for (slot, entry, captured) in self.filled {
            if let Some(target) = entries
                .get_mut(slot)
                .and_then(|list| list.get_mut(entry as usize))
            {
                *target = Some(captured);
            }
        }

        let slots = specs
            .iter()
            .zip(entries)
            .map(|(spec, list)| {
                let mut nodes: Vec<MatchNode<'t>> = list
                    .into_iter()
                    .map(|entry| entry.unwrap_or_else(|| MatchNode::blank(tree, spec.node, source)))
                    .collect();
                if spec.is_repeated() {
                    CaptureSlot::Repeated(nodes)
                } else {
                    match nodes.pop() {
                        Some(node) => CaptureSlot::Single(node),
                        None => CaptureSlot::Repeated(nodes),
                    }
                }
            })
            .collect();

        let layout = tree
            .scope(rule)
            .cloned()
            .unwrap_or_else(|| std::sync::Arc::new(ScopeLayout::empty(rule, tree.label(rule))));
        MatchNode::new(rule, source, Some(span), layout, slots)
    }
}
