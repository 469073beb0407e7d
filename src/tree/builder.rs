use std::sync::Arc;

use crate::rule::{RuleGraph, RuleNode};
use crate::types::RuleId;

use super::layout::ScopeLayout;
use super::node::{Footprint, Occurrence, RuleFlags, TreeNode};
use super::{RuleTree, TreeError, TreeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Resolves a declared graph into an immutable [`RuleTree`].
#[tracing::instrument(level = "debug", skip(graph), fields(rules = graph.len() as u64))]
pub fn build_tree(graph: &RuleGraph) -> TreeResult<RuleTree> {
    let root = graph.root().ok_or(TreeError::MissingRoot)?;
    let named_root = graph.node(root).is_some_and(|node| node.name().is_some());
    if !named_root {
        return Err(TreeError::UnnamedRoot {
            root: graph.label(root),
        });
    }

    let mut builder = TreeBuilder::new(graph);
    builder.visit(root)?;
    let tree = builder.finish(root);

    tracing::event!(
        tracing::Level::TRACE,
        operation = "build_tree",
        reachable = tree.reachable_count() as u64,
        scopes = tree.scope_count() as u64
    );

    Ok(tree)
}

struct TreeBuilder<'g> {
    graph: &'g RuleGraph,
    marks: Vec<Mark>,
    stack: Vec<RuleId>,
    nodes: Vec<Option<TreeNode>>,
    footprints: Vec<Footprint>,
    scopes: Vec<Option<Arc<ScopeLayout>>>,
}

impl<'g> TreeBuilder<'g> {
    fn new(graph: &'g RuleGraph) -> Self {
        let len = graph.len();
        Self {
            graph,
            marks: vec![Mark::Unvisited; len],
            stack: Vec::new(),
            nodes: vec![None; len],
            footprints: vec![Footprint::new(); len],
            scopes: vec![None; len],
        }
    }

    fn visit(&mut self, id: RuleId) -> TreeResult<()> {
        match self.marks[id.index()] {
            Mark::Done => return Ok(()),
            Mark::Active => return Err(self.cycle_through(id)),
            Mark::Unvisited => {}
        }

        let graph = self.graph;
        let declared = graph.node(id).ok_or_else(|| TreeError::UndefinedRule {
            rule: graph.label(id),
        })?;
        let kind = declared
            .kind()
            .cloned()
            .ok_or_else(|| TreeError::UndefinedRule {
                rule: graph.label(id),
            })?;

        self.marks[id.index()] = Mark::Active;
        self.stack.push(id);
        for child in kind.children() {
            self.visit(*child)?;
        }
        self.stack.pop();
        self.marks[id.index()] = Mark::Done;

        let name = declared.name.clone();
        let scope_label = match &name {
            Some(name) => name.to_string(),
            None => self.enclosing_scope_label(id),
        };

        let mut body = Footprint::new();
        for child in kind.children() {
            merge_footprint(graph, &mut body, &self.footprints[child.index()], &scope_label)?;
        }

        let mut flags = RuleFlags::REACHABLE;
        match &name {
            Some(scope_name) => {
                flags |= RuleFlags::NAMED;
                let layout = ScopeLayout::new(id, scope_name.clone(), &body, |node| {
                    graph
                        .node(node)
                        .and_then(|n| n.name.clone())
                        .unwrap_or_else(|| Arc::from(""))
                });
                self.scopes[id.index()] = Some(Arc::new(layout));
                self.footprints[id.index()].push(Occurrence { node: id, count: 1 });
            }
            None => {
                self.footprints[id.index()] = body;
            }
        }

        self.nodes[id.index()] = Some(TreeNode { kind, name, flags });
        Ok(())
    }

    fn enclosing_scope_label(&self, id: RuleId) -> String {
        self.stack
            .iter()
            .rev()
            .find_map(|ancestor| {
                self.graph
                    .node(*ancestor)
                    .and_then(RuleNode::name)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| self.graph.label(id))
    }

    fn cycle_through(&self, id: RuleId) -> TreeError {
        let start = self
            .stack
            .iter()
            .position(|entry| *entry == id)
            .unwrap_or(0);
        let mut path: Vec<String> = self.stack[start..]
            .iter()
            .map(|entry| self.graph.label(*entry))
            .collect();
        path.push(self.graph.label(id));
        TreeError::CyclicRule { path }
    }

    fn finish(mut self, root: RuleId) -> RuleTree {
        let graph = self.graph;
        for (id, declared) in graph.iter() {
            if self.marks[id.index()] == Mark::Done {
                continue;
            }
            tracing::warn!(rule = %graph.label(id), "rule is not reachable from the grammar root");
            if let Some(kind) = declared.kind() {
                let flags = if declared.name.is_some() {
                    RuleFlags::NAMED
                } else {
                    RuleFlags::empty()
                };
                self.nodes[id.index()] = Some(TreeNode {
                    kind: kind.clone(),
                    name: declared.name.clone(),
                    flags,
                });
            }
        }

        for scope in self.scopes.iter().flatten() {
            for slot in scope.slots().iter().filter(|slot| slot.is_repeated()) {
                if let Some(node) = self.nodes[slot.node.index()].as_mut() {
                    node.flags |= RuleFlags::REPEATED;
                }
            }
        }

        if let Some(node) = self.nodes[root.index()].as_mut() {
            node.flags |= RuleFlags::ROOT;
        }

        RuleTree {
            nodes: self.nodes,
            footprints: self.footprints,
            scopes: self.scopes,
            root,
        }
    }
}

/// Adds `from` into `into`. The same node accumulates a count; a different
/// node under an already used name is a collision.
fn merge_footprint(
    graph: &RuleGraph,
    into: &mut Footprint,
    from: &[Occurrence],
    scope: &str,
) -> TreeResult<()> {
    for occurrence in from {
        let name = graph.node(occurrence.node).and_then(RuleNode::name);
        let existing = into.iter_mut().find(|entry| {
            graph.node(entry.node).and_then(RuleNode::name) == name
        });

        match existing {
            Some(entry) if entry.node == occurrence.node => entry.count += occurrence.count,
            Some(_) => {
                return Err(TreeError::NameCollision {
                    scope: scope.to_string(),
                    name: name.unwrap_or_default().to_string(),
                });
            }
            None => into.push(*occurrence),
        }
    }
    Ok(())
}
