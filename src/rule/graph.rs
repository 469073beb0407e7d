use crate::pattern::PatternCache;
use crate::types::RuleId;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::{RuleError, RuleKind, RuleNode, RuleResult};

/// A child reference used while declaring rules: either an existing rule or a
/// pattern string that becomes a fresh unnamed leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part<'a> {
    Rule(RuleId),
    Pattern(&'a str),
}

impl From<RuleId> for Part<'_> {
    fn from(id: RuleId) -> Self {
        Part::Rule(id)
    }
}

impl<'a> From<&'a str> for Part<'a> {
    fn from(pattern: &'a str) -> Self {
        Part::Pattern(pattern)
    }
}

impl<'a> From<&'a String> for Part<'a> {
    fn from(pattern: &'a String) -> Self {
        Part::Pattern(pattern.as_str())
    }
}

/// Builds an array of [`Part`]s from a mix of rule ids and pattern strings.
#[macro_export]
macro_rules! parts {
    ($($part:expr),* $(,)?) => {
        [$($crate::rule::Part::from($part)),*]
    };
}

static NEXT_GRAPH_SERIAL: AtomicU32 = AtomicU32::new(0);

/// Arena of declared rules. Nodes are addressed by [`RuleId`] and may be
/// referenced from any number of parents.
#[derive(Debug)]
pub struct RuleGraph {
    serial: u32,
    nodes: Vec<RuleNode>,
    root: Option<RuleId>,
    patterns: PatternCache,
}

impl Default for RuleGraph {
    fn default() -> Self {
        Self {
            serial: NEXT_GRAPH_SERIAL.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            root: None,
            patterns: PatternCache::default(),
        }
    }
}

impl RuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(&mut self, raw: &str) -> RuleResult<RuleId> {
        let leaf = self.patterns.leaf(raw)?;
        Ok(self.push(Some(RuleKind::Leaf(leaf))))
    }

    pub fn sequence<'a, I, P>(&mut self, parts: I) -> RuleResult<RuleId>
    where
        I: IntoIterator<Item = P>,
        P: Into<Part<'a>>,
    {
        let items = self.resolve_parts(parts)?;
        Ok(self.push(Some(RuleKind::Sequence(items))))
    }

    pub fn one_of<'a, I, P>(&mut self, parts: I) -> RuleResult<RuleId>
    where
        I: IntoIterator<Item = P>,
        P: Into<Part<'a>>,
    {
        let items = self.resolve_parts(parts)?;
        let id = self.next_id();
        if items.is_empty() {
            return Err(RuleError::EmptyAlternation { id });
        }
        Ok(self.push(Some(RuleKind::OneOf(items))))
    }

    pub fn optional<'a, P>(&mut self, part: P) -> RuleResult<RuleId>
    where
        P: Into<Part<'a>>,
    {
        let child = self.resolve_part(part.into())?;
        Ok(self.push(Some(RuleKind::Optional(child))))
    }

    /// Reserves a node to be filled in later, so rules may refer to one
    /// another before both exist.
    pub fn forward(&mut self) -> RuleId {
        self.push(None)
    }

    pub fn define_sequence<'a, I, P>(&mut self, target: RuleId, parts: I) -> RuleResult<RuleId>
    where
        I: IntoIterator<Item = P>,
        P: Into<Part<'a>>,
    {
        self.ensure_undefined(target)?;
        let items = self.resolve_parts(parts)?;
        self.fill(target, RuleKind::Sequence(items));
        Ok(target)
    }

    pub fn define_one_of<'a, I, P>(&mut self, target: RuleId, parts: I) -> RuleResult<RuleId>
    where
        I: IntoIterator<Item = P>,
        P: Into<Part<'a>>,
    {
        self.ensure_undefined(target)?;
        let items = self.resolve_parts(parts)?;
        if items.is_empty() {
            return Err(RuleError::EmptyAlternation { id: target });
        }
        self.fill(target, RuleKind::OneOf(items));
        Ok(target)
    }

    pub fn define_optional<'a, P>(&mut self, target: RuleId, part: P) -> RuleResult<RuleId>
    where
        P: Into<Part<'a>>,
    {
        self.ensure_undefined(target)?;
        let child = self.resolve_part(part.into())?;
        self.fill(target, RuleKind::Optional(child));
        Ok(target)
    }

    /// Labels a rule. Giving the same name again is a no-op; a different one
    /// is rejected.
    pub fn name(&mut self, id: RuleId, name: &str) -> RuleResult<RuleId> {
        self.check(id)?;
        if name.is_empty() {
            return Err(RuleError::EmptyName { id });
        }

        let node = &mut self.nodes[id.index()];
        match node.name.as_deref() {
            Some(existing) if existing != name => Err(RuleError::RuleRenamed {
                existing: existing.to_string(),
                requested: name.to_string(),
            }),
            Some(_) => Ok(id),
            None => {
                node.name = Some(Arc::from(name));
                Ok(id)
            }
        }
    }

    pub fn set_root(&mut self, id: RuleId) -> RuleResult<()> {
        self.check(id)?;
        match self.root {
            Some(existing) if existing != id => Err(RuleError::DuplicateRoot {
                existing,
                requested: id,
            }),
            _ => {
                self.root = Some(id);
                Ok(())
            }
        }
    }

    pub fn root(&self) -> Option<RuleId> {
        self.root
    }

    pub fn node(&self, id: RuleId) -> Option<&RuleNode> {
        if id.graph != self.serial {
            return None;
        }
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &RuleNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (RuleId::new(self.serial, idx as u32), node))
    }

    /// Name if present, otherwise the leaf pattern or the kind and id.
    pub fn label(&self, id: RuleId) -> String {
        match self.node(id) {
            Some(node) => match (&node.name, &node.kind) {
                (Some(name), _) => name.to_string(),
                (None, Some(RuleKind::Leaf(leaf))) => format!("\"{}\"", leaf.raw()),
                (None, Some(kind)) => format!("{}{}", kind.kind_name(), id),
                (None, None) => format!("forward{}", id),
            },
            None => id.to_string(),
        }
    }

    fn next_id(&self) -> RuleId {
        RuleId::new(self.serial, self.nodes.len() as u32)
    }

    fn push(&mut self, kind: Option<RuleKind>) -> RuleId {
        let id = self.next_id();
        self.nodes.push(RuleNode { kind, name: None });
        id
    }

    fn fill(&mut self, target: RuleId, kind: RuleKind) {
        self.nodes[target.index()].kind = Some(kind);
    }

    fn check(&self, id: RuleId) -> RuleResult<()> {
        if id.graph == self.serial && id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(RuleError::UnknownRule { id })
        }
    }

    fn ensure_undefined(&self, id: RuleId) -> RuleResult<()> {
        self.check(id)?;
        if self.nodes[id.index()].is_defined() {
            return Err(RuleError::AlreadyDefined { id });
        }
        Ok(())
    }

    fn resolve_part(&mut self, part: Part<'_>) -> RuleResult<RuleId> {
        match part {
            Part::Rule(id) => {
                self.check(id)?;
                Ok(id)
            }
            Part::Pattern(raw) => self.pattern(raw),
        }
    }

    fn resolve_parts<'a, I, P>(&mut self, parts: I) -> RuleResult<Vec<RuleId>>
    where
        I: IntoIterator<Item = P>,
        P: Into<Part<'a>>,
    {
        parts
            .into_iter()
            .map(|part| self.resolve_part(part.into()))
            .collect()
    }
}
