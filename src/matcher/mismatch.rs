use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

use crate::diagnostics::{self, Location};
use crate::rule::RuleKind;
use crate::tree::RuleTree;
use crate::types::{Offset, RuleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    /// The pattern did not match the remaining text.
    Unmatched,
    /// The input ended where the pattern still expected text.
    EndOfInput,
    /// The grammar matched but input was left over and a full match was required.
    TrailingInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternative {
    pub label: String,
    pub pattern: String,
    pub snippet: String,
    pub reason: MismatchReason,
    pub named: bool,
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.named {
            write!(f, "{}: ", self.label)?;
        }
        match self.reason {
            MismatchReason::Unmatched => write!(
                f,
                "\"{}\" does not match \"{}\"",
                self.snippet, self.pattern
            ),
            MismatchReason::EndOfInput => {
                write!(f, "reached end of input but expected \"{}\"", self.pattern)
            }
            MismatchReason::TrailingInput => {
                write!(f, "\"{}\" found but expected end of input", self.snippet)
            }
        }
    }
}

/// Structured failure of a match: the offset where the root finally failed and
/// every alternative that was expected there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MismatchReport<'t> {
    #[serde(skip)]
    source: &'t str,
    position: Offset,
    alternatives: Vec<Alternative>,
}

impl<'t> MismatchReport<'t> {
    pub(crate) fn from_failure(
        failure: Failure,
        tree: &RuleTree,
        source: &'t str,
        preview_len: usize,
    ) -> Self {
        let position = failure.position.min(source.len());
        let snippet = diagnostics::preview(source.get(position..).unwrap_or(""), preview_len);
        let at_end = position >= source.len();

        let mut alternatives: Vec<Alternative> = Vec::with_capacity(failure.sites.len());
        for site in failure.sites {
            let alternative = match site {
                FailureSite::Rule(id) => {
                    let node = tree.node(id);
                    let pattern = match node.map(|node| node.kind()) {
                        Some(RuleKind::Leaf(leaf)) => leaf.raw().to_string(),
                        _ => tree.label(id),
                    };
                    Alternative {
                        label: tree.label(id),
                        pattern,
                        snippet: snippet.clone(),
                        reason: if at_end {
                            MismatchReason::EndOfInput
                        } else {
                            MismatchReason::Unmatched
                        },
                        named: node.is_some_and(|node| node.is_named()),
                    }
                }
                FailureSite::EndOfInput => Alternative {
                    label: "end of input".to_string(),
                    pattern: String::new(),
                    snippet: snippet.clone(),
                    reason: MismatchReason::TrailingInput,
                    named: false,
                },
            };

            if alternatives
                .iter()
                .all(|existing| existing.label != alternative.label)
            {
                alternatives.push(alternative);
            }
        }

        Self {
            source,
            position,
            alternatives,
        }
    }

    /// 0-based byte offset of the unrecovered failure.
    pub fn position(&self) -> Offset {
        self.position
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    pub fn source(&self) -> &'t str {
        self.source
    }

    pub fn location(&self) -> Location {
        diagnostics::locate(self.source, self.position)
    }

    /// Multi-line rendering with a caret under the failure position.
    pub fn long_description(&self) -> String {
        diagnostics::format_report(self, self.source)
    }
}

impl fmt::Display for MismatchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mismatch at {}", self.position)?;
        if !self.alternatives.is_empty() {
            let labels: Vec<&str> = self
                .alternatives
                .iter()
                .map(|alternative| alternative.label.as_str())
                .collect();
            write!(f, ": expected {}", labels.join(" or "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureSite {
    Rule(RuleId),
    EndOfInput,
}

/// The unrecovered failure of one branch: the offset it stopped at and the
/// rules that were expected there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Failure {
    position: Offset,
    sites: SmallVec<[FailureSite; 4]>,
}

impl Failure {
    pub(crate) fn at(position: Offset, site: FailureSite) -> Self {
        let mut sites = SmallVec::new();
        sites.push(site);
        Self { position, sites }
    }

    pub(crate) fn position(&self) -> Offset {
        self.position
    }

    /// Folds in a sibling branch that also failed. The furthest position wins
    /// and ties keep every site.
    pub(crate) fn merge(&mut self, other: Failure) {
        if other.position > self.position {
            *self = other;
        } else if other.position == self.position {
            for site in other.sites {
                if !self.sites.contains(&site) {
                    self.sites.push(site);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(index: u32) -> FailureSite {
        FailureSite::Rule(RuleId::new(0, index))
    }

    #[test]
    fn merge_keeps_only_furthest_sites() {
        let mut failure = Failure::at(2, rule(1));
        failure.merge(Failure::at(5, rule(2)));
        failure.merge(Failure::at(3, rule(3)));
        failure.merge(Failure::at(5, rule(4)));
        failure.merge(Failure::at(5, rule(2)));

        assert_eq!(failure.position(), 5);
        assert_eq!(failure.sites.as_slice(), &[rule(2), rule(4)]);
    }

    #[test]
    fn alternative_lines_follow_reason() {
        let mut alternative = Alternative {
            label: "who".to_string(),
            pattern: "John".to_string(),
            snippet: "Bob".to_string(),
            reason: MismatchReason::Unmatched,
            named: true,
        };
        assert_eq!(alternative.to_string(), "who: \"Bob\" does not match \"John\"");

        alternative.named = false;
        alternative.reason = MismatchReason::EndOfInput;
        assert_eq!(
            alternative.to_string(),
            "reached end of input but expected \"John\""
        );
    }
}
