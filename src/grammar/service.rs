use std::sync::Arc;

use crate::errors::GrammarResult;
use crate::matcher::{MatchOutcome, match_tree};
use crate::rule::RuleGraph;
use crate::tree::{RuleTree, build_tree};

use super::options::GrammarOptions;
use super::stats::{MatchStats, MatchStatsSnapshot};

/// A built grammar. The rule tree is immutable, so one `Grammar` can serve
/// concurrent `match_text` calls from any number of threads.
#[derive(Debug)]
pub struct Grammar {
    tree: Arc<RuleTree>,
    options: GrammarOptions,
    stats: MatchStats,
}

impl Grammar {
    pub fn new(graph: &RuleGraph, options: Option<GrammarOptions>) -> GrammarResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;
        let tree = build_tree(graph)?;

        Ok(Self {
            tree: Arc::new(tree),
            options,
            stats: MatchStats::default(),
        })
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, text),
        fields(text_len = text.len() as u64)
    )]
    pub fn match_text<'t>(&self, text: &'t str) -> MatchOutcome<'t> {
        tracing::event!(
            tracing::Level::TRACE,
            operation = "match_text",
            text_len = text.len() as u64
        );

        let outcome = match_tree(&self.tree, text, &self.options);
        match &outcome {
            MatchOutcome::Matched(tree) => {
                self.stats.record_match();
                if self.options.debug {
                    tracing::event!(
                        tracing::Level::DEBUG,
                        outcome = "match",
                        consumed = tree.span().map_or(0, |span| span.len()) as u64,
                        "grammar matched"
                    );
                }
            }
            MatchOutcome::Mismatched(report) => {
                self.stats.record_mismatch();
                if self.options.debug {
                    tracing::event!(
                        tracing::Level::DEBUG,
                        outcome = "mismatch",
                        position = report.position() as u64,
                        alternatives = report.alternatives().len() as u64,
                        "grammar mismatched"
                    );
                }
            }
        }
        outcome
    }

    pub fn tree(&self) -> &Arc<RuleTree> {
        &self.tree
    }

    pub fn options(&self) -> &GrammarOptions {
        &self.options
    }

    pub fn stats(&self) -> MatchStatsSnapshot {
        self.stats.snapshot()
    }
}
