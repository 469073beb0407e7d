use crate::grammar::GrammarOptionsError;
use crate::pattern::PatternError;
use crate::rule::RuleError;
use crate::tree::TreeError;
use thiserror::Error;

/// Construction-time failure. Mismatches are ordinary match outcomes and
/// never surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Options(#[from] GrammarOptionsError),
}

pub type GrammarResult<T> = Result<T, GrammarError>;
