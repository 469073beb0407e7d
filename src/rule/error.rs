use crate::pattern::PatternError;
use crate::types::RuleId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule {id} does not belong to this graph")]
    UnknownRule { id: RuleId },
    #[error("rule {id} is already defined")]
    AlreadyDefined { id: RuleId },
    #[error("trying to rename already named rule '{existing}' to '{requested}'")]
    RuleRenamed { existing: String, requested: String },
    #[error("rule {id} cannot be given an empty name")]
    EmptyName { id: RuleId },
    #[error("alternation {id} needs at least one alternative")]
    EmptyAlternation { id: RuleId },
    #[error("grammar root is already {existing}; cannot also declare {requested}")]
    DuplicateRoot { existing: RuleId, requested: RuleId },
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

pub type RuleResult<T> = Result<T, RuleError>;
