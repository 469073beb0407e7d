pub mod diagnostics;
pub mod errors;
pub mod grammar;
pub mod matcher;
pub mod pattern;
pub mod rule;
pub mod tree;
pub mod types;

pub use errors::{GrammarError, GrammarResult};
pub use grammar::{Grammar, GrammarOptions, GrammarOptionsBuilder};
pub use matcher::{CaptureSlot, MatchNode, MatchOutcome, MatchTree, MismatchReport};
pub use rule::{Part, RuleGraph};
pub use types::{RuleId, Span};
