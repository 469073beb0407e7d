mod error;
mod graph;
mod node;

pub use error::{RuleError, RuleResult};
pub use graph::{Part, RuleGraph};
pub use node::{RuleKind, RuleNode};
