mod builder;
mod error;
mod layout;
mod node;
mod rule_tree;

pub use builder::build_tree;
pub use error::{TreeError, TreeResult};
pub use layout::{ScopeLayout, SlotSpec};
pub use node::{Footprint, Occurrence, RuleFlags, TreeNode};
pub use rule_tree::RuleTree;
