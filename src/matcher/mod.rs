mod capture;
mod mismatch;
mod outcome;
pub mod resolver;

pub use capture::{CaptureSlot, MatchNode, MatchTree};
pub use mismatch::{Alternative, MismatchReason, MismatchReport};
pub use outcome::MatchOutcome;
pub use resolver::match_tree;
