mod cache;
mod error;
mod leaf;

pub use cache::PatternCache;
pub use error::{PatternError, PatternResult};
pub use leaf::{LeafPattern, try_match};
