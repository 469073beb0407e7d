mod options;
mod service;
mod stats;

pub use options::{
    DEFAULT_SNIPPET_PREVIEW_LEN, GrammarOptions, GrammarOptionsBuilder, GrammarOptionsError,
};
pub use service::Grammar;
pub use stats::{MatchStats, MatchStatsSnapshot};
