use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("grammar has no root rule")]
    MissingRoot,
    #[error("grammar root {root} must be named")]
    UnnamedRoot { root: String },
    #[error("name '{name}' refers to different rules under '{scope}'")]
    NameCollision { scope: String, name: String },
    #[error("rule graph contains a cycle: {}", .path.join(" -> "))]
    CyclicRule { path: Vec<String> },
    #[error("rule {rule} is reachable from the root but was never defined")]
    UndefinedRule { rule: String },
}

pub type TreeResult<T> = Result<T, TreeError>;
