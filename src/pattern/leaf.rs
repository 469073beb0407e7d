use regex::Regex;
use std::fmt;
use std::sync::Arc;

use super::{PatternError, PatternResult};

/// A compiled leaf fragment. Matching is anchored: only a match starting
/// exactly at the requested offset counts.
#[derive(Clone)]
pub struct LeafPattern {
    raw: Box<str>,
    compiled: Arc<Regex>,
}

impl LeafPattern {
    pub fn new(raw: &str) -> PatternResult<Self> {
        Ok(Self {
            raw: raw.into(),
            compiled: Arc::new(compile_anchored(raw)?),
        })
    }

    pub(crate) fn from_compiled(raw: &str, compiled: Arc<Regex>) -> Self {
        Self {
            raw: raw.into(),
            compiled,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the consumed byte length when the pattern matches at `offset`.
    #[inline]
    pub fn try_match(&self, text: &str, offset: usize) -> Option<usize> {
        let rest = text.get(offset..)?;
        self.compiled.find(rest).map(|m| m.end())
    }
}

impl PartialEq for LeafPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for LeafPattern {}

impl fmt::Debug for LeafPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LeafPattern").field(&self.raw).finish()
    }
}

pub(crate) fn compile_anchored(raw: &str) -> PatternResult<Regex> {
    let anchored = format!(r"\A(?:{})", raw);
    Regex::new(&anchored).map_err(|err| PatternError::InvalidRegex {
        pattern: raw.to_string(),
        error: err.to_string(),
    })
}

/// One-shot anchored match of `pattern` against `text` at `offset`.
pub fn try_match(pattern: &str, text: &str, offset: usize) -> PatternResult<Option<usize>> {
    Ok(LeafPattern::new(pattern)?.try_match(text, offset))
}
