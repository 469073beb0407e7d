use hashbrown::HashMap as FastHashMap;
use regex::Regex;
use std::sync::Arc;

use super::leaf::compile_anchored;
use super::{LeafPattern, PatternResult};

/// Compiled regexes keyed by raw pattern text, so repeated literals in one
/// grammar share a single automaton.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: FastHashMap<Box<str>, Arc<Regex>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leaf(&mut self, raw: &str) -> PatternResult<LeafPattern> {
        if let Some(existing) = self.compiled.get(raw) {
            return Ok(LeafPattern::from_compiled(raw, existing.clone()));
        }

        let arc = Arc::new(compile_anchored(raw)?);
        self.compiled
            .insert(raw.to_string().into_boxed_str(), arc.clone());
        Ok(LeafPattern::from_compiled(raw, arc))
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_patterns_share_compiled_regex() {
        let mut cache = PatternCache::new();
        let first = cache.leaf("tea").expect("pattern should compile");
        let second = cache.leaf("tea").expect("pattern should compile");
        let other = cache.leaf("juice").expect("pattern should compile");

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalid_pattern_is_not_cached() {
        let mut cache = PatternCache::new();
        assert!(cache.leaf("(").is_err());
        assert!(cache.is_empty());
    }
}
