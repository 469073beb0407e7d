use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SNIPPET_PREVIEW_LEN: usize = 40;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GrammarOptions {
    /// Characters of remaining input quoted per failed alternative.
    pub snippet_preview_len: usize,
    /// Treat text left over after the root rule as a mismatch.
    pub require_full_match: bool,
    pub debug: bool,
}

impl Default for GrammarOptions {
    fn default() -> Self {
        Self {
            snippet_preview_len: DEFAULT_SNIPPET_PREVIEW_LEN,
            require_full_match: false,
            debug: false,
        }
    }
}

impl GrammarOptions {
    pub fn builder() -> GrammarOptionsBuilder {
        GrammarOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), GrammarOptionsError> {
        if self.snippet_preview_len == 0 {
            return Err(GrammarOptionsError::SnippetPreviewLenInvalid {
                provided: self.snippet_preview_len,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct GrammarOptionsBuilder {
    options: GrammarOptions,
}

impl GrammarOptionsBuilder {
    pub fn snippet_preview_len(mut self, value: usize) -> Self {
        self.options.snippet_preview_len = value;
        self
    }

    pub fn require_full_match(mut self, value: bool) -> Self {
        self.options.require_full_match = value;
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> Result<GrammarOptions, GrammarOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarOptionsError {
    #[error("snippet_preview_len must be at least 1 (got {provided})")]
    SnippetPreviewLenInvalid { provided: usize },
}
