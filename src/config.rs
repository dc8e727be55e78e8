//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::builder::ParentTieBreak;
use crate::error::{Error, Result};
use crate::merge::{MergeOrder, RelationMerger};

/// Settings for converting annotated documents.
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```rust
/// use termgraph::{MergeOrder, PipelineConfig};
///
/// let config = PipelineConfig::from_json(r#"{"merge_order": "declaration"}"#).unwrap();
/// assert_eq!(config.merge_order, MergeOrder::Declaration);
/// assert_eq!(config.separator_width, 1);
/// assert!(config.longest_only);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Order in which relations are merged.
    pub merge_order: MergeOrder,
    /// Spaces written between the span texts of a merged term.
    pub separator_width: usize,
    /// Parent claim order among terms with identical outer spans.
    pub tie_break: ParentTieBreak,
    /// Keep only terms not strictly contained in another term.
    pub longest_only: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            merge_order: MergeOrder::default(),
            separator_width: 1,
            tie_break: ParentTieBreak::default(),
            longest_only: true,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings for consistency.
    pub fn validate(&self) -> Result<()> {
        if self.separator_width == 0 {
            return Err(Error::config(
                "separator_width must be at least 1: merged span texts are joined by spaces",
            ));
        }
        Ok(())
    }

    /// Set the relation merge order.
    #[must_use]
    pub fn with_merge_order(mut self, order: MergeOrder) -> Self {
        self.merge_order = order;
        self
    }

    /// Set the separator width.
    #[must_use]
    pub fn with_separator_width(mut self, width: usize) -> Self {
        self.separator_width = width;
        self
    }

    /// Set the parent tie-break.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: ParentTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Enable or disable longest-span filtering.
    #[must_use]
    pub fn with_longest_only(mut self, longest_only: bool) -> Self {
        self.longest_only = longest_only;
        self
    }

    pub(crate) fn merger(&self) -> RelationMerger {
        RelationMerger::new(self.merge_order).with_separator_width(self.separator_width)
    }
}
