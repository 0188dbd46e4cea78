//! Search request, response and configuration types.

use protolex_core::{Category, Difficulty};
use serde::{Deserialize, Serialize};

/// Default page size when a query gives no `limit`.
pub const DEFAULT_LIMIT: usize = 50;

/// Largest page size served; larger requests are clamped.
pub const MAX_LIMIT: usize = 200;

// ============================================================================
// Fields
// ============================================================================

/// Indexed text fields, each with its ranking weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    ShortDescription,
    /// `fullDescription` and `useCases`.
    Body,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::ShortDescription, Field::Body];

    /// Score contributed by a term matched in this field.
    pub fn weight(self) -> u32 {
        match self {
            Field::Name => 3,
            Field::ShortDescription => 2,
            Field::Body => 1,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Paging limits applied by the query engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// A search request. Every field is optional; the empty query matches all
/// records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchQuery {
    /// Free text; every term must match.
    pub text: Option<String>,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub port: Option<u16>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl SearchQuery {
    /// Query matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Free-text query.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

// ============================================================================
// Results
// ============================================================================

/// Ranked ids plus paging metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Ids on this page, best match first.
    pub ids: Vec<String>,
    /// Number of matches before paging.
    pub total: usize,
    pub offset: usize,
    /// Page size actually applied.
    pub limit: usize,
    /// True if the requested limit exceeded the maximum and was lowered.
    pub clamped: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_weights_are_ordered() {
        assert!(Field::Name.weight() > Field::ShortDescription.weight());
        assert!(Field::ShortDescription.weight() > Field::Body.weight());
    }

    #[test]
    fn test_query_deserializes_camel_case() {
        let query: SearchQuery =
            serde_json::from_str(r#"{"text": "dns", "category": "Real Time", "limit": 5}"#).unwrap();
        assert_eq!(query.text.as_deref(), Some("dns"));
        assert_eq!(query.category, Some(Category::RealTime));
        assert_eq!(query.limit, Some(5));
        assert!(query.offset.is_none());
    }

    #[test]
    fn test_negative_limit_is_rejected_at_deserialization() {
        let err = serde_json::from_str::<SearchQuery>(r#"{"limit": -1}"#).unwrap_err();
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_unknown_query_field_is_rejected() {
        assert!(serde_json::from_str::<SearchQuery>(r#"{"txt": "dns"}"#).is_err());
    }

    #[test]
    fn test_search_config_defaults() {
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.default_limit, 50);
        assert_eq!(config.max_limit, 200);
    }
}
