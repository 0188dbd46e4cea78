//! Query execution with weighted multi-field matching.
//!
//! # Semantics
//!
//! - Free text is analyzed with the same tokenizer used for indexing, and a
//!   record matches only when it contains **every** term (AND).
//! - Each term scores the weight of the best field it appears in
//!   (name 3, short description 2, body 1); scores are summed.
//! - Facets (category, difficulty, port) intersect with the text match.
//! - Results are ordered by score descending, then id ascending, and paged
//!   after ranking.
//!
//! # Example
//!
//! ```rust,ignore
//! use protolex_fts::{build_index, search, SearchQuery};
//!
//! let index = build_index(&records);
//! let ids = search(&index, &SearchQuery::text("kerberos ticket").with_limit(5))?;
//! ```

use crate::index::SearchIndex;
use crate::tokenizer::unique_terms;
use crate::types::{Field, SearchConfig, SearchQuery, SearchResults};
use protolex_core::util::text::is_blank;
use protolex_core::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Run a query with the default paging limits and return the ranked ids.
///
/// Without an explicit `limit` at most [`DEFAULT_LIMIT`](crate::DEFAULT_LIMIT)
/// ids come back, so `SearchQuery::all()` over a larger corpus is a first page
/// only. Page with `offset`, or use [`execute`] and its `total`, to walk the
/// full ordered set.
pub fn search(index: &SearchIndex, query: &SearchQuery) -> Result<Vec<String>> {
    search_with_config(index, query, &SearchConfig::default())
}

/// Run a query with explicit paging limits and return the ranked ids.
pub fn search_with_config(
    index: &SearchIndex,
    query: &SearchQuery,
    config: &SearchConfig,
) -> Result<Vec<String>> {
    execute(index, query, config).map(|results| results.ids)
}

/// Run a query and return ids plus paging metadata.
///
/// # Errors
///
/// [`Error::InvalidQuery`] when `limit` is zero or the text is not blank but
/// contains no searchable terms. [`Error::Config`] when the configured
/// default limit is zero.
pub fn execute(index: &SearchIndex, query: &SearchQuery, config: &SearchConfig) -> Result<SearchResults> {
    let (limit, clamped) = resolve_limit(query.limit, config)?;
    let offset = query.offset.unwrap_or(0);

    let mut scored: Vec<(u32, &str)> = match query.text.as_deref().filter(|t| !is_blank(t)) {
        Some(text) => {
            let terms = unique_terms(text);
            if terms.is_empty() {
                return Err(Error::invalid_query(format!(
                    "search text {text:?} contains no searchable terms"
                )));
            }
            match_all_terms(index, &terms).into_iter().map(|(id, s)| (s, id)).collect()
        }
        None => index.ids().map(|id| (0, id)).collect(),
    };

    if let Some(category) = query.category {
        retain_in(&mut scored, index.category(category));
    }
    if let Some(difficulty) = query.difficulty {
        retain_in(&mut scored, index.difficulty(difficulty));
    }
    if let Some(port) = query.port {
        retain_in(&mut scored, index.port(port));
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));

    let total = scored.len();
    let ids = scored
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|(_, id)| id.to_string())
        .collect();

    Ok(SearchResults {
        ids,
        total,
        offset,
        limit,
        clamped,
    })
}

fn resolve_limit(requested: Option<usize>, config: &SearchConfig) -> Result<(usize, bool)> {
    if config.default_limit == 0 || config.max_limit == 0 {
        return Err(Error::config("search limits must be at least 1"));
    }

    let limit = match requested {
        Some(0) => return Err(Error::invalid_query("limit must be at least 1")),
        Some(n) => n,
        None => config.default_limit,
    };

    if limit > config.max_limit {
        log::debug!("search limit {limit} clamped to {}", config.max_limit);
        Ok((config.max_limit, true))
    } else {
        Ok((limit, false))
    }
}

/// Ids containing every term, with their summed best-field weights.
fn match_all_terms<'a>(index: &'a SearchIndex, terms: &[String]) -> BTreeMap<&'a str, u32> {
    let mut scores: Option<BTreeMap<&str, u32>> = None;

    for term in terms {
        let mut best: BTreeMap<&str, u32> = BTreeMap::new();
        for field in Field::ALL {
            for id in index.field_postings(field, term).into_iter().flatten() {
                let weight = best.entry(id.as_str()).or_insert(0);
                *weight = (*weight).max(field.weight());
            }
        }

        scores = Some(match scores {
            None => best,
            Some(acc) => acc
                .into_iter()
                .filter_map(|(id, score)| best.get(id).map(|w| (id, score + w)))
                .collect(),
        });

        if scores.as_ref().is_some_and(BTreeMap::is_empty) {
            break;
        }
    }

    scores.unwrap_or_default()
}

fn retain_in(scored: &mut Vec<(u32, &str)>, facet: Option<&BTreeSet<String>>) {
    match facet {
        Some(ids) => scored.retain(|(_, id)| ids.contains(*id)),
        None => scored.clear(),
    }
}

// ============================================================================
// Tests
// ============================================================================
