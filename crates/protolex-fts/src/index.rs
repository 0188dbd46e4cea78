//! Inverted index over protocol records.
//!
//! Postings are kept per [`Field`] so the query engine can weight a match by
//! where it was found. Facets map the closed taxonomies and port numbers to
//! record ids. Every map is ordered, which makes rebuilding idempotent and
//! the JSON encoding byte-stable.

use crate::tokenizer::terms;
use crate::types::Field;
use protolex_core::util::text::is_blank;
use protolex_core::{Category, Difficulty, Protocol};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Term → ids containing it.
pub type Postings = BTreeMap<String, BTreeSet<String>>;

/// Searchable index built from a record set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndex {
    pub(crate) ids: BTreeSet<String>,
    pub(crate) fields: BTreeMap<Field, Postings>,
    pub(crate) categories: BTreeMap<Category, BTreeSet<String>>,
    pub(crate) difficulties: BTreeMap<Difficulty, BTreeSet<String>>,
    pub(crate) ports: BTreeMap<u16, BTreeSet<String>>,
}

/// Build the index for a record set.
///
/// Records with a blank id are skipped; for a repeated id only the first
/// record is indexed.
pub fn build_index(records: &[Protocol]) -> SearchIndex {
    let mut index = SearchIndex::default();

    for record in records {
        if is_blank(&record.id) || index.ids.contains(&record.id) {
            log::debug!("index: skipping record with blank or repeated id {:?}", record.id);
            continue;
        }
        index.add(record);
    }

    log::debug!(
        "built search index: {} records, {} distinct terms",
        index.len(),
        index.term_count()
    );
    index
}

impl SearchIndex {
    fn add(&mut self, record: &Protocol) {
        let id = record.id.clone();
        self.ids.insert(id.clone());

        let mut body = record.full_description.clone();
        for use_case in &record.use_cases {
            body.push('\n');
            body.push_str(use_case);
        }

        for (field, text) in [
            (Field::Name, record.name.as_str()),
            (Field::ShortDescription, record.short_description.as_str()),
            (Field::Body, body.as_str()),
        ] {
            let postings = self.fields.entry(field).or_default();
            for term in terms(text) {
                postings.entry(term).or_default().insert(id.clone());
            }
        }

        match record.category() {
            Some(category) => {
                self.categories.entry(category).or_default().insert(id.clone());
            }
            None => log::warn!(
                "index: {} has category {:?} outside the taxonomy; left out of the category facet",
                record.id,
                record.category
            ),
        }

        match record.difficulty() {
            Some(difficulty) => {
                self.difficulties.entry(difficulty).or_default().insert(id.clone());
            }
            None => log::warn!(
                "index: {} has difficulty {:?} outside the taxonomy; left out of the difficulty facet",
                record.id,
                record.difficulty
            ),
        }

        for port in record.ports() {
            self.ports.entry(port).or_default().insert(id.clone());
        }
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Indexed ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Ids whose `field` contains `term`.
    pub fn field_postings(&self, field: Field, term: &str) -> Option<&BTreeSet<String>> {
        self.fields.get(&field).and_then(|p| p.get(term))
    }

    /// Ids containing `term` in any field.
    pub fn postings(&self, term: &str) -> BTreeSet<&str> {
        Field::ALL
            .iter()
            .filter_map(|field| self.field_postings(*field, term))
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Number of distinct terms across all fields.
    pub fn term_count(&self) -> usize {
        self.fields
            .values()
            .flat_map(|p| p.keys())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Ids in a category facet.
    pub fn category(&self, category: Category) -> Option<&BTreeSet<String>> {
        self.categories.get(&category)
    }

    /// Ids in a difficulty facet.
    pub fn difficulty(&self, difficulty: Difficulty) -> Option<&BTreeSet<String>> {
        self.difficulties.get(&difficulty)
    }

    /// Ids mentioning a port.
    pub fn port(&self, port: u16) -> Option<&BTreeSet<String>> {
        self.ports.get(&port)
    }

    /// Category facet sizes, for summaries.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        self.categories.iter().map(|(c, ids)| (*c, ids.len())).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
