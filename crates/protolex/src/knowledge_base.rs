//! Validated, atomically swapped catalog snapshots.
//!
//! A [`Snapshot`] bundles one record set with everything derived from it:
//! the merged validation report, the reference graph and the search index.
//! [`KnowledgeBase`] holds the live snapshot behind an `RwLock<Arc<_>>`.
//! Publishing builds the replacement off to the side and swaps the `Arc` in
//! a single write, so readers see either the old snapshot or the new one,
//! never a partially built index.

use parking_lot::RwLock;
use protolex_content::validate;
use protolex_core::{
    corpus_fingerprint, Error, Protocol, QuizQuestion, Result, ValidationReport,
};
use protolex_fts::{execute, SearchConfig, SearchIndex, SearchQuery, SearchResults};
use protolex_graph::query::{related, RelatedResponse};
use protolex_graph::{build_graph, ProtocolGraph, ReferencePolicy};
use protolex_quiz::{generate_questions_with_config, QuizConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Configuration
// ============================================================================

/// Engine settings applied to every snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub reference_policy: ReferencePolicy,
    pub search: SearchConfig,
    pub quiz: QuizConfig,
}

// ============================================================================
// Snapshot
// ============================================================================

/// One validated record set and its derived structures.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub records: Vec<Protocol>,
    /// Schema and reference findings, merged.
    pub report: ValidationReport,
    pub graph: ProtocolGraph,
    pub index: SearchIndex,
    /// Fingerprint of `records`; empty for the initial empty snapshot.
    pub fingerprint: String,
}

impl Snapshot {
    /// Validate `records`, build the graph and the index.
    ///
    /// A snapshot is built even when the report has fatal violations; it is
    /// [`KnowledgeBase::publish`] that refuses to serve it.
    pub fn build(records: Vec<Protocol>, config: &EngineConfig) -> Result<Self> {
        let fingerprint = corpus_fingerprint(&records)?;

        let mut report = validate(&records);
        let graph_build = build_graph(&records, config.reference_policy);
        report.merge(graph_build.report);

        let index = protolex_fts::build_index(&records);

        Ok(Self {
            records,
            report,
            graph: graph_build.graph,
            index,
            fingerprint,
        })
    }

    /// Record by id.
    pub fn record(&self, id: &str) -> Option<&Protocol> {
        self.records.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// Knowledge base
// ============================================================================

/// The live catalog.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    config: EngineConfig,
    current: RwLock<Arc<Snapshot>>,
}

impl KnowledgeBase {
    /// An empty knowledge base.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    /// A knowledge base serving `records`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidData`] if the records have fatal violations.
    pub fn with_records(records: Vec<Protocol>, config: EngineConfig) -> Result<Self> {
        let kb = Self::new(config);
        kb.publish(records)?;
        Ok(kb)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The live snapshot. Holding the `Arc` keeps it alive across publishes.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    /// Rebuild from `records` and swap the result in.
    ///
    /// Returns `Ok(false)` without rebuilding when the corpus fingerprint
    /// matches the live snapshot.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidData`] if the rebuilt report has fatal violations; the
    /// previous snapshot stays live.
    pub fn publish(&self, records: Vec<Protocol>) -> Result<bool> {
        let fingerprint = corpus_fingerprint(&records)?;
        if fingerprint == self.current.read().fingerprint {
            log::debug!("corpus unchanged ({fingerprint}); keeping current snapshot");
            return Ok(false);
        }

        let snapshot = Snapshot::build(records, &self.config)?;

        if snapshot.report.has_fatal() {
            let first = snapshot
                .report
                .fatal()
                .next()
                .map(|v| format!("; first: {v}"))
                .unwrap_or_default();
            log::warn!(
                "refusing to publish corpus {}: {}",
                snapshot.fingerprint,
                snapshot.report.summary()
            );
            return Err(Error::invalid_data(format!(
                "corpus has {}{first}",
                snapshot.report.summary()
            )));
        }

        log::info!(
            "publishing corpus {} ({} records, {})",
            snapshot.fingerprint,
            snapshot.len(),
            snapshot.report.summary()
        );
        *self.current.write() = Arc::new(snapshot);
        Ok(true)
    }

    /// Search the live snapshot with the configured limits.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        execute(&self.snapshot().index, query, &self.config.search)
    }

    /// Protocols linked to `id` in the live snapshot.
    pub fn related(&self, id: &str) -> Result<RelatedResponse> {
        related(&self.snapshot().graph, id)
    }

    /// Quiz questions about `id`, using the live records as distractor pool.
    pub fn quiz<R: Rng + ?Sized>(&self, id: &str, count: usize, rng: &mut R) -> Result<Vec<QuizQuestion>> {
        let snapshot = self.snapshot();
        let protocol = snapshot
            .record(id)
            .ok_or_else(|| Error::not_found(format!("protocol {id:?}")))?;
        let questions =
            generate_questions_with_config(protocol, &snapshot.records, count, &self.config.quiz, rng)?;
        Ok(questions)
    }

    /// Reproducible [`quiz`](Self::quiz).
    pub fn quiz_seeded(&self, id: &str, count: usize, seed: u64) -> Result<Vec<QuizQuestion>> {
        self.quiz(id, count, &mut StdRng::seed_from_u64(seed))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use protolex_core::fixtures::sample_corpus;
    use std::thread;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_snapshot_types_are_send_sync() {
        assert_send_sync::<Snapshot>();
        assert_send_sync::<KnowledgeBase>();
    }

    #[test]
    fn test_publish_and_query() {
        let kb = KnowledgeBase::with_records(sample_corpus(), EngineConfig::default()).unwrap();

        let results = kb
            .search(&SearchQuery::text("kerberos ticket").with_limit(5))
            .unwrap();
        assert_eq!(results.ids, vec!["kerberos"]);

        let related = kb.related("smtp").unwrap();
        assert_eq!(related.outgoing.len(), 2);

        let questions = kb.quiz_seeded("dns", 2, 4).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_republish_same_corpus_is_noop() {
        let kb = KnowledgeBase::new(EngineConfig::default());
        assert!(kb.publish(sample_corpus()).unwrap());
        let before = kb.snapshot();

        assert!(!kb.publish(sample_corpus()).unwrap());

        assert!(Arc::ptr_eq(&before, &kb.snapshot()));
    }

    #[test]
    fn test_fatal_report_keeps_previous_snapshot() {
        let kb = KnowledgeBase::with_records(sample_corpus(), EngineConfig::default()).unwrap();
        let before = kb.snapshot();

        let mut broken = sample_corpus();
        broken[1].id = broken[0].id.clone();

        let err = kb.publish(broken).unwrap_err();

        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("fatal"));
        assert!(Arc::ptr_eq(&before, &kb.snapshot()));
        assert_eq!(kb.snapshot().len(), 10);
    }

    #[test]
    fn test_strict_policy_rejects_dangling_reference() {
        let mut records = sample_corpus();
        records[0].related_protocols.push("gopher".into());

        let lenient = KnowledgeBase::new(EngineConfig::default());
        assert!(lenient.publish(records.clone()).unwrap());
        assert_eq!(lenient.snapshot().report.warnings().count(), 1);

        let strict = KnowledgeBase::new(EngineConfig {
            reference_policy: ReferencePolicy::Strict,
            ..Default::default()
        });
        assert!(strict.publish(records).is_err());
        assert!(strict.snapshot().is_empty());
    }

    #[test]
    fn test_readers_hold_old_snapshot_across_publish() {
        let kb = KnowledgeBase::with_records(sample_corpus(), EngineConfig::default()).unwrap();
        let held = kb.snapshot();

        let mut smaller = sample_corpus();
        smaller.retain(|p| p.id != "imap" && p.id != "smtp");
        assert!(kb.publish(smaller).unwrap());

        assert_eq!(held.len(), 10);
        assert_eq!(kb.snapshot().len(), 8);
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        let kb = Arc::new(KnowledgeBase::with_records(sample_corpus(), EngineConfig::default()).unwrap());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let kb = Arc::clone(&kb);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let snapshot = kb.snapshot();
                        assert_eq!(snapshot.index.len(), snapshot.len());
                        assert_eq!(snapshot.graph.node_count(), snapshot.len());
                    }
                })
            })
            .collect();

        let mut records = sample_corpus();
        for _ in 0..5 {
            records.pop();
            kb.publish(records.clone()).ok();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_quiz_unknown_protocol() {
        let kb = KnowledgeBase::with_records(sample_corpus(), EngineConfig::default()).unwrap();
        let err = kb.quiz_seeded("gopher", 1, 0).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
