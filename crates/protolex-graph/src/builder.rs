//! Resolving `relatedProtocols` into graph edges.
//!
//! Every reference is either turned into an edge or reported. Nothing is
//! dropped without a violation in the returned report.

use crate::graph::{ProtocolGraph, ProtocolNode};
use protolex_core::util::text::is_blank;
use protolex_core::{Protocol, Severity, ValidationReport, Violation};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Violation codes produced while building the graph.
pub mod codes {
    pub const DANGLING_REFERENCE: &str = "DANGLING_REFERENCE";
    pub const SELF_REFERENCE: &str = "SELF_REFERENCE";
    pub const DUPLICATE_REFERENCE: &str = "DUPLICATE_REFERENCE";
    /// A resolvable reference on a record that is not itself a node.
    pub const UNLINKED_REFERENCE: &str = "UNLINKED_REFERENCE";
}

/// How unresolvable references are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Dangling references are warnings.
    #[default]
    Lenient,
    /// Dangling references are fatal.
    Strict,
}

impl ReferencePolicy {
    /// `Strict` when `strict` is true.
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }

    fn dangling_severity(self) -> Severity {
        match self {
            Self::Lenient => Severity::Warning,
            Self::Strict => Severity::Fatal,
        }
    }
}

/// Output of [`build_graph`].
#[derive(Clone, Debug, Default)]
pub struct GraphBuild {
    pub graph: ProtocolGraph,
    pub report: ValidationReport,
}

/// Build the reference graph for a record set.
pub fn build_graph(records: &[Protocol], policy: ReferencePolicy) -> GraphBuild {
    let mut graph = ProtocolGraph::new();
    let mut report = ValidationReport::new();

    // Records with a blank id are the schema validator's problem; the first
    // record with a given id wins. Skipped records still have their
    // references checked so nothing they list goes unreported.
    let mut linked: Vec<bool> = Vec::with_capacity(records.len());
    for record in records {
        let owner = !is_blank(&record.id) && !graph.contains(&record.id);
        if owner {
            graph.add_node(ProtocolNode::from(record));
        }
        linked.push(owner);
    }

    let lowercase_ids: HashMap<String, String> = graph
        .node_ids()
        .into_iter()
        .map(|id| (id.to_lowercase(), id.to_string()))
        .collect();

    for (record, owner) in records.iter().zip(linked) {
        let mut seen: HashSet<&str> = HashSet::new();

        for (i, target) in record.related_protocols.iter().enumerate() {
            let field = format!("relatedProtocols[{i}]");
            let source = if is_blank(&record.id) { "<no id>" } else { record.id.as_str() };

            if target == &record.id {
                report.push(Violation::warning(
                    &record.id,
                    field,
                    codes::SELF_REFERENCE,
                    format!("{source} lists itself as related"),
                ));
                continue;
            }

            if !seen.insert(target.as_str()) {
                report.push(Violation::warning(
                    &record.id,
                    field,
                    codes::DUPLICATE_REFERENCE,
                    format!("{source} lists {target} more than once"),
                ));
                continue;
            }

            if !graph.contains(target) {
                let mut message = format!("{source} -> {target}: no protocol with that id");
                if let Some(hint) = lowercase_ids.get(&target.to_lowercase()) {
                    message.push_str(&format!(" (did you mean {hint:?}?)"));
                }
                report.push(Violation::new(
                    policy.dangling_severity(),
                    &record.id,
                    field,
                    codes::DANGLING_REFERENCE,
                    message,
                ));
                continue;
            }

            if !owner {
                report.push(Violation::warning(
                    &record.id,
                    field,
                    codes::UNLINKED_REFERENCE,
                    format!(
                        "{source} -> {target}: not linked because this record has a blank or repeated id"
                    ),
                ));
                continue;
            }

            // Both endpoints are nodes, so this cannot fail.
            if let Err(e) = graph.add_edge(&record.id, target) {
                log::warn!("skipping edge {} -> {target}: {e}", record.id);
            }
        }
    }

    log::debug!(
        "built reference graph: {} nodes, {} edges, {}",
        graph.node_count(),
        graph.edge_count(),
        report.summary()
    );

    GraphBuild { graph, report }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use protolex_core::fixtures::{protocol, sample_corpus};
    use protolex_core::Category;
    use std::collections::BTreeSet;

    fn related(mut record: Protocol, targets: &[&str]) -> Protocol {
        record.related_protocols = targets.iter().map(|s| s.to_string()).collect();
        record
    }

    #[test]
    fn test_dangling_reference_scenario() {
        let records = vec![
            related(protocol("a", Category::Network), &["b"]),
            related(protocol("b", Category::Network), &["z"]),
        ];

        let GraphBuild { graph, report } = build_graph(&records, ReferencePolicy::default());

        assert_eq!(report.len(), 1);
        let v = &report.violations[0];
        assert_eq!(v.code, codes::DANGLING_REFERENCE);
        assert_eq!(v.record_id, "b");
        assert_eq!(v.severity, Severity::Warning);
        assert!(v.message.starts_with("b -> z"));
        assert_eq!(graph.neighbors("a"), BTreeSet::from(["b"]));
        assert!(graph.neighbors("b").is_empty());
    }

    #[test]
    fn test_strict_policy_makes_dangling_fatal() {
        let records = vec![related(protocol("a", Category::Network), &["nope"])];
        let build = build_graph(&records, ReferencePolicy::Strict);
        assert!(build.report.has_fatal());
    }

    #[test]
    fn test_case_mismatch_gets_hint() {
        let records = vec![
            related(protocol("http", Category::Web), &["TCP"]),
            protocol("tcp", Category::Transport),
        ];
        let build = build_graph(&records, ReferencePolicy::Lenient);
        let v = build.report.with_code(codes::DANGLING_REFERENCE).next().unwrap();
        assert!(v.message.contains("did you mean \"tcp\""));
    }

    #[test]
    fn test_self_and_duplicate_references() {
        let records = vec![
            related(protocol("a", Category::Network), &["a", "b", "b"]),
            protocol("b", Category::Network),
        ];

        let build = build_graph(&records, ReferencePolicy::Lenient);

        assert_eq!(build.report.with_code(codes::SELF_REFERENCE).count(), 1);
        assert_eq!(build.report.with_code(codes::DUPLICATE_REFERENCE).count(), 1);
        assert!(!build.report.has_fatal());
        assert_eq!(build.graph.edge_count(), 1);
    }

    #[test]
    fn test_blank_and_duplicate_ids_are_not_nodes() {
        let mut blank = protocol("x", Category::Network);
        blank.id = "  ".into();
        let first = related(protocol("a", Category::Network), &["b"]);
        let second = protocol("a", Category::Web);
        let records = vec![blank, first, second, protocol("b", Category::Network)];

        let build = build_graph(&records, ReferencePolicy::Lenient);

        assert_eq!(build.graph.node_ids(), vec!["a", "b"]);
        assert_eq!(build.graph.node("a").unwrap().category, Some(Category::Network));
        assert!(build.report.is_empty());
    }

    #[test]
    fn test_skipped_records_still_report_references() {
        let first = related(protocol("a", Category::Network), &["b"]);
        let second = related(protocol("a", Category::Web), &["zzz-missing", "b"]);
        let mut blank = related(protocol("x", Category::Network), &["gone"]);
        blank.id = String::new();
        let records = vec![first, second, blank, protocol("b", Category::Network)];

        let build = build_graph(&records, ReferencePolicy::Strict);

        let dangling: Vec<_> = build.report.with_code(codes::DANGLING_REFERENCE).collect();
        assert_eq!(dangling.len(), 2);
        assert!(dangling.iter().all(|v| v.is_fatal()));
        assert!(dangling[0].message.contains("a -> zzz-missing"));
        assert!(dangling[1].message.contains("<no id> -> gone"));

        let unlinked: Vec<_> = build.report.with_code(codes::UNLINKED_REFERENCE).collect();
        assert_eq!(unlinked.len(), 1);
        assert_eq!(unlinked[0].field, "relatedProtocols[1]");
        assert!(!unlinked[0].is_fatal());

        assert_eq!(build.graph.edges(), vec![("a", "b")]);
    }

    #[test]
    fn test_sample_corpus_is_clean() {
        let build = build_graph(&sample_corpus(), ReferencePolicy::Strict);
        assert!(build.report.is_empty());
        assert_eq!(build.graph.node_count(), 10);
        assert!(build.graph.has_cycles());
        assert!(build.graph.orphans().is_empty());
    }

    #[test]
    fn test_policy_from_strict() {
        assert_eq!(ReferencePolicy::from_strict(true), ReferencePolicy::Strict);
        assert_eq!(ReferencePolicy::from_strict(false), ReferencePolicy::Lenient);
    }
}
