//! Accumulating validation reports.
//!
//! The schema and reference passes never stop at the first problem: every
//! finding becomes a [`Violation`] in one [`ValidationReport`], so a content
//! author sees the whole list in a single run. A report with at least one
//! [`Severity::Fatal`] entry must block publishing the corpus; warnings are
//! build-log diagnostics only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Types
// ============================================================================

/// How serious a violation is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Build-log diagnostic; does not block publishing.
    Warning,
    /// Blocks publishing.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Fatal => f.write_str("fatal"),
        }
    }
}

/// A single finding about one record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Offending record id (may be empty when the id itself is missing).
    pub record_id: String,
    /// Source field name, e.g. `relatedProtocols`.
    pub field: String,
    pub severity: Severity,
    /// Stable machine-readable code, e.g. `DANGLING_REFERENCE`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Create a fatal violation.
    pub fn fatal(
        record_id: impl Into<String>,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Fatal, record_id, field, code, message)
    }

    /// Create a warning.
    pub fn warning(
        record_id: impl Into<String>,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, record_id, field, code, message)
    }

    /// Create a violation with an explicit severity.
    pub fn new(
        severity: Severity,
        record_id: impl Into<String>,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            field: field.into(),
            severity,
            code: code.into(),
            message: message.into(),
        }
    }

    /// True for [`Severity::Fatal`].
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = if self.record_id.is_empty() {
            "<no id>"
        } else {
            &self.record_id
        };
        write!(
            f,
            "{} [{}] {}.{}: {}",
            self.severity, self.code, record, self.field, self.message
        )
    }
}

/// Every violation found by one or more validation passes, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Append every violation of `other`, keeping order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }

    /// True if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True if any violation blocks publishing.
    pub fn has_fatal(&self) -> bool {
        self.violations.iter().any(Violation::is_fatal)
    }

    /// Fatal violations.
    pub fn fatal(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_fatal())
    }

    /// Warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| !v.is_fatal())
    }

    /// Violations carrying the given code.
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.code == code)
    }

    /// Violations about one record.
    pub fn for_record<'a>(&'a self, record_id: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.record_id == record_id)
    }

    /// Count of violations per code.
    pub fn counts_by_code(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for v in &self.violations {
            *counts.entry(v.code.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// One-line summary, e.g. `"2 fatal, 5 warning(s)"`.
    pub fn summary(&self) -> String {
        format!(
            "{} fatal, {} warning(s)",
            self.fatal().count(),
            self.warnings().count()
        )
    }
}

impl FromIterator<Violation> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
