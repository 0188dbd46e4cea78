//! Structural validation of protocol records.
//!
//! [`validate`] checks every record against the record contract and the
//! corpus against id uniqueness. It is a pure function: it accumulates all
//! findings into one [`ValidationReport`] and never fails fast.
//!
//! Severity policy:
//!
//! - **fatal**: missing, malformed or duplicate id; blank required text;
//!   category or difficulty outside the closed set; missing examples or no
//!   example with code; an empty advantages/disadvantages/useCases set
//! - **warning**: single example without code, blank or repeated
//!   statements, a statement listed as both advantage and disadvantage,
//!   unknown resource type, resource without url, optional collection
//!   present but empty

use protolex_core::util::ids::slugify;
use protolex_core::util::text::is_blank;
use protolex_core::{
    is_valid_slug, normalize_statement, Category, Difficulty, Protocol, ResourceType,
    StatementKind, ValidationReport, Violation,
};
use std::collections::{HashMap, HashSet};

use crate::codes;

// ============================================================================
// Entry point
// ============================================================================

/// Validate a record set.
pub fn validate(records: &[Protocol]) -> ValidationReport {
    let mut report = ValidationReport::new();

    for record in records {
        check_id(record, &mut report);
        check_required_text(record, &mut report);
        check_taxonomy(record, &mut report);
        check_examples(record, &mut report);
        check_statements(record, &mut report);
        check_resources(record, &mut report);
        check_optional_collections(record, &mut report);
    }
    check_duplicate_ids(records, &mut report);

    log::debug!(
        "schema validation of {} record(s): {}",
        records.len(),
        report.summary()
    );
    report
}

// ============================================================================
// Per-record checks
// ============================================================================

fn check_id(record: &Protocol, report: &mut ValidationReport) {
    if is_blank(&record.id) {
        let hint = if record.name.is_empty() {
            String::new()
        } else {
            format!(" (name: {:?})", record.name)
        };
        report.push(Violation::fatal(
            "",
            "id",
            codes::MISSING_ID,
            format!("record has no id{hint}"),
        ));
        return;
    }

    if !is_valid_slug(&record.id) {
        let suggestion = slugify(&record.id);
        let message = if suggestion.is_empty() {
            format!("id {:?} is not a lowercase slug", record.id)
        } else {
            format!(
                "id {:?} is not a lowercase slug; did you mean {suggestion:?}?",
                record.id
            )
        };
        report.push(Violation::fatal(&record.id, "id", codes::INVALID_ID, message));
    }
}

fn check_required_text(record: &Protocol, report: &mut ValidationReport) {
    let fields = [
        ("name", &record.name),
        ("shortDescription", &record.short_description),
        ("fullDescription", &record.full_description),
    ];

    for (field, value) in fields {
        if is_blank(value) {
            report.push(Violation::fatal(
                &record.id,
                field,
                codes::MISSING_FIELD,
                format!("{field} is empty"),
            ));
        }
    }
}

fn check_taxonomy(record: &Protocol, report: &mut ValidationReport) {
    if Category::from_label(&record.category).is_none() {
        let allowed: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        report.push(Violation::fatal(
            &record.id,
            "category",
            codes::INVALID_CATEGORY,
            format!(
                "category {:?} is not one of: {}",
                record.category,
                allowed.join(", ")
            ),
        ));
    }

    if Difficulty::from_label(&record.difficulty).is_none() {
        let allowed: Vec<&str> = Difficulty::ALL.iter().map(Difficulty::as_str).collect();
        report.push(Violation::fatal(
            &record.id,
            "difficulty",
            codes::INVALID_DIFFICULTY,
            format!(
                "difficulty {:?} is not one of: {}",
                record.difficulty,
                allowed.join(", ")
            ),
        ));
    }
}

fn check_examples(record: &Protocol, report: &mut ValidationReport) {
    let examples = match record.examples.as_deref() {
        Some(examples) if !examples.is_empty() => examples,
        _ => {
            report.push(Violation::fatal(
                &record.id,
                "examples",
                codes::MISSING_EXAMPLES,
                "at least one example is required",
            ));
            return;
        }
    };

    let mut with_code = 0;
    for (i, example) in examples.iter().enumerate() {
        if is_blank(&example.code) {
            report.push(Violation::warning(
                &record.id,
                format!("examples[{i}].code"),
                codes::EMPTY_EXAMPLE_CODE,
                format!("example {:?} has no code", example.title),
            ));
        } else {
            with_code += 1;
        }
    }

    if with_code == 0 {
        report.push(Violation::fatal(
            &record.id,
            "examples",
            codes::NO_EXAMPLE_CODE,
            "no example contains code",
        ));
    }
}

fn check_statements(record: &Protocol, report: &mut ValidationReport) {
    for kind in StatementKind::ALL {
        let field = kind.field();
        let statements = record.statements(kind);

        if statements.is_empty() {
            report.push(Violation::fatal(
                &record.id,
                field,
                codes::EMPTY_REQUIRED_COLLECTION,
                format!("{field} must not be empty"),
            ));
            continue;
        }

        let mut seen = HashSet::new();
        for (i, statement) in statements.iter().enumerate() {
            if is_blank(statement) {
                report.push(Violation::warning(
                    &record.id,
                    format!("{field}[{i}]"),
                    codes::BLANK_STATEMENT,
                    "statement is blank",
                ));
                continue;
            }
            if !seen.insert(normalize_statement(statement)) {
                report.push(Violation::warning(
                    &record.id,
                    format!("{field}[{i}]"),
                    codes::DUPLICATE_STATEMENT,
                    format!("{statement:?} is listed more than once"),
                ));
            }
        }
    }

    let advantages: HashSet<String> = record
        .advantages
        .iter()
        .filter(|s| !is_blank(s))
        .map(|s| normalize_statement(s))
        .collect();
    let mut reported = HashSet::new();
    for statement in &record.disadvantages {
        let normalized = normalize_statement(statement);
        if advantages.contains(&normalized) && reported.insert(normalized) {
            report.push(Violation::warning(
                &record.id,
                "disadvantages",
                codes::CONTRADICTORY_STATEMENT,
                format!("{statement:?} is listed as both an advantage and a disadvantage"),
            ));
        }
    }
}

fn check_resources(record: &Protocol, report: &mut ValidationReport) {
    let Some(resources) = record.resources.as_deref() else {
        return;
    };

    for (i, resource) in resources.iter().enumerate() {
        if resource.kind().is_none() {
            let allowed: Vec<&str> = ResourceType::ALL.iter().map(ResourceType::as_str).collect();
            report.push(Violation::warning(
                &record.id,
                format!("resources[{i}].type"),
                codes::INVALID_RESOURCE_TYPE,
                format!(
                    "resource type {:?} is not one of: {}",
                    resource.kind,
                    allowed.join(", ")
                ),
            ));
        }
        if is_blank(&resource.url) {
            report.push(Violation::warning(
                &record.id,
                format!("resources[{i}].url"),
                codes::MISSING_RESOURCE_URL,
                format!("resource {:?} has no url", resource.title),
            ));
        }
    }
}

fn check_optional_collections(record: &Protocol, report: &mut ValidationReport) {
    let mut empty: Vec<&str> = Vec::new();

    if record.versions.as_ref().is_some_and(Vec::is_empty) {
        empty.push("versions");
    }
    if record.resources.as_ref().is_some_and(Vec::is_empty) {
        empty.push("resources");
    }
    if record
        .security_considerations
        .as_ref()
        .is_some_and(Vec::is_empty)
    {
        empty.push("securityConsiderations");
    }
    if record.modern_alternatives.as_ref().is_some_and(Vec::is_empty) {
        empty.push("modernAlternatives");
    }
    if record.diagrams.as_ref().is_some_and(is_empty_value) {
        empty.push("diagrams");
    }
    if record.common_commands.as_ref().is_some_and(is_empty_value) {
        empty.push("commonCommands");
    }

    for field in empty {
        report.push(Violation::warning(
            &record.id,
            field,
            codes::EMPTY_OPTIONAL_COLLECTION,
            format!("{field} is present but empty; omit it instead"),
        ));
    }
}

fn is_empty_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

// ============================================================================
// Corpus-wide checks
// ============================================================================

/// Every repeated occurrence of an id is one fatal violation.
fn check_duplicate_ids(records: &[Protocol], report: &mut ValidationReport) {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for record in records.iter().filter(|r| !is_blank(&r.id)) {
        *totals.entry(record.id.as_str()).or_insert(0) += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for record in records.iter().filter(|r| !is_blank(&r.id)) {
        let id = record.id.as_str();
        let occurrence = seen.entry(id).or_insert(0);
        *occurrence += 1;
        if *occurrence > 1 {
            report.push(Violation::fatal(
                id,
                "id",
                codes::DUPLICATE_ID,
                format!(
                    "id {id:?} is used by {} records (occurrence {})",
                    totals[id], occurrence
                ),
            ));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
