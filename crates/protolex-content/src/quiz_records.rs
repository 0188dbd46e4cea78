//! Validation of authored quiz questions.
//!
//! Quiz questions written by hand live next to the protocol records and
//! reference them by `protocolId`. The checks mirror the invariants the quiz
//! generator guarantees for the questions it produces: at least two options,
//! an in-range answer index and a resolvable protocol.

use protolex_core::util::text::is_blank;
use protolex_core::{normalize_statement, Protocol, QuizQuestion, ValidationReport, Violation};
use std::collections::HashSet;

use crate::codes;

/// Validate quiz questions against the protocol record set.
pub fn validate_quiz(questions: &[QuizQuestion], records: &[Protocol]) -> ValidationReport {
    let known: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut report = ValidationReport::new();

    for q in questions {
        if is_blank(&q.id) {
            report.push(Violation::fatal(
                "",
                "id",
                codes::MISSING_ID,
                format!("quiz question for {:?} has no id", q.protocol_id),
            ));
        } else if !seen_ids.insert(q.id.as_str()) {
            report.push(Violation::fatal(
                &q.id,
                "id",
                codes::DUPLICATE_ID,
                format!("quiz question id {:?} is used more than once", q.id),
            ));
        }

        if !known.contains(q.protocol_id.as_str()) {
            report.push(Violation::fatal(
                &q.id,
                "protocolId",
                codes::UNKNOWN_PROTOCOL,
                format!("protocol {:?} does not exist", q.protocol_id),
            ));
        }

        if q.options.len() < 2 {
            report.push(Violation::fatal(
                &q.id,
                "options",
                codes::TOO_FEW_OPTIONS,
                format!("{} option(s); at least 2 are required", q.options.len()),
            ));
        }

        if q.correct_answer >= q.options.len() {
            report.push(Violation::fatal(
                &q.id,
                "correctAnswer",
                codes::ANSWER_OUT_OF_RANGE,
                format!(
                    "correctAnswer {} is out of range for {} option(s)",
                    q.correct_answer,
                    q.options.len()
                ),
            ));
        }

        let mut options = HashSet::new();
        for (i, option) in q.options.iter().enumerate() {
            if !options.insert(normalize_statement(option)) {
                report.push(Violation::warning(
                    &q.id,
                    format!("options[{i}]"),
                    codes::DUPLICATE_OPTION,
                    format!("option {option:?} repeats an earlier option"),
                ));
            }
        }

        for (field, text) in [("question", &q.question), ("explanation", &q.explanation)] {
            if is_blank(text) {
                report.push(Violation::warning(
                    &q.id,
                    field,
                    codes::BLANK_TEXT,
                    format!("{field} is empty"),
                ));
            }
        }
    }

    log::debug!(
        "quiz validation of {} question(s): {}",
        questions.len(),
        report.summary()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use protolex_core::fixtures::sample_corpus;

    fn question(id: &str, protocol_id: &str) -> QuizQuestion {
        QuizQuestion {
            id: id.to_string(),
            protocol_id: protocol_id.to_string(),
            question: "Which port does DNS use by default?".to_string(),
            options: vec!["53".into(), "80".into(), "443".into()],
            correct_answer: 0,
            explanation: "DNS listens on port 53.".to_string(),
        }
    }

    #[test]
    fn test_valid_question() {
        let report = validate_quiz(&[question("dns-1", "dns")], &sample_corpus());
        assert!(report.is_empty());
    }

    #[test]
    fn test_unknown_protocol_is_fatal() {
        let report = validate_quiz(&[question("x-1", "gopher")], &sample_corpus());
        let v = report.with_code(codes::UNKNOWN_PROTOCOL).next().unwrap();
        assert!(v.is_fatal());
        assert_eq!(v.field, "protocolId");
    }

    #[test]
    fn test_answer_out_of_range() {
        let mut q = question("dns-1", "dns");
        q.correct_answer = 3;
        let report = validate_quiz(&[q], &sample_corpus());
        assert_eq!(report.with_code(codes::ANSWER_OUT_OF_RANGE).count(), 1);
    }

    #[test]
    fn test_too_few_options() {
        let mut q = question("dns-1", "dns");
        q.options.truncate(1);
        let report = validate_quiz(&[q], &sample_corpus());
        assert_eq!(report.with_code(codes::TOO_FEW_OPTIONS).count(), 1);
        assert_eq!(report.with_code(codes::ANSWER_OUT_OF_RANGE).count(), 0);
    }

    #[test]
    fn test_duplicate_question_ids() {
        let questions = vec![question("q", "dns"), question("q", "tcp")];
        let report = validate_quiz(&questions, &sample_corpus());
        assert_eq!(report.with_code(codes::DUPLICATE_ID).count(), 1);
    }

    #[test]
    fn test_duplicate_options_and_blank_text_warn() {
        let mut q = question("dns-1", "dns");
        q.options.push("53.".into());
        q.explanation.clear();
        let report = validate_quiz(&[q], &sample_corpus());
        assert!(!report.has_fatal());
        assert_eq!(report.with_code(codes::DUPLICATE_OPTION).count(), 1);
        assert_eq!(report.with_code(codes::BLANK_TEXT).count(), 1);
    }
}
