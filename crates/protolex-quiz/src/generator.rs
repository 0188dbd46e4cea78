//! Question generation.
//!
//! Each question asks which option is an advantage, a disadvantage or a
//! typical use case of one protocol. The correct option is one of that
//! protocol's own statements; distractors are statements of the same kind
//! from other protocols in the pool.
//!
//! Guarantees for every generated question:
//!
//! - `options.len() >= 2` and `correct_answer < options.len()`
//! - no distractor normalizes to the same text as any statement of the
//!   protocol being asked about
//! - distractors are pairwise distinct after normalization

use crate::types::{QuizConfig, QuizError};
use protolex_core::util::text::is_blank;
use protolex_core::{normalize_statement, Protocol, QuizQuestion, StatementKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// A statement of the target protocol that a question can be built on.
#[derive(Clone, Debug)]
struct Candidate<'a> {
    kind: StatementKind,
    text: &'a str,
}

/// Generate up to `count` questions about `protocol` with the default
/// [`QuizConfig`].
pub fn generate_questions<R: Rng + ?Sized>(
    protocol: &Protocol,
    pool: &[Protocol],
    count: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    generate_questions_with_config(protocol, pool, count, &QuizConfig::default(), rng)
}

/// Reproducible variant of [`generate_questions`] seeded with `seed`.
pub fn generate_questions_seeded(
    protocol: &Protocol,
    pool: &[Protocol],
    count: usize,
    seed: u64,
) -> Result<Vec<QuizQuestion>, QuizError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_questions(protocol, pool, count, &mut rng)
}

/// Generate up to `count` questions about `protocol`.
///
/// If the protocol has fewer distinct statements than `count`, one question
/// per statement is returned.
///
/// # Errors
///
/// - [`QuizError::InvalidCount`] if `count` is zero
/// - [`QuizError::InvalidConfig`] if fewer than one distractor is configured
/// - [`QuizError::NoCandidates`] if the protocol has no statements
/// - [`QuizError::InsufficientPool`] if other protocols cannot supply enough
///   distinct distractors for a question
pub fn generate_questions_with_config<R: Rng + ?Sized>(
    protocol: &Protocol,
    pool: &[Protocol],
    count: usize,
    config: &QuizConfig,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    if count == 0 {
        return Err(QuizError::InvalidCount);
    }
    if config.distractors == 0 {
        return Err(QuizError::InvalidConfig(
            "at least one distractor is required".to_string(),
        ));
    }

    let mut candidates = candidates(protocol);
    if candidates.is_empty() {
        return Err(QuizError::NoCandidates(protocol.id.clone()));
    }

    let own: HashSet<String> = candidates.iter().map(|c| normalize_statement(c.text)).collect();

    candidates.shuffle(rng);
    candidates.truncate(count);

    let mut questions = Vec::with_capacity(candidates.len());
    for (n, candidate) in candidates.iter().enumerate() {
        let distractors =
            pick_distractors(protocol, pool, candidate.kind, &own, config.distractors, rng)?;

        let mut options: Vec<String> = Vec::with_capacity(distractors.len() + 1);
        options.push(candidate.text.to_string());
        options.extend(distractors.into_iter().map(String::from));
        options.shuffle(rng);

        let correct_answer = options
            .iter()
            .position(|o| o == candidate.text)
            .unwrap_or_default();

        questions.push(QuizQuestion {
            id: format!("{}-{}-{}", protocol.id, kind_slug(candidate.kind), n + 1),
            protocol_id: protocol.id.clone(),
            question: prompt(candidate.kind, &protocol.name),
            options,
            correct_answer,
            explanation: explanation(candidate.kind, &protocol.name, candidate.text),
        });
    }

    log::debug!(
        "generated {} quiz question(s) for {}",
        questions.len(),
        protocol.id
    );
    Ok(questions)
}

/// The protocol's non-blank statements, deduplicated by normalized text.
fn candidates(protocol: &Protocol) -> Vec<Candidate<'_>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for kind in StatementKind::ALL {
        for text in protocol.statements(kind) {
            if !is_blank(text) && seen.insert(normalize_statement(text)) {
                out.push(Candidate { kind, text });
            }
        }
    }
    out
}

/// Pick `needed` distractors of `kind`, same-category protocols first.
fn pick_distractors<'a, R: Rng + ?Sized>(
    protocol: &Protocol,
    pool: &'a [Protocol],
    kind: StatementKind,
    own: &HashSet<String>,
    needed: usize,
    rng: &mut R,
) -> Result<Vec<&'a str>, QuizError> {
    let category = protocol.category();
    let others = pool.iter().filter(|p| p.id != protocol.id);
    let (same, rest): (Vec<&Protocol>, Vec<&Protocol>) = others.partition(|p| {
        category.is_some() && p.category() == category
    });

    let mut seen: HashSet<String> = own.clone();
    let mut preferred = statements_of(&same, kind, &mut seen);
    preferred.shuffle(rng);

    if preferred.len() < needed {
        let mut fallback = statements_of(&rest, kind, &mut seen);
        fallback.shuffle(rng);
        preferred.extend(fallback);
    }

    if preferred.len() < needed {
        return Err(QuizError::InsufficientPool {
            needed,
            available: preferred.len(),
        });
    }

    preferred.truncate(needed);
    Ok(preferred)
}

/// Statements of `kind` from `records` whose normalized text is not in `seen`.
fn statements_of<'a>(
    records: &[&'a Protocol],
    kind: StatementKind,
    seen: &mut HashSet<String>,
) -> Vec<&'a str> {
    let mut out = Vec::new();
    for record in records {
        for text in record.statements(kind) {
            if !is_blank(text) && seen.insert(normalize_statement(text)) {
                out.push(text.as_str());
            }
        }
    }
    out
}

fn prompt(kind: StatementKind, name: &str) -> String {
    match kind {
        StatementKind::Advantage => format!("Which of the following is an advantage of {name}?"),
        StatementKind::Disadvantage => format!("Which of the following is a disadvantage of {name}?"),
        StatementKind::UseCase => format!("Which of the following is a typical use case for {name}?"),
    }
}

fn explanation(kind: StatementKind, name: &str, text: &str) -> String {
    match kind {
        StatementKind::Advantage => format!("{name} lists \"{text}\" among its advantages."),
        StatementKind::Disadvantage => format!("{name} lists \"{text}\" among its disadvantages."),
        StatementKind::UseCase => format!("\"{text}\" is a typical use case for {name}."),
    }
}

fn kind_slug(kind: StatementKind) -> &'static str {
    match kind {
        StatementKind::Advantage => "advantage",
        StatementKind::Disadvantage => "disadvantage",
        StatementKind::UseCase => "use-case",
    }
}

// ============================================================================
// Tests
// ============================================================================
