//! Handler functions for catalog commands.
//!
//! Implements `protolex {validate,search,index,quiz}` on top of the
//! knowledge base, plus the corpus-loading helpers shared with the graph
//! handlers.

use crate::cli::{IndexSubcommand, SearchArgs};
use crate::config::ProtolexConfig;
use protolex::content::{load_protocols, load_quiz_questions, validate_quiz};
use protolex::fts::{is_index_fresh, save_index, IndexMetadata, SearchQuery};
use protolex::graph::ReferencePolicy;
use protolex::{KnowledgeBase, Protocol, Snapshot, ValidationReport};
use protolex_core::{corpus_fingerprint, Error, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

// ============================================================================
// Shared helpers
// ============================================================================

/// Load the protocol records named by the config.
pub(crate) fn load_corpus(config: &ProtolexConfig) -> Result<Vec<Protocol>> {
    let path = config.protocols_path()?;
    log::debug!("loading protocols from {}", path.display());
    let records = load_protocols(&path)?;
    log::info!("loaded {} protocol record(s) from {}", records.len(), path.display());
    Ok(records)
}

/// Load the corpus and publish it into a fresh knowledge base.
///
/// Fails when the corpus has fatal violations.
pub(crate) fn open_knowledge_base(config: &ProtolexConfig) -> Result<KnowledgeBase> {
    let records = load_corpus(config)?;
    KnowledgeBase::with_records(records, config.engine_config())
}

fn print_report(report: &ValidationReport) {
    for violation in report.fatal() {
        println!(
            "  ERROR [{}]: {}.{}: {}",
            violation.code,
            display_id(&violation.record_id),
            violation.field,
            violation.message
        );
    }
    for violation in report.warnings() {
        println!(
            "  WARN  [{}]: {}.{}: {}",
            violation.code,
            display_id(&violation.record_id),
            violation.field,
            violation.message
        );
    }
}

fn display_id(id: &str) -> &str {
    if id.is_empty() { "<no id>" } else { id }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization(format!("failed to serialize output: {e}")))?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// validate
// ============================================================================

/// Validate the corpus (and optionally authored quizzes), printing every
/// violation.
///
/// # Errors
///
/// [`Error::InvalidData`] when any violation is fatal.
pub fn handle_validate(config: &ProtolexConfig, strict: bool, quiz: Option<&str>) -> Result<()> {
    let records = load_corpus(config)?;

    let mut engine = config.engine_config();
    if strict {
        engine.reference_policy = ReferencePolicy::Strict;
    }
    let snapshot = Snapshot::build(records, &engine)?;
    let mut report = snapshot.report.clone();

    let quiz_path = quiz.map(PathBuf::from).or_else(|| config.quizzes_path());
    let mut question_count = 0;
    if let Some(path) = quiz_path.filter(|p| quiz.is_some() || p.exists()) {
        let questions = load_quiz_questions(&path)?;
        question_count = questions.len();
        report.merge(validate_quiz(&questions, &snapshot.records));
    }

    println!(
        "Validated {} protocol(s){}",
        snapshot.len(),
        if question_count > 0 {
            format!(" and {question_count} quiz question(s)")
        } else {
            String::new()
        }
    );
    print_report(&report);
    println!("\nSummary: {}", report.summary());

    if report.has_fatal() {
        return Err(Error::invalid_data(format!(
            "validation failed: {}",
            report.summary()
        )));
    }
    println!("Corpus is valid.");
    Ok(())
}

// ============================================================================
// search
// ============================================================================

/// Run a search against the corpus.
pub fn handle_search(config: &ProtolexConfig, args: SearchArgs) -> Result<()> {
    let kb = open_knowledge_base(config)?;
    let query = search_query(&args);
    let results = kb.search(&query)?;

    if args.json {
        return print_json(&results);
    }

    let snapshot = kb.snapshot();
    if results.ids.is_empty() {
        println!("No matching protocols.");
    }
    for (rank, id) in results.ids.iter().enumerate() {
        match snapshot.record(id) {
            Some(record) => println!(
                "{:>3}. {} ({}): {}",
                results.offset + rank + 1,
                record.name,
                record.id,
                record.short_description
            ),
            None => println!("{:>3}. {id}", results.offset + rank + 1),
        }
    }
    println!(
        "\nShowing {} of {} match(es){}",
        results.ids.len(),
        results.total,
        if results.clamped {
            format!(" (limit clamped to {})", results.limit)
        } else {
            String::new()
        }
    );
    Ok(())
}

fn search_query(args: &SearchArgs) -> SearchQuery {
    SearchQuery {
        text: args.text.clone(),
        category: args.category,
        difficulty: args.difficulty,
        port: args.port,
        limit: args.limit,
        offset: args.offset,
    }
}

// ============================================================================
// index
// ============================================================================

/// Handle an index subcommand.
pub fn handle_index_command(config: &ProtolexConfig, command: IndexSubcommand) -> Result<()> {
    match command {
        IndexSubcommand::Build { output, check } => {
            let path = match output {
                Some(p) => PathBuf::from(p),
                None => config.index_path()?,
            };
            if check {
                handle_index_check(config, &path)
            } else {
                handle_index_build(config, &path)
            }
        }
    }
}

fn handle_index_check(config: &ProtolexConfig, path: &Path) -> Result<()> {
    let records = load_corpus(config)?;
    let fingerprint = corpus_fingerprint(&records)?;

    if is_index_fresh(path, &fingerprint) {
        println!("Index at {} is fresh.", path.display());
        Ok(())
    } else {
        Err(Error::operation(format!(
            "index at {} is missing or stale; run `protolex index build`",
            path.display()
        )))
    }
}

fn handle_index_build(config: &ProtolexConfig, path: &Path) -> Result<()> {
    let kb = open_knowledge_base(config)?;
    let snapshot = kb.snapshot();

    let metadata = IndexMetadata::new(&snapshot.index, Some(snapshot.fingerprint.clone()));
    save_index(&snapshot.index, path, &metadata)?;

    println!("Index built:");
    println!("  Records:     {}", snapshot.index.len());
    println!("  Terms:       {}", snapshot.index.term_count());
    println!("  Fingerprint: {}", snapshot.fingerprint);
    let warnings = snapshot.report.warnings().count();
    if warnings > 0 {
        println!("  Warnings:    {warnings}");
    }
    println!("\nIndex saved to: {}", path.display());
    Ok(())
}

// ============================================================================
// quiz
// ============================================================================

/// Generate quiz questions about one protocol.
pub fn handle_quiz(
    config: &ProtolexConfig,
    id: &str,
    count: usize,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let kb = open_knowledge_base(config)?;
    let questions = match seed {
        Some(seed) => kb.quiz_seeded(id, count, seed)?,
        None => kb.quiz(id, count, &mut StdRng::from_entropy())?,
    };

    if json {
        return print_json(&questions);
    }

    for (n, question) in questions.iter().enumerate() {
        println!("{}. {}", n + 1, question.question);
        for (i, option) in question.options.iter().enumerate() {
            let letter = char::from(b'a' + (i % 26) as u8);
            println!("   {letter}) {option}");
        }
        if let Some(answer) = question.correct_option() {
            println!("   Answer: {answer}");
        }
        println!("   {}\n", question.explanation);
    }
    println!("{} question(s) about '{id}'", questions.len());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContentConfig;
    use protolex::fts::load_index;
    use protolex_core::fixtures::sample_corpus;
    use protolex_core::QuizQuestion;
    use tempfile::TempDir;

    fn write_corpus(dir: &TempDir, records: &[Protocol]) -> ProtolexConfig {
        let path = dir.path().join("protocols.json");
        std::fs::write(&path, serde_json::to_string(records).unwrap()).unwrap();
        ProtolexConfig {
            base_path: Some(dir.path().to_string_lossy().into_owned()),
            content: ContentConfig {
                protocols: Some(path.to_string_lossy().into_owned()),
                quizzes: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_load_corpus() {
        let dir = TempDir::new().unwrap();
        let config = write_corpus(&dir, &sample_corpus());
        assert_eq!(load_corpus(&config).unwrap().len(), 10);
    }

    #[test]
    fn test_load_corpus_missing_path() {
        let config = ProtolexConfig {
            content: ContentConfig {
                protocols: Some("/nonexistent/protocols.json".into()),
                quizzes: None,
            },
            ..Default::default()
        };
        assert!(load_corpus(&config).is_err());
    }

    // ------------------------------------------------------------------------
    // validate
    // ------------------------------------------------------------------------

    #[test]
    fn test_validate_clean_corpus() {
        let dir = TempDir::new().unwrap();
        let config = write_corpus(&dir, &sample_corpus());
        assert!(handle_validate(&config, false, None).is_ok());
    }

    #[test]
    fn test_validate_fatal_corpus_fails() {
        let dir = TempDir::new().unwrap();
        let mut records = sample_corpus();
        records[0].examples = None;
        let config = write_corpus(&dir, &records);

        let err = handle_validate(&config, false, None).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_validate_strict_flag() {
        let dir = TempDir::new().unwrap();
        let mut records = sample_corpus();
        records[0].related_protocols.push("gopher".into());
        let config = write_corpus(&dir, &records);

        assert!(handle_validate(&config, false, None).is_ok());
        assert!(handle_validate(&config, true, None).is_err());
    }

    #[test]
    fn test_validate_with_quiz_file() {
        let dir = TempDir::new().unwrap();
        let config = write_corpus(&dir, &sample_corpus());
        let quiz_path = dir.path().join("quiz.json");
        let orphan = QuizQuestion {
            id: "q1".into(),
            protocol_id: "gopher".into(),
            question: "What is Gopher?".into(),
            options: vec!["a".into(), "b".into()],
            correct_answer: 0,
            explanation: "Because.".into(),
        };
        std::fs::write(&quiz_path, serde_json::to_string(&vec![orphan]).unwrap()).unwrap();

        let result = handle_validate(&config, false, Some(quiz_path.to_str().unwrap()));
        assert!(result.is_err());
    }

    // ------------------------------------------------------------------------
    // search
    // ------------------------------------------------------------------------

    #[test]
    fn test_search_text_and_json() {
        let dir = TempDir::new().unwrap();
        let config = write_corpus(&dir, &sample_corpus());

        let args = SearchArgs {
            text: Some("kerberos ticket".into()),
            limit: Some(5),
            json: true,
            ..Default::default()
        };
        assert!(handle_search(&config, args).is_ok());
    }

    #[test]
    fn test_search_zero_limit_is_invalid() {
        let dir = TempDir::new().unwrap();
        let config = write_corpus(&dir, &sample_corpus());

        let args = SearchArgs {
            limit: Some(0),
            ..Default::default()
        };
        assert!(handle_search(&config, args).unwrap_err().is_invalid_query());
    }

    #[test]
    fn test_search_query_mapping() {
        let args = SearchArgs {
            text: Some("dns".into()),
            port: Some(53),
            offset: Some(2),
            ..Default::default()
        };
        let query = search_query(&args);
        assert_eq!(query.text.as_deref(), Some("dns"));
        assert_eq!(query.port, Some(53));
        assert_eq!(query.offset, Some(2));
        assert!(query.limit.is_none());
    }

    // ------------------------------------------------------------------------
    // index
    // ------------------------------------------------------------------------

    #[test]
    fn test_index_build_then_check() {
        let dir = TempDir::new().unwrap();
        let config = write_corpus(&dir, &sample_corpus());
        let out = dir.path().join("out").join("index.json");
        let output = Some(out.to_string_lossy().into_owned());

        let check = IndexSubcommand::Build {
            output: output.clone(),
            check: true,
        };
        assert!(handle_index_command(&config, check).is_err());

        let build = IndexSubcommand::Build {
            output: output.clone(),
            check: false,
        };
        handle_index_command(&config, build).unwrap();
        assert_eq!(load_index(&out).unwrap().metadata.record_count, 10);

        let check = IndexSubcommand::Build { output, check: true };
        assert!(handle_index_command(&config, check).is_ok());
    }

    #[test]
    fn test_index_default_path() {
        let dir = TempDir::new().unwrap();
        let config = write_corpus(&dir, &sample_corpus());

        let build = IndexSubcommand::Build {
            output: None,
            check: false,
        };
        handle_index_command(&config, build).unwrap();
        assert!(dir.path().join("data").join("index.json").exists());
    }

    #[test]
    fn test_index_build_refuses_fatal_corpus() {
        let dir = TempDir::new().unwrap();
        let mut records = sample_corpus();
        records[1].id = records[0].id.clone();
        let config = write_corpus(&dir, &records);

        let build = IndexSubcommand::Build {
            output: None,
            check: false,
        };
        assert!(handle_index_command(&config, build).is_err());
        assert!(!dir.path().join("data").join("index.json").exists());
    }

    // ------------------------------------------------------------------------
    // quiz
    // ------------------------------------------------------------------------

    #[test]
    fn test_quiz_seeded() {
        let dir = TempDir::new().unwrap();
        let config = write_corpus(&dir, &sample_corpus());
        assert!(handle_quiz(&config, "dns", 2, Some(7), false).is_ok());
        assert!(handle_quiz(&config, "dns", 2, None, true).is_ok());
    }

    #[test]
    fn test_quiz_unknown_protocol() {
        let dir = TempDir::new().unwrap();
        let config = write_corpus(&dir, &sample_corpus());
        let err = handle_quiz(&config, "gopher", 1, Some(0), false).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_quiz_zero_count() {
        let dir = TempDir::new().unwrap();
        let config = write_corpus(&dir, &sample_corpus());
        let err = handle_quiz(&config, "dns", 0, Some(0), false).unwrap_err();
        assert!(err.is_invalid_query());
    }
}
