//! Quiz generation for the Protolex catalog.

#![doc = include_str!("../README.md")]

pub mod generator;
pub mod types;

pub use generator::{generate_questions, generate_questions_seeded, generate_questions_with_config};
pub use types::{QuizConfig, QuizError, DEFAULT_DISTRACTORS};
