//! Text normalisation for duplicate detection.

/// Normalise a short statement for equality comparisons.
///
/// Lowercases, collapses runs of whitespace to one space, and drops
/// trailing sentence punctuation, so `"Fast  setup."` and `"fast setup"`
/// compare equal. Used wherever the engine must tell whether two
/// statements "say the same thing" (duplicate advantages, quiz distractors).
pub fn normalize_statement(text: &str) -> String {
    let lowered = text.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(['.', '!', '?', ';', ',', ':'])
        .trim_end()
        .to_string()
}

/// True if the text is empty or whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
