//! Text analysis shared by indexing and querying.
//!
//! Deterministic and locale-independent:
//!
//! 1. lowercase (Unicode simple lowercasing)
//! 2. fold common Latin accented letters to ASCII (`é` → `e`, `ß` → `ss`)
//! 3. split on every character that is not alphanumeric
//!
//! There is no stemming and no stopword removal, so `ticket` and `tickets`
//! are different terms.

use std::collections::BTreeSet;

/// Split text into lowercase terms, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        fold_char(c, &mut folded);
    }

    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Distinct terms of `text`.
pub fn terms(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}

/// Distinct terms of `text` in order of first appearance.
pub fn unique_terms(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

fn fold_char(c: char, out: &mut String) {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' | 'ĉ' | 'ċ' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' | 'ĝ' | 'ġ' | 'ģ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'ł' | 'ľ' | 'ĺ' | 'ļ' => "l",
        'ñ' | 'ń' | 'ň' | 'ņ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ř' => "r",
        'ś' | 'š' | 'ş' | 'ș' => "s",
        'ß' => "ss",
        'ť' | 'ţ' | 'ț' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ž' | 'ż' => "z",
        _ => {
            out.push(c);
            return;
        }
    };
    out.push_str(folded);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        assert_eq!(
            tokenize("Ticket-based network authentication!"),
            vec!["ticket", "based", "network", "authentication"]
        );
        assert_eq!(tokenize("HTTP/2 (RFC 9113)"), vec!["http", "2", "rfc", "9113"]);
    }

    #[test]
    fn test_tokenize_folds_accents() {
        assert_eq!(tokenize("Protocole réseau Öffentlich"), vec!["protocole", "reseau", "offentlich"]);
        assert_eq!(tokenize("Straße"), vec!["strasse"]);
    }

    #[test]
    fn test_tokenize_empty_and_symbols() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  -- // ??").is_empty());
    }

    #[test]
    fn test_no_stemming() {
        assert_ne!(tokenize("tickets"), tokenize("ticket"));
    }

    #[test]
    fn test_unique_terms_keeps_first_order() {
        assert_eq!(unique_terms("dns DNS udp dns"), vec!["dns", "udp"]);
        assert_eq!(terms("b a b").into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    // ========================================================================
    // Properties
    // ========================================================================

    proptest! {
        #[test]
        fn test_tokens_are_clean(text in "\\PC{0,64}") {
            for token in tokenize(&text) {
                prop_assert!(!token.is_empty());
                prop_assert!(token.chars().all(char::is_alphanumeric));
            }
        }

        #[test]
        fn test_tokenize_is_deterministic(text in "\\PC{0,64}") {
            prop_assert_eq!(tokenize(&text), tokenize(&text));
        }

        #[test]
        fn test_tokenize_is_case_insensitive(text in "[a-zA-Z0-9 ,.-]{0,48}") {
            prop_assert_eq!(tokenize(&text.to_uppercase()), tokenize(&text.to_lowercase()));
        }
    }
}
