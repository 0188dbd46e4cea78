//! Record id helpers.
//!
//! Protocol ids are lowercase slugs: ASCII letters and digits in runs
//! separated by single hyphens (`ipv6`, `dns-over-https`).

use regex::Regex;
use std::sync::LazyLock;

static SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid")
});

/// True if `id` is a well-formed slug.
pub fn is_valid_slug(id: &str) -> bool {
    SLUG.is_match(id)
}

/// Derive a slug from a display name (`"DNS over HTTPS"` → `"dns-over-https"`).
///
/// Used by diagnostics to suggest a fix for an invalid id.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_slugs() {
        for id in ["tcp", "ipv6", "dns-over-https", "802-11", "a"] {
            assert!(is_valid_slug(id), "{id} should be valid");
        }
    }

    #[test]
    fn test_invalid_slugs() {
        for id in ["", "TCP", "dns_over_https", "-tcp", "tcp-", "dns--tls", "caldav ", "wi fi"] {
            assert!(!is_valid_slug(id), "{id:?} should be invalid");
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("DNS over HTTPS"), "dns-over-https");
        assert_eq!(slugify("  Real-Time  Transport (RTP) "), "real-time-transport-rtp");
        assert_eq!(slugify("802.11"), "802-11");
        assert_eq!(slugify("!!!"), "");
    }

    proptest! {
        #[test]
        fn slugify_output_is_empty_or_valid(name in ".{0,40}") {
            let slug = slugify(&name);
            prop_assert!(slug.is_empty() || is_valid_slug(&slug));
        }
    }
}
