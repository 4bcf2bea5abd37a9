//! The bounded textual listing of a [`RawExtraction`].
//!
//! ```text
//! COLORS: #fff, #000
//! FONTS: Inter, sans-serif
//! SPACINGS: 8px, 16px
//! RADIUS: 4px
//! SHADOWS: 0 1px 2px rgba(0,0,0,.1)
//! COMPONENTS DETECTED: 3 (Sample: nav, button, button)
//! ```
//!
//! Lines are separated by `\n` with no trailing newline. An empty family still
//! gets its line, with nothing after the label.

use std::fmt::Write;

use swatch_common::config::DigestLimits;
use swatch_css::TokenSet;

use crate::extraction::RawExtraction;

const SEPARATOR: &str = ", ";

/// Render the digest of `extraction`, listing at most as many values per family
/// as `limits` allows.
#[must_use]
pub fn render_digest(extraction: &RawExtraction, limits: &DigestLimits) -> String {
    let tokens = &extraction.tokens;
    let mut digest = String::new();
    let families = [
        ("COLORS", &tokens.colors, limits.colors),
        ("FONTS", &tokens.font_families, limits.font_families),
        ("SPACINGS", &tokens.spacings, limits.spacings),
        ("RADIUS", &tokens.border_radii, limits.border_radii),
        ("SHADOWS", &tokens.shadows, limits.shadows),
    ];
    for (label, values, limit) in families {
        let _ = writeln!(digest, "{label}: {}", join_limited(values, limit));
    }

    let sample = extraction
        .components
        .iter()
        .take(limits.component_tags)
        .map(|fragment| fragment.tag.as_str())
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let _ = write!(
        digest,
        "COMPONENTS DETECTED: {} (Sample: {sample})",
        extraction.components.len()
    );
    digest
}

fn join_limited(values: &TokenSet, limit: Option<usize>) -> String {
    values
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_extraction_digest() {
        let digest = render_digest(&RawExtraction::default(), &DigestLimits::default());
        assert_eq!(
            digest,
            "COLORS: \nFONTS: \nSPACINGS: \nRADIUS: \nSHADOWS: \nCOMPONENTS DETECTED: 0 (Sample: )"
        );
    }

    #[test]
    fn test_zero_limit_lists_nothing() {
        let mut extraction = RawExtraction::default();
        extraction.tokens.colors = ["#fff", "#000"].into_iter().collect();
        let limits = DigestLimits {
            colors: Some(0),
            ..DigestLimits::default()
        };
        assert!(render_digest(&extraction, &limits).starts_with("COLORS: \n"));
    }
}
