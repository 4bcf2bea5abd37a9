//! Property tests: extraction, sampling, and digest rendering are total.

use quickcheck_macros::quickcheck;
use swatch_common::config::{DigestLimits, ExtractConfig};
use swatch_extract::{extract, parse_design_system, render_digest, sample_components};

const TAGS: &[&str] = &["nav", "button", "article", "div", "style", "a", "li", "table"];

#[quickcheck]
fn extract_never_panics(document: String) -> bool {
    let extraction = extract(&document, &ExtractConfig::default());
    let digest = render_digest(&extraction, &DigestLimits::default());
    digest.starts_with("COLORS: ") && digest.contains("\nCOMPONENTS DETECTED: ")
}

#[quickcheck]
fn fragments_respect_limits(document: String) -> bool {
    sample_components(&document).iter().all(|fragment| {
        fragment.html.chars().count() <= 1000
            && fragment.text.chars().count() <= 100
            && fragment.classes.iter().all(|class| !class.is_empty())
    })
}

#[quickcheck]
fn tagged_markup_never_panics(parts: Vec<(u8, String)>) -> bool {
    let mut document = String::new();
    for (pick, text) in parts {
        let tag = TAGS[usize::from(pick) % TAGS.len()];
        if pick % 3 == 0 {
            document.push_str(&format!("</{tag}>"));
        } else {
            document.push_str(&format!("<{tag} class=\"card {text}\">{text}"));
        }
    }
    let extraction = extract(&document, &ExtractConfig::default());
    extraction.components.iter().all(|fragment| !fragment.tag.is_empty())
}

#[quickcheck]
fn design_parsing_never_panics(text: String) -> bool {
    let _ = parse_design_system(&text);
    true
}
