//! Property tests: extractors and selector parsing are total.

use quickcheck_macros::quickcheck;
use swatch_css::tokens::extract_css_property;
use swatch_css::{extract_tokens, parse_selector, split_style_blocks};

#[quickcheck]
fn extract_tokens_never_panics(css: String) -> bool {
    let tokens = extract_tokens(&css);
    tokens.colors.iter().all(|color| css.contains(color))
}

#[quickcheck]
fn property_values_are_trimmed_substrings(css: String, name: String) -> bool {
    extract_css_property(&css, &name)
        .iter()
        .all(|value| value.trim() == value && css.contains(value))
}

#[quickcheck]
fn style_blocks_come_from_the_input(document: String) -> bool {
    split_style_blocks(&document)
        .lines()
        .all(|line| document.contains(line))
}

#[quickcheck]
fn selector_parsing_never_panics(raw: String) -> bool {
    let _ = parse_selector(&raw);
    true
}
