//! CSS support for Swatch.
//!
//! # Scope
//!
//! - **Style tokens**: literal design values (colors, font properties, spacing,
//!   radii, shadows, transitions, z-index, opacity, keyframes, breakpoints)
//!   scanned out of raw CSS text, plus slicing `<style>` blocks out of a page.
//! - **Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/)):
//!   type, class, ID, universal, and attribute selectors with descendant and
//!   child combinators, matched against a [`swatch_dom::DomTree`].

/// Insertion-ordered, first-seen-wins token collections.
pub mod collections;
/// Selector parsing and matching.
pub mod selector;
/// Style token extractors.
pub mod tokens;

pub use collections::{TokenMap, TokenSet};
pub use selector::{ParsedSelector, parse_selector};
pub use tokens::{
    StyleTokens, TokenFamily, extract_breakpoints, extract_colors, extract_css_property,
    extract_font_families, extract_keyframes, extract_spacings, extract_tokens, split_style_blocks,
};
