//! Raw design extraction for Swatch.
//!
//! # Scope
//!
//! This crate ties the parsing crates into one pass over a document:
//! - **Extraction** - style tokens from `<style>` blocks plus sampled components
//! - **Component Sampling** - bounded HTML/text snippets of landmark and UI elements
//! - **Digest** - the bounded textual listing handed to a design-system generator
//! - **Design System** - the generator's output shape and response parsing
//!
//! # Not Implemented
//!
//! - Calling an actual generator service
//! - Fetching linked stylesheets or reading inline `style` attributes

/// Structured design-system output and generator seam.
pub mod design;
/// Digest rendering.
pub mod digest;
/// The extraction pass.
pub mod extraction;
/// Component sampling.
pub mod sampler;

pub use design::{
    DesignSystem, DesignSystemError, DesignSystemGenerator, RecordedResponse, parse_design_system,
};
pub use digest::render_digest;
pub use extraction::{RawExtraction, extract, extract_css};
pub use sampler::{ComponentFragment, ComponentSampler, sample_components};

pub use swatch_common::config::{DigestLimits, ExtractConfig};
pub use swatch_css::{
    StyleTokens, TokenFamily, TokenMap, TokenSet, extract_breakpoints, extract_colors,
    extract_css_property, extract_font_families, extract_keyframes, extract_spacings,
    extract_tokens, split_style_blocks,
};
