//! The single extraction pass over one document.

use serde::Serialize;
use swatch_common::config::ExtractConfig;
use swatch_css::{StyleTokens, extract_tokens, split_style_blocks};

use crate::sampler::{ComponentFragment, ComponentSampler};

/// Everything pulled out of one document before any generator sees it.
///
/// Serializes as one flat object: one array per token family, `keyframes` and
/// `breakpoints` as objects, then `components`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawExtraction {
    /// Style tokens from every `<style>` block.
    #[serde(flatten)]
    pub tokens: StyleTokens,
    /// Sampled component fragments, grouped by selector.
    pub components: Vec<ComponentFragment>,
}

impl RawExtraction {
    /// Whether neither tokens nor components were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.components.is_empty()
    }
}

/// Extract tokens and, when enabled, component fragments from `document`.
///
/// Tokens come from the concatenated `<style>` blocks only; inline `style`
/// attributes and linked stylesheets are not read. Components are sampled from
/// the whole document.
#[must_use]
pub fn extract(document: &str, config: &ExtractConfig) -> RawExtraction {
    let css = split_style_blocks(document);
    let components = if config.sample_components {
        ComponentSampler::from_config(config).sample_components(document)
    } else {
        Vec::new()
    };
    RawExtraction {
        tokens: extract_tokens(&css),
        components,
    }
}

/// Extract tokens from a CSS-only input. No components are sampled.
#[must_use]
pub fn extract_css(css: &str) -> RawExtraction {
    RawExtraction {
        tokens: extract_tokens(css),
        components: Vec::new(),
    }
}
