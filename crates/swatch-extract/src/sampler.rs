//! Component sampling.
//!
//! A fixed list of selectors is run against the parsed document. Each match
//! becomes one [`ComponentFragment`] carrying a bounded snippet of its markup
//! and text. An element matched by two selectors is sampled twice.

use serde::{Deserialize, Serialize};
use swatch_common::config::{
    DEFAULT_MAX_HTML_CHARS, DEFAULT_MAX_TEXT_CHARS, DEFAULT_SELECTORS, ExtractConfig,
};
use swatch_common::text::truncate_chars;
use swatch_common::warning::warn_once;
use swatch_css::{ParsedSelector, parse_selector};
use swatch_dom::serialize::outer_html;
use swatch_dom::{DomTree, NodeId};
use swatch_html::parse_document;

/// One sampled element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFragment {
    /// Lowercase tag name.
    pub tag: String,
    /// Whitespace-separated entries of the `class` attribute, empty ones dropped.
    pub classes: Vec<String>,
    /// Outer HTML, cut to the sampler's HTML limit.
    pub html: String,
    /// Trimmed text content, cut to the sampler's text limit.
    pub text: String,
}

/// Runs an ordered selector list over documents.
#[derive(Debug, Clone)]
pub struct ComponentSampler {
    selectors: Vec<(String, ParsedSelector)>,
    max_html_chars: usize,
    max_text_chars: usize,
}

impl Default for ComponentSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentSampler {
    /// A sampler over the default selector list with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_selectors(DEFAULT_SELECTORS.iter().copied())
    }

    /// A sampler over `selectors`, in order, with the default limits.
    ///
    /// Selectors using syntax the matcher does not support are reported through
    /// [`warn_once`] and skipped.
    #[must_use]
    pub fn with_selectors<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selectors = selectors
            .into_iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                let parsed = parse_selector(raw);
                if parsed.is_none() {
                    let _ = warn_once("Sampler", &format!("skipping unsupported selector '{raw}'"));
                }
                parsed.map(|selector| (raw.to_string(), selector))
            })
            .collect();
        Self {
            selectors,
            max_html_chars: DEFAULT_MAX_HTML_CHARS,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
        }
    }

    /// A sampler using the selectors and truncation limits of `config`.
    #[must_use]
    pub fn from_config(config: &ExtractConfig) -> Self {
        Self::with_selectors(&config.selectors)
            .with_limits(config.max_html_chars, config.max_text_chars)
    }

    /// Replace the HTML and text truncation limits, counted in characters.
    #[must_use]
    pub const fn with_limits(mut self, max_html_chars: usize, max_text_chars: usize) -> Self {
        self.max_html_chars = max_html_chars;
        self.max_text_chars = max_text_chars;
        self
    }

    /// The selectors that will be run, in order. Skipped selectors are absent.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.selectors.iter().map(|(raw, _)| raw.as_str())
    }

    /// Parse `html` and sample it.
    #[must_use]
    pub fn sample_components(&self, html: &str) -> Vec<ComponentFragment> {
        self.sample_tree(&parse_document(html))
    }

    /// Sample an already parsed document.
    ///
    /// Fragments are grouped by selector in list order, and each group is in
    /// document order.
    #[must_use]
    pub fn sample_tree(&self, tree: &DomTree) -> Vec<ComponentFragment> {
        self.selectors
            .iter()
            .flat_map(|(_, selector)| selector.select_all(tree))
            .filter_map(|id| self.fragment(tree, id))
            .collect()
    }

    fn fragment(&self, tree: &DomTree, id: NodeId) -> Option<ComponentFragment> {
        let element = tree.as_element(id)?;
        let html = outer_html(tree, id);
        let text = tree.text_content(id);
        Some(ComponentFragment {
            tag: element.tag_name.to_ascii_lowercase(),
            classes: element
                .class_list()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            html: truncate_chars(&html, self.max_html_chars).to_string(),
            text: truncate_chars(text.trim(), self.max_text_chars).to_string(),
        })
    }
}

/// Sample `html` with the default selector list and limits.
#[must_use]
pub fn sample_components(html: &str) -> Vec<ComponentFragment> {
    ComponentSampler::new().sample_components(html)
}
