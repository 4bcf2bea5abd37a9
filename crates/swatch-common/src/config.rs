//! Extraction configuration.
//!
//! Every field defaults to the reference behavior, so an empty JSON object (or
//! no config file at all) reproduces the stock extraction.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Selectors sampled for components, in sampling order.
///
/// Landmark tags first, then interactive elements and class-based button/card/form
/// patterns, then common UI-pattern class names.
pub const DEFAULT_SELECTORS: &[&str] = &[
    "nav",
    "header",
    "footer",
    "aside",
    "button",
    "a.btn",
    ".button",
    ".card",
    "article",
    "form",
    "input",
    "select",
    "textarea",
    ".modal",
    ".dropdown",
    ".tooltip",
    ".hero",
    ".banner",
    ".cta",
    ".accordion",
    ".tabs",
    ".carousel",
    ".navbar",
    ".sidebar",
    ".menu",
];

/// Serialized HTML of a component fragment is cut to this many characters.
pub const DEFAULT_MAX_HTML_CHARS: usize = 1000;

/// Text content of a component fragment is cut to this many characters.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 100;

/// Errors raised while loading an [`ExtractConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The config text is not valid JSON for [`ExtractConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How many values of each family the digest lists.
///
/// `None` means the family is listed in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DigestLimits {
    /// Colors listed (reference: first 50).
    pub colors: Option<usize>,
    /// Font families listed (reference: all).
    pub font_families: Option<usize>,
    /// Spacings listed (reference: first 20).
    pub spacings: Option<usize>,
    /// Border radii listed (reference: all).
    pub border_radii: Option<usize>,
    /// Shadows listed (reference: all).
    pub shadows: Option<usize>,
    /// Component tags named in the sample (reference: first 5).
    pub component_tags: usize,
}

impl Default for DigestLimits {
    fn default() -> Self {
        Self {
            colors: Some(50),
            font_families: None,
            spacings: Some(20),
            border_radii: None,
            shadows: None,
            component_tags: 5,
        }
    }
}

/// Knobs for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Whether the component sampler runs at all.
    pub sample_components: bool,
    /// Selectors sampled for components, in order.
    pub selectors: Vec<String>,
    /// Maximum characters of serialized HTML kept per fragment.
    pub max_html_chars: usize,
    /// Maximum characters of text content kept per fragment.
    pub max_text_chars: usize,
    /// Digest listing limits.
    pub digest: DigestLimits,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            sample_components: true,
            selectors: DEFAULT_SELECTORS.iter().map(ToString::to_string).collect(),
            max_html_chars: DEFAULT_MAX_HTML_CHARS,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            digest: DigestLimits::default(),
        }
    }
}

impl ExtractConfig {
    /// Parse a config from JSON text. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid config object.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are not a valid config object.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
