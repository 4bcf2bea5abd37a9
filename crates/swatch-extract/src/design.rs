//! The structured design system a generator produces from a raw extraction.
//!
//! Field names serialize in `camelCase`. Every field is optional on input: a
//! missing field takes its empty value, so any JSON object parses and only
//! values of the wrong type are rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extraction::RawExtraction;

/// Errors raised while turning a generator response into a [`DesignSystem`].
#[derive(Debug, Error)]
pub enum DesignSystemError {
    /// The generator returned no text.
    #[error("generator returned an empty response")]
    Empty,
    /// The response is not JSON of the design-system shape.
    #[error("failed to parse design system response: {0}")]
    Parse(#[from] serde_json::Error),
    /// The generator itself failed before producing a response.
    #[error("generator failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Produces a [`DesignSystem`] from an extraction.
///
/// `digest` is the rendered [`crate::digest::render_digest`] listing of
/// `extraction`, passed alongside so implementations need not re-render it.
pub trait DesignSystemGenerator {
    /// Generate a design system.
    ///
    /// # Errors
    ///
    /// Returns a [`DesignSystemError`] if no usable design system could be
    /// produced.
    fn generate(
        &self,
        extraction: &RawExtraction,
        digest: &str,
    ) -> Result<DesignSystem, DesignSystemError>;
}

/// A generator that replays a response captured from an earlier run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedResponse {
    text: String,
}

impl RecordedResponse {
    /// Wrap the raw response text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DesignSystemGenerator for RecordedResponse {
    fn generate(
        &self,
        _extraction: &RawExtraction,
        _digest: &str,
    ) -> Result<DesignSystem, DesignSystemError> {
        parse_design_system(&self.text)
    }
}

/// Parse a generator response, tolerating a surrounding markdown code fence.
///
/// # Errors
///
/// Returns [`DesignSystemError::Empty`] for blank text (or a blank fenced
/// block) and [`DesignSystemError::Parse`] for anything that is not a JSON
/// object of the expected shape.
pub fn parse_design_system(text: &str) -> Result<DesignSystem, DesignSystemError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(DesignSystemError::Empty);
    }
    Ok(serde_json::from_str(body)?)
}

/// Strip a leading ```` ``` ```` line (with optional language tag) and the
/// closing fence.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// A complete design system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignSystem {
    /// Where the system came from.
    pub metadata: Metadata,
    /// Color palette.
    pub colors: ColorPalette,
    /// Type families and scale.
    pub typography: Typography,
    /// Spacing scale and layout grid.
    pub spacing: Spacing,
    /// Responsive breakpoints.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breakpoints: Vec<Breakpoint>,
    /// Corner radii.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub border_radius: Vec<NamedValue>,
    /// Box shadows.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shadows: Vec<NamedValue>,
    /// Opacity levels.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub opacity: Vec<NamedValue>,
    /// Stacking levels.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub z_index: Vec<ZIndexToken>,
    /// Transitions and keyframe animations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animations: Option<Animations>,
    /// Icon set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<IconSet>,
    /// Image assets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageAssets>,
    /// Component library.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentCategory>,
}

impl DesignSystem {
    /// Number of entries per section, labeled, for summaries.
    #[must_use]
    pub fn section_counts(&self) -> Vec<(&'static str, usize)> {
        let colors = &self.colors;
        let animations = self.animations.as_ref();
        vec![
            (
                "colors",
                colors.primary.len()
                    + colors.secondary.len()
                    + colors.neutral.len()
                    + colors.semantic.len(),
            ),
            ("gradients", colors.gradients.len()),
            ("font families", self.typography.font_families.len()),
            ("type scales", self.typography.scales.len()),
            ("spacings", self.spacing.scale.len()),
            ("breakpoints", self.breakpoints.len()),
            ("border radii", self.border_radius.len()),
            ("shadows", self.shadows.len()),
            ("opacities", self.opacity.len()),
            ("z-indexes", self.z_index.len()),
            (
                "transitions",
                animations.map_or(0, |animations| animations.transitions.len()),
            ),
            (
                "keyframes",
                animations.map_or(0, |animations| animations.keyframes.len()),
            ),
            ("icons", self.icons.as_ref().map_or(0, |set| set.icons.len())),
            ("logos", self.images.as_ref().map_or(0, |assets| assets.logos.len())),
            (
                "component variants",
                self.components
                    .iter()
                    .map(|category| category.variants.len())
                    .sum(),
            ),
        ]
    }
}

/// Provenance of a design system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    /// Human-readable project name.
    pub project_name: String,
    /// System version label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Page the extraction ran over.
    pub source_url: String,
    /// Frameworks or libraries recognized in the source.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub technologies_detected: Vec<String>,
}

/// Colors grouped by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorPalette {
    /// Brand colors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub primary: Vec<ColorToken>,
    /// Accent colors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<ColorToken>,
    /// Grays, backgrounds, and text colors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub neutral: Vec<ColorToken>,
    /// Success, warning, error, and similar status colors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub semantic: Vec<ColorToken>,
    /// Named gradients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gradients: Vec<NamedValue>,
}

/// One named color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorToken {
    /// Token name.
    pub name: String,
    /// A CSS color value.
    pub value: String,
    /// Where the color is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A name bound to a literal CSS value (radii, shadows, gradients, opacities).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedValue {
    /// Token name.
    pub name: String,
    /// Literal CSS value.
    pub value: String,
}

/// Type families and the type scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    /// Named font stacks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub font_families: Vec<FontFamily>,
    /// Type scale steps, largest first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scales: Vec<TypographyScale>,
}

/// A named font stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontFamily {
    /// Role name, e.g. `heading`.
    pub name: String,
    /// The `font-family` value.
    pub family: String,
}

/// One step of the type scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypographyScale {
    /// Step name, e.g. `h1`.
    pub name: String,
    /// `font-size` value.
    pub font_size: String,
    /// `line-height` value.
    pub line_height: String,
    /// `font-weight` value.
    pub font_weight: String,
    /// `font-family` value.
    pub font_family: String,
    /// `letter-spacing` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    /// Text to preview the step with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_text: Option<String>,
}

/// Spacing scale and layout grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Spacing steps, smallest first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scale: Vec<SpacingStep>,
    /// Layout grid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
}

/// One step of the spacing scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingStep {
    /// Step name.
    pub name: String,
    /// Literal CSS length.
    pub value: String,
    /// The value resolved to pixels, when it has a fixed size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixels: Option<f64>,
}

/// Layout grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Grid {
    /// Column count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    /// Gap between columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gutter_width: Option<String>,
    /// Maximum content width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
}

/// A responsive breakpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoint {
    /// Breakpoint name, e.g. `md`.
    pub name: String,
    /// The width, e.g. `768px`.
    pub value: String,
    /// Devices the breakpoint targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named stacking level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZIndexToken {
    /// Layer name, e.g. `modal`.
    pub name: String,
    /// The `z-index` value.
    pub value: i64,
}

/// Motion tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animations {
    /// Named transitions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<TransitionToken>,
    /// Named keyframe animations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keyframes: Vec<KeyframeToken>,
}

/// A named transition split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionToken {
    /// Token name.
    pub name: String,
    /// Transitioned property.
    pub property: String,
    /// Duration, e.g. `150ms`.
    pub duration: String,
    /// Timing function.
    pub timing: String,
}

/// A named `@keyframes` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyframeToken {
    /// Animation name.
    pub name: String,
    /// The keyframe body.
    pub definition: String,
}

/// The icon set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    /// Icons found in the source.
    pub icons: Vec<Icon>,
}

/// One icon, optionally with inline SVG markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icon {
    /// Icon name.
    pub name: String,
    /// Inline SVG markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

/// Image assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageAssets {
    /// Logo images.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logos: Vec<ImageAsset>,
}

/// One image, optionally tagged with its variant (e.g. `dark`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageAsset {
    /// Variant label, e.g. `dark`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Image location.
    pub url: String,
}

/// A kind of component with its variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentCategory {
    /// Grouping such as `navigation` or `forms`.
    pub category: String,
    /// Component name.
    pub name: String,
    /// How many instances were seen in the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u32>,
    /// Variants of the component.
    pub variants: Vec<ComponentVariant>,
}

/// One variant of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentVariant {
    /// Variant name.
    pub name: String,
    /// What the variant is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Interaction state shown, e.g. `hover` or `disabled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Self-contained markup for the variant.
    pub html_snippet: String,
    /// Free-form `Key: Value` descriptors such as `Size: Small`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    /// Accessibility traits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
    /// Interaction styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactivity: Option<Interactivity>,
}

/// Accessibility traits of a component variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Accessibility {
    /// ARIA role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// `aria-label` text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    /// Keyboard interaction supported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard_support: Option<String>,
}

/// Interaction styling of a component variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Interactivity {
    /// Styling on hover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_style: Option<String>,
    /// Styling on focus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_style: Option<String>,
    /// Styling while pressed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_style: Option<String>,
    /// Transition between states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}
