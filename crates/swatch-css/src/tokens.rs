//! Style token extraction.
//!
//! Every extractor is a global, unanchored pattern scan over raw CSS text. No
//! CSS parsing happens: a value is whatever literal text follows a property
//! name up to the next `;` or `}`. Extractors are total; no match yields an
//! empty collection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::collections::{TokenMap, TokenSet};

/// `#` plus three or six hex digits, ending at an ASCII word boundary.
static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#([0-9A-Fa-f]{3}){1,2}(?-u:\b)").expect("hex color pattern is valid")
});

static RGB_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rgba?\([^)]+\)").expect("rgb color pattern is valid"));

static HSL_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"hsla?\([^)]+\)").expect("hsl color pattern is valid"));

static FONT_FAMILY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"font-family:\s*([^;}]+)").expect("font-family pattern is valid"));

// The body stops at the first `}`, so nested frame blocks cut it short.
static KEYFRAMES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@keyframes\s+([^\s{]+)\s*\{([^}]+)\}").expect("keyframes pattern is valid")
});

static BREAKPOINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@media[^{]*\((?:min|max)-width:\s*([^)]+)\)")
        .expect("breakpoint pattern is valid")
});

static STYLE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style[^>]*>(.*?)</style>").expect("style block pattern is valid")
});

/// A category of design value extracted as a flat set of literal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TokenFamily {
    /// Hex, `rgb()`/`rgba()`, and `hsl()`/`hsla()` literals.
    Colors,
    /// `font-family` values.
    FontFamilies,
    /// `font-size` values.
    FontSizes,
    /// `font-weight` values.
    FontWeights,
    /// `line-height` values.
    LineHeights,
    /// `margin`, `padding`, and `gap` values.
    Spacings,
    /// `border-radius` values.
    BorderRadii,
    /// `box-shadow` values.
    Shadows,
    /// `transition` values.
    Transitions,
    /// `z-index` values.
    ZIndexes,
    /// `opacity` values.
    Opacities,
}

impl TokenFamily {
    /// The CSS properties scanned for this family, in union order.
    ///
    /// Colors are found by value shape rather than by property, so the list is
    /// empty for them.
    #[must_use]
    pub const fn properties(self) -> &'static [&'static str] {
        match self {
            Self::Colors => &[],
            Self::FontFamilies => &["font-family"],
            Self::FontSizes => &["font-size"],
            Self::FontWeights => &["font-weight"],
            Self::LineHeights => &["line-height"],
            Self::Spacings => &["margin", "padding", "gap"],
            Self::BorderRadii => &["border-radius"],
            Self::Shadows => &["box-shadow"],
            Self::Transitions => &["transition"],
            Self::ZIndexes => &["z-index"],
            Self::Opacities => &["opacity"],
        }
    }

    /// Run this family's extractor over `css`.
    #[must_use]
    pub fn extract(self, css: &str) -> TokenSet {
        match self {
            Self::Colors => extract_colors(css),
            Self::FontFamilies => extract_font_families(css),
            Self::Spacings => extract_spacings(css),
            _ => {
                let mut values = TokenSet::new();
                for property in self.properties() {
                    values.union_with(&extract_css_property(css, property));
                }
                values
            }
        }
    }
}

/// Every token family and keyed collection found in one CSS string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleTokens {
    /// Color literals.
    pub colors: TokenSet,
    /// Font family lists.
    pub font_families: TokenSet,
    /// Font sizes.
    pub font_sizes: TokenSet,
    /// Font weights.
    pub font_weights: TokenSet,
    /// Line heights.
    pub line_heights: TokenSet,
    /// Margins, paddings, and gaps.
    pub spacings: TokenSet,
    /// Border radii.
    pub border_radii: TokenSet,
    /// Box shadows.
    pub shadows: TokenSet,
    /// Transitions.
    pub transitions: TokenSet,
    /// Keyframe name to body text.
    pub keyframes: TokenMap,
    /// Width condition to the matched media query prefix.
    pub breakpoints: TokenMap,
    /// Z-index values.
    pub z_indexes: TokenSet,
    /// Opacity values.
    pub opacities: TokenSet,
}

impl StyleTokens {
    /// The set collected for `family`.
    #[must_use]
    pub const fn family(&self, family: TokenFamily) -> &TokenSet {
        match family {
            TokenFamily::Colors => &self.colors,
            TokenFamily::FontFamilies => &self.font_families,
            TokenFamily::FontSizes => &self.font_sizes,
            TokenFamily::FontWeights => &self.font_weights,
            TokenFamily::LineHeights => &self.line_heights,
            TokenFamily::Spacings => &self.spacings,
            TokenFamily::BorderRadii => &self.border_radii,
            TokenFamily::Shadows => &self.shadows,
            TokenFamily::Transitions => &self.transitions,
            TokenFamily::ZIndexes => &self.z_indexes,
            TokenFamily::Opacities => &self.opacities,
        }
    }

    const fn family_mut(&mut self, family: TokenFamily) -> &mut TokenSet {
        match family {
            TokenFamily::Colors => &mut self.colors,
            TokenFamily::FontFamilies => &mut self.font_families,
            TokenFamily::FontSizes => &mut self.font_sizes,
            TokenFamily::FontWeights => &mut self.font_weights,
            TokenFamily::LineHeights => &mut self.line_heights,
            TokenFamily::Spacings => &mut self.spacings,
            TokenFamily::BorderRadii => &mut self.border_radii,
            TokenFamily::Shadows => &mut self.shadows,
            TokenFamily::Transitions => &mut self.transitions,
            TokenFamily::ZIndexes => &mut self.z_indexes,
            TokenFamily::Opacities => &mut self.opacities,
        }
    }

    /// Whether nothing at all was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        TokenFamily::iter().all(|family| self.family(family).is_empty())
            && self.keyframes.is_empty()
            && self.breakpoints.is_empty()
    }
}

/// Run every extractor over one CSS string.
#[must_use]
pub fn extract_tokens(css: &str) -> StyleTokens {
    let mut tokens = StyleTokens {
        keyframes: extract_keyframes(css),
        breakpoints: extract_breakpoints(css),
        ..StyleTokens::default()
    };
    for family in TokenFamily::iter() {
        *tokens.family_mut(family) = family.extract(css);
    }
    tokens
}

/// The union of hex, `rgb[a]()`, and `hsl[a]()` literals, in that scan order.
#[must_use]
pub fn extract_colors(css: &str) -> TokenSet {
    [&*HEX_COLOR, &*RGB_COLOR, &*HSL_COLOR]
        .into_iter()
        .flat_map(|pattern| pattern.find_iter(css).map(|m| m.as_str()))
        .collect()
}

/// Every `font-family:` value, trimmed.
#[must_use]
pub fn extract_font_families(css: &str) -> TokenSet {
    captured_values(&FONT_FAMILY, css)
}

/// Every value of the property `name`, trimmed.
///
/// The name is matched literally anywhere, so `gap` also picks up `row-gap:`
/// and `transition` picks up `-webkit-transition:`.
#[must_use]
pub fn extract_css_property(css: &str, name: &str) -> TokenSet {
    match Regex::new(&format!(r"{}:\s*([^;}}]+)", regex::escape(name))) {
        Ok(pattern) => captured_values(&pattern, css),
        Err(_) => TokenSet::new(),
    }
}

/// `margin`, `padding`, and `gap` values, unioned in that order.
#[must_use]
pub fn extract_spacings(css: &str) -> TokenSet {
    let mut spacings = TokenSet::new();
    for property in TokenFamily::Spacings.properties() {
        spacings.union_with(&extract_css_property(css, property));
    }
    spacings
}

/// Keyframe names mapped to their trimmed body, first definition wins.
#[must_use]
pub fn extract_keyframes(css: &str) -> TokenMap {
    let mut keyframes = TokenMap::new();
    for captures in KEYFRAMES.captures_iter(css) {
        let _ = keyframes.insert(&captures[1], captures[2].trim());
    }
    keyframes
}

/// Width conditions of `min-width`/`max-width` media queries mapped to the
/// matched query prefix, first occurrence wins.
#[must_use]
pub fn extract_breakpoints(css: &str) -> TokenMap {
    let mut breakpoints = TokenMap::new();
    for captures in BREAKPOINT.captures_iter(css) {
        let _ = breakpoints.insert(captures[1].trim(), &captures[0]);
    }
    breakpoints
}

/// The inner text of every `<style>` block, each followed by a newline, in
/// document order.
#[must_use]
pub fn split_style_blocks(document: &str) -> String {
    let mut css = String::new();
    for captures in STYLE_BLOCK.captures_iter(document) {
        css.push_str(&captures[1]);
        css.push('\n');
    }
    css
}

fn captured_values(pattern: &Regex, css: &str) -> TokenSet {
    pattern
        .captures_iter(css)
        .map(|captures| captures[1].trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_requires_word_boundary() {
        let colors = extract_colors("a{color:#abcd} b{color:#abc;} c{color:#a1b2c3}");
        assert_eq!(colors.as_slice(), ["#abc", "#a1b2c3"]);
    }

    #[test]
    fn test_family_properties_cover_every_property_family() {
        for family in TokenFamily::iter() {
            assert_eq!(family.properties().is_empty(), family == TokenFamily::Colors);
        }
    }

    #[test]
    fn test_family_display_matches_field_names() {
        assert_eq!(TokenFamily::FontFamilies.to_string(), "font_families");
        assert_eq!(TokenFamily::ZIndexes.to_string(), "z_indexes");
    }
}
