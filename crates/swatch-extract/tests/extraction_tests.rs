//! Integration tests for the extraction pass and its digest.

use swatch_common::config::{DigestLimits, ExtractConfig};
use swatch_extract::{
    extract, extract_breakpoints, extract_colors, extract_css, extract_css_property,
    extract_font_families, extract_spacings, render_digest, split_style_blocks,
};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<style>
  body { color: #FF0000; font-family: Inter, sans-serif; margin: 0; }
  .card { border-radius: 8px; box-shadow: 0 1px 2px rgba(0,0,0,.2); padding: 16px; }
  @media (min-width: 768px) { .card { gap: 24px; } }
</style>
</head>
<body>
  <nav class="main"><a class="btn">Home</a></nav>
  <article class="card">Hello</article>
</body>
</html>"#;

#[test]
fn test_extract_page() {
    let extraction = extract(PAGE, &ExtractConfig::default());
    let tokens = &extraction.tokens;
    assert_eq!(tokens.colors.as_slice(), ["#FF0000", "rgba(0,0,0,.2)"]);
    assert_eq!(tokens.font_families.as_slice(), ["Inter, sans-serif"]);
    assert_eq!(tokens.spacings.as_slice(), ["0", "16px", "24px"]);
    assert_eq!(tokens.border_radii.as_slice(), ["8px"]);
    assert_eq!(tokens.breakpoints.get("768px"), Some("@media (min-width: 768px)"));

    let tags: Vec<_> = extraction.components.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, vec!["nav", "a", "article", "article"]);
}

#[test]
fn test_tokens_only_come_from_style_blocks() {
    let extraction = extract(
        r#"<p style="color:#123456">inline</p>color: #abcdef;"#,
        &ExtractConfig::default(),
    );
    assert!(extraction.tokens.is_empty());
}

#[test]
fn test_component_sampling_can_be_disabled() {
    let config = ExtractConfig {
        sample_components: false,
        ..ExtractConfig::default()
    };
    let extraction = extract(PAGE, &config);
    assert!(extraction.components.is_empty());
    assert!(!extraction.tokens.colors.is_empty());
}

#[test]
fn test_extract_css_only() {
    let extraction = extract_css("a{color:#fff} b{color:#fff}");
    assert_eq!(extraction.tokens.colors.len(), 1);
    assert!(extraction.components.is_empty());
}

#[test]
fn test_empty_document() {
    let extraction = extract("", &ExtractConfig::default());
    assert!(extraction.is_empty());
}

#[test]
fn test_digest_of_page() {
    let extraction = extract(PAGE, &ExtractConfig::default());
    let digest = render_digest(&extraction, &DigestLimits::default());
    assert_eq!(
        digest,
        "COLORS: #FF0000, rgba(0,0,0,.2)\n\
         FONTS: Inter, sans-serif\n\
         SPACINGS: 0, 16px, 24px\n\
         RADIUS: 8px\n\
         SHADOWS: 0 1px 2px rgba(0,0,0,.2)\n\
         COMPONENTS DETECTED: 4 (Sample: nav, a, article, article)"
    );
}

#[test]
fn test_digest_limits() {
    let css: String = (0..60).map(|i| format!(".c{i}{{color:#{i:03};margin:{i}px}}")).collect();
    let extraction = extract_css(&css);
    assert_eq!(extraction.tokens.colors.len(), 60);

    let digest = render_digest(&extraction, &DigestLimits::default());
    let lines: Vec<_> = digest.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0].trim_start_matches("COLORS: ").split(", ").count(), 50);
    assert_eq!(lines[2].trim_start_matches("SPACINGS: ").split(", ").count(), 20);
    assert!(lines[2].starts_with("SPACINGS: 0px, 1px, 2px"));

    let unlimited = DigestLimits {
        colors: None,
        ..DigestLimits::default()
    };
    let digest = render_digest(&extraction, &unlimited);
    assert_eq!(digest.lines().next().map(|line| line.split(", ").count()), Some(60));
}

#[test]
fn test_digest_component_sample_limit() {
    let html = "<button>a</button>".repeat(8);
    let extraction = extract(&html, &ExtractConfig::default());
    let digest = render_digest(&extraction, &DigestLimits::default());
    assert!(digest.ends_with(
        "COMPONENTS DETECTED: 8 (Sample: button, button, button, button, button)"
    ));
}

#[test]
fn test_extraction_serializes_flat() {
    let extraction = extract(PAGE, &ExtractConfig::default());
    let json = serde_json::to_value(&extraction).unwrap();
    assert_eq!(json["colors"][0], "#FF0000");
    assert_eq!(json["breakpoints"]["768px"], "@media (min-width: 768px)");
    assert_eq!(json["components"][0]["tag"], "nav");
    assert_eq!(json["components"][0]["classes"][0], "main");
    assert!(json["keyframes"].as_object().is_some_and(serde_json::Map::is_empty));
}

#[test]
fn test_family_extractors_agree_with_extract() {
    let css = split_style_blocks(PAGE);
    let extraction = extract(PAGE, &ExtractConfig::default());
    let tokens = &extraction.tokens;
    assert_eq!(extract_colors(&css), tokens.colors);
    assert_eq!(extract_font_families(&css), tokens.font_families);
    assert_eq!(extract_spacings(&css), tokens.spacings);
    assert_eq!(extract_css_property(&css, "border-radius"), tokens.border_radii);
    assert_eq!(extract_css_property(&css, "box-shadow"), tokens.shadows);
    assert_eq!(extract_breakpoints(&css), tokens.breakpoints);
}
