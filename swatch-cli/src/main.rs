//! Swatch CLI
//!
//! Extracts design tokens and component samples from an HTML page and prints
//! them as a digest, JSON, or a colored summary.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;
use swatch_common::warning::{clear_warnings, set_warnings_enabled};
use swatch_extract::{
    DesignSystem, DesignSystemGenerator, ExtractConfig, RawExtraction, RecordedResponse,
    TokenFamily, extract, extract_css, render_digest,
};

/// Swatch: design-token extraction for HTML pages
#[derive(Parser, Debug)]
#[command(name = "swatch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Summarize a saved page
    swatch ./index.html

    # Print the generator digest
    swatch --format digest ./index.html

    # Full extraction as JSON, tokens only
    swatch --format json --no-components ./index.html

    # Read from stdin with custom selectors and limits
    curl -s https://example.com | swatch --config swatch.json

    # Extract from a stylesheet
    swatch ./site.css

    # Parse inline HTML
    swatch --html '<style>a{color:#fff}</style><nav>Home</nav>'

    # Check a saved generator response against the extraction
    swatch --response design.json ./index.html
"#)]
struct Cli {
    /// HTML (or `.css`) file to read; stdin when omitted
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Extract from this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// JSON config file with selectors, truncation limits, and digest limits
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip component sampling
    #[arg(long)]
    no_components: bool,

    /// Saved generator response to parse as a design system
    #[arg(long, value_name = "FILE")]
    response: Option<PathBuf>,

    /// Do not print warnings about skipped markup or selectors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The bounded listing handed to a design-system generator
    Digest,
    /// The full extraction as JSON
    Json,
    /// Counts per token family and sampled components
    Summary,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    set_warnings_enabled(!cli.quiet);
    clear_warnings();

    let mut config = match cli.config {
        Some(ref path) => ExtractConfig::load(path)?,
        None => ExtractConfig::default(),
    };
    if cli.no_components {
        config.sample_components = false;
    }

    let extraction = load_extraction(&cli, &config)?;
    let digest = render_digest(&extraction, &config.digest);

    if let Some(ref path) = cli.response {
        let text = read_file(path)?;
        let system = RecordedResponse::new(text)
            .generate(&extraction, &digest)
            .with_context(|| format!("invalid design system in '{}'", path.display()))?;
        return print_design_system(&system, cli.format);
    }

    match cli.format {
        Format::Digest => println!("{digest}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&extraction)?),
        Format::Summary => print_summary(&extraction),
    }
    Ok(())
}

/// Run the extraction over whichever input the arguments name.
fn load_extraction(cli: &Cli, config: &ExtractConfig) -> anyhow::Result<RawExtraction> {
    if let Some(ref html) = cli.html {
        return Ok(extract(html, config));
    }
    if let Some(ref path) = cli.path {
        let text = read_file(path)?;
        let is_stylesheet = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("css"));
        return Ok(if is_stylesheet {
            extract_css(&text)
        } else {
            extract(&text, config)
        });
    }

    let mut text = String::new();
    let _ = io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(extract(&text, config))
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

/// Print token counts and sampled components to stdout
fn print_summary(extraction: &RawExtraction) {
    let tokens = &extraction.tokens;

    println!("{}", "=== Style Tokens ===".bold());
    for family in TokenFamily::iter() {
        print_count(&family.to_string(), tokens.family(family).len());
    }
    print_count("keyframes", tokens.keyframes.len());
    print_count("breakpoints", tokens.breakpoints.len());

    if !tokens.colors.is_empty() {
        println!("\n{}", "=== Colors ===".bold());
        for color in tokens.colors.iter() {
            println!("  {color}");
        }
    }

    if !tokens.breakpoints.is_empty() {
        println!("\n{}", "=== Breakpoints ===".bold());
        for (width, query) in tokens.breakpoints.iter() {
            println!("  {:<12} {}", width.cyan(), query.dimmed());
        }
    }

    println!("\n{}", "=== Components ===".bold());
    println!("{} fragments", extraction.components.len());
    for fragment in &extraction.components {
        let classes = if fragment.classes.is_empty() {
            String::new()
        } else {
            format!(".{}", fragment.classes.join("."))
        };
        let preview: String = fragment.text.chars().take(40).collect();
        println!(
            "  <{}>{} {}",
            fragment.tag.green(),
            classes.cyan(),
            format!("{preview:?}").dimmed()
        );
    }
}

fn print_count(label: &str, count: usize) {
    if count == 0 {
        println!("  {label:<14} {}", count.dimmed());
    } else {
        println!("  {label:<14} {}", count.cyan());
    }
}

/// Print a parsed design system in the requested format
fn print_design_system(system: &DesignSystem, format: Format) -> anyhow::Result<()> {
    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(system)?);
        return Ok(());
    }

    let metadata = &system.metadata;
    println!("{}", "=== Design System ===".bold());
    println!("  project        {}", metadata.project_name.green());
    if !metadata.source_url.is_empty() {
        println!("  source         {}", metadata.source_url);
    }
    if let Some(ref version) = metadata.version {
        println!("  version        {version}");
    }
    for (label, count) in system.section_counts() {
        print_count(label, count);
    }
    for category in &system.components {
        let variants: Vec<_> = category
            .variants
            .iter()
            .map(|variant| variant.name.as_str())
            .collect();
        println!(
            "  {} {} [{}]",
            category.name.green(),
            format!("({})", category.category).dimmed(),
            variants.join(", ")
        );
    }
    Ok(())
}
