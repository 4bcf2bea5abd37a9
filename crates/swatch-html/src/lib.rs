//! HTML tokenizer and tree builder for Swatch.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, and tag states
//!   - DOCTYPE, comment, and character reference handling
//!   - Attribute parsing with duplicate removal
//!
//! - **Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Stack of open elements with button, list item, and table scopes
//!   - Implied end tags and the "any other end tag" recovery
//!
//! Parsing never fails. Malformed markup yields a best-effort tree and a list
//! of [`ParseIssue`]s.
//!
//! # Not Implemented
//!
//! - Script data states
//! - Insertion modes other than "in body"
//! - Foster parenting and the full adoption agency algorithm

/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{HTMLParser, ParseIssue};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerState};

use swatch_dom::DomTree;

/// Tokenize and tree-build `html` in one step.
#[must_use]
pub fn parse_document(html: &str) -> DomTree {
    parse_document_with_issues(html).0
}

/// Like [`parse_document`], also returning the tree builder's parse issues.
#[must_use]
pub fn parse_document_with_issues(html: &str) -> (DomTree, Vec<ParseIssue>) {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    HTMLParser::new(tokenizer.into_tokens()).run_with_issues()
}
