//! Integration tests for the HTML tokenizer.

use swatch_html::{Attribute, HTMLTokenizer, Token};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}

fn tokenize_with_errors(input: &str) -> (Vec<Token>, Vec<String>) {
    let mut tokenizer = HTMLTokenizer::new(input.to_string());
    tokenizer.run();
    let errors = tokenizer.errors().to_vec();
    (tokenizer.into_tokens(), errors)
}

fn text(data: &str) -> Token {
    Token::Character {
        data: data.to_string(),
    }
}

fn start_tag(name: &str, attrs: &[(&str, &str)], self_closing: bool) -> Token {
    Token::StartTag {
        name: name.to_string(),
        self_closing,
        attributes: attrs
            .iter()
            .map(|(name, value)| Attribute::new(*name, *value))
            .collect(),
    }
}

fn end_tag(name: &str) -> Token {
    Token::EndTag {
        name: name.to_string(),
    }
}

#[test]
fn test_plain_text_is_one_run() {
    assert_eq!(tokenize("Hello"), vec![text("Hello"), Token::EndOfFile]);
}

#[test]
fn test_empty_input() {
    assert_eq!(tokenize(""), vec![Token::EndOfFile]);
}

#[test]
fn test_doctype() {
    assert_eq!(
        tokenize("<!DOCTYPE html>"),
        vec![
            Token::Doctype {
                name: Some("html".to_string())
            },
            Token::EndOfFile
        ]
    );
    assert_eq!(
        tokenize("<!doctype HTML>")[0],
        Token::Doctype {
            name: Some("html".to_string())
        }
    );
}

#[test]
fn test_start_and_end_tags() {
    assert_eq!(
        tokenize("<div>hi</div>"),
        vec![
            start_tag("div", &[], false),
            text("hi"),
            end_tag("div"),
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_tag_and_attribute_names_are_lowercased() {
    assert_eq!(
        tokenize("<DIV CLASS=x></DIV>"),
        vec![
            start_tag("div", &[("class", "x")], false),
            end_tag("div"),
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_attribute_forms() {
    assert_eq!(
        tokenize(r#"<div class="a b" id=main data-x='1' hidden>"#)[0],
        start_tag(
            "div",
            &[("class", "a b"), ("id", "main"), ("data-x", "1"), ("hidden", "")],
            false
        )
    );
}

#[test]
fn test_duplicate_attribute_is_dropped() {
    let (tokens, errors) = tokenize_with_errors(r#"<a href="x" href="y">"#);
    assert_eq!(tokens[0], start_tag("a", &[("href", "x")], false));
    assert!(errors.iter().any(|e| e == "duplicate-attribute"));
}

#[test]
fn test_self_closing_flag() {
    assert_eq!(tokenize("<br/>")[0], start_tag("br", &[], true));
    assert_eq!(
        tokenize(r#"<img src="a.png" />"#)[0],
        start_tag("img", &[("src", "a.png")], true)
    );
}

#[test]
fn test_comment() {
    assert_eq!(
        tokenize("<!-- hi -->"),
        vec![Token::new_comment(" hi "), Token::EndOfFile]
    );
    assert_eq!(tokenize("<!---->")[0], Token::new_comment(""));
}

#[test]
fn test_abrupt_empty_comment() {
    let (tokens, errors) = tokenize_with_errors("<!-->x");
    assert_eq!(tokens, vec![Token::new_comment(""), text("x"), Token::EndOfFile]);
    assert_eq!(errors, vec!["abrupt-closing-of-empty-comment"]);
}

#[test]
fn test_processing_instruction_becomes_bogus_comment() {
    assert_eq!(
        tokenize(r#"<?xml version="1.0"?>"#)[0],
        Token::new_comment(r#"?xml version="1.0"?"#)
    );
}

#[test]
fn test_style_content_is_raw_text() {
    assert_eq!(
        tokenize("<style>a>b{color:red}</div>&amp;</style>"),
        vec![
            start_tag("style", &[], false),
            text("a>b{color:red}</div>&amp;"),
            end_tag("style"),
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_raw_text_end_tag_is_case_insensitive() {
    assert_eq!(
        tokenize("<script>if (a < b) {}</SCRIPT >")[1],
        text("if (a < b) {}")
    );
}

#[test]
fn test_textarea_decodes_references_but_not_tags() {
    assert_eq!(
        tokenize("<textarea><b>&amp;</b></textarea>")[1],
        text("<b>&</b>")
    );
}

#[test]
fn test_character_references_in_text() {
    assert_eq!(
        tokenize("a &amp; b &lt; &#x41;&#66; &bogus; &")[0],
        text("a & b < AB &bogus; &")
    );
}

#[test]
fn test_character_references_in_attributes() {
    assert_eq!(
        tokenize(r#"<a title="Tom &amp; Jerry" href=?a=1&b=2>"#)[0],
        start_tag("a", &[("title", "Tom & Jerry"), ("href", "?a=1&b=2")], false)
    );
}

#[test]
fn test_named_references_beyond_markup_escapes() {
    assert_eq!(
        tokenize("&copy 2024 Caf&eacute; &amp Co &lt;3 &rarr; &notit;")[0],
        text("\u{00A9} 2024 Caf\u{00E9} & Co <3 \u{2192} \u{00AC}it;")
    );
}

#[test]
fn test_legacy_reference_before_equals_in_attribute_is_literal() {
    assert_eq!(
        tokenize(r#"<a href="/search?q=1&copy=2&amp;x" title="&copy Acme">"#)[0],
        start_tag(
            "a",
            &[("href", "/search?q=1&copy=2&x"), ("title", "\u{00A9} Acme")],
            false
        )
    );
}

#[test]
fn test_lone_less_than_is_text() {
    assert_eq!(tokenize("a < b"), vec![text("a < b"), Token::EndOfFile]);
    assert_eq!(tokenize("<"), vec![text("<"), Token::EndOfFile]);
}

#[test]
fn test_eof_inside_tag_drops_it() {
    let (tokens, errors) = tokenize_with_errors("text<div class=");
    assert_eq!(tokens, vec![text("text"), Token::EndOfFile]);
    assert!(errors.iter().any(|e| e == "eof-in-tag"));
}

#[test]
fn test_eof_inside_comment_emits_it() {
    assert_eq!(
        tokenize("<!-- open"),
        vec![Token::new_comment(" open"), Token::EndOfFile]
    );
}
