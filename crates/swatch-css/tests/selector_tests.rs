//! Integration tests for CSS selector parsing and matching.

use swatch_css::selector::{AttributeSelector, Combinator, SimpleSelector, parse_selector};
use swatch_dom::{DomTree, NodeId};
use swatch_html::parse_document;

/// Tag names of every element the selector matches, in document order.
fn select_tags(html: &str, selector: &str) -> Vec<String> {
    let tree = parse_document(html);
    let selector = parse_selector(selector).unwrap();
    selector
        .select_all(&tree)
        .into_iter()
        .map(|id| tree.as_element(id).unwrap().tag_name.clone())
        .collect()
}

fn select_ids(tree: &DomTree, selector: &str) -> Vec<NodeId> {
    parse_selector(selector).unwrap().select_all(tree)
}

#[test]
fn test_parse_type_selector() {
    let selector = parse_selector("NAV").unwrap();
    assert!(selector.is_simple());
    assert_eq!(
        selector.subject.simple_selectors,
        vec![SimpleSelector::Type("nav".to_string())]
    );
}

#[test]
fn test_parse_compound_selector() {
    let selector = parse_selector("a.btn#cta[data-x]").unwrap();
    assert_eq!(
        selector.subject.simple_selectors,
        vec![
            SimpleSelector::Type("a".to_string()),
            SimpleSelector::Class("btn".to_string()),
            SimpleSelector::Id("cta".to_string()),
            SimpleSelector::Attribute(AttributeSelector::Exists("data-x".to_string())),
        ]
    );
}

#[test]
fn test_parse_attribute_forms() {
    let selector = parse_selector(r#"[type=submit][class~="primary"][ role = 'tab' ]"#).unwrap();
    assert_eq!(
        selector.subject.simple_selectors,
        vec![
            SimpleSelector::Attribute(AttributeSelector::Equals(
                "type".to_string(),
                "submit".to_string()
            )),
            SimpleSelector::Attribute(AttributeSelector::Includes(
                "class".to_string(),
                "primary".to_string()
            )),
            SimpleSelector::Attribute(AttributeSelector::Equals(
                "role".to_string(),
                "tab".to_string()
            )),
        ]
    );
}

#[test]
fn test_parse_combinators_right_to_left() {
    let selector = parse_selector("header > nav  .item").unwrap();
    assert_eq!(
        selector.subject.simple_selectors,
        vec![SimpleSelector::Class("item".to_string())]
    );
    let chain: Vec<Combinator> = selector.combinators.iter().map(|(c, _)| *c).collect();
    assert_eq!(chain, vec![Combinator::Descendant, Combinator::Child]);
    assert_eq!(
        selector.combinators[1].1.simple_selectors,
        vec![SimpleSelector::Type("header".to_string())]
    );
}

#[test]
fn test_unsupported_syntax_is_rejected() {
    for raw in [
        "", "   ", "a:hover", "li::before", "h1 + p", "h1 ~ p", "a, b", "> a", "a >", ".",
        "#", "[", "[x", "[x=\"y]", "[x|=y]", "div!",
    ] {
        assert!(parse_selector(raw).is_none(), "{raw:?} should not parse");
    }
}

#[test]
fn test_type_and_class_matching() {
    let html = r#"<nav class="main nav"><a class="btn" href="/">Home</a><a href="/x">X</a></nav>"#;
    assert_eq!(select_tags(html, "nav"), vec!["nav"]);
    assert_eq!(select_tags(html, "a.btn"), vec!["a"]);
    assert_eq!(select_tags(html, ".nav"), vec!["nav"]);
    assert_eq!(select_tags(html, ".na"), Vec::<String>::new());
    assert_eq!(select_tags(html, "*").len(), 3);
}

#[test]
fn test_attribute_matching() {
    let html = r#"<form><input type="text"><input type="submit" class="btn primary"><button disabled>x</button></form>"#;
    assert_eq!(select_tags(html, "[type=submit]"), vec!["input"]);
    assert_eq!(select_tags(html, "[class~=primary]"), vec!["input"]);
    assert_eq!(select_tags(html, "[disabled]"), vec!["button"]);
    assert_eq!(select_tags(html, "input[type]").len(), 2);
}

#[test]
fn test_descendant_and_child_matching() {
    let tree = parse_document(
        r#"<header><nav><ul><li class="item">a</li></ul></nav></header><ul><li class="item">b</li></ul>"#,
    );
    assert_eq!(select_ids(&tree, ".item").len(), 2);
    assert_eq!(select_ids(&tree, "header .item").len(), 1);
    assert_eq!(select_ids(&tree, "nav > ul > .item").len(), 1);
    assert!(select_ids(&tree, "nav > .item").is_empty());
}

#[test]
fn test_descendant_backtracks_past_nearest_ancestor() {
    // The nearest `div` is not a child of `section`, a farther one is.
    let tree = parse_document("<section><div><div><span>x</span></div></div></section>");
    assert_eq!(select_ids(&tree, "section > div span").len(), 1);
}

#[test]
fn test_matches_are_in_document_order() {
    let tree = parse_document(r#"<div class="card" id="one"><div class="card" id="two"></div></div><div class="card" id="three"></div>"#);
    let ids: Vec<&str> = select_ids(&tree, ".card")
        .into_iter()
        .filter_map(|id| tree.as_element(id).and_then(|data| data.id()))
        .collect();
    assert_eq!(ids, vec!["one", "two", "three"]);
}
