//! Integration tests for tree construction.

use swatch_dom::{DomTree, NodeId, NodeType};
use swatch_html::{parse_document, parse_document_with_issues};

/// Tag names of the element children of `id`, in order.
fn child_tags(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .filter_map(|&child| tree.as_element(child).map(|data| data.tag_name.clone()))
        .collect()
}

/// First element in tree order with the given tag.
fn find(tree: &DomTree, tag: &str) -> NodeId {
    tree.elements()
        .find(|&id| tree.as_element(id).is_some_and(|data| data.tag_name == tag))
        .unwrap_or_else(|| panic!("no <{tag}> in tree"))
}

#[test]
fn test_nested_structure() {
    let tree = parse_document(r#"<nav class="main"><a href="/">Home</a><a href="/about">About</a></nav>"#);
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["nav"]);
    let nav = find(&tree, "nav");
    assert_eq!(child_tags(&tree, nav), vec!["a", "a"]);
    assert_eq!(tree.text_content(nav), "HomeAbout");
}

#[test]
fn test_document_structure_is_kept() {
    let tree = parse_document(
        "<!DOCTYPE html>\n<html><head><title>T</title></head>\n<body><header>Hi</header></body></html>\n",
    );
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["html"]);
    let html = find(&tree, "html");
    assert_eq!(child_tags(&tree, html), vec!["head", "body"]);
    let body = find(&tree, "body");
    assert_eq!(child_tags(&tree, body), vec!["header"]);
}

#[test]
fn test_top_level_whitespace_is_dropped() {
    let tree = parse_document("  <div></div>\n");
    assert_eq!(tree.children(NodeId::ROOT).len(), 1);
}

#[test]
fn test_list_items_close_each_other() {
    let tree = parse_document("<ul><li>One<li>Two</ul><p>after");
    let ul = find(&tree, "ul");
    assert_eq!(child_tags(&tree, ul), vec!["li", "li"]);
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["ul", "p"]);
}

#[test]
fn test_paragraphs_close_on_block_start() {
    let tree = parse_document("<p>One<p>Two<div>Block</div>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["p", "p", "div"]);
}

#[test]
fn test_stray_p_end_tag_inserts_empty_paragraph() {
    let (tree, issues) = parse_document_with_issues("<div></p></div>");
    let div = find(&tree, "div");
    assert_eq!(child_tags(&tree, div), vec!["p"]);
    assert_eq!(issues.len(), 1);
}

#[test]
fn test_stray_end_tag_is_ignored_and_text_merges() {
    let (tree, issues) = parse_document_with_issues("<div>a</span>b</div>");
    let div = find(&tree, "div");
    assert_eq!(tree.children(div).len(), 1);
    assert_eq!(tree.text_content(div), "ab");
    assert!(!issues.is_empty());
}

#[test]
fn test_void_elements_take_no_children() {
    let tree = parse_document("<form><input name=q><br><button>Go</button></form>");
    let form = find(&tree, "form");
    assert_eq!(child_tags(&tree, form), vec!["input", "br", "button"]);
    assert!(tree.children(find(&tree, "input")).is_empty());
}

#[test]
fn test_nested_button_closes_outer() {
    let tree = parse_document("<button>A<button>B");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["button", "button"]);
}

#[test]
fn test_headings_do_not_nest() {
    let tree = parse_document("<h1>Title<h2>Sub</h2>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["h1", "h2"]);
}

#[test]
fn test_table_cells() {
    let tree = parse_document("<table><tr><td>a<td>b</tr><tr><th>c</table><p>x");
    let table = find(&tree, "table");
    assert_eq!(child_tags(&tree, table), vec!["tr", "tr"]);
    let first_row = tree.children(table)[0];
    assert_eq!(child_tags(&tree, first_row), vec!["td", "td"]);
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["table", "p"]);
}

#[test]
fn test_end_br_becomes_br() {
    let tree = parse_document("<p>a</br>b</p>");
    let p = find(&tree, "p");
    assert_eq!(child_tags(&tree, p), vec!["br"]);
}

#[test]
fn test_svg_self_closing_children() {
    let tree = parse_document(r#"<svg><path d="M0"/><circle/></svg><span>x</span>"#);
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["svg", "span"]);
    assert_eq!(child_tags(&tree, find(&tree, "svg")), vec!["path", "circle"]);
}

#[test]
fn test_unclosed_elements_at_eof() {
    let tree = parse_document("<section><div class=card>Text");
    let div = find(&tree, "div");
    assert_eq!(tree.text_content(div), "Text");
    assert_eq!(tree.parent(div), Some(find(&tree, "section")));
}

#[test]
fn test_style_element_keeps_raw_text() {
    let tree = parse_document("<style>.a > .b { color: red }</style>");
    let style = find(&tree, "style");
    let text = tree.children(style)[0];
    assert!(matches!(
        &tree.get(text).unwrap().node_type,
        NodeType::Text(data) if data == ".a > .b { color: red }"
    ));
}

#[test]
fn test_duplicate_body_merges_attributes() {
    let tree = parse_document(r#"<body class="a"><body id="b" class="c">"#);
    let body = find(&tree, "body");
    let data = tree.as_element(body).unwrap();
    assert_eq!(data.get_attribute("class"), Some("a"));
    assert_eq!(data.id(), Some("b"));
    assert_eq!(tree.elements().count(), 1);
}

#[test]
fn test_body_closes_unclosed_head() {
    let tree = parse_document("<html><head><title>x</title><body><main></main>");
    let html = find(&tree, "html");
    assert_eq!(child_tags(&tree, html), vec!["head", "body"]);
}
