//! Integration tests for DOM construction, traversal, and serialization.

use swatch_dom::{Attribute, DomTree, ElementData, NodeId, NodeType, outer_html};

fn element(tag: &str, attrs: &[(&str, &str)]) -> NodeType {
    let mut data = ElementData::new(tag);
    data.attrs = attrs
        .iter()
        .map(|(name, value)| Attribute::new(*name, *value))
        .collect();
    NodeType::Element(data)
}

fn append(tree: &mut DomTree, parent: NodeId, node_type: NodeType) -> NodeId {
    let id = tree.alloc(node_type);
    tree.append_child(parent, id);
    id
}

/// Builds `<nav class="main nav"><a href="/">Home</a><!--x--><span>About</span></nav>`.
fn sample_nav() -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let nav = append(&mut tree, NodeId::ROOT, element("nav", &[("class", "main nav")]));
    let a = append(&mut tree, nav, element("a", &[("href", "/")]));
    let _ = append(&mut tree, a, NodeType::Text("Home".to_string()));
    let _ = append(&mut tree, nav, NodeType::Comment("x".to_string()));
    let span = append(&mut tree, nav, element("span", &[]));
    let _ = append(&mut tree, span, NodeType::Text("About".to_string()));
    (tree, nav)
}

#[test]
fn test_new_tree_has_only_document() {
    let tree = DomTree::new();
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
    assert!(matches!(
        tree.get(tree.root()).map(|n| &n.node_type),
        Some(NodeType::Document)
    ));
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_append_child_links_parent() {
    let (tree, nav) = sample_nav();
    assert_eq!(tree.parent(nav), Some(NodeId::ROOT));
    assert_eq!(tree.children(nav).len(), 3);
    let last = tree.last_child(nav).unwrap();
    assert_eq!(tree.as_element(last).unwrap().tag_name, "span");
}

#[test]
fn test_append_child_ignores_unknown_ids() {
    let mut tree = DomTree::new();
    tree.append_child(NodeId::ROOT, NodeId(42));
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_ancestors_walk_to_root() {
    let (tree, nav) = sample_nav();
    let a = tree.children(nav)[0];
    let text = tree.children(a)[0];
    let ancestors: Vec<NodeId> = tree.ancestors(text).collect();
    assert_eq!(ancestors, vec![a, nav, NodeId::ROOT]);
}

#[test]
fn test_descendants_in_tree_order() {
    let (tree, nav) = sample_nav();
    let tags: Vec<String> = tree
        .descendants(NodeId::ROOT)
        .map(|id| match &tree.get(id).unwrap().node_type {
            NodeType::Element(data) => data.tag_name.clone(),
            NodeType::Text(text) => format!("#{text}"),
            NodeType::Comment(_) => "#comment".to_string(),
            NodeType::Document => "#document".to_string(),
        })
        .collect();
    assert_eq!(tags, vec!["nav", "a", "#Home", "#comment", "span", "#About"]);
    assert_eq!(tree.elements().collect::<Vec<_>>().len(), 3);
    assert_eq!(tree.descendants(nav).count(), 5);
}

#[test]
fn test_text_content_concatenates_descendants() {
    let (tree, nav) = sample_nav();
    assert_eq!(tree.text_content(nav), "HomeAbout");
    let a = tree.children(nav)[0];
    assert_eq!(tree.text_content(tree.children(a)[0]), "Home");
}

#[test]
fn test_class_list_splits_on_whitespace() {
    let mut data = ElementData::new("div");
    data.attrs.push(Attribute::new("class", "  card \t featured  card "));
    assert_eq!(data.class_list(), vec!["card", "featured", "card"]);
    assert!(data.has_class("featured"));
    assert!(!data.has_class("feat"));
    assert!(ElementData::new("div").class_list().is_empty());
}

#[test]
fn test_attribute_lookup_is_case_insensitive() {
    let mut data = ElementData::new("a");
    data.attrs.push(Attribute::new("ID", "home"));
    assert_eq!(data.id(), Some("home"));
    assert!(data.has_attribute("id"));
    assert!(!data.has_attribute("href"));
}

#[test]
fn test_outer_html_round_trips_structure() {
    let (tree, nav) = sample_nav();
    assert_eq!(
        outer_html(&tree, nav),
        r#"<nav class="main nav"><a href="/">Home</a><!--x--><span>About</span></nav>"#
    );
}

#[test]
fn test_outer_html_void_and_escaping() {
    let mut tree = DomTree::new();
    let form = append(&mut tree, NodeId::ROOT, element("form", &[]));
    let _ = append(
        &mut tree,
        form,
        element("input", &[("value", "say \"hi\""), ("disabled", "")]),
    );
    let _ = append(&mut tree, form, NodeType::Text("1 < 2 & 3".to_string()));
    assert_eq!(
        outer_html(&tree, form),
        r#"<form><input value="say &quot;hi&quot;" disabled="">1 &lt; 2 &amp; 3</form>"#
    );
}

#[test]
fn test_outer_html_raw_text_parent() {
    let mut tree = DomTree::new();
    let style = append(&mut tree, NodeId::ROOT, element("style", &[]));
    let _ = append(&mut tree, style, NodeType::Text("a > b { color: red }".to_string()));
    assert_eq!(outer_html(&tree, style), "<style>a > b { color: red }</style>");
}
