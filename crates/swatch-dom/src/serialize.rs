//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Produces the `outerHTML` of a node: the node itself followed by its
//! serialized children.

use std::fmt::Write;

use crate::{DomTree, NodeId, NodeType};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Parents whose text children are emitted literally, without escaping.
const RAW_TEXT_PARENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Whether `tag_name` is a void element.
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

/// Serialize `id` and its subtree as HTML (the `outerHTML` getter).
#[must_use]
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    serialize_node(tree, id, &mut out);
    out
}

fn serialize_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else { return };

    match &node.node_type {
        NodeType::Document => {
            for &child in &node.children {
                serialize_node(tree, child, out);
            }
        }
        NodeType::Element(data) => {
            // "Append a U+003C LESS-THAN SIGN character (<), followed by tagname."
            out.push('<');
            out.push_str(&data.tag_name);
            // "For each attribute that the element has, append a U+0020 SPACE character,
            // the attribute's serialized name, '=', '"', the attribute's value escaped
            // as described below in attribute mode, and a second '"'."
            for attr in &data.attrs {
                let _ = write!(out, " {}=\"{}\"", attr.name, escape(&attr.value, true));
            }
            out.push('>');

            // "If current node serializes as void, then continue on to the next child node"
            if is_void_element(&data.tag_name) {
                return;
            }

            for &child in &node.children {
                serialize_node(tree, child, out);
            }
            let _ = write!(out, "</{}>", data.tag_name);
        }
        NodeType::Text(text) => {
            // "If the parent of current node is a style, script, xmp, iframe, noembed,
            // noframes, or plaintext element, or if the parent of current node is a
            // noscript element and scripting is enabled for the node, then append the
            // value of current node's data literally."
            let raw_parent = node
                .parent
                .and_then(|parent| tree.as_element(parent))
                .is_some_and(|parent| RAW_TEXT_PARENTS.contains(&parent.tag_name.as_str()));
            if raw_parent {
                out.push_str(text);
            } else {
                out.push_str(&escape(text, false));
            }
        }
        NodeType::Comment(data) => {
            let _ = write!(out, "<!--{data}-->");
        }
    }
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// "1. Replace any occurrence of the & character by the string '&amp;'.
///  2. Replace any occurrences of the U+00A0 NO-BREAK SPACE character by the string '&nbsp;'.
///  3. If the algorithm was invoked in the attribute mode, replace any occurrences of
///     the '"' character by the string '&quot;'.
///  4. If the algorithm was not invoked in the attribute mode, replace any occurrences
///     of the '<' character by the string '&lt;', and any occurrences of the '>'
///     character by the string '&gt;'."
fn escape(text: &str, attribute_mode: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\u{00A0}' => escaped.push_str("&nbsp;"),
            '"' if attribute_mode => escaped.push_str("&quot;"),
            '<' if !attribute_mode => escaped.push_str("&lt;"),
            '>' if !attribute_mode => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
