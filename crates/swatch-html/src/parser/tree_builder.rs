use swatch_common::warning::warn_once;
use swatch_dom::serialize::is_void_element;
use swatch_dom::{Attribute, DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::Token;

/// A recoverable oddity met while building the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Description of the parse error.
    pub message: String,
    /// Index into the token stream where this error was encountered.
    pub token_index: usize,
}

/// Start tags that close an open `p` element in button scope.
///
/// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
/// "A start tag whose tag name is one of: address, article, aside, blockquote,
/// center, details, dialog, dir, div, dl, fieldset, figcaption, figure, footer,
/// header, hgroup, main, menu, nav, ol, p, search, section, summary, ul -
/// If the stack of open elements has a p element in button scope, then close a
/// p element."
const CLOSES_P: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div",
    "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main", "menu",
    "nav", "ol", "p", "search", "section", "summary", "ul", "h1", "h2", "h3", "h4", "h5", "h6",
    "pre", "listing", "form", "table", "hr", "xmp", "li", "dd", "dt", "plaintext",
];

/// End tags that close by plain "in scope" lookup.
const BLOCK_END_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "button", "center", "details", "dialog",
    "dir", "div", "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup",
    "listing", "main", "menu", "nav", "ol", "pre", "search", "section", "summary", "ul", "form",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

const TABLE_SCOPE: &[&str] = &["html", "table", "template"];

const DEFAULT_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
];

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// A single-mode tree builder: every token is handled as if "in body", with the
/// implied end tags, scope checks, and special-element rules that shape real
/// pages. Document structure (`html`, `head`, `body`) is kept exactly as written
/// rather than synthesized.
pub struct HTMLParser {
    tokens: Vec<Token>,
    token_index: usize,
    tree: DomTree,
    stack_of_open_elements: Vec<NodeId>,
    issues: Vec<ParseIssue>,
}

impl HTMLParser {
    /// Create a parser over a finished token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            token_index: 0,
            tree: DomTree::new(),
            stack_of_open_elements: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Run the parser and return the DOM tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Run the parser and return both the `DomTree` and any parse issues.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            self.token_index = index;
            if token.is_eof() {
                break;
            }
            self.process_token(token);
        }
        (self.tree, self.issues)
    }

    fn process_token(&mut self, token: Token) {
        match token {
            // "A DOCTYPE token - Parse error. Ignore the token." (anywhere but the start)
            Token::Doctype { .. } => {
                if !self.tree.children(NodeId::ROOT).is_empty() {
                    self.parse_error("unexpected DOCTYPE");
                }
            }
            Token::Comment { data } => {
                let parent = self.current_node();
                let _ = self.insert_node(parent, NodeType::Comment(data));
            }
            Token::Character { data } => self.insert_text(&data),
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => self.handle_start_tag(&name, self_closing, attributes),
            Token::EndTag { name } => self.handle_end_tag(&name),
            Token::EndOfFile => {}
        }
    }

    /// Record a parse error, logging it once per distinct message.
    fn parse_error(&mut self, message: &str) {
        let _ = warn_once("HTML Parser", message);
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index: self.token_index,
        });
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// "The current node is the bottommost node in this stack of open elements."
    /// With nothing open, content goes straight under the document.
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    fn current_tag_name(&self) -> Option<&str> {
        self.get_tag_name(self.current_node())
    }

    fn get_tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.as_element(id).map(|data| data.tag_name.as_str())
    }

    fn insert_node(&mut self, parent: NodeId, node_type: NodeType) -> NodeId {
        let id = self.tree.alloc(node_type);
        self.tree.append_child(parent, id);
        id
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion location,
    /// then append data to that Text node's data."
    fn insert_text(&mut self, data: &str) {
        let parent = self.current_node();
        // Whitespace between top-level nodes carries nothing.
        if parent == NodeId::ROOT && data.chars().all(char::is_whitespace) {
            return;
        }
        if let Some(last) = self.tree.last_child(parent)
            && let Some(NodeType::Text(existing)) =
                self.tree.get_mut(last).map(|node| &mut node.node_type)
        {
            existing.push_str(data);
            return;
        }
        let _ = self.insert_node(parent, NodeType::Text(data.to_string()));
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    fn insert_html_element(&mut self, name: &str, attributes: Vec<Attribute>, push: bool) {
        let mut data = ElementData::new(name);
        data.attrs = attributes;
        let parent = self.current_node();
        let id = self.insert_node(parent, NodeType::Element(data));
        if push {
            self.stack_of_open_elements.push(id);
        }
    }

    fn in_foreign_content(&self) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&id| matches!(self.get_tag_name(id), Some("svg" | "math")))
    }

    // =========================================================================
    // Start tags
    // =========================================================================

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    fn handle_start_tag(&mut self, name: &str, self_closing: bool, attributes: Vec<Attribute>) {
        match name {
            // "A start tag whose tag name is "html" - Parse error. ... for each
            // attribute on the token, check to see if the attribute is already
            // present on the top element of the stack of open elements. If it is
            // not, add the attribute and its corresponding value to that element."
            "html" | "body" | "head" if self.open_element_index(name).is_some() => {
                self.parse_error(&format!("duplicate <{name}> start tag"));
                if let Some(index) = self.open_element_index(name) {
                    let id = self.stack_of_open_elements[index];
                    self.merge_attributes(id, attributes);
                }
                return;
            }
            _ => {}
        }

        // A body start tag ends an unclosed head.
        if name == "body" && self.open_element_index("head").is_some() {
            self.pop_until(&["head"]);
        }

        if CLOSES_P.contains(&name) && self.has_element_in_button_scope("p") {
            self.close_p_element();
        }

        match name {
            // "If the current node is an HTML element whose tag name is one of h1,
            // h2, h3, h4, h5, or h6, then this is a parse error; pop the current
            // node off the stack of open elements."
            _ if HEADINGS.contains(&name) => {
                if self.current_tag_name().is_some_and(|tag| HEADINGS.contains(&tag)) {
                    self.parse_error("nested heading");
                    let _ = self.stack_of_open_elements.pop();
                }
            }
            "li" => self.close_list_item(&["li"]),
            "dd" | "dt" => self.close_list_item(&["dd", "dt"]),
            // "If the current node is an option element, then pop the current node
            // off the stack of open elements."
            "option" | "optgroup" => {
                if self.current_tag_name() == Some("option") {
                    let _ = self.stack_of_open_elements.pop();
                }
            }
            // "If the stack of open elements has a button element in scope, then
            // this is a parse error; ... pop elements from the stack of open
            // elements until a button element has been popped from the stack."
            "button" => {
                if self.has_element_in_scope("button") {
                    self.parse_error("nested <button>");
                    self.generate_implied_end_tags();
                    self.pop_until(&["button"]);
                }
            }
            // Nested anchors are closed the way the adoption agency would for
            // the common case of an unclosed link.
            "a" => {
                if self.has_element_in_scope("a") {
                    self.parse_error("nested <a>");
                    self.pop_until(&["a"]);
                }
            }
            "tr" => self.close_in_table_scope(&["tr"]),
            "td" | "th" => self.close_in_table_scope(&["td", "th"]),
            "tbody" | "thead" | "tfoot" => {
                self.close_in_table_scope(&["tbody", "thead", "tfoot"]);
            }
            _ => {}
        }

        // "If the token has its self-closing flag set ... acknowledge" only for
        // void elements; foreign elements honor the flag.
        let foreign = matches!(name, "svg" | "math") || self.in_foreign_content();
        let push = !is_void_element(name) && !(self_closing && foreign);
        if self_closing && push {
            self.parse_error("non-void-html-element-start-tag-with-trailing-solidus");
        }
        self.insert_html_element(name, attributes, push);
    }

    fn merge_attributes(&mut self, id: NodeId, attributes: Vec<Attribute>) {
        let Some(NodeType::Element(data)) = self.tree.get_mut(id).map(|node| &mut node.node_type)
        else {
            return;
        };
        for attribute in attributes {
            if !data.has_attribute(&attribute.name) {
                data.attrs.push(attribute);
            }
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    /// "A start tag whose tag name is "li"" (and "dd", "dt"):
    ///
    /// "Loop: If node is an li element, then ... Generate implied end tags, except
    /// for li elements. ... Pop elements from the stack of open elements until an
    /// li element has been popped from the stack. ... If node is in the special
    /// category, but is not an address, div, or p element, then jump to the step
    /// labeled done below. Otherwise, set node to the previous entry in the stack
    /// of open elements and return to the step labeled loop."
    fn close_list_item(&mut self, targets: &[&str]) {
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let Some(tag) = self.get_tag_name(self.stack_of_open_elements[index]) else {
                continue;
            };
            if targets.contains(&tag) {
                let tag = tag.to_string();
                self.generate_implied_end_tags_excluding(Some(&tag));
                if self.current_tag_name() != Some(tag.as_str()) {
                    self.parse_error(&format!("unclosed elements inside <{tag}>"));
                }
                self.pop_until(targets);
                return;
            }
            if is_special_element(tag) && !matches!(tag, "address" | "div" | "p") {
                return;
            }
        }
    }

    fn close_in_table_scope(&mut self, targets: &[&str]) {
        if targets
            .iter()
            .any(|target| self.has_element_in_specific_scope(target, TABLE_SCOPE))
        {
            self.generate_implied_end_tags();
            self.pop_until(targets);
        }
    }

    // =========================================================================
    // End tags
    // =========================================================================

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    fn handle_end_tag(&mut self, name: &str) {
        match name {
            // The document element and body stay open so that trailing content
            // lands inside them.
            "html" | "body" => {}
            "head" => {
                if self.open_element_index("head").is_some() {
                    self.pop_until(&["head"]);
                }
            }
            // "An end tag whose tag name is "p" - If the stack of open elements does
            // not have a p element in button scope, then this is a parse error;
            // insert an HTML element for a "p" start tag token with no attributes."
            "p" => {
                if !self.has_element_in_button_scope("p") {
                    self.parse_error("</p> without open <p>");
                    self.insert_html_element("p", Vec::new(), true);
                }
                self.close_p_element();
            }
            // "An end tag whose tag name is "br" - Parse error. Drop the attributes
            // from the token, and act as described in the next entry; i.e. act as if
            // this was a "br" start tag token with no attributes."
            "br" => {
                self.parse_error("</br> end tag");
                self.insert_html_element("br", Vec::new(), false);
            }
            "li" => {
                if self.has_element_in_list_item_scope("li") {
                    self.close_element("li", &["li"]);
                } else {
                    self.parse_error("</li> without open <li>");
                }
            }
            "dd" | "dt" => {
                if self.has_element_in_scope(name) {
                    self.close_element(name, &[name]);
                } else {
                    self.parse_error(&format!("</{name}> without open <{name}>"));
                }
            }
            // "If the stack of open elements does not have an element in scope that
            // is an HTML element and whose tag name is one of "h1", "h2", "h3", "h4",
            // "h5", or "h6", then this is a parse error; ignore the token."
            _ if HEADINGS.contains(&name) => {
                if HEADINGS.iter().any(|h| self.has_element_in_scope(h)) {
                    self.close_element(name, HEADINGS);
                } else {
                    self.parse_error(&format!("</{name}> without open heading"));
                }
            }
            // [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
            // and its siblings: table parts close by table scope.
            "table" | "caption" | "tbody" | "thead" | "tfoot" | "tr" | "td" | "th" => {
                if self.has_element_in_specific_scope(name, TABLE_SCOPE) {
                    self.generate_implied_end_tags();
                    self.pop_until(&[name]);
                } else {
                    self.parse_error(&format!("</{name}> without open <{name}>"));
                }
            }
            _ if BLOCK_END_TAGS.contains(&name) => {
                if self.has_element_in_scope(name) {
                    self.close_element(name, &[name]);
                } else {
                    self.parse_error(&format!("</{name}> without open <{name}>"));
                }
            }
            _ => self.any_other_end_tag(name),
        }
    }

    /// "Generate implied end tags, except for HTML elements with the same tag
    /// name as the token. If the current node is not an HTML element with the same
    /// tag name as that of the token, then this is a parse error. Pop elements from
    /// the stack of open elements until an HTML element with the same tag name as
    /// the token has been popped from the stack."
    fn close_element(&mut self, name: &str, targets: &[&str]) {
        self.generate_implied_end_tags_excluding(Some(name));
        if self.current_tag_name() != Some(name) {
            self.parse_error(&format!("unclosed elements before </{name}>"));
        }
        self.pop_until(targets);
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "Generate implied end tags, except for p elements. ... Pop elements from
    /// the stack of open elements until a p element has been popped from the stack."
    fn close_p_element(&mut self) {
        self.close_element("p", &["p"]);
    }

    /// Pop until an element whose tag is in `targets` has been popped.
    fn pop_until(&mut self, targets: &[&str]) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self.get_tag_name(id).is_some_and(|tag| targets.contains(&tag)) {
                return;
            }
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    /// "Any other end tag"
    ///
    /// "Loop: If node is an HTML element with the same tag name as the token, then
    /// generate implied end tags, except for HTML elements with the same tag name as
    /// the token ... Pop all the nodes from the current node up to node, including
    /// node, then stop these steps. Otherwise, if node is in the special category,
    /// then this is a parse error; ignore the token, and return."
    fn any_other_end_tag(&mut self, tag_name: &str) {
        let mut i = self.stack_of_open_elements.len();
        while i > 0 {
            i -= 1;
            let Some(node_tag) = self.get_tag_name(self.stack_of_open_elements[i]) else {
                continue;
            };
            if node_tag == tag_name {
                self.generate_implied_end_tags_excluding(Some(tag_name));
                self.stack_of_open_elements.truncate(i);
                return;
            }
            if is_special_element(node_tag) {
                self.parse_error(&format!("</{tag_name}> blocked by <{node_tag}>"));
                return;
            }
        }
        self.parse_error(&format!("</{tag_name}> without open <{tag_name}>"));
    }

    /// [§ 13.2.6.2 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    fn generate_implied_end_tags(&mut self) {
        self.generate_implied_end_tags_excluding(None);
    }

    /// "while the current node is a dd element, a dt element, an li element, an
    /// optgroup element, an option element, a p element, an rb element, an rp
    /// element, an rt element, or an rtc element, the user agent must pop the
    /// current node off the stack of open elements."
    fn generate_implied_end_tags_excluding(&mut self, exclude: Option<&str>) {
        const IMPLIED_END_TAG_ELEMENTS: &[&str] = &[
            "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
        ];
        while let Some(tag) = self.current_tag_name() {
            if !IMPLIED_END_TAG_ELEMENTS.contains(&tag) || exclude == Some(tag) {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    // =========================================================================
    // Scope
    // =========================================================================

    fn open_element_index(&self, tag_name: &str) -> Option<usize> {
        self.stack_of_open_elements
            .iter()
            .position(|&id| self.get_tag_name(id) == Some(tag_name))
    }

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
    fn has_element_in_specific_scope(&self, tag_name: &str, scope_markers: &[&str]) -> bool {
        for &node_id in self.stack_of_open_elements.iter().rev() {
            if let Some(node_tag) = self.get_tag_name(node_id) {
                if node_tag == tag_name {
                    return true;
                }
                if scope_markers.contains(&node_tag) {
                    return false;
                }
            }
        }
        false
    }

    fn has_element_in_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, DEFAULT_SCOPE)
    }

    /// "has an element in button scope": default scope markers plus button.
    fn has_element_in_button_scope(&self, tag_name: &str) -> bool {
        const BUTTON_SCOPE: &[&str] = &[
            "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
            "button",
        ];
        self.has_element_in_specific_scope(tag_name, BUTTON_SCOPE)
    }

    /// "has an element in list item scope": default scope markers plus ol, ul.
    fn has_element_in_list_item_scope(&self, tag_name: &str) -> bool {
        const LIST_ITEM_SCOPE: &[&str] = &[
            "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
            "ol", "ul",
        ];
        self.has_element_in_specific_scope(tag_name, LIST_ITEM_SCOPE)
    }
}

/// [§ 13.1.1 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
fn is_special_element(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "address"
            | "applet"
            | "area"
            | "article"
            | "aside"
            | "base"
            | "basefont"
            | "bgsound"
            | "blockquote"
            | "body"
            | "br"
            | "button"
            | "caption"
            | "center"
            | "col"
            | "colgroup"
            | "dd"
            | "details"
            | "dir"
            | "div"
            | "dl"
            | "dt"
            | "embed"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "frame"
            | "frameset"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "head"
            | "header"
            | "hgroup"
            | "hr"
            | "html"
            | "iframe"
            | "img"
            | "input"
            | "li"
            | "link"
            | "listing"
            | "main"
            | "marquee"
            | "menu"
            | "meta"
            | "nav"
            | "noembed"
            | "noframes"
            | "noscript"
            | "object"
            | "ol"
            | "p"
            | "plaintext"
            | "pre"
            | "script"
            | "search"
            | "section"
            | "select"
            | "style"
            | "summary"
            | "table"
            | "tbody"
            | "td"
            | "template"
            | "textarea"
            | "tfoot"
            | "th"
            | "thead"
            | "title"
            | "tr"
            | "track"
            | "ul"
            | "wbr"
            | "xmp"
    )
}
