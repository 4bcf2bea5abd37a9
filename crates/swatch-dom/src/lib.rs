//! Document tree for Swatch.
//!
//! The parser writes nodes into a flat arena and links them by [`NodeId`]; the
//! selector matcher and the component sampler only read it. Node kinds follow
//! the [DOM Living Standard](https://dom.spec.whatwg.org/) closely enough for
//! tree order, text content, and `outerHTML` to mean what they mean in a
//! browser.
//!
//! # Not Implemented
//!
//! - Removing or moving nodes once appended
//! - Namespaces, shadow trees, and document fragments

/// HTML fragment serialization.
pub mod serialize;

pub use serialize::outer_html;

/// Index of a node in its [`DomTree`].
///
/// Only meaningful for the tree that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node. Every tree starts with it.
    pub const ROOT: Self = Self(0);
}

/// A `name="value"` pair on an element, as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Value with character references decoded.
    pub value: String,
}

impl Attribute {
    /// Pair `name` with `value`.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One arena slot: what the node is plus its links.
#[derive(Debug, Clone)]
pub struct Node {
    /// Kind and payload.
    pub node_type: NodeType,
    /// Owning node; `None` for the document and for nodes not yet appended.
    pub parent: Option<NodeId>,
    /// Children in tree order.
    pub children: Vec<NodeId>,
}

impl Node {
    const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node) node types
/// that markup can produce.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// The tree root.
    Document,
    /// An element with its tag and attributes.
    Element(ElementData),
    /// Character data, already decoded.
    Text(String),
    /// `<!-- ... -->` contents.
    Comment(String),
}

/// Tag name and attributes of an element.
///
/// Attributes keep source order so serialization reproduces the markup as written.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Local name, lowercased by the tokenizer.
    pub tag_name: String,
    /// Attributes in source order, duplicates already removed.
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    /// An element named `tag_name` with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: Vec::new(),
        }
    }

    /// Value of the attribute called `name`, compared ASCII case-insensitively.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find_map(|attr| {
            attr.name
                .eq_ignore_ascii_case(name)
                .then_some(attr.value.as_str())
        })
    }

    /// Whether an attribute called `name` is present, even with an empty value.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs
            .iter()
            .any(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Entries of the `class` attribute split on ASCII whitespace.
    ///
    /// Empty entries are dropped; repeated ones are kept in place.
    #[must_use]
    pub fn class_list(&self) -> Vec<&str> {
        self.classes().collect()
    }

    /// Whether `class_name` appears in [`Self::class_list`].
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes().any(|class| class == class_name)
    }

    fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attribute("class")
            .into_iter()
            .flat_map(str::split_whitespace)
    }
}

/// An arena of nodes rooted at a document node.
///
/// Nodes are never freed; ids stay valid for the life of the tree.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// A tree holding only the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
        }
    }

    /// Always [`NodeId::ROOT`].
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The node at `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// The node at `id`, mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Node count, the document included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true for a tree built with [`DomTree::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Store a new node without attaching it anywhere.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        self.nodes.push(Node::detached(node_type));
        NodeId(self.nodes.len() - 1)
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Make `child` the last child of `parent`. Out-of-range ids are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if child.0 >= self.nodes.len() {
            return;
        }
        let Some(parent_node) = self.nodes.get_mut(parent.0) else {
            return;
        };
        parent_node.children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Owning node of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of `id` in tree order; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| &node.children)
    }

    /// Most recently appended child of `id`.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Parent, grandparent, and so on up to and including the document.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Everything below `id` in
    /// [tree order](https://dom.spec.whatwg.org/#concept-tree-order), which is
    /// "preorder, depth-first traversal". `id` itself is not yielded.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            pending: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Every element of the document, in tree order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(NodeId::ROOT)
            .filter(|&id| self.as_element(id).is_some())
    }

    /// Element payload of `id`, if it is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.get(id)?.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Character data of `id`, if it is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.node_type {
            NodeType::Text(text) => Some(text),
            _ => None,
        }
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "The descendant text content of a node node is the concatenation of the
    /// data of all the Text node descendants of node, in tree order."
    ///
    /// A text node yields its own data. Comments contribute nothing.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        match self.as_text(id) {
            Some(text) => text.to_string(),
            None => self
                .descendants(id)
                .filter_map(|node| self.as_text(node))
                .collect(),
        }
    }
}

/// See [`DomTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.take()?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// See [`DomTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a DomTree,
    // Top of the stack is the next node in tree order.
    pending: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.pending.pop()?;
        let children = self.tree.children(current);
        self.pending.extend(children.iter().rev());
        Some(current)
    }
}
