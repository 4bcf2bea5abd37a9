//! CSS selector parsing and matching
//!
//! The subset of [Selectors Level 4](https://www.w3.org/TR/selectors-4/) that
//! component sampling needs: type, class, ID, universal, and attribute
//! selectors, compounds of those, and the descendant and child combinators.
//! Anything else fails to parse so callers can skip the selector.

use std::iter::Peekable;
use std::str::Chars;

use swatch_dom::{DomTree, ElementData, NodeId};

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    Type(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    Id(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    Attribute(AttributeSelector),
}

/// Attribute selectors per [§ 6.4](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]`: "Represents an element with the att attribute"
    Exists(String),

    /// `[attr=value]`: "Represents an element with the att attribute whose value
    /// is exactly 'val'."
    Equals(String, String),

    /// `[attr~=value]`: "Represents an element with the att attribute whose value
    /// is a whitespace-separated list of words, one of which is exactly 'val'."
    Includes(String, String),
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The list of simple selectors that make up this compound selector.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    Child,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// "A complex selector is a chain of one or more compound selectors separated
/// by combinators."
///
/// `nav > ul .item` is stored as subject `.item` with the chain
/// `[(Descendant, ul), (Child, nav)]`, right to left, so matching walks up
/// from the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// The rightmost compound selector (the subject of the selector).
    pub subject: CompoundSelector,
    /// (combinator, compound) pairs going left from the subject.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

impl ParsedSelector {
    /// Check if this is a simple selector (no combinators).
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        self.combinators.is_empty()
    }

    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// Match against an element with full tree context. Non-element nodes never
    /// match.
    #[must_use]
    pub fn matches_in_tree(&self, tree: &DomTree, node_id: NodeId) -> bool {
        compound_matches(&self.subject, tree, node_id) && self.matches_chain(tree, node_id, 0)
    }

    /// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
    ///
    /// Match `combinators[index..]` walking outward from `current_id`. Descendant
    /// steps backtrack, so `a > b c` still matches when the nearest `b` ancestor
    /// is not a child of an `a` but a farther one is.
    fn matches_chain(&self, tree: &DomTree, current_id: NodeId, index: usize) -> bool {
        let Some((combinator, compound)) = self.combinators.get(index) else {
            return true;
        };
        match combinator {
            Combinator::Descendant => tree.ancestors(current_id).any(|ancestor| {
                compound_matches(compound, tree, ancestor)
                    && self.matches_chain(tree, ancestor, index + 1)
            }),
            Combinator::Child => tree.parent(current_id).is_some_and(|parent| {
                compound_matches(compound, tree, parent)
                    && self.matches_chain(tree, parent, index + 1)
            }),
        }
    }

    /// Every element in `tree` this selector matches, in document order.
    #[must_use]
    pub fn select_all(&self, tree: &DomTree) -> Vec<NodeId> {
        tree.elements()
            .filter(|&id| self.matches_in_tree(tree, id))
            .collect()
    }
}

fn compound_matches(compound: &CompoundSelector, tree: &DomTree, node_id: NodeId) -> bool {
    let Some(element) = tree.as_element(node_id) else {
        return false;
    };
    compound
        .simple_selectors
        .iter()
        .all(|simple| simple.matches(element))
}

impl SimpleSelector {
    /// Check if this simple selector matches the given element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            // "represents an element in the document tree with the same qualified
            // name as the identifier."
            Self::Type(name) => element.tag_name.eq_ignore_ascii_case(name),
            Self::Class(class_name) => element.has_class(class_name),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Universal => true,
            Self::Attribute(AttributeSelector::Exists(name)) => element.has_attribute(name),
            Self::Attribute(AttributeSelector::Equals(name, value)) => {
                element.get_attribute(name) == Some(value.as_str())
            }
            Self::Attribute(AttributeSelector::Includes(name, value)) => element
                .get_attribute(name)
                .is_some_and(|v| v.split_ascii_whitespace().any(|word| word == value)),
        }
    }
}

/// [§ 4.3.10 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

/// Parse a raw selector string into a [`ParsedSelector`].
///
/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)
///
/// Supports:
/// - Type selectors: `nav`, `button`
/// - Class selectors: `.card`
/// - ID selectors: `#main`
/// - Universal selector: `*`
/// - Attribute selectors: `[role]`, `[type=submit]`, `[class~="btn"]`
/// - Compound selectors: `a.btn`, `div.card#hero`
/// - Combinators: `header nav`, `ul > li`
///
/// Returns `None` for anything else (pseudo-classes, sibling combinators,
/// selector lists) and for malformed input.
#[must_use]
pub fn parse_selector(raw: &str) -> Option<ParsedSelector> {
    let mut parser = SelectorParser {
        chars: raw.trim().chars().peekable(),
    };

    let mut compounds = vec![parser.parse_compound()?];
    let mut combinators_between = Vec::new();

    loop {
        let saw_whitespace = parser.skip_whitespace();
        let combinator = match parser.chars.peek() {
            None => break,
            Some('>') => {
                let _ = parser.chars.next();
                let _ = parser.skip_whitespace();
                Combinator::Child
            }
            Some(_) if saw_whitespace => Combinator::Descendant,
            Some(_) => return None,
        };
        combinators_between.push(combinator);
        compounds.push(parser.parse_compound()?);
    }

    let subject = compounds.pop()?;
    let combinators = compounds
        .into_iter()
        .zip(combinators_between)
        .rev()
        .map(|(compound, combinator)| (combinator, compound))
        .collect();
    Some(ParsedSelector {
        subject,
        combinators,
    })
}

struct SelectorParser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl SelectorParser<'_> {
    /// Skip whitespace, reporting whether there was any.
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.chars.next_if(char::is_ascii_whitespace).is_some() {
            skipped = true;
        }
        skipped
    }

    fn parse_ident(&mut self) -> Option<String> {
        let mut ident = String::new();
        if let Some(c) = self
            .chars
            .next_if(|&c| is_ident_start_char(c) || c == '-')
        {
            ident.push(c);
        }
        if ident.is_empty() {
            return None;
        }
        while let Some(c) = self.chars.next_if(|&c| is_ident_char(c)) {
            ident.push(c);
        }
        Some(ident)
    }

    /// A compound: an optional type or universal selector followed by any
    /// number of class, ID, and attribute selectors. Must not be empty.
    fn parse_compound(&mut self) -> Option<CompoundSelector> {
        let mut simple_selectors = Vec::new();

        if self.chars.next_if_eq(&'*').is_some() {
            simple_selectors.push(SimpleSelector::Universal);
        } else if self
            .chars
            .peek()
            .is_some_and(|&c| is_ident_start_char(c) || c == '-')
        {
            simple_selectors.push(SimpleSelector::Type(
                self.parse_ident()?.to_ascii_lowercase(),
            ));
        }

        loop {
            let simple = match self.chars.peek() {
                Some('.') => {
                    let _ = self.chars.next();
                    SimpleSelector::Class(self.parse_ident()?)
                }
                Some('#') => {
                    let _ = self.chars.next();
                    let mut id = String::new();
                    while let Some(c) = self.chars.next_if(|&c| is_ident_char(c)) {
                        id.push(c);
                    }
                    if id.is_empty() {
                        return None;
                    }
                    SimpleSelector::Id(id)
                }
                Some('[') => {
                    let _ = self.chars.next();
                    SimpleSelector::Attribute(self.parse_attribute()?)
                }
                Some(c) if c.is_ascii_whitespace() || *c == '>' => break,
                None => break,
                // Pseudo-classes, other combinators, selector lists.
                Some(_) => return None,
            };
            simple_selectors.push(simple);
        }

        if simple_selectors.is_empty() {
            None
        } else {
            Some(CompoundSelector { simple_selectors })
        }
    }

    /// The inside of `[...]`, with the opening bracket already consumed.
    fn parse_attribute(&mut self) -> Option<AttributeSelector> {
        let _ = self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        let _ = self.skip_whitespace();

        let selector = match self.chars.next()? {
            ']' => return Some(AttributeSelector::Exists(name)),
            '=' => AttributeSelector::Equals(name, self.parse_attribute_value()?),
            '~' if self.chars.next_if_eq(&'=').is_some() => {
                AttributeSelector::Includes(name, self.parse_attribute_value()?)
            }
            _ => return None,
        };

        let _ = self.skip_whitespace();
        if self.chars.next() == Some(']') {
            Some(selector)
        } else {
            None
        }
    }

    /// A quoted string or an unquoted identifier.
    fn parse_attribute_value(&mut self) -> Option<String> {
        let _ = self.skip_whitespace();
        match self.chars.peek().copied() {
            Some(quote @ ('"' | '\'')) => {
                let _ = self.chars.next();
                let mut value = String::new();
                for c in self.chars.by_ref() {
                    if c == quote {
                        return Some(value);
                    }
                    value.push(c);
                }
                // Unterminated string.
                None
            }
            Some(_) => self.parse_ident(),
            None => None,
        }
    }
}
