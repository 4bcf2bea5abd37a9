//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input handling ("Consume the next input character", lookahead)
//! - Token emission ("Emit the current token")
//! - Attribute and character reference helpers

use super::char_ref::consume_character_reference;
use super::machine::{HTMLTokenizer, RAWTEXT_ELEMENTS, RCDATA_ELEMENTS, TokenizerState};
use super::token::{Attribute, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// The state the machine is currently in.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }
}

// =============================================================================
// Input Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns None once the input is exhausted.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Consume `count` characters that lookahead has already matched.
    pub(super) fn skip(&mut self, count: usize) {
        for _ in 0..count {
            if self.consume().is_none() {
                break;
            }
        }
    }

    /// The unconsumed remainder of the input.
    pub(super) fn remaining(&self) -> &str {
        &self.input[self.current_pos..]
    }

    /// "If the next few characters are..."
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.remaining().starts_with(target)
    }

    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.remaining()
            .get(..target.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(target))
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches the
    /// tag name of the last start tag to have been emitted from this tokenizer"
    ///
    /// Called with the `<` already consumed. True when the input continues with
    /// `/`, that name (ASCII case-insensitive), and then whitespace, `/`, `>`, or EOF.
    pub(super) fn appropriate_end_tag_follows(&self) -> bool {
        let Some(last) = self.last_start_tag_name.as_deref() else {
            return false;
        };
        let Some(rest) = self.remaining().strip_prefix('/') else {
            return false;
        };
        let Some(candidate) = rest.get(..last.len()) else {
            return false;
        };
        if !candidate.eq_ignore_ascii_case(last) {
            return false;
        }
        rest[last.len()..]
            .chars()
            .next()
            .is_none_or(|c| matches!(c, '\t' | '\n' | '\u{000C}' | '\r' | ' ' | '/' | '>'))
    }

    /// Record a parse error by its WHATWG name.
    pub(super) fn parse_error(&mut self, name: &str) {
        self.errors.push(name.to_string());
    }
}

// =============================================================================
// Token Building Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Append the current input character to the current tag token's tag name."
    pub(super) fn append_to_current_tag_name(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_tag_name(c);
        }
    }

    /// "Append the current input character to the comment token's data."
    pub(super) fn append_to_comment(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_comment(c);
        }
    }

    /// "Start a new attribute in the current tag token."
    ///
    /// The previous attribute, if any, is committed first.
    pub(super) fn start_new_attribute(&mut self, name: &str) {
        self.finish_attribute();
        self.current_attribute = Some(Attribute::new(name, ""));
    }

    /// Commit the attribute under construction to the current tag token,
    /// dropping it if its name is a duplicate.
    pub(super) fn finish_attribute(&mut self) {
        let Some(attribute) = self.current_attribute.take() else {
            return;
        };
        // End tag attributes are dropped silently.
        let accepted = match self.current_token.as_mut() {
            Some(token) if matches!(token, Token::StartTag { .. }) => token.add_attribute(attribute),
            _ => true,
        };
        if !accepted {
            self.parse_error("duplicate-attribute");
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(attribute) = self.current_attribute.as_mut() {
            attribute.value.push(if c == '\0' { '\u{FFFD}' } else { c });
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// with the data state as return state.
    pub(super) fn append_character_reference_to_text(&mut self) {
        let (decoded, consumed) = consume_character_reference(self.remaining(), false);
        self.current_pos += consumed;
        self.pending_text.push_str(&decoded);
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// with an attribute value state as return state.
    pub(super) fn append_character_reference_to_attribute(&mut self) {
        let (decoded, consumed) = consume_character_reference(self.remaining(), true);
        self.current_pos += consumed;
        if let Some(attribute) = self.current_attribute.as_mut() {
            attribute.value.push_str(&decoded);
        }
    }
}

// =============================================================================
// Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Emit the pending character run, if any.
    pub(super) fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            let data = std::mem::take(&mut self.pending_text);
            self.token_stream.push(Token::Character { data });
        }
    }

    /// "Emit the current token"
    ///
    /// After a start tag for a raw-text element the tokenizer switches itself to
    /// RAWTEXT or RCDATA, which the tree construction stage would otherwise do.
    pub(super) fn emit_current_token(&mut self) {
        self.finish_attribute();
        let Some(token) = self.current_token.take() else {
            return;
        };
        self.flush_text();

        if let Token::StartTag {
            name, self_closing, ..
        } = &token
        {
            if !*self_closing {
                if RAWTEXT_ELEMENTS.contains(&name.as_str()) {
                    self.switch_to(TokenizerState::RAWTEXT);
                } else if RCDATA_ELEMENTS.contains(&name.as_str()) {
                    self.switch_to(TokenizerState::RCDATA);
                }
            }
            self.last_start_tag_name = Some(name.clone());
        }
        self.token_stream.push(token);
    }

    /// Emit a DOCTYPE token named after the first word of the collected text.
    pub(super) fn emit_doctype_token(&mut self) {
        let name = self
            .temporary_buffer
            .split_whitespace()
            .next()
            .map(str::to_ascii_lowercase);
        self.temporary_buffer.clear();
        self.current_token = Some(Token::Doctype { name });
        self.emit_current_token();
    }

    /// "Emit an end-of-file token." Any unfinished tag is dropped.
    pub(super) fn emit_eof_token(&mut self) {
        self.current_token = None;
        self.current_attribute = None;
        self.flush_text();
        self.token_stream.push(Token::EndOfFile);
        self.at_eof = true;
    }
}
