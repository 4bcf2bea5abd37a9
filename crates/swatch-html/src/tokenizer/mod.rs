//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard, minus the script data states.

/// Character reference decoding per § 13.2.5.72.
pub mod char_ref;
/// Helper methods for tokenizer state transitions and token emission.
pub mod helpers;
/// HTML tokenizer state machine implementation.
pub mod machine;
/// Token types produced by the tokenizer.
pub mod token;

pub use machine::{HTMLTokenizer, TokenizerState};
pub use token::{Attribute, Token};
