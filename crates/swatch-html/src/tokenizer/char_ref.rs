//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! Numeric references are decoded in full. Named references cover the HTML 4
//! entity set plus the ASCII punctuation names, which is what page text uses in
//! practice. The legacy names (`amp`, `lt`, `copy`, the Latin-1 letters, ...)
//! also match without their trailing `;`.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Names of U+00A0 through U+00FF, in code point order. All of them are legacy
/// names.
const LATIN1_NAMES: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect",
    "uml", "copy", "ordf", "laquo", "not", "shy", "reg", "macr",
    "deg", "plusmn", "sup2", "sup3", "acute", "micro", "para", "middot",
    "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil",
    "Egrave", "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml",
    "ETH", "Ntilde", "Ograve", "Oacute", "Ocirc", "Otilde", "Ouml", "times",
    "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute", "THORN", "szlig",
    "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml",
    "eth", "ntilde", "ograve", "oacute", "ocirc", "otilde", "ouml", "divide",
    "oslash", "ugrave", "uacute", "ucirc", "uuml", "yacute", "thorn", "yuml",
];

/// Legacy names outside the Latin-1 block.
const LEGACY_ASCII: &[(&str, char)] = &[
    ("amp", '&'),
    ("AMP", '&'),
    ("lt", '<'),
    ("LT", '<'),
    ("gt", '>'),
    ("GT", '>'),
    ("quot", '"'),
    ("QUOT", '"'),
    ("COPY", '\u{00A9}'),
    ("REG", '\u{00AE}'),
];

/// Names that only match when followed by `;`.
const NAMED: &[(&str, char)] = &[
    ("Alpha", '\u{0391}'),
    ("Beta", '\u{0392}'),
    ("Gamma", '\u{0393}'),
    ("Delta", '\u{0394}'),
    ("Epsilon", '\u{0395}'),
    ("Zeta", '\u{0396}'),
    ("Eta", '\u{0397}'),
    ("Theta", '\u{0398}'),
    ("Iota", '\u{0399}'),
    ("Kappa", '\u{039A}'),
    ("Lambda", '\u{039B}'),
    ("Mu", '\u{039C}'),
    ("Nu", '\u{039D}'),
    ("Xi", '\u{039E}'),
    ("Omicron", '\u{039F}'),
    ("Pi", '\u{03A0}'),
    ("Rho", '\u{03A1}'),
    ("Sigma", '\u{03A3}'),
    ("Tau", '\u{03A4}'),
    ("Upsilon", '\u{03A5}'),
    ("Phi", '\u{03A6}'),
    ("Chi", '\u{03A7}'),
    ("Psi", '\u{03A8}'),
    ("Omega", '\u{03A9}'),
    ("alpha", '\u{03B1}'),
    ("beta", '\u{03B2}'),
    ("gamma", '\u{03B3}'),
    ("delta", '\u{03B4}'),
    ("epsilon", '\u{03B5}'),
    ("zeta", '\u{03B6}'),
    ("eta", '\u{03B7}'),
    ("theta", '\u{03B8}'),
    ("iota", '\u{03B9}'),
    ("kappa", '\u{03BA}'),
    ("lambda", '\u{03BB}'),
    ("mu", '\u{03BC}'),
    ("nu", '\u{03BD}'),
    ("xi", '\u{03BE}'),
    ("omicron", '\u{03BF}'),
    ("pi", '\u{03C0}'),
    ("rho", '\u{03C1}'),
    ("sigmaf", '\u{03C2}'),
    ("sigma", '\u{03C3}'),
    ("tau", '\u{03C4}'),
    ("upsilon", '\u{03C5}'),
    ("phi", '\u{03C6}'),
    ("chi", '\u{03C7}'),
    ("psi", '\u{03C8}'),
    ("omega", '\u{03C9}'),
    ("thetasym", '\u{03D1}'),
    ("upsih", '\u{03D2}'),
    ("piv", '\u{03D6}'),
    ("OElig", '\u{0152}'),
    ("oelig", '\u{0153}'),
    ("Scaron", '\u{0160}'),
    ("scaron", '\u{0161}'),
    ("Yuml", '\u{0178}'),
    ("fnof", '\u{0192}'),
    ("circ", '\u{02C6}'),
    ("tilde", '\u{02DC}'),
    ("ensp", '\u{2002}'),
    ("emsp", '\u{2003}'),
    ("thinsp", '\u{2009}'),
    ("zwnj", '\u{200C}'),
    ("zwj", '\u{200D}'),
    ("lrm", '\u{200E}'),
    ("rlm", '\u{200F}'),
    ("hyphen", '\u{2010}'),
    ("dash", '\u{2010}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("sbquo", '\u{201A}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
    ("bdquo", '\u{201E}'),
    ("dagger", '\u{2020}'),
    ("Dagger", '\u{2021}'),
    ("bull", '\u{2022}'),
    ("hellip", '\u{2026}'),
    ("permil", '\u{2030}'),
    ("prime", '\u{2032}'),
    ("Prime", '\u{2033}'),
    ("lsaquo", '\u{2039}'),
    ("rsaquo", '\u{203A}'),
    ("oline", '\u{203E}'),
    ("frasl", '\u{2044}'),
    ("euro", '\u{20AC}'),
    ("image", '\u{2111}'),
    ("weierp", '\u{2118}'),
    ("real", '\u{211C}'),
    ("trade", '\u{2122}'),
    ("alefsym", '\u{2135}'),
    ("larr", '\u{2190}'),
    ("uarr", '\u{2191}'),
    ("rarr", '\u{2192}'),
    ("darr", '\u{2193}'),
    ("harr", '\u{2194}'),
    ("crarr", '\u{21B5}'),
    ("lArr", '\u{21D0}'),
    ("uArr", '\u{21D1}'),
    ("rArr", '\u{21D2}'),
    ("dArr", '\u{21D3}'),
    ("hArr", '\u{21D4}'),
    ("forall", '\u{2200}'),
    ("part", '\u{2202}'),
    ("exist", '\u{2203}'),
    ("empty", '\u{2205}'),
    ("nabla", '\u{2207}'),
    ("isin", '\u{2208}'),
    ("notin", '\u{2209}'),
    ("ni", '\u{220B}'),
    ("prod", '\u{220F}'),
    ("sum", '\u{2211}'),
    ("minus", '\u{2212}'),
    ("lowast", '\u{2217}'),
    ("radic", '\u{221A}'),
    ("prop", '\u{221D}'),
    ("infin", '\u{221E}'),
    ("ang", '\u{2220}'),
    ("and", '\u{2227}'),
    ("or", '\u{2228}'),
    ("cap", '\u{2229}'),
    ("cup", '\u{222A}'),
    ("int", '\u{222B}'),
    ("there4", '\u{2234}'),
    ("sim", '\u{223C}'),
    ("cong", '\u{2245}'),
    ("asymp", '\u{2248}'),
    ("ne", '\u{2260}'),
    ("equiv", '\u{2261}'),
    ("le", '\u{2264}'),
    ("ge", '\u{2265}'),
    ("sub", '\u{2282}'),
    ("sup", '\u{2283}'),
    ("nsub", '\u{2284}'),
    ("sube", '\u{2286}'),
    ("supe", '\u{2287}'),
    ("oplus", '\u{2295}'),
    ("otimes", '\u{2297}'),
    ("perp", '\u{22A5}'),
    ("sdot", '\u{22C5}'),
    ("lceil", '\u{2308}'),
    ("rceil", '\u{2309}'),
    ("lfloor", '\u{230A}'),
    ("rfloor", '\u{230B}'),
    ("lang", '\u{27E8}'),
    ("rang", '\u{27E9}'),
    ("loz", '\u{25CA}'),
    ("spades", '\u{2660}'),
    ("clubs", '\u{2663}'),
    ("hearts", '\u{2665}'),
    ("diams", '\u{2666}'),
    ("star", '\u{2606}'),
    ("starf", '\u{2605}'),
    ("check", '\u{2713}'),
    ("cross", '\u{2717}'),
    ("Tab", '\u{0009}'),
    ("NewLine", '\u{000A}'),
    ("excl", '\u{0021}'),
    ("num", '\u{0023}'),
    ("dollar", '\u{0024}'),
    ("percnt", '\u{0025}'),
    ("apos", '\u{0027}'),
    ("lpar", '\u{0028}'),
    ("rpar", '\u{0029}'),
    ("ast", '\u{002A}'),
    ("plus", '\u{002B}'),
    ("comma", '\u{002C}'),
    ("period", '\u{002E}'),
    ("sol", '\u{002F}'),
    ("colon", '\u{003A}'),
    ("semi", '\u{003B}'),
    ("equals", '\u{003D}'),
    ("quest", '\u{003F}'),
    ("commat", '\u{0040}'),
    ("lsqb", '\u{005B}'),
    ("bsol", '\u{005C}'),
    ("rsqb", '\u{005D}'),
    ("Hat", '\u{005E}'),
    ("lowbar", '\u{005F}'),
    ("grave", '\u{0060}'),
    ("lcub", '\u{007B}'),
    ("verbar", '\u{007C}'),
    ("vert", '\u{007C}'),
    ("rcub", '\u{007D}'),
];

struct NamedReference {
    value: char,
    /// Matches even without a trailing `;`.
    legacy: bool,
}

static NAMED_REFERENCES: LazyLock<HashMap<&'static str, NamedReference>> = LazyLock::new(|| {
    let latin1 = (0xA0u32..)
        .zip(LATIN1_NAMES)
        .filter_map(|(code, name)| Some((name, char::from_u32(code)?)));
    let legacy = latin1
        .chain(LEGACY_ASCII.iter().copied())
        .map(|(name, value)| (name, NamedReference { value, legacy: true }));
    let strict = NAMED
        .iter()
        .map(|&(name, value)| (name, NamedReference { value, legacy: false }));
    legacy.chain(strict).collect()
});

/// Decode the character reference at the start of `rest`, which is the input
/// immediately after a `&`.
///
/// Returns the replacement text and the number of bytes of `rest` it used. When
/// no reference matches, the result is `("&", 0)`: "Flush code points consumed
/// as a character reference. Reconsume in the return state."
///
/// `in_attribute` selects the attribute-value rule for legacy names: `&copy=1`
/// inside an attribute stays literal so query strings survive.
#[must_use]
pub fn consume_character_reference(rest: &str, in_attribute: bool) -> (String, usize) {
    if let Some(numeric) = rest.strip_prefix('#') {
        if let Some((decoded, used)) = consume_numeric_reference(numeric) {
            return (decoded.to_string(), used + 1);
        }
        return ("&".to_string(), 0);
    }

    match consume_named_reference(rest, in_attribute) {
        Some((value, used)) => (value.to_string(), used),
        None => ("&".to_string(), 0),
    }
}

/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
///
/// "Consume the maximum number of characters possible, where the consumed
/// characters are one of the identifiers in the named character references
/// table."
fn consume_named_reference(rest: &str, in_attribute: bool) -> Option<(char, usize)> {
    let word_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let word = &rest[..word_len];

    if rest[word_len..].starts_with(';')
        && let Some(reference) = NAMED_REFERENCES.get(word)
    {
        return Some((reference.value, word_len + 1));
    }

    // Longest legacy name that prefixes the run. The run is ASCII, so every
    // length is a char boundary.
    let (len, reference) = (1..=word_len).rev().find_map(|len| {
        NAMED_REFERENCES
            .get(&word[..len])
            .filter(|reference| reference.legacy)
            .map(|reference| (len, reference))
    })?;

    // "If the character reference was consumed as part of an attribute, and the
    // last character matched is not a U+003B SEMICOLON character (;), and the
    // next input character is either a U+003D EQUALS SIGN character (=) or an
    // ASCII alphanumeric, then, for historical reasons, flush code points
    // consumed as a character reference and switch to the return state."
    let next = rest[len..].chars().next();
    if in_attribute && next.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((reference.value, len))
}

/// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
///
/// `rest` is the input after `&#`. The trailing `;` is optional.
fn consume_numeric_reference(rest: &str) -> Option<(char, usize)> {
    let (radix, digits_start) = match rest.as_bytes().first() {
        Some(b'x' | b'X') => (16, 1),
        _ => (10, 0),
    };
    let digits: &str = &rest[digits_start..];
    let digit_len = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    // "absence-of-digits-in-numeric-character-reference"
    if digit_len == 0 {
        return None;
    }

    // Saturate instead of overflowing; anything past U+10FFFF is replaced below.
    let code = digits[..digit_len]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0u32, |acc, d| acc.saturating_mul(radix).saturating_add(d));

    let mut used = digits_start + digit_len;
    if digits[digit_len..].starts_with(';') {
        used += 1;
    }
    Some((numeric_reference_char(code), used))
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is 0x00 ... greater than 0x10FFFF ... a surrogate ... set the
/// character reference code to 0xFFFD."
fn numeric_reference_char(code: u32) -> char {
    if code == 0 {
        return '\u{FFFD}';
    }
    char::from_u32(code).unwrap_or('\u{FFFD}')
}
