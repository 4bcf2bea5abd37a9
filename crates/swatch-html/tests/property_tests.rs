//! Property tests: parsing arbitrary input never panics and keeps the tree sound.

use quickcheck_macros::quickcheck;
use swatch_dom::NodeId;
use swatch_html::{HTMLTokenizer, parse_document};

#[quickcheck]
fn tokenizer_always_ends_with_eof(input: String) -> bool {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run();
    let tokens = tokenizer.into_tokens();
    tokens.last().is_some_and(swatch_html::Token::is_eof)
        && tokens.iter().filter(|token| token.is_eof()).count() == 1
}

#[quickcheck]
fn every_node_but_root_has_a_parent(input: String) -> bool {
    let tree = parse_document(&input);
    tree.descendants(NodeId::ROOT)
        .all(|id| tree.parent(id).is_some_and(|parent| tree.children(parent).contains(&id)))
}

#[quickcheck]
fn markup_soup_never_panics(parts: Vec<u8>) -> bool {
    const PIECES: &[&str] = &[
        "<div>", "</div>", "<p>", "</p>", "<li>", "</ul>", "<ul>", "<table>", "<td>", "</tr>",
        "<!--", "-->", "<style>", "</style>", "&amp;", "&#x", ";", "<", ">", "\"", "text",
        "<br/>", "</br>", "<svg>", "<path/>", "<button>", "<h1>", "</h3>",
    ];
    let input: String = parts
        .iter()
        .map(|&i| PIECES[usize::from(i) % PIECES.len()])
        .collect();
    let tree = parse_document(&input);
    !tree.is_empty()
}
