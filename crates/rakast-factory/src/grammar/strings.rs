//! Quoting constructs.
//!
//! The concrete string kind comes from a lookup table keyed by the quoting
//! prefix lexeme. Every string leaf records its [`QuoteDetails`]; a `:to`
//! adverb additionally registers the here-doc body region in the factory's
//! offset map before that region is ever visited as gap text.

use rakast_match::Match;
use rakast_tree::{Element, ElementId, ElementKind, QuoteDetails};
use regex::Regex;
use text_size::TextSize;

use crate::adapter::{self, Balanced};
use crate::error::Result;
use crate::factory::Factory;
use crate::shape::{Shape, expect_capture, unhandled};

pub(crate) fn quote(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["nibble"], &[]) {
        return plain(f, m);
    }
    if shape.is(&["quibble", "sym"], &[]) {
        return prefixed(f, m);
    }

    Err(unhandled("quote", m))
}

/// Bare-delimiter quote: `'...'`, `"..."`, `/.../`, `<...>`.
fn plain(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let nibble = expect_capture("quote", m, "nibble")?;
    let front = char_before(f.text, nibble.from());
    let back = char_at(f.text, nibble.to());

    let kind = match front {
        Some('\'') => ElementKind::STRING_LITERAL,
        Some('"') => ElementKind::STRING_INTERPOLATED,
        Some('<') => ElementKind::STRING_WORD_LIST,
        Some('/') => {
            let body = adapter::leaf(f, ElementKind::REGEX_BODY, "quote", nibble);
            return adapter::balanced(
                f,
                ElementKind::REGEX,
                "quote",
                m,
                vec![body],
                Balanced::FromMatch,
            );
        }
        _ => return Err(unhandled("quote", m)),
    };

    let details = QuoteDetails {
        prefix: "".into(),
        front: delimiter_text(front),
        back: delimiter_text(back),
        adverbs: Vec::new(),
        here_doc: false,
    };
    Ok(string_leaf(f, kind, m, details))
}

/// Prefixed quote: `q[...]`, `qq{...}`, `Q:to[END]`, ...
fn prefixed(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let sym = expect_capture("quote", m, "sym")?;
    let quibble = expect_capture("quote", m, "quibble")?;
    let nibble = quibble.capture("nibble").unwrap_or(quibble);

    let prefix = sym.text();
    let Some(kind) = prefix_kind(prefix) else {
        return Err(unhandled("quote", m));
    };

    let adverbs = collect_adverbs(f.text, sym.to(), nibble.from());
    let here_doc = adverbs.iter().any(|adverb| adverb.as_ref() == "to");
    if here_doc {
        register_here_doc(f, m.to(), nibble.text());
    }

    let details = QuoteDetails {
        prefix: prefix.into(),
        front: delimiter_text(char_before(f.text, nibble.from())),
        back: delimiter_text(char_at(f.text, nibble.to())),
        adverbs,
        here_doc,
    };
    Ok(string_leaf(f, kind, m, details))
}

fn string_leaf(
    f: &mut Factory<'_>,
    kind: ElementKind,
    m: &Match,
    details: QuoteDetails,
) -> ElementId {
    f.tree
        .alloc(Element::leaf(kind, m.range(), m.text()).with_factory("quote").with_quote(details))
}

fn prefix_kind(prefix: &str) -> Option<ElementKind> {
    let kind = match prefix {
        "q" | "Q" => ElementKind::STRING_LITERAL,
        "qq" => ElementKind::STRING_INTERPOLATED,
        "qx" | "qqx" | "Qx" => ElementKind::STRING_SHELL,
        "qw" | "qqw" | "Qw" | "qww" | "qqww" => ElementKind::STRING_WORD_LIST,
        _ => return None,
    };
    Some(kind)
}

/// Colon-adverbs between the prefix lexeme and the opening delimiter,
/// without their colons (`Q:to[END]` yields `["to"]`).
fn collect_adverbs(text: &str, from: TextSize, to: TextSize) -> Vec<Box<str>> {
    let span = &text[usize::from(from)..usize::from(to)];
    let Ok(pattern) = Regex::new(r":(\w+)") else {
        return Vec::new();
    };
    pattern.captures_iter(span).map(|capture| capture[1].into()).collect()
}

/// Records where a here-doc's body begins and where its terminator line
/// ends.
///
/// The body starts at the first non-whitespace, non-semicolon character
/// after the opening construct; its true end is the end of the first line
/// consisting of exactly the terminator word. The gap filler consults this
/// map before classifying any gap text, which is what keeps the body from
/// being re-tokenized as code.
fn register_here_doc(f: &mut Factory<'_>, opener_end: TextSize, terminator: &str) {
    let bytes = f.text.as_bytes();
    let mut at = usize::from(opener_end);
    while at < bytes.len() && (bytes[at] == b';' || bytes[at].is_ascii_whitespace()) {
        at += 1;
    }

    let pattern = format!("(?m)^{}[ \\t]*$", regex::escape(terminator));
    let Ok(pattern) = Regex::new(&pattern) else {
        return;
    };
    match pattern.find(&f.text[at..]) {
        Some(found) => {
            f.here_docs.insert(at as u32, (at + found.end()) as u32);
        }
        None => {
            let range = text_size::TextRange::new(opener_end, opener_end);
            f.diagnostic(format!("unterminated here-doc, expected `{terminator}`"), range);
        }
    }
}

fn char_before(text: &str, at: TextSize) -> Option<char> {
    text[..usize::from(at)].chars().next_back()
}

fn char_at(text: &str, at: TextSize) -> Option<char> {
    text[usize::from(at)..].chars().next()
}

fn delimiter_text(delimiter: Option<char>) -> Box<str> {
    delimiter.map_or_else(|| "".into(), |c| String::from(c).into_boxed_str())
}
