//! Constructors from match objects to elements.
//!
//! These are the only places where a match's offsets and text cross into the
//! tree; no element ever holds onto the match itself.

use rakast_match::Match;
use rakast_tree::{Element, ElementId, ElementKind};
use regex::Regex;
use text_size::{TextLen, TextRange, TextSize};

use crate::error::Result;
use crate::factory::Factory;
use crate::shape::unhandled;

/// Leaf with the match's exact range and substring.
pub(crate) fn leaf(
    f: &mut Factory<'_>,
    kind: ElementKind,
    production: &'static str,
    m: &Match,
) -> ElementId {
    f.tree.alloc(Element::leaf(kind, m.range(), m.text()).with_factory(production))
}

/// Leaf narrowed inward past the match's leading/trailing whitespace.
pub(crate) fn leaf_trimmed(
    f: &mut Factory<'_>,
    kind: ElementKind,
    production: &'static str,
    m: &Match,
) -> ElementId {
    let text = m.text();
    let trimmed = text.trim();
    let leading = text.len() - text.trim_start().len();
    let start = m.from() + TextSize::new(leading as u32);
    let range = TextRange::at(start, trimmed.text_len());
    f.tree.alloc(Element::leaf(kind, range, trimmed).with_factory(production))
}

/// Leaf synthesized from a literal string at an absolute offset, not backed
/// by any match.
pub(crate) fn leaf_at(
    f: &mut Factory<'_>,
    kind: ElementKind,
    production: &'static str,
    offset: TextSize,
    text: &str,
) -> ElementId {
    let range = TextRange::at(offset, text.text_len());
    f.tree.alloc(Element::leaf(kind, range, text).with_factory(production))
}

/// Leaf spanning the first occurrence of `token` inside the match's text,
/// at its absolute position.
pub(crate) fn leaf_sample(
    f: &mut Factory<'_>,
    kind: ElementKind,
    production: &'static str,
    m: &Match,
    token: &str,
) -> Option<ElementId> {
    let at = m.text().find(token)?;
    Some(leaf_at(f, kind, production, m.from() + TextSize::new(at as u32), token))
}

/// Branch spanning from the first child's start to the last child's end.
pub(crate) fn branch(
    f: &mut Factory<'_>,
    kind: ElementKind,
    production: &'static str,
    children: Vec<ElementId>,
) -> ElementId {
    let range = hull(f, &children);
    f.tree.alloc(Element::branch(kind, range, children).with_factory(production))
}

/// Branch with an explicit range (usually the production's own match range).
pub(crate) fn branch_at(
    f: &mut Factory<'_>,
    kind: ElementKind,
    production: &'static str,
    range: TextRange,
    children: Vec<ElementId>,
) -> ElementId {
    f.tree.alloc(Element::branch(kind, range, children).with_factory(production))
}

fn hull(f: &Factory<'_>, children: &[ElementId]) -> TextRange {
    match (children.first(), children.last()) {
        (Some(&first), Some(&last)) => TextRange::new(f.tree[first].from(), f.tree[last].to()),
        _ => TextRange::empty(0.into()),
    }
}

/// How to find the enter/exit delimiters of a balanced construct.
pub(crate) enum Balanced<'a> {
    /// The match's own first and last characters are the delimiters.
    FromMatch,
    /// Explicit delimiter strings at the match's edges.
    Explicit { front: &'a str, back: &'a str },
    /// The match excludes the delimiters; scan outward from its boundaries
    /// through whitespace to the nearest non-whitespace characters.
    Outer,
}

/// Three-part branch `[EnterDelimiter, children.., ExitDelimiter]`.
pub(crate) fn balanced(
    f: &mut Factory<'_>,
    kind: ElementKind,
    production: &'static str,
    m: &Match,
    children: Vec<ElementId>,
    delimiters: Balanced<'_>,
) -> Result<ElementId> {
    let (enter, exit) = match delimiters {
        Balanced::FromMatch => {
            let text = m.text();
            let mut chars = text.chars();
            let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
                return Err(unhandled(production, m));
            };
            let mut buf = [0_u8; 4];
            let enter =
                leaf_at(f, ElementKind::ENTER_DELIMITER, production, m.from(), first.encode_utf8(&mut buf));
            let exit_at = m.to() - TextSize::new(last.len_utf8() as u32);
            let exit =
                leaf_at(f, ElementKind::EXIT_DELIMITER, production, exit_at, last.encode_utf8(&mut buf));
            (enter, exit)
        }
        Balanced::Explicit { front, back } => {
            let enter = leaf_at(f, ElementKind::ENTER_DELIMITER, production, m.from(), front);
            let exit_at = m.to() - back.text_len();
            let exit = leaf_at(f, ElementKind::EXIT_DELIMITER, production, exit_at, back);
            (enter, exit)
        }
        Balanced::Outer => {
            let before = &f.text[..usize::from(m.from())];
            let after = &f.text[usize::from(m.to())..];
            let (Some((enter_at, front)), Some((exit_off, back))) = (
                before.char_indices().rev().find(|(_, c)| !c.is_whitespace()),
                after.char_indices().find(|(_, c)| !c.is_whitespace()),
            ) else {
                return Err(unhandled(production, m));
            };
            let mut buf = [0_u8; 4];
            let enter = leaf_at(
                f,
                ElementKind::ENTER_DELIMITER,
                production,
                TextSize::new(enter_at as u32),
                front.encode_utf8(&mut buf),
            );
            let exit = leaf_at(
                f,
                ElementKind::EXIT_DELIMITER,
                production,
                m.to() + TextSize::new(exit_off as u32),
                back.encode_utf8(&mut buf),
            );
            (enter, exit)
        }
    };

    let mut all = Vec::with_capacity(children.len() + 2);
    all.push(enter);
    all.extend(children);
    all.push(exit);
    Ok(branch(f, kind, production, all))
}

/// Finds `needle` inside `span` of the original text, as an absolute range.
///
/// Used where a capture's own offsets are unreliable (meta-operator
/// composition): the operator is relocated by scanning the gap between two
/// already-built operands.
pub(crate) fn locate(f: &Factory<'_>, needle: &str, span: TextRange) -> Option<TextRange> {
    let slice: std::ops::Range<usize> = span.into();
    let haystack = &f.text[slice];
    let pattern = Regex::new(&regex::escape(needle)).ok()?;
    let found = pattern.find(haystack)?;
    let start = span.start() + TextSize::new(found.start() as u32);
    Some(TextRange::at(start, needle.text_len()))
}
