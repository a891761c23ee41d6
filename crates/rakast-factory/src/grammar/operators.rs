//! Operator leaves and the bracketed operator branches.

use rakast_match::Match;
use rakast_tree::{ElementId, ElementKind};
use text_size::TextRange;

use crate::adapter::{self, Balanced};
use crate::error::Result;
use crate::factory::Factory;
use crate::shape::{Shape, expect_capture, unhandled};

/// Infix operator leaf between two built operands.
///
/// The grammar's infix capture does not carry a reliable offset when the
/// operator was composed with a meta-operator, so when the capture's own
/// range falls outside the inter-operand gap the operator text is relocated
/// by scanning the gap in the original source.
pub(crate) fn infix(f: &mut Factory<'_>, m: &Match, gap: TextRange) -> ElementId {
    let kind = infix_kind(m.text().trim());
    let text = m.text().trim().to_owned();

    let reliable = gap.contains_range(m.range());
    if reliable && m.text() == text {
        return adapter::leaf(f, kind, "infixish", m);
    }
    if let Some(found) = adapter::locate(f, &text, gap) {
        return adapter::leaf_at(f, kind, "infixish", found.start(), &text);
    }
    adapter::leaf_trimmed(f, kind, "infixish", m)
}

/// Hyper-marked operators (`>>+<<`, `«+»`) get their own kind.
fn infix_kind(text: &str) -> ElementKind {
    let hyper = ["<<", ">>", "\u{ab}", "\u{bb}"];
    if hyper.iter().any(|marker| text.starts_with(marker) || text.ends_with(marker)) {
        ElementKind::HYPER_OPERATOR
    } else {
        ElementKind::INFIX_OPERATOR
    }
}

pub(crate) fn prefix(f: &mut Factory<'_>, m: &Match) -> ElementId {
    adapter::leaf_trimmed(f, ElementKind::PREFIX_OPERATOR, "prefixish", m)
}

pub(crate) fn postfix(f: &mut Factory<'_>, m: &Match) -> ElementId {
    adapter::leaf_trimmed(f, ElementKind::POSTFIX_OPERATOR, "postfixish", m)
}

/// Bracketing circumfix: `( ... )`, `[ ... ]`, and the anonymous-hash `{ }`.
pub(crate) fn circumfix(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    let inner = if shape.is(&["semilist"], &[]) {
        semilist(f, expect_capture("circumfix", m, "semilist")?)?
    } else if shape.is(&[], &["semilist"]) || shape.is(&[], &[]) {
        Vec::new()
    } else {
        return Err(unhandled("circumfix", m));
    };

    adapter::balanced(f, ElementKind::CIRCUMFIX, "circumfix", m, inner, Balanced::FromMatch)
}

/// Indexing/call postcircumfix: `[...]`, `{...}`, `(...)`, `<...>`.
pub(crate) fn postcircumfix(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["semilist"], &[]) {
        let inner = semilist(f, expect_capture("postcircumfix", m, "semilist")?)?;
        return adapter::balanced(
            f,
            ElementKind::POST_CIRCUMFIX,
            "postcircumfix",
            m,
            inner,
            Balanced::FromMatch,
        );
    }

    // Angle indexing (`%h<key>`) always uses the fixed `<`/`>` pair.
    if shape.is(&["nibble"], &[]) {
        let nibble = expect_capture("postcircumfix", m, "nibble")?;
        let word = adapter::leaf(f, ElementKind::STRING_WORD_LIST, "postcircumfix", nibble);
        return adapter::balanced(
            f,
            ElementKind::POST_CIRCUMFIX,
            "postcircumfix",
            m,
            vec![word],
            Balanced::Explicit { front: "<", back: ">" },
        );
    }

    if shape.is(&[], &["semilist"]) || shape.is(&[], &[]) {
        return adapter::balanced(
            f,
            ElementKind::POST_CIRCUMFIX,
            "postcircumfix",
            m,
            Vec::new(),
            Balanced::FromMatch,
        );
    }

    Err(unhandled("postcircumfix", m))
}

/// Semicolon-separated expression list inside brackets. Statement entries
/// are unwrapped: the bracketing construct owns the expressions directly.
pub(crate) fn semilist(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let mut out = Vec::new();
    for entry in m.list() {
        if entry.text().trim().is_empty() {
            continue;
        }
        if let Some(expression) = entry.capture("EXPR") {
            out.extend(super::exprs::expr(f, expression)?);
        } else {
            return Err(unhandled("semilist", entry));
        }
    }
    Ok(out)
}
