//! Variable dispatch: a sigil+twigil compound key into a fixed kind table.

use rakast_match::Match;
use rakast_tree::{Element, ElementId, ElementKind};

use crate::adapter;
use crate::error::Result;
use crate::factory::Factory;
use crate::grammar::{exprs, operators};
use crate::shape::{Shape, expect_capture, unhandled};

pub(crate) fn variable(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["contextualizer"], &[]) {
        return contextualizer(f, expect_capture("variable", m, "contextualizer")?);
    }

    if shape.is(&["desigilname", "sigil"], &[]) {
        let sigil = expect_capture("variable", m, "sigil")?;
        return keyed(f, m, sigil.text(), "");
    }

    if shape.is(&["desigilname", "sigil", "twigil"], &[]) {
        let sigil = expect_capture("variable", m, "sigil")?;
        let twigil = expect_capture("variable", m, "twigil")?;
        return keyed(f, m, sigil.text(), twigil.text());
    }

    // Match-index forms ($<name>, $0's @-sibling spellings) carry the index
    // as a postcircumfix on the bare sigil.
    if shape.is(&["postcircumfix", "sigil"], &[]) {
        let sigil = expect_capture("variable", m, "sigil")?;
        return keyed(f, m, sigil.text(), "<");
    }

    if shape.is(&["sigil"], &[]) {
        let sigil = expect_capture("variable", m, "sigil")?;
        return keyed(f, m, sigil.text(), "");
    }

    Err(unhandled("variable", m))
}

fn keyed(f: &mut Factory<'_>, m: &Match, sigil: &str, twigil: &str) -> Result<ElementId> {
    let Some(kind) = var_kind(sigil, twigil) else {
        return Err(unhandled("variable", m));
    };
    Ok(adapter::leaf(f, kind, "variable", m))
}

/// `$( ... )`, `@( ... )`, `%( ... )`, `&( ... )`.
///
/// The one dual-arity kind: the element keeps the full lexeme as content and
/// the inner expression as children. The linear chain treats it as an atomic
/// token; the children are reachable only through the tree view.
pub(crate) fn contextualizer(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let children = if let Some(semilist) = m.capture("semilist") {
        operators::semilist(f, semilist)?
    } else if let Some(expression) = m.capture("EXPR") {
        exprs::expr(f, expression)?
    } else {
        return Err(unhandled("contextualizer", m));
    };

    let element = Element::dual(ElementKind::CONTEXTUALIZER, m.range(), m.text(), children)
        .with_factory("contextualizer");
    Ok(f.tree.alloc(element))
}

/// 4 sigils x 9 twigil states. Content is always the full
/// sigil-twigil-name lexeme; only the kind encodes the classification.
pub(crate) fn var_kind(sigil: &str, twigil: &str) -> Option<ElementKind> {
    use ElementKind::*;

    let kind = match (sigil, twigil) {
        ("$", "") => SCALAR,
        ("$", "*") => DYNAMIC_SCALAR,
        ("$", "!") => ATTRIBUTE_SCALAR,
        ("$", "?") => COMPILE_TIME_SCALAR,
        ("$", "<") => MATCH_INDEX_SCALAR,
        ("$", "^") => POSITIONAL_SCALAR,
        ("$", ":") => NAMED_SCALAR,
        ("$", "=") => POD_SCALAR,
        ("$", "~") => SUBLANGUAGE_SCALAR,

        ("@", "") => ARRAY,
        ("@", "*") => DYNAMIC_ARRAY,
        ("@", "!") => ATTRIBUTE_ARRAY,
        ("@", "?") => COMPILE_TIME_ARRAY,
        ("@", "<") => MATCH_INDEX_ARRAY,
        ("@", "^") => POSITIONAL_ARRAY,
        ("@", ":") => NAMED_ARRAY,
        ("@", "=") => POD_ARRAY,
        ("@", "~") => SUBLANGUAGE_ARRAY,

        ("%", "") => HASH,
        ("%", "*") => DYNAMIC_HASH,
        ("%", "!") => ATTRIBUTE_HASH,
        ("%", "?") => COMPILE_TIME_HASH,
        ("%", "<") => MATCH_INDEX_HASH,
        ("%", "^") => POSITIONAL_HASH,
        ("%", ":") => NAMED_HASH,
        ("%", "=") => POD_HASH,
        ("%", "~") => SUBLANGUAGE_HASH,

        ("&", "") => CALLABLE,
        ("&", "*") => DYNAMIC_CALLABLE,
        ("&", "!") => ATTRIBUTE_CALLABLE,
        ("&", "?") => COMPILE_TIME_CALLABLE,
        ("&", "<") => MATCH_INDEX_CALLABLE,
        ("&", "^") => POSITIONAL_CALLABLE,
        ("&", ":") => NAMED_CALLABLE,
        ("&", "=") => POD_CALLABLE,
        ("&", "~") => SUBLANGUAGE_CALLABLE,

        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sigil_twigil_pair_is_mapped() {
        for sigil in ["$", "@", "%", "&"] {
            for twigil in ["", "*", "!", "?", "<", "^", ":", "=", "~"] {
                assert!(var_kind(sigil, twigil).is_some(), "unmapped {sigil}{twigil}");
            }
        }
        assert!(var_kind("$", "+").is_none());
        assert!(var_kind("\\", "").is_none());
    }
}
