//! Names, colonpairs, and fat-arrow keys.

use rakast_match::Match;
use rakast_tree::{ElementId, ElementKind};
use text_size::TextRange;

use crate::adapter;
use crate::error::Result;
use crate::factory::Factory;
use crate::grammar::exprs;
use crate::shape::{Shape, expect_capture, unhandled};

pub(crate) fn longname(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["name"], &[]) {
        return name(f, expect_capture("longname", m, "name")?);
    }
    if shape.is(&["colonpair", "name"], &[]) {
        // A colonpair glued onto a name (`infix:<+>` spellings) keeps the
        // whole lexeme as one bareword.
        return Ok(adapter::leaf(f, ElementKind::BAREWORD, "longname", m));
    }

    Err(unhandled("longname", m))
}

/// `foo` is a bareword; `Foo::Bar` (any `morename` present) is a package
/// name. Either way the leaf keeps the full dotted lexeme.
pub(crate) fn name(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["identifier"], &[]) {
        return Ok(adapter::leaf(f, ElementKind::BAREWORD, "name", m));
    }
    if shape.is(&["identifier", "morename"], &[]) || shape.is(&["morename"], &[]) {
        return Ok(adapter::leaf(f, ElementKind::PACKAGE_NAME, "name", m));
    }

    Err(unhandled("name", m))
}

pub(crate) fn deflongname(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["name"], &[]) {
        return name(f, expect_capture("deflongname", m, "name")?);
    }

    Err(unhandled("deflongname", m))
}

/// `:foo` alone is a colon-bareword; with a bracketed value
/// (`:key<value>`) the whole pair is an adverb leaf.
pub(crate) fn colonpair(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["identifier"], &[]) {
        return Ok(adapter::leaf(f, ElementKind::COLON_BAREWORD, "colonpair", m));
    }
    if shape.is(&["coloncircumfix", "identifier"], &[]) || shape.is(&["coloncircumfix"], &[]) {
        return Ok(adapter::leaf(f, ElementKind::ADVERB, "colonpair", m));
    }

    Err(unhandled("colonpair", m))
}

/// `key => value`: bareword key, located `=>` leaf, then the value
/// expression.
pub(crate) fn fatarrow(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if !shape.is(&["key", "val"], &[]) {
        return Err(unhandled("fatarrow", m));
    }

    let key = expect_capture("fatarrow", m, "key")?;
    let val = expect_capture("fatarrow", m, "val")?;

    let key_leaf = adapter::leaf(f, ElementKind::BAREWORD, "fatarrow", key);
    let gap = TextRange::new(key.to(), val.from());
    let Some(arrow) = adapter::locate(f, "=>", gap) else {
        return Err(unhandled("fatarrow", m));
    };
    let arrow_leaf =
        adapter::leaf_at(f, ElementKind::INFIX_OPERATOR, "fatarrow", arrow.start(), "=>");

    let mut out = vec![key_leaf, arrow_leaf];
    out.extend(exprs::expr(f, val)?);
    Ok(out)
}
