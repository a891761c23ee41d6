//! Numeric literal dispatch.
//!
//! Each concrete number kind fixes its own base; the factory only routes on
//! which integer/fraction/exponent capture the grammar populated.

use rakast_match::Match;
use rakast_tree::{ElementId, ElementKind};

use crate::adapter;
use crate::error::Result;
use crate::factory::Factory;
use crate::grammar::strings;
use crate::shape::{Shape, expect_capture, unhandled};

/// A literal value: number or quoting construct.
pub(crate) fn value(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["number"], &[]) {
        return number(f, expect_capture("value", m, "number")?);
    }
    if shape.is(&["quote"], &[]) {
        return strings::quote(f, expect_capture("value", m, "quote")?);
    }

    Err(unhandled("value", m))
}

pub(crate) fn number(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["numish"], &[]) {
        return numish(f, expect_capture("number", m, "numish")?);
    }

    Err(unhandled("number", m))
}

pub(crate) fn numish(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["integer"], &[]) {
        return integer(f, expect_capture("numish", m, "integer")?);
    }
    if shape.is(&["dec_number"], &[]) {
        return dec_number(f, expect_capture("numish", m, "dec_number")?);
    }
    if shape.is(&["rad_number"], &[]) {
        return rad_number(f, expect_capture("numish", m, "rad_number")?);
    }
    if shape.is(&["imaginary"], &[]) {
        let imaginary = expect_capture("numish", m, "imaginary")?;
        return Ok(adapter::leaf(f, ElementKind::IMAGINARY_NUMBER, "numish", imaginary));
    }

    // NaN and Inf reach numish as bare keywords with no sub-capture.
    if shape.is(&[], &[]) {
        let kind = match m.text().trim() {
            "NaN" => ElementKind::NOT_A_NUMBER,
            "Inf" | "\u{221e}" => ElementKind::INFINITY,
            _ => return Err(unhandled("numish", m)),
        };
        return Ok(adapter::leaf_trimmed(f, kind, "numish", m));
    }

    Err(unhandled("numish", m))
}

/// Routes on which radix-prefixed integer capture is populated. The leaf
/// keeps the whole lexeme, prefix included.
pub(crate) fn integer(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    let kind = if shape.is(&["binint"], &[]) {
        ElementKind::BINARY_NUMBER
    } else if shape.is(&["octint"], &[]) {
        ElementKind::OCTAL_NUMBER
    } else if shape.is(&["decint"], &[]) {
        ElementKind::DECIMAL_NUMBER
    } else if shape.is(&["hexint"], &[]) {
        ElementKind::HEX_NUMBER
    } else {
        return Err(unhandled("integer", m));
    };

    Ok(adapter::leaf(f, kind, "integer", m))
}

/// Decimal with a fraction and/or an exponent. The grammar always supplies
/// `int` and marks the unused parts present-but-empty.
pub(crate) fn dec_number(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    let fractional = shape.is(&["frac", "int"], &["escale"])
        || shape.is(&["escale", "frac", "int"], &[])
        || shape.is(&["escale", "int"], &["frac"])
        || shape.is(&["coeff", "frac"], &[]);
    if fractional {
        return Ok(adapter::leaf(f, ElementKind::FLOATING_POINT_NUMBER, "dec_number", m));
    }

    Err(unhandled("dec_number", m))
}

/// `:16<ff>`-style radix literal, kept as one leaf.
pub(crate) fn rad_number(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["circumfix", "radix"], &[]) || shape.is(&["intpart", "radix"], &["fracpart"]) {
        return Ok(adapter::leaf(f, ElementKind::RADIX_NUMBER, "rad_number", m));
    }

    Err(unhandled("rad_number", m))
}
