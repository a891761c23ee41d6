//! The `EXPR` dispatch: the largest routing surface in the factory.
//!
//! An expression match routes on which operator capture it carries plus the
//! arity of its positional operand list. Operand order in the output is
//! document order, so a binary application desugars into three siblings:
//! left operand, operator, right operand.

use rakast_match::Match;
use rakast_tree::{ElementId, ElementKind};
use text_size::TextRange;

use crate::adapter;
use crate::error::Result;
use crate::factory::Factory;
use crate::grammar::{decls, names, numbers, operators, stmts, strings, variables};
use crate::shape::{Shape, expect_capture, unhandled};

pub(crate) fn expr(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let operands = m.list();

    if let Some(infix) = m.capture("infix") {
        if operands.len() == 3 && infix.text().contains("??") {
            return ternary(f, m, operands);
        }
        if operands.len() >= 2 {
            return infix_application(f, m, infix, operands);
        }
    }

    if let Some(prefix) = m.capture("prefix")
        && operands.len() == 1
    {
        let op = operators::prefix(f, prefix);
        let mut out = vec![op];
        out.extend(expr(f, &operands[0])?);
        return Ok(out);
    }

    if let Some(postfix) = m.capture("postfix")
        && operands.len() == 1
    {
        let mut out = expr(f, &operands[0])?;
        out.push(operators::postfix(f, postfix));
        return Ok(out);
    }

    if let Some(postcircumfix) = m.capture("postcircumfix")
        && operands.len() == 1
    {
        let mut out = expr(f, &operands[0])?;
        out.push(operators::postcircumfix(f, postcircumfix)?);
        return Ok(out);
    }

    if let Some(dotty_match) = m.capture("dotty")
        && operands.len() == 1
    {
        let mut out = expr(f, &operands[0])?;
        out.extend(dotty(f, dotty_match)?);
        return Ok(out);
    }

    if m.has("longname") && m.has("args") {
        let name = names::longname(f, expect_capture("EXPR", m, "longname")?)?;
        let mut out = vec![name];
        out.extend(args(f, expect_capture("EXPR", m, "args")?)?);
        return Ok(out);
    }

    // An operator capture whose operand arity none of the guards above
    // accepted is an `EXPR` shape we don't know, not a term.
    if ["infix", "prefix", "postfix", "postcircumfix", "dotty"].iter().any(|key| m.has(key)) {
        return Err(unhandled("EXPR", m));
    }

    term(f, m)
}

/// Binary and list-associative infix application. The operator leaf between
/// each operand pair is placed by [`operators::infix`], which relocates the
/// operator inside the inter-operand gap when the grammar's own capture
/// offsets are unreliable (meta-operator composition).
fn infix_application(
    f: &mut Factory<'_>,
    m: &Match,
    infix: &Match,
    operands: &[Match],
) -> Result<Vec<ElementId>> {
    let mut out: Vec<ElementId> = Vec::new();

    for (index, operand) in operands.iter().enumerate() {
        let built = expr(f, operand)?;
        if index > 0 {
            let gap = gap_span(f, &out, &built, m);
            let op = operators::infix(f, infix, gap);
            out.push(op);
        }
        out.extend(built);
    }

    Ok(out)
}

/// `cond ?? then !! else`: both halves of the ternary operator are located
/// by scanning the gaps between already-built operands.
fn ternary(f: &mut Factory<'_>, m: &Match, operands: &[Match]) -> Result<Vec<ElementId>> {
    let cond = expr(f, &operands[0])?;
    let then = expr(f, &operands[1])?;
    let other = expr(f, &operands[2])?;

    let quest_gap = gap_span(f, &cond, &then, m);
    let Some(quest) = adapter::locate(f, "??", quest_gap) else {
        return Err(unhandled("EXPR", m));
    };
    let bang_gap = gap_span(f, &then, &other, m);
    let Some(bang) = adapter::locate(f, "!!", bang_gap) else {
        return Err(unhandled("EXPR", m));
    };

    let mut out = cond;
    out.push(adapter::leaf_at(f, ElementKind::INFIX_OPERATOR, "EXPR", quest.start(), "??"));
    out.extend(then);
    out.push(adapter::leaf_at(f, ElementKind::INFIX_OPERATOR, "EXPR", bang.start(), "!!"));
    out.extend(other);
    Ok(out)
}

/// The uncovered interval between the last element built so far and the
/// first element of the next operand group.
fn gap_span(
    f: &Factory<'_>,
    left: &[ElementId],
    right: &[ElementId],
    m: &Match,
) -> TextRange {
    let start = left.last().map_or(m.from(), |&id| f.end_of(id));
    let end = right.first().map_or(m.to(), |&id| f.tree[id].from());
    TextRange::new(start, end.max(start))
}

/// Method-call postfix: the `.` operator leaf followed by the method name
/// and any argument elements.
fn dotty(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["dottyop", "sym"], &[]) {
        let sym = expect_capture("dotty", m, "sym")?;
        let dot = adapter::leaf(f, ElementKind::POSTFIX_OPERATOR, "dotty", sym);
        let mut out = vec![dot];
        out.extend(dottyop(f, expect_capture("dotty", m, "dottyop")?)?);
        return Ok(out);
    }
    if shape.is(&[], &[]) {
        return Ok(vec![adapter::leaf_trimmed(f, ElementKind::POSTFIX_OPERATOR, "dotty", m)]);
    }

    Err(unhandled("dotty", m))
}

fn dottyop(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["methodop"], &[]) {
        return methodop(f, expect_capture("dottyop", m, "methodop")?);
    }

    Err(unhandled("dottyop", m))
}

fn methodop(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["longname"], &[]) {
        return Ok(vec![names::longname(f, expect_capture("methodop", m, "longname")?)?]);
    }
    if shape.is(&["args", "longname"], &[]) {
        let name = names::longname(f, expect_capture("methodop", m, "longname")?)?;
        let mut out = vec![name];
        out.extend(args(f, expect_capture("methodop", m, "args")?)?);
        return Ok(out);
    }

    Err(unhandled("methodop", m))
}

/// A terminal expression: literal, variable, name, declarator, or bracketed
/// construct.
pub(crate) fn term(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["value"], &[]) {
        return Ok(vec![numbers::value(f, expect_capture("term", m, "value")?)?]);
    }
    if shape.is(&["variable"], &[]) {
        return Ok(vec![variables::variable(f, expect_capture("term", m, "variable")?)?]);
    }
    if shape.is(&["longname"], &[]) {
        return Ok(vec![names::longname(f, expect_capture("term", m, "longname")?)?]);
    }
    if shape.is(&["circumfix"], &[]) {
        return Ok(vec![operators::circumfix(f, expect_capture("term", m, "circumfix")?)?]);
    }
    if shape.is(&["colonpair"], &[]) {
        return Ok(vec![names::colonpair(f, expect_capture("term", m, "colonpair")?)?]);
    }
    if shape.is(&["fatarrow"], &[]) {
        return names::fatarrow(f, expect_capture("term", m, "fatarrow")?);
    }
    if shape.is(&["scope_declarator"], &[]) {
        return decls::scope_declarator(f, expect_capture("term", m, "scope_declarator")?);
    }
    if shape.is(&["multi_declarator"], &[]) {
        return decls::multi_declarator(f, expect_capture("term", m, "multi_declarator")?);
    }
    if shape.is(&["routine_declarator"], &[]) {
        let declarator = expect_capture("term", m, "routine_declarator")?;
        return Ok(vec![decls::routine_declarator(f, declarator)?]);
    }
    if shape.is(&["package_declarator"], &[]) {
        let declarator = expect_capture("term", m, "package_declarator")?;
        return Ok(vec![decls::package_declarator(f, declarator)?]);
    }
    if shape.is(&["regex_declarator"], &[]) {
        let declarator = expect_capture("term", m, "regex_declarator")?;
        return Ok(vec![decls::regex_declarator(f, declarator)?]);
    }
    if shape.is(&["statement_prefix"], &[]) {
        return stmts::statement_prefix(f, expect_capture("term", m, "statement_prefix")?);
    }
    if shape.is(&["quote"], &[]) {
        return Ok(vec![strings::quote(f, expect_capture("term", m, "quote")?)?]);
    }

    Err(unhandled("term", m))
}

/// Call arguments. An empty match is a zero-argument call.
pub(crate) fn args(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["arglist"], &[]) {
        return arglist(f, expect_capture("args", m, "arglist")?);
    }
    if shape.is(&[], &["arglist"]) || shape.is(&[], &[]) {
        return Ok(Vec::new());
    }

    Err(unhandled("args", m))
}

pub(crate) fn arglist(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["EXPR"], &[]) {
        return expr(f, expect_capture("arglist", m, "EXPR")?);
    }
    if shape.is(&[], &["EXPR"]) || shape.is(&[], &[]) {
        return Ok(Vec::new());
    }

    Err(unhandled("arglist", m))
}
