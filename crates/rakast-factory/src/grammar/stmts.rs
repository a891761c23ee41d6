//! Statements, blocks, and statement-level control productions.

use rakast_match::Match;
use rakast_tree::{ElementId, ElementKind};
use text_size::TextSize;

use crate::adapter::{self, Balanced};
use crate::error::Result;
use crate::factory::Factory;
use crate::grammar::{decls, exprs};
use crate::shape::{Shape, expect_capture, unhandled};

/// Positional list of statement matches, one element per non-blank entry.
pub(crate) fn statement_list(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let mut out = Vec::with_capacity(m.list().len());
    for entry in m.list() {
        if entry.text().trim().is_empty() {
            continue;
        }
        out.push(statement(f, entry)?);
    }
    Ok(out)
}

/// One `Statement` branch.
///
/// The grammar's statement match covers the trailing semicolon but no
/// sub-capture does, so when the matched text ends in `;` and the last child
/// stops short of it, the semicolon leaf is synthesized here.
pub(crate) fn statement(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    let mut children = if shape.is(&["EXPR"], &[]) {
        exprs::expr(f, expect_capture("statement", m, "EXPR")?)?
    } else if shape.is(&["EXPR", "statement_mod_cond"], &[]) {
        let mut out = exprs::expr(f, expect_capture("statement", m, "EXPR")?)?;
        out.extend(statement_mod(f, expect_capture("statement", m, "statement_mod_cond")?)?);
        out
    } else if shape.is(&["EXPR", "statement_mod_loop"], &[]) {
        let mut out = exprs::expr(f, expect_capture("statement", m, "EXPR")?)?;
        out.extend(statement_mod(f, expect_capture("statement", m, "statement_mod_loop")?)?);
        out
    } else if shape.is(&["statement_control"], &[]) {
        statement_control(f, expect_capture("statement", m, "statement_control")?)?
    } else {
        return Err(unhandled("statement", m));
    };

    if let Some(&last) = children.last() {
        let end = f.end_of(last);
        if m.text().ends_with(';') && end < m.to() {
            let semi_at = m.to() - TextSize::new(1);
            if end <= semi_at {
                children.push(adapter::leaf_at(
                    f,
                    ElementKind::SEMICOLON,
                    "statement",
                    semi_at,
                    ";",
                ));
            }
        }
    }

    Ok(adapter::branch(f, ElementKind::STATEMENT, "statement", children))
}

/// Postfix statement modifier (`... if $cond`, `... for @list`): the
/// modifier keyword and its expression, trailing the main expression.
fn statement_mod(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["modifier_expr", "sym"], &[]) {
        let sym = expect_capture("statement_mod", m, "sym")?;
        let keyword = adapter::leaf(f, ElementKind::BAREWORD, "statement_mod", sym);
        let mut out = vec![keyword];
        out.extend(exprs::expr(f, expect_capture("statement_mod", m, "modifier_expr")?)?);
        return Ok(out);
    }

    Err(unhandled("statement_mod", m))
}

/// `if`/`while`/`for`-style control: keyword plus condition-and-block, or
/// keyword plus bare block.
pub(crate) fn statement_control(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["sym", "xblock"], &[]) {
        let sym = expect_capture("statement_control", m, "sym")?;
        let keyword = adapter::leaf(f, ElementKind::BAREWORD, "statement_control", sym);
        let mut out = vec![keyword];
        out.extend(xblock(f, expect_capture("statement_control", m, "xblock")?)?);
        return Ok(out);
    }

    if shape.is(&["block", "sym"], &[]) {
        let sym = expect_capture("statement_control", m, "sym")?;
        let keyword = adapter::leaf(f, ElementKind::BAREWORD, "statement_control", sym);
        let mut out = vec![keyword];
        out.extend(pblock(f, expect_capture("statement_control", m, "block")?)?);
        return Ok(out);
    }

    Err(unhandled("statement_control", m))
}

/// Condition expression followed by its pointy-less block.
pub(crate) fn xblock(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["EXPR", "pblock"], &[]) {
        let mut out = exprs::expr(f, expect_capture("xblock", m, "EXPR")?)?;
        out.extend(pblock(f, expect_capture("xblock", m, "pblock")?)?);
        return Ok(out);
    }

    Err(unhandled("xblock", m))
}

/// A block that may carry a signature (`-> $x { ... }`).
pub(crate) fn pblock(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["blockoid"], &[]) {
        return Ok(vec![blockoid(f, expect_capture("pblock", m, "blockoid")?)?]);
    }

    if shape.is(&["blockoid", "signature"], &[]) {
        let sig = decls::signature(f, expect_capture("pblock", m, "signature")?)?;
        let block = blockoid(f, expect_capture("pblock", m, "blockoid")?)?;
        return Ok(vec![sig, block]);
    }

    Err(unhandled("pblock", m))
}

/// Curly-brace block body: `Block[Enter, statements.., Exit]`.
pub(crate) fn blockoid(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    let statements = if shape.is(&["statementlist"], &[]) {
        statement_list(f, expect_capture("blockoid", m, "statementlist")?)?
    } else if shape.is(&[], &["statementlist"]) || shape.is(&[], &[]) {
        Vec::new()
    } else {
        return Err(unhandled("blockoid", m));
    };

    adapter::balanced(f, ElementKind::BLOCK, "blockoid", m, statements, Balanced::FromMatch)
}

/// Block-or-statement: the argument position of `do`, phasers, and friends.
pub(crate) fn blorst(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["block"], &[]) {
        return pblock(f, expect_capture("blorst", m, "block")?);
    }

    if shape.is(&["statement"], &[]) {
        return Ok(vec![statement(f, expect_capture("blorst", m, "statement")?)?]);
    }

    Err(unhandled("blorst", m))
}

/// `do` / `try` / `gather` prefix keyword ahead of its block-or-statement.
pub(crate) fn statement_prefix(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["blorst", "sym"], &[]) {
        let sym = expect_capture("statement_prefix", m, "sym")?;
        let keyword = adapter::leaf(f, ElementKind::BAREWORD, "statement_prefix", sym);
        let mut out = vec![keyword];
        out.extend(blorst(f, expect_capture("statement_prefix", m, "blorst")?)?);
        return Ok(out);
    }

    Err(unhandled("statement_prefix", m))
}
