//! Declarations: scoped variables, routines, packages, regexes, signatures.

use rakast_match::Match;
use rakast_tree::{ElementId, ElementKind};

use crate::adapter::{self, Balanced};
use crate::error::Result;
use crate::factory::Factory;
use crate::grammar::{exprs, names, stmts, variables};
use crate::shape::{Shape, expect_capture, unhandled};

/// `my $x = 1` desugars into a `ScopeDeclaration` branch holding the
/// keyword and the declared target, followed by the initializer elements as
/// trailing siblings. The initializer stays outside the declaration branch:
/// it is an expression of the enclosing statement, not part of the binding.
pub(crate) fn scope_declarator(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if !shape.is(&["scoped", "sym"], &[]) {
        return Err(unhandled("scope_declarator", m));
    }

    let sym = expect_capture("scope_declarator", m, "sym")?;
    let keyword = adapter::leaf(f, ElementKind::BAREWORD, "scope_declarator", sym);
    let (head, tail) = scoped(f, expect_capture("scope_declarator", m, "scoped")?)?;

    let mut declaration = vec![keyword];
    declaration.extend(head);
    let branch =
        adapter::branch(f, ElementKind::SCOPE_DECLARATION, "scope_declarator", declaration);

    let mut out = vec![branch];
    out.extend(tail);
    Ok(out)
}

fn scoped(f: &mut Factory<'_>, m: &Match) -> Result<(Vec<ElementId>, Vec<ElementId>)> {
    let shape = Shape::of(m);

    if shape.is(&["DECL"], &[]) {
        return declarator(f, expect_capture("scoped", m, "DECL")?);
    }
    if shape.is(&["declarator"], &[]) {
        return declarator(f, expect_capture("scoped", m, "declarator")?);
    }

    Err(unhandled("scoped", m))
}

/// Returns the declared target (goes inside the declaration branch) and the
/// trailing elements (initializer, goes after it).
pub(crate) fn declarator(
    f: &mut Factory<'_>,
    m: &Match,
) -> Result<(Vec<ElementId>, Vec<ElementId>)> {
    let shape = Shape::of(m);

    if shape.is(&["variable_declarator"], &[]) {
        return variable_declarator(f, expect_capture("declarator", m, "variable_declarator")?);
    }
    if shape.is(&["routine_declarator"], &[]) {
        let routine = routine_declarator(f, expect_capture("declarator", m, "routine_declarator")?)?;
        return Ok((vec![routine], Vec::new()));
    }
    if shape.is(&["regex_declarator"], &[]) {
        let regex = regex_declarator(f, expect_capture("declarator", m, "regex_declarator")?)?;
        return Ok((vec![regex], Vec::new()));
    }

    Err(unhandled("declarator", m))
}

pub(crate) fn variable_declarator(
    f: &mut Factory<'_>,
    m: &Match,
) -> Result<(Vec<ElementId>, Vec<ElementId>)> {
    let shape = Shape::of(m);

    if shape.is(&["variable"], &[]) {
        let target = variables::variable(f, expect_capture("variable_declarator", m, "variable")?)?;
        return Ok((vec![target], Vec::new()));
    }
    if shape.is(&["initializer", "variable"], &[]) {
        let target = variables::variable(f, expect_capture("variable_declarator", m, "variable")?)?;
        let tail = initializer(f, expect_capture("variable_declarator", m, "initializer")?)?;
        return Ok((vec![target], tail));
    }

    Err(unhandled("variable_declarator", m))
}

/// `= EXPR` or `:= EXPR`: the assignment operator leaf followed by the
/// right-hand side.
pub(crate) fn initializer(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["EXPR", "sym"], &[]) {
        let sym = expect_capture("initializer", m, "sym")?;
        let found =
            adapter::leaf_sample(f, ElementKind::INFIX_OPERATOR, "initializer", m, sym.text());
        let op = match found {
            Some(op) => op,
            None => adapter::leaf_trimmed(f, ElementKind::INFIX_OPERATOR, "initializer", sym),
        };
        let mut out = vec![op];
        out.extend(exprs::expr(f, expect_capture("initializer", m, "EXPR")?)?);
        return Ok(out);
    }

    Err(unhandled("initializer", m))
}

pub(crate) fn multi_declarator(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["declarator", "sym"], &[]) {
        let sym = expect_capture("multi_declarator", m, "sym")?;
        let keyword = adapter::leaf(f, ElementKind::BAREWORD, "multi_declarator", sym);
        let (head, tail) = declarator(f, expect_capture("multi_declarator", m, "declarator")?)?;
        let mut out = vec![keyword];
        out.extend(head);
        out.extend(tail);
        return Ok(out);
    }
    if shape.is(&["declarator"], &[]) {
        let (head, tail) = declarator(f, expect_capture("multi_declarator", m, "declarator")?)?;
        let mut out = head;
        out.extend(tail);
        return Ok(out);
    }

    Err(unhandled("multi_declarator", m))
}

/// `sub foo($x) { ... }` and friends.
pub(crate) fn routine_declarator(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if !shape.is(&["routine_def", "sym"], &[]) {
        return Err(unhandled("routine_declarator", m));
    }

    let sym = expect_capture("routine_declarator", m, "sym")?;
    let keyword = adapter::leaf(f, ElementKind::BAREWORD, "routine_declarator", sym);
    let mut children = vec![keyword];
    children.extend(routine_def(f, expect_capture("routine_declarator", m, "routine_def")?)?);
    Ok(adapter::branch(f, ElementKind::ROUTINE_DECLARATION, "routine_declarator", children))
}

fn routine_def(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["blockoid", "deflongname"], &[]) {
        let name = names::deflongname(f, expect_capture("routine_def", m, "deflongname")?)?;
        let block = stmts::blockoid(f, expect_capture("routine_def", m, "blockoid")?)?;
        return Ok(vec![name, block]);
    }
    if shape.is(&["blockoid", "deflongname", "signature"], &[]) {
        let name = names::deflongname(f, expect_capture("routine_def", m, "deflongname")?)?;
        let sig = signature(f, expect_capture("routine_def", m, "signature")?)?;
        let block = stmts::blockoid(f, expect_capture("routine_def", m, "blockoid")?)?;
        return Ok(vec![name, sig, block]);
    }
    if shape.is(&["blockoid", "deflongname", "trait"], &[]) {
        let name = names::deflongname(f, expect_capture("routine_def", m, "deflongname")?)?;
        let mut out = vec![name];
        out.extend(trait_(f, expect_capture("routine_def", m, "trait")?)?);
        out.push(stmts::blockoid(f, expect_capture("routine_def", m, "blockoid")?)?);
        return Ok(out);
    }
    if shape.is(&["blockoid"], &[]) {
        return Ok(vec![stmts::blockoid(f, expect_capture("routine_def", m, "blockoid")?)?]);
    }

    Err(unhandled("routine_def", m))
}

/// Parenthesized parameter list. The grammar's signature range excludes the
/// parens, so the delimiters are recovered by scanning outward.
pub(crate) fn signature(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let mut parameters = Vec::with_capacity(m.list().len());
    for entry in m.list() {
        if entry.text().trim().is_empty() {
            continue;
        }
        parameters.push(parameter(f, entry)?);
    }
    adapter::balanced(f, ElementKind::SIGNATURE, "signature", m, parameters, Balanced::Outer)
}

pub(crate) fn parameter(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["param_var"], &[]) {
        let target = param_var(f, expect_capture("parameter", m, "param_var")?)?;
        return Ok(adapter::branch(f, ElementKind::PARAMETER, "parameter", vec![target]));
    }
    if shape.is(&["param_var", "type_constraint"], &[]) {
        let constraint = type_constraint(f, expect_capture("parameter", m, "type_constraint")?)?;
        let target = param_var(f, expect_capture("parameter", m, "param_var")?)?;
        return Ok(adapter::branch(f, ElementKind::PARAMETER, "parameter", vec![constraint, target]));
    }

    Err(unhandled("parameter", m))
}

fn param_var(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["name", "sigil"], &[]) {
        let sigil = expect_capture("param_var", m, "sigil")?;
        let Some(kind) = variables::var_kind(sigil.text(), "") else {
            return Err(unhandled("param_var", m));
        };
        return Ok(adapter::leaf(f, kind, "param_var", m));
    }

    Err(unhandled("param_var", m))
}

fn type_constraint(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if shape.is(&["typename"], &[]) {
        return typename(f, expect_capture("type_constraint", m, "typename")?);
    }

    Err(unhandled("type_constraint", m))
}

pub(crate) fn typename(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    Ok(adapter::leaf_trimmed(f, ElementKind::PACKAGE_NAME, "typename", m))
}

/// `is nodal`-style traits: modifier keyword plus its type.
pub(crate) fn trait_(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["trait_mod"], &[]) {
        let trait_mod = expect_capture("trait", m, "trait_mod")?;
        let inner = Shape::of(trait_mod);
        if inner.is(&["sym", "typename"], &[]) {
            let sym = expect_capture("trait_mod", trait_mod, "sym")?;
            let keyword = adapter::leaf(f, ElementKind::BAREWORD, "trait_mod", sym);
            let name = typename(f, expect_capture("trait_mod", trait_mod, "typename")?)?;
            return Ok(vec![keyword, name]);
        }
        if inner.is(&["longname", "sym"], &[]) {
            let sym = expect_capture("trait_mod", trait_mod, "sym")?;
            let keyword = adapter::leaf(f, ElementKind::BAREWORD, "trait_mod", sym);
            let name = names::longname(f, expect_capture("trait_mod", trait_mod, "longname")?)?;
            return Ok(vec![keyword, name]);
        }
        return Err(unhandled("trait_mod", trait_mod));
    }

    Err(unhandled("trait", m))
}

/// `class Foo { ... }`, `module Bar;`.
pub(crate) fn package_declarator(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if !shape.is(&["package_def", "sym"], &[]) {
        return Err(unhandled("package_declarator", m));
    }

    let sym = expect_capture("package_declarator", m, "sym")?;
    let keyword = adapter::leaf(f, ElementKind::BAREWORD, "package_declarator", sym);
    let mut children = vec![keyword];
    children.extend(package_def(f, expect_capture("package_declarator", m, "package_def")?)?);
    Ok(adapter::branch(f, ElementKind::PACKAGE_DECLARATION, "package_declarator", children))
}

fn package_def(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["blockoid", "longname"], &[]) {
        let name = names::longname(f, expect_capture("package_def", m, "longname")?)?;
        let block = stmts::blockoid(f, expect_capture("package_def", m, "blockoid")?)?;
        return Ok(vec![name, block]);
    }
    if shape.is(&["longname"], &[]) {
        return Ok(vec![names::longname(f, expect_capture("package_def", m, "longname")?)?]);
    }
    if shape.is(&["blockoid"], &[]) {
        return Ok(vec![stmts::blockoid(f, expect_capture("package_def", m, "blockoid")?)?]);
    }

    Err(unhandled("package_def", m))
}

/// `regex foo { ... }` / `token` / `rule`.
pub(crate) fn regex_declarator(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    if !shape.is(&["regex_def", "sym"], &[]) {
        return Err(unhandled("regex_declarator", m));
    }

    let sym = expect_capture("regex_declarator", m, "sym")?;
    let keyword = adapter::leaf(f, ElementKind::BAREWORD, "regex_declarator", sym);
    let mut children = vec![keyword];
    children.extend(regex_def(f, expect_capture("regex_declarator", m, "regex_def")?)?);
    Ok(adapter::branch(f, ElementKind::REGEX_DECLARATION, "regex_declarator", children))
}

fn regex_def(f: &mut Factory<'_>, m: &Match) -> Result<Vec<ElementId>> {
    let shape = Shape::of(m);

    if shape.is(&["deflongname", "nibble"], &[]) {
        let name = names::deflongname(f, expect_capture("regex_def", m, "deflongname")?)?;
        let nibble = expect_capture("regex_def", m, "nibble")?;
        let body = adapter::leaf(f, ElementKind::REGEX_BODY, "regex_def", nibble);
        let braced =
            adapter::balanced(f, ElementKind::REGEX, "regex_def", nibble, vec![body], Balanced::Outer)?;
        return Ok(vec![name, braced]);
    }

    Err(unhandled("regex_def", m))
}
