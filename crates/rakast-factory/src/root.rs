//! The document root.

use rakast_match::Match;
use rakast_tree::{ElementId, ElementKind};
use text_size::{TextLen, TextRange};

use crate::adapter;
use crate::error::Result;
use crate::factory::Factory;
use crate::grammar::stmts;
use crate::shape::{Shape, expect_capture, unhandled};

/// Wraps the outermost statement list in a `Document` branch spanning the
/// entire source, `[0, 0)` for an empty program.
///
/// Leading unparsed text (shebang, BOM) and trailing text after the last
/// statement need no special path here: the root's range covers the whole
/// document, so the gap filler's extremity handling tokenizes both.
pub(crate) fn document(f: &mut Factory<'_>, m: &Match) -> Result<ElementId> {
    let shape = Shape::of(m);

    let statements = if shape.is(&["statementlist"], &[]) {
        stmts::statement_list(f, expect_capture("comp_unit", m, "statementlist")?)?
    } else if shape.is(&[], &["statementlist"]) || shape.is(&[], &[]) {
        Vec::new()
    } else {
        return Err(unhandled("comp_unit", m));
    };

    let range = TextRange::new(0.into(), f.text.text_len());
    Ok(adapter::branch_at(f, ElementKind::DOCUMENT, "comp_unit", range, statements))
}
