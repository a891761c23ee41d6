use std::sync::Arc;

use expect_test::{Expect, expect};
use rakast_errors::Renderer;
use rakast_match::Match;
use rakast_tree::{Element, ElementId, ElementKind};
use text_size::TextRange;

use crate::{Ast, Builder, build};

fn m(orig: &Arc<str>, from: u32, to: u32) -> Match {
    Match::new(orig.clone(), from, to)
}

/// `value -> number -> numish -> integer -> decint` chain for one decimal
/// literal, the way the grammar nests it.
fn int_expr(orig: &Arc<str>, from: u32, to: u32) -> Match {
    let integer = m(orig, from, to).with("decint", m(orig, from, to));
    let numish = m(orig, from, to).with("integer", integer);
    let number = m(orig, from, to).with("numish", numish);
    let value = m(orig, from, to).with("number", number);
    m(orig, from, to).with("value", value)
}

/// Statement whose range includes the trailing semicolon.
fn int_statement(orig: &Arc<str>, from: u32, to: u32) -> Match {
    m(orig, from, to).with("EXPR", int_expr(orig, from, to - 1))
}

fn document(orig: &Arc<str>, statements: Vec<Match>) -> Match {
    let len = orig.len() as u32;
    let mut list = m(orig, 0, len);
    for statement in statements {
        list = list.push(statement);
    }
    m(orig, 0, len).with("statementlist", list)
}

fn kinds(ast: &Ast) -> Vec<ElementKind> {
    let Some(start) = ast.start() else { return Vec::new() };
    ast.tree().iter_from(start).map(|id| ast.tree()[id].kind()).collect()
}

fn find_kind(ast: &Ast, kind: ElementKind) -> Option<ElementId> {
    ast.tree().ids().find(|&id| ast.tree()[id].kind() == kind)
}

/// No-gap, round-trip, sibling-symmetry, and parent-consistency checks over
/// a finished build.
fn assert_invariants(ast: &Ast, source: &str) {
    let tree = ast.tree();

    if !source.is_empty() {
        let start = ast.start().expect("non-empty document has a chain");
        assert!(tree.is_start(start));

        let seq: Vec<ElementId> = tree.iter_from(start).collect();
        assert_eq!(u32::from(tree[seq[0]].from()), 0);
        assert_eq!(usize::from(tree[*seq.last().expect("non-empty")].to()), source.len());
        assert!(tree.is_end(*seq.last().expect("non-empty")));

        for pair in seq.windows(2) {
            assert_eq!(tree[pair[0]].to(), tree[pair[1]].from(), "gap in the chain");
            assert_eq!(tree.next(pair[0]), pair[1]);
            assert_eq!(tree.previous(pair[1]), pair[0]);
        }
    }

    assert_eq!(ast.linear_text(), source);

    for id in tree.ids() {
        for &child in tree.children(id) {
            assert_eq!(tree.parent(child), id);
        }
    }
}

fn check(ast: &Ast, expect: Expect) {
    expect.assert_eq(&ast.debug_dump());
}

#[test]
fn bare_integer_document() {
    let orig: Arc<str> = Arc::from("42");
    let doc = document(&orig, vec![m(&orig, 0, 2).with("EXPR", int_expr(&orig, 0, 2))]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);
    check(
        &ast,
        expect![[r#"
            DOCUMENT @ 0..2
              STATEMENT @ 0..2
                DECIMAL_NUMBER @ 0..2 "42"
        "#]],
    );
}

#[test]
fn scoped_declaration_with_initializer() {
    let orig: Arc<str> = Arc::from("my $x = 1;");

    let variable =
        m(&orig, 3, 5).with("sigil", m(&orig, 3, 4)).with("desigilname", m(&orig, 4, 5));
    let initializer =
        m(&orig, 6, 9).with("sym", m(&orig, 6, 7)).with("EXPR", int_expr(&orig, 8, 9));
    let variable_declarator =
        m(&orig, 3, 9).with("variable", variable).with("initializer", initializer);
    let declarator = m(&orig, 3, 9).with("variable_declarator", variable_declarator);
    let scoped = m(&orig, 3, 9).with("declarator", declarator);
    let scope_declarator = m(&orig, 0, 9).with("sym", m(&orig, 0, 2)).with("scoped", scoped);
    let expr = m(&orig, 0, 9).with("scope_declarator", scope_declarator);
    let doc = document(&orig, vec![m(&orig, 0, 10).with("EXPR", expr)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);
    check(
        &ast,
        expect![[r#"
            DOCUMENT @ 0..10
              STATEMENT @ 0..10
                SCOPE_DECLARATION @ 0..5
                  BAREWORD @ 0..2 "my"
                  WHITESPACE @ 2..3 " "
                  SCALAR @ 3..5 "$x"
                WHITESPACE @ 5..6 " "
                INFIX_OPERATOR @ 6..7 "="
                WHITESPACE @ 7..8 " "
                DECIMAL_NUMBER @ 8..9 "1"
                SEMICOLON @ 9..10 ";"
        "#]],
    );
}

#[test]
fn here_doc_body_becomes_a_ghost_in_its_physical_gap() {
    let orig: Arc<str> = Arc::from("say Q:to[END]; First line\nEND\n5;");

    let name = m(&orig, 0, 3).with("identifier", m(&orig, 0, 3));
    let longname = m(&orig, 0, 3).with("name", name);
    let quibble = m(&orig, 8, 13).with("nibble", m(&orig, 9, 12));
    let quote = m(&orig, 4, 13).with("sym", m(&orig, 4, 5)).with("quibble", quibble);
    let value = m(&orig, 4, 13).with("quote", quote);
    let term = m(&orig, 4, 13).with("value", value);
    let arglist = m(&orig, 4, 13).with("EXPR", term);
    let args = m(&orig, 4, 13).with("arglist", arglist);
    let call = m(&orig, 0, 13).with("longname", longname).with("args", args);
    let stmt1 = m(&orig, 0, 14).with("EXPR", call);
    let doc = document(&orig, vec![stmt1, int_statement(&orig, 30, 32)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);

    let string = find_kind(&ast, ElementKind::STRING_LITERAL).expect("opener leaf");
    let string = &ast.tree()[string];
    assert_eq!(u32::from(string.to()), 13);
    let quote = string.quote().expect("quote details");
    assert!(quote.here_doc);
    assert_eq!(quote.prefix.as_ref(), "Q");
    assert_eq!(quote.adverbs.len(), 1);
    assert_eq!(quote.adverbs[0].as_ref(), "to");

    let ghost = find_kind(&ast, ElementKind::HERE_DOC_BODY).expect("ghost leaf");
    assert_eq!(ast.tree()[ghost].range(), TextRange::new(15.into(), 29.into()));
    assert_eq!(ast.tree()[ghost].content(), Some("First line\nEND"));
    assert!(!ast.tree().is_semantic(ghost));

    check(
        &ast,
        expect![[r#"
            DOCUMENT @ 0..32
              STATEMENT @ 0..14
                BAREWORD @ 0..3 "say"
                WHITESPACE @ 3..4 " "
                STRING_LITERAL @ 4..13 "Q:to[END]"
                SEMICOLON @ 13..14 ";"
              WHITESPACE @ 14..15 " "
              HERE_DOC_BODY @ 15..29 "First line\nEND"
              WHITESPACE @ 29..30 "\n"
              STATEMENT @ 30..32
                DECIMAL_NUMBER @ 30..31 "5"
                SEMICOLON @ 31..32 ";"
        "#]],
    );
}

#[test]
fn here_doc_state_does_not_leak_between_builds() {
    let orig: Arc<str> = Arc::from("say Q:to[END]; First line\nEND\n5;");
    let name = m(&orig, 0, 3).with("identifier", m(&orig, 0, 3));
    let longname = m(&orig, 0, 3).with("name", name);
    let quibble = m(&orig, 8, 13).with("nibble", m(&orig, 9, 12));
    let quote = m(&orig, 4, 13).with("sym", m(&orig, 4, 5)).with("quibble", quibble);
    let value = m(&orig, 4, 13).with("quote", quote);
    let term = m(&orig, 4, 13).with("value", value);
    let arglist = m(&orig, 4, 13).with("EXPR", term);
    let args = m(&orig, 4, 13).with("arglist", arglist);
    let call = m(&orig, 0, 13).with("longname", longname).with("args", args);
    let stmt1 = m(&orig, 0, 14).with("EXPR", call);
    let doc = document(&orig, vec![stmt1, int_statement(&orig, 30, 32)]);

    let first = build(&doc).unwrap();
    assert!(find_kind(&first, ElementKind::HERE_DOC_BODY).is_some());

    // A second document with terminator-looking gap text gets no ghost: the
    // offset map was per-build state.
    let other: Arc<str> = Arc::from("1; END\n5;");
    let doc = document(&other, vec![int_statement(&other, 0, 2), int_statement(&other, 7, 9)]);
    let second = build(&doc).unwrap();
    assert_invariants(&second, &other);
    assert!(find_kind(&second, ElementKind::HERE_DOC_BODY).is_none());
    assert!(find_kind(&second, ElementKind::UNPARSED).is_some());
    assert_eq!(second.diagnostics().len(), 1);
}

#[test]
fn comment_gap_between_statements() {
    let orig: Arc<str> = Arc::from("1;\n# hi\n2;");
    let doc = document(&orig, vec![int_statement(&orig, 0, 2), int_statement(&orig, 8, 10)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);

    let comment = find_kind(&ast, ElementKind::COMMENT).expect("comment leaf");
    assert_eq!(ast.tree()[comment].range(), TextRange::new(3.into(), 7.into()));
    assert_eq!(ast.tree()[comment].content(), Some("# hi"));
}

#[test]
fn plain_quote_records_its_delimiters() {
    let orig: Arc<str> = Arc::from("'hi';");
    let quote = m(&orig, 0, 4).with("nibble", m(&orig, 1, 3));
    let value = m(&orig, 0, 4).with("quote", quote);
    let expr = m(&orig, 0, 4).with("value", value);
    let doc = document(&orig, vec![m(&orig, 0, 5).with("EXPR", expr)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);

    let string = find_kind(&ast, ElementKind::STRING_LITERAL).expect("string leaf");
    let string = &ast.tree()[string];
    assert_eq!(string.content(), Some("'hi'"));
    let details = string.quote().expect("quote details");
    assert_eq!(details.front.as_ref(), "'");
    assert_eq!(details.back.as_ref(), "'");
    assert!(!details.here_doc);
}

#[test]
fn binary_infix_desugars_to_three_siblings() {
    let orig: Arc<str> = Arc::from("1 + 2;");
    let expr = m(&orig, 0, 5)
        .with("infix", m(&orig, 2, 3))
        .push(int_expr(&orig, 0, 1))
        .push(int_expr(&orig, 4, 5));
    let doc = document(&orig, vec![m(&orig, 0, 6).with("EXPR", expr)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);
    assert_eq!(
        kinds(&ast),
        [
            ElementKind::DECIMAL_NUMBER,
            ElementKind::WHITESPACE,
            ElementKind::INFIX_OPERATOR,
            ElementKind::WHITESPACE,
            ElementKind::DECIMAL_NUMBER,
            ElementKind::SEMICOLON,
        ]
    );
}

#[test]
fn sloppy_infix_capture_is_relocated_into_the_operand_gap() {
    let orig: Arc<str> = Arc::from("1 + 2;");
    // The capture spans the whole " + " region, as meta-operator
    // composition produces; the leaf must land on the bare operator.
    let expr = m(&orig, 0, 5)
        .with("infix", m(&orig, 1, 4))
        .push(int_expr(&orig, 0, 1))
        .push(int_expr(&orig, 4, 5));
    let doc = document(&orig, vec![m(&orig, 0, 6).with("EXPR", expr)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);

    let op = find_kind(&ast, ElementKind::INFIX_OPERATOR).expect("operator leaf");
    assert_eq!(ast.tree()[op].range(), TextRange::new(2.into(), 3.into()));
    assert_eq!(ast.tree()[op].content(), Some("+"));
}

#[test]
fn ternary_locates_both_operator_halves() {
    let orig: Arc<str> = Arc::from("1 ?? 2 !! 3;");
    let expr = m(&orig, 0, 11)
        .with("infix", m(&orig, 2, 9))
        .push(int_expr(&orig, 0, 1))
        .push(int_expr(&orig, 5, 6))
        .push(int_expr(&orig, 10, 11));
    let doc = document(&orig, vec![m(&orig, 0, 12).with("EXPR", expr)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);

    let ops: Vec<(TextRange, String)> = ast
        .tree()
        .ids()
        .filter(|&id| ast.tree()[id].kind() == ElementKind::INFIX_OPERATOR)
        .map(|id| {
            (ast.tree()[id].range(), ast.tree()[id].content().unwrap_or_default().to_owned())
        })
        .collect();
    assert_eq!(
        ops,
        [
            (TextRange::new(2.into(), 4.into()), "??".to_owned()),
            (TextRange::new(7.into(), 9.into()), "!!".to_owned()),
        ]
    );
}

#[test]
fn contextualizer_threads_as_one_atomic_token() {
    let orig: Arc<str> = Arc::from("$( 1 );");
    let entry = m(&orig, 3, 4).with("EXPR", int_expr(&orig, 3, 4));
    let semilist = m(&orig, 3, 4).push(entry);
    let contextualizer = m(&orig, 0, 6).with("semilist", semilist);
    let variable = m(&orig, 0, 6).with("contextualizer", contextualizer);
    let expr = m(&orig, 0, 6).with("variable", variable);
    let doc = document(&orig, vec![m(&orig, 0, 7).with("EXPR", expr)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);
    assert_eq!(kinds(&ast), [ElementKind::CONTEXTUALIZER, ElementKind::SEMICOLON]);

    let ctx = find_kind(&ast, ElementKind::CONTEXTUALIZER).expect("dual element");
    assert_eq!(ast.tree()[ctx].content(), Some("$( 1 )"));
    let inner = ast.tree().children(ctx);
    assert_eq!(inner.len(), 1);
    assert_eq!(ast.tree()[inner[0]].kind(), ElementKind::DECIMAL_NUMBER);
    assert_eq!(ast.tree().parent(inner[0]), ctx);
}

#[test]
fn twigil_selects_the_variable_kind() {
    let orig: Arc<str> = Arc::from("$*x;");
    let variable = m(&orig, 0, 3)
        .with("sigil", m(&orig, 0, 1))
        .with("twigil", m(&orig, 1, 2))
        .with("desigilname", m(&orig, 2, 3));
    let expr = m(&orig, 0, 3).with("variable", variable);
    let doc = document(&orig, vec![m(&orig, 0, 4).with("EXPR", expr)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);

    let var = find_kind(&ast, ElementKind::DYNAMIC_SCALAR).expect("variable leaf");
    assert_eq!(ast.tree()[var].content(), Some("$*x"));
}

#[test]
fn routine_declaration_nests_signature_and_block() {
    let orig: Arc<str> = Arc::from("sub f($x) { 1; }");

    let name = m(&orig, 4, 5).with("identifier", m(&orig, 4, 5));
    let deflongname = m(&orig, 4, 5).with("name", name);
    let param_var = m(&orig, 6, 8).with("sigil", m(&orig, 6, 7)).with("name", m(&orig, 7, 8));
    let parameter = m(&orig, 6, 8).with("param_var", param_var);
    let signature = m(&orig, 6, 8).push(parameter);
    let statementlist = m(&orig, 12, 14).push(int_statement(&orig, 12, 14));
    let blockoid = m(&orig, 10, 16).with("statementlist", statementlist);
    let routine_def = m(&orig, 4, 16)
        .with("deflongname", deflongname)
        .with("signature", signature)
        .with("blockoid", blockoid);
    let declarator =
        m(&orig, 0, 16).with("sym", m(&orig, 0, 3)).with("routine_def", routine_def);
    let expr = m(&orig, 0, 16).with("routine_declarator", declarator);
    let doc = document(&orig, vec![m(&orig, 0, 16).with("EXPR", expr)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);
    check(
        &ast,
        expect![[r#"
            DOCUMENT @ 0..16
              STATEMENT @ 0..16
                ROUTINE_DECLARATION @ 0..16
                  BAREWORD @ 0..3 "sub"
                  WHITESPACE @ 3..4 " "
                  BAREWORD @ 4..5 "f"
                  SIGNATURE @ 5..9
                    ENTER_DELIMITER @ 5..6 "("
                    PARAMETER @ 6..8
                      SCALAR @ 6..8 "$x"
                    EXIT_DELIMITER @ 8..9 ")"
                  WHITESPACE @ 9..10 " "
                  BLOCK @ 10..16
                    ENTER_DELIMITER @ 10..11 "{"
                    WHITESPACE @ 11..12 " "
                    STATEMENT @ 12..14
                      DECIMAL_NUMBER @ 12..13 "1"
                      SEMICOLON @ 13..14 ";"
                    WHITESPACE @ 14..15 " "
                    EXIT_DELIMITER @ 15..16 "}"
        "#]],
    );
}

#[test]
fn if_control_wraps_condition_and_block() {
    let orig: Arc<str> = Arc::from("if 1 { 2; }");

    let statementlist = m(&orig, 7, 9).push(int_statement(&orig, 7, 9));
    let blockoid = m(&orig, 5, 11).with("statementlist", statementlist);
    let pblock = m(&orig, 5, 11).with("blockoid", blockoid);
    let xblock = m(&orig, 3, 11).with("EXPR", int_expr(&orig, 3, 4)).with("pblock", pblock);
    let control = m(&orig, 0, 11).with("sym", m(&orig, 0, 2)).with("xblock", xblock);
    let stmt = m(&orig, 0, 11).with("statement_control", control);
    let doc = document(&orig, vec![stmt]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);
    assert_eq!(
        kinds(&ast),
        [
            ElementKind::BAREWORD,
            ElementKind::WHITESPACE,
            ElementKind::DECIMAL_NUMBER,
            ElementKind::WHITESPACE,
            ElementKind::ENTER_DELIMITER,
            ElementKind::WHITESPACE,
            ElementKind::DECIMAL_NUMBER,
            ElementKind::SEMICOLON,
            ElementKind::WHITESPACE,
            ElementKind::EXIT_DELIMITER,
        ]
    );
}

#[test]
fn statement_modifier_trails_the_expression() {
    let orig: Arc<str> = Arc::from("say 1 if 2;");
    let name = m(&orig, 0, 3).with("identifier", m(&orig, 0, 3));
    let longname = m(&orig, 0, 3).with("name", name);
    let arglist = m(&orig, 4, 5).with("EXPR", int_expr(&orig, 4, 5));
    let args = m(&orig, 4, 5).with("arglist", arglist);
    let call = m(&orig, 0, 5).with("longname", longname).with("args", args);
    let modifier = m(&orig, 6, 10)
        .with("sym", m(&orig, 6, 8))
        .with("modifier_expr", int_expr(&orig, 9, 10));
    let stmt = m(&orig, 0, 11).with("EXPR", call).with("statement_mod_cond", modifier);
    let doc = document(&orig, vec![stmt]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);
    assert_eq!(
        kinds(&ast),
        [
            ElementKind::BAREWORD,
            ElementKind::WHITESPACE,
            ElementKind::DECIMAL_NUMBER,
            ElementKind::WHITESPACE,
            ElementKind::BAREWORD,
            ElementKind::WHITESPACE,
            ElementKind::DECIMAL_NUMBER,
            ElementKind::SEMICOLON,
        ]
    );
}

#[test]
fn method_call_splits_into_dot_and_name() {
    let orig: Arc<str> = Arc::from("1.say;");
    let name = m(&orig, 2, 5).with("identifier", m(&orig, 2, 5));
    let longname = m(&orig, 2, 5).with("name", name);
    let methodop = m(&orig, 2, 5).with("longname", longname);
    let dottyop = m(&orig, 2, 5).with("methodop", methodop);
    let dotty = m(&orig, 1, 5).with("sym", m(&orig, 1, 2)).with("dottyop", dottyop);
    let expr = m(&orig, 0, 5).with("dotty", dotty).push(int_expr(&orig, 0, 1));
    let doc = document(&orig, vec![m(&orig, 0, 6).with("EXPR", expr)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);
    assert_eq!(
        kinds(&ast),
        [
            ElementKind::DECIMAL_NUMBER,
            ElementKind::POSTFIX_OPERATOR,
            ElementKind::BAREWORD,
            ElementKind::SEMICOLON,
        ]
    );
}

#[test]
fn anomalous_gap_text_degrades_to_unparsed() {
    let orig: Arc<str> = Arc::from("1;@@\n2;");
    let doc = document(&orig, vec![int_statement(&orig, 0, 2), int_statement(&orig, 5, 7)]);

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);

    let unparsed = find_kind(&ast, ElementKind::UNPARSED).expect("unparsed leaf");
    assert_eq!(ast.tree()[unparsed].content(), Some("@@"));
    assert_eq!(ast.diagnostics().len(), 1);
    assert!(ast.diagnostics()[0].message().contains("unparsed text"));
}

#[test]
fn empty_program_builds_an_empty_root() {
    let orig: Arc<str> = Arc::from("");
    let doc = m(&orig, 0, 0).with_empty("statementlist");

    let ast = build(&doc).unwrap();
    assert_invariants(&ast, &orig);
    assert!(ast.start().is_none());
    check(
        &ast,
        expect![[r#"
            DOCUMENT @ 0..0
        "#]],
    );
}

#[test]
fn unrecognized_statement_shape_aborts_the_build() {
    let orig: Arc<str> = Arc::from("x");
    let stmt = m(&orig, 0, 1).with("mystery", m(&orig, 0, 1)).with_empty("hollow");
    let doc = document(&orig, vec![stmt]);

    let err = build(&doc).unwrap_err();
    assert_eq!(err.production(), "statement");
    let message = err.to_string();
    assert!(message.contains("mystery"));
    assert!(message.contains("hollow"));
}

#[test]
fn operator_with_wrong_arity_reports_the_expression_shape() {
    let orig: Arc<str> = Arc::from("-1;");
    let expr = m(&orig, 0, 2)
        .with("prefix", m(&orig, 0, 1))
        .push(int_expr(&orig, 1, 2))
        .push(int_expr(&orig, 1, 2));
    let doc = document(&orig, vec![m(&orig, 0, 3).with("EXPR", expr)]);

    let err = build(&doc).unwrap_err();
    assert_eq!(err.production(), "EXPR");
    assert!(err.to_string().contains("prefix"));
}

#[test]
fn fatal_errors_render_as_diagnostics() {
    let orig: Arc<str> = Arc::from("1;\n");
    let stmt = m(&orig, 0, 2).with("mystery", m(&orig, 0, 1));
    let doc = document(&orig, vec![stmt]);

    let err = build(&doc).unwrap_err();
    let diagnostic = err.into_diagnostic();
    assert_eq!(diagnostic.range(), TextRange::new(0.into(), 2.into()));

    let rendered = diagnostic.render(&Renderer::plain(), "demo.raku", orig.as_ref()).to_string();
    assert!(rendered.contains("unhandled `statement` match shape"));
    assert!(rendered.contains("demo.raku"));
}

#[test]
fn rethreading_is_idempotent() {
    let orig: Arc<str> = Arc::from("1;\n# hi\n2;");
    let doc = document(&orig, vec![int_statement(&orig, 0, 2), int_statement(&orig, 8, 10)]);

    let mut ast = build(&doc).unwrap();
    let before = kinds(&ast);
    let root = ast.root();
    crate::thread::thread(ast.tree_mut(), root);
    assert_eq!(kinds(&ast), before);
    assert_invariants(&ast, &orig);
}

#[test]
fn inverted_gap_interval_is_skipped_with_a_diagnostic() {
    use crate::factory::Factory;

    let mut f = Factory::new("ab", true);
    let second = f.tree.alloc(Element::leaf(
        ElementKind::BAREWORD,
        TextRange::new(1.into(), 2.into()),
        "b",
    ));
    let first = f.tree.alloc(Element::leaf(
        ElementKind::BAREWORD,
        TextRange::new(0.into(), 1.into()),
        "a",
    ));
    let parent = f.tree.alloc(Element::branch(
        ElementKind::STATEMENT,
        TextRange::new(0.into(), 2.into()),
        vec![second, first],
    ));

    crate::gaps::fill(&mut f, parent);
    assert!(f.diagnostics.iter().any(|d| d.message().contains("inverted gap")));

    // Without the debug flag the hole is skipped silently.
    let mut quiet = Factory::new("ab", false);
    let second = quiet.tree.alloc(Element::leaf(
        ElementKind::BAREWORD,
        TextRange::new(1.into(), 2.into()),
        "b",
    ));
    let first = quiet.tree.alloc(Element::leaf(
        ElementKind::BAREWORD,
        TextRange::new(0.into(), 1.into()),
        "a",
    ));
    let parent = quiet.tree.alloc(Element::branch(
        ElementKind::STATEMENT,
        TextRange::new(0.into(), 2.into()),
        vec![second, first],
    ));
    crate::gaps::fill(&mut quiet, parent);
    assert!(!quiet.diagnostics.iter().any(|d| d.message().contains("inverted gap")));
}

#[test]
fn debug_builder_flag_is_threaded_through() {
    let orig: Arc<str> = Arc::from("42");
    let doc = document(&orig, vec![m(&orig, 0, 2).with("EXPR", int_expr(&orig, 0, 2))]);

    let ast = Builder::new().debug(true).build(&doc).unwrap();
    assert_invariants(&ast, &orig);
    assert!(ast.diagnostics().is_empty());
}
