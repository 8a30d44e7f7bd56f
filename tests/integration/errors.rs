//! Error reporting across layers

use arbor::transform::transform;
use arbor::{Error, ErrorKind, Next, Node, NodeKind, Outcome, fn_filter, parse};

// =============================================================================
// Parse errors
// =============================================================================

#[test]
fn parse_error_display() {
    let err = transform("var = 1;", &[]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ParseError { line: 1, .. }));
    assert!(err.to_string().starts_with("parse error at 1:5"), "{err}");
}

#[test]
fn parse_errors_stop_before_filters_run() {
    let filter = fn_filter(|_: Node, _: Next<'_>| -> arbor::Result<Outcome> {
        panic!("filters must not run on unparsable input")
    });
    assert!(transform("if (", &[filter]).is_err());
}

// =============================================================================
// Structural errors
// =============================================================================

#[test]
fn removing_a_required_child() {
    let drop_callee = fn_filter(|node: Node, next: Next<'_>| {
        if node.as_identifier() == Some("f") {
            Ok(Outcome::Removed)
        } else {
            next.proceed(node)
        }
    });
    let err = transform("x = f()", &[drop_callee]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "structural error in Call.expression: an expression is required and cannot be removed"
    );
    let context = err.context.expect("descent frames");
    assert_eq!(context.stack.first().map(String::as_str), Some("Call.expression"));
    assert_eq!(context.stack.last().map(String::as_str), Some("Toplevel.body"));
}

#[test]
fn statement_in_expression_position() {
    let to_statement = fn_filter(|node: Node, next: Next<'_>| {
        if node.kind() == NodeKind::Number {
            next.replace(Node::EmptyStatement)
        } else {
            next.proceed(node)
        }
    });
    let err = transform("a = [1]", &[to_statement]).unwrap_err();
    match err.kind {
        ErrorKind::Structural { node, field, message } => {
            assert_eq!(node, "Array");
            assert_eq!(field, "elements");
            assert_eq!(message, "expected an expression, found EmptyStatement");
        }
        other => panic!("expected structural error, got {other}"),
    }
}

#[test]
fn removed_statements_become_empty() {
    let drop_calls = fn_filter(|node: Node, next: Next<'_>| {
        if node.kind() == NodeKind::SimpleStatement {
            Ok(Outcome::Removed)
        } else {
            next.proceed(node)
        }
    });
    let tree = transform("while (x) y(); if (a) b(); else c()", &[drop_calls]).unwrap();
    assert_eq!(tree, parse("while (x); if (a);").unwrap());
}

// =============================================================================
// Filter errors
// =============================================================================

#[test]
fn filter_error_passes_through() {
    let reject = fn_filter(|node: Node, next: Next<'_>| {
        if node.kind() == NodeKind::Debugger {
            Err(Error::filter("debugger statements are not allowed"))
        } else {
            next.proceed(node)
        }
    });
    let err = transform("function f() { debugger }", &[reject]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "filter error: debugger statements are not allowed"
    );
}

#[test]
fn removed_root_is_an_empty_program() {
    let drop_all = fn_filter(|_: Node, _: Next<'_>| Ok(Outcome::Removed));
    let tree = transform("a(); b()", &[drop_all]).unwrap();
    assert_eq!(tree, Node::EmptyStatement);
    assert_eq!(arbor::generate(&tree, false, false).unwrap(), ";");
}
