//! Integration tests for the descent table
//!
//! Tests recipes against the node payloads and child rewriting through
//! [`descend`].

use arbor_foundation::ErrorKind;
use arbor_syntax::descent::SlotRef;
use arbor_syntax::{Node, NodeKind, Outcome, Role, descend, parse, recipe};

/// One program that contains every node kind.
const EVERYTHING: &str = "
    var a = 1; let b; const c = 'c';
    if (a) {} else ;
    while (a) do ; while (b)
    for (var i = 0; i < 1; i++) for (k in o) ;
    l: for (;;) { break l; continue }
    switch (a) { case 1: default: }
    try { throw a } catch (e) {} finally {}
    function f(x) { return function () { return this } }
    debugger;
    x = [null, true, {p: 1}], y(new Z(), a.b, a[b], -a, a++, a + b, a ? b : c);
";

fn all_nodes(node: &Node, out: &mut Vec<NodeKind>) {
    out.push(node.kind());
    for child in node.children() {
        all_nodes(child, out);
    }
}

// =============================================================================
// Recipes
// =============================================================================

#[test]
fn every_kind_has_a_matching_recipe() {
    let tree = parse(EVERYTHING).unwrap();
    let mut kinds = Vec::new();
    all_nodes(&tree, &mut kinds);
    kinds.sort();
    kinds.dedup();
    assert_eq!(kinds.len(), 46, "program should cover every kind: {kinds:?}");

    let mut stack = vec![&tree];
    while let Some(node) = stack.pop() {
        let slots = node.slots();
        match recipe(node.kind()) {
            Some(fields) => {
                assert_eq!(fields.len(), slots.len(), "{}", node.kind());
                for (field, slot) in fields.iter().zip(&slots) {
                    let matches = matches!(
                        (field.role, slot),
                        (Role::Literal, SlotRef::Literal)
                            | (Role::Child(_), SlotRef::Child(_))
                            | (Role::Optional(_), SlotRef::Optional(_))
                            | (Role::Sequence(_), SlotRef::Sequence(_))
                    );
                    assert!(matches, "{}.{} has the wrong shape", node.kind(), field.name);
                }
            }
            None => assert!(slots.is_empty(), "{} is a leaf", node.kind()),
        }
        stack.extend(node.children());
    }
}

#[test]
fn children_respect_slots() {
    let tree = parse(EVERYTHING).unwrap();
    let mut stack = vec![&tree];
    while let Some(node) = stack.pop() {
        if let Some(fields) = recipe(node.kind()) {
            for (field, slot) in fields.iter().zip(node.slots()) {
                let accepts = match field.role {
                    Role::Literal => continue,
                    Role::Child(s) | Role::Optional(s) | Role::Sequence(s) => s,
                };
                for child in slot.nodes() {
                    assert!(
                        accepts.accepts(child.kind()),
                        "{}.{} holds {}",
                        node.kind(),
                        field.name,
                        child.kind()
                    );
                }
            }
        }
        stack.extend(node.children());
    }
}

// =============================================================================
// Descend
// =============================================================================

#[test]
fn identity_walk_preserves_tree() {
    fn walk(node: Node) -> arbor_foundation::Result<Outcome> {
        descend(node, walk).map(Outcome::Node)
    }

    let tree = parse(EVERYTHING).unwrap();
    let Outcome::Node(rewritten) = walk(tree.clone()).unwrap() else {
        panic!("root removed");
    };
    assert_eq!(rewritten, tree);
}

#[test]
fn children_are_visited_in_source_order() {
    let tree = parse("f(a, b); g(c)").unwrap();
    let mut order = Vec::new();
    fn walk(node: Node, order: &mut Vec<String>) -> arbor_foundation::Result<Outcome> {
        if let Some(name) = node.as_identifier() {
            order.push(name.to_string());
        }
        descend(node, |child| walk(child, order)).map(Outcome::Node)
    }
    walk(tree, &mut order).unwrap();
    assert_eq!(order, vec!["f", "a", "b", "g", "c"]);
}

#[test]
fn removals_follow_field_roles() {
    // Sequence element dropped, optional cleared, statement child emptied.
    let tree = parse("if (a) drop(); else drop(); keep(); var v = drop();").unwrap();
    fn walk(node: Node) -> arbor_foundation::Result<Outcome> {
        let is_drop = match &node {
            Node::SimpleStatement(s) => matches!(&*s.body, Node::Call(c) if c.expression.as_identifier() == Some("drop")),
            Node::Call(c) => c.expression.as_identifier() == Some("drop"),
            _ => false,
        };
        if is_drop {
            Ok(Outcome::Removed)
        } else {
            descend(node, walk).map(Outcome::Node)
        }
    }
    let Outcome::Node(result) = walk(tree).unwrap() else {
        panic!("root removed");
    };
    assert_eq!(arbor_syntax::pretty::print_compact(&result), "if(a);keep();var v");
}

#[test]
fn removing_required_expression_is_structural() {
    let tree = parse("x = a + b").unwrap();
    fn walk(node: Node) -> arbor_foundation::Result<Outcome> {
        if node.as_identifier() == Some("b") {
            Ok(Outcome::Removed)
        } else {
            descend(node, walk).map(Outcome::Node)
        }
    }
    let err = walk(tree).unwrap_err();
    match &err.kind {
        ErrorKind::Structural { node, field, .. } => {
            assert_eq!(node, "Binary");
            assert_eq!(field, "right");
        }
        other => panic!("expected structural error, got {other}"),
    }
    let frames = &err.context.as_ref().unwrap().stack;
    assert_eq!(
        frames,
        &vec![
            "Binary.right".to_string(),
            "Assign.right".to_string(),
            "SimpleStatement.body".to_string(),
            "Toplevel.body".to_string(),
        ]
    );
}

#[test]
fn replacement_must_fit_slot() {
    let tree = parse("f(x)").unwrap();
    fn walk(node: Node) -> arbor_foundation::Result<Outcome> {
        if node.as_identifier() == Some("x") {
            Ok(Outcome::Node(Node::Debugger))
        } else {
            descend(node, walk).map(Outcome::Node)
        }
    }
    let err = walk(tree).unwrap_err();
    assert!(matches!(
        &err.kind,
        ErrorKind::Structural { node, field, .. } if node == "Call" && field == "args"
    ));
}

#[test]
fn leaves_are_returned_unchanged() {
    let leaf = Node::identifier("x");
    let result = descend(leaf.clone(), |_| panic!("leaves have no children")).unwrap();
    assert_eq!(result, leaf);
}
