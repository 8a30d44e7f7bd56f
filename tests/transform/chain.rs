//! Integration tests for the filter chain

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use arbor_foundation::ErrorKind;
use arbor_syntax::{Node, NodeKind, Outcome};
use arbor_transform::{BoxedFilter, Filter, Next, fn_filter, generate, transform};

fn compact(tree: &Node) -> String {
    generate(tree, false, false).unwrap()
}

/// Records `label:Kind` for every node it sees, then continues.
fn recorder<'a>(label: &'static str, log: &Rc<RefCell<Vec<String>>>) -> BoxedFilter<'a> {
    let log = Rc::clone(log);
    fn_filter(move |node: Node, next: Next<'_>| {
        log.borrow_mut().push(format!("{label}:{}", node.kind()));
        next.proceed(node)
    })
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn filters_run_in_order_before_children() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let filters = [recorder("a", &log), recorder("b", &log)];
    transform("x;", &filters).unwrap();
    assert_eq!(
        *log.borrow(),
        vec![
            "a:Toplevel",
            "b:Toplevel",
            "a:SimpleStatement",
            "b:SimpleStatement",
            "a:Identifier",
            "b:Identifier",
        ]
    );
}

#[test]
fn siblings_are_walked_left_to_right() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let names = Rc::clone(&log);
    let filters = [fn_filter(move |node: Node, next: Next<'_>| {
        if let Some(name) = node.as_identifier() {
            names.borrow_mut().push(name.to_string());
        }
        next.proceed(node)
    })];
    transform("a(b, c + d); e ? f : g", &filters).unwrap();
    assert_eq!(*log.borrow(), vec!["a", "b", "c", "d", "e", "f", "g"]);
}

// =============================================================================
// Replacement and short-circuit
// =============================================================================

#[test]
fn literal_replacement() {
    let clamp = fn_filter(|node: Node, next: Next<'_>| match node {
        Node::Number(n) if n > 5.0 => next.replace(Node::number(5.0)),
        other => next.proceed(other),
    });
    let tree = transform("var a = 1, b = 10;", &[clamp]).unwrap();
    assert_eq!(compact(&tree), "var a=1,b=5");
}

#[test]
fn later_filters_see_replacement() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let rename = fn_filter(|node: Node, next: Next<'_>| {
        let name = node.as_identifier().map(str::to_owned);
        match name.as_deref() {
            Some("old") => next.replace(Node::identifier("new")),
            _ => next.proceed(node),
        }
    });
    let seen = Rc::clone(&log);
    let observe = fn_filter(move |node: Node, next: Next<'_>| {
        if let Some(name) = node.as_identifier() {
            seen.borrow_mut().push(name.to_string());
        }
        next.proceed(node)
    });
    let tree = transform("old()", &[rename, observe]).unwrap();
    assert_eq!(*log.borrow(), vec!["new"]);
    assert_eq!(compact(&tree), "new()");
}

#[test]
fn returning_without_next_skips_rest_and_children() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let stop_at_calls = fn_filter(|node: Node, next: Next<'_>| {
        if node.kind() == NodeKind::Call {
            Ok(Outcome::Node(node))
        } else {
            next.proceed(node)
        }
    });
    let filters = [stop_at_calls, recorder("after", &log)];
    transform("f(x)", &filters).unwrap();
    assert_eq!(*log.borrow(), vec!["after:Toplevel", "after:SimpleStatement"]);
}

#[test]
fn replacement_is_descended() {
    let expand = fn_filter(|node: Node, next: Next<'_>| {
        let name = node.as_identifier().map(str::to_owned);
        match name.as_deref() {
            Some("pair") => next.replace(Node::call(
                Node::identifier("make"),
                vec![Node::identifier("one"), Node::identifier("two")],
            )),
            Some("two") => next.replace(Node::number(2.0)),
            _ => next.proceed(node),
        }
    });
    let tree = transform("x = pair", &[expand]).unwrap();
    assert_eq!(compact(&tree), "x=make(one,2)");
}

#[test]
fn removal_drops_list_elements() {
    let drop_debugger = fn_filter(|node: Node, next: Next<'_>| {
        if node.kind() == NodeKind::Debugger {
            Ok(Outcome::Removed)
        } else {
            next.proceed(node)
        }
    });
    let tree = transform("a(); debugger; b(); debugger", &[drop_debugger]).unwrap();
    assert_eq!(compact(&tree), "a();b()");
}

// =============================================================================
// Filter trait
// =============================================================================

struct CountCalls {
    calls: Rc<Cell<usize>>,
}

impl Filter for CountCalls {
    fn apply(&self, node: Node, next: Next<'_>) -> arbor_foundation::Result<Outcome> {
        if node.kind() == NodeKind::Call {
            self.calls.set(self.calls.get() + 1);
        }
        next.proceed(node)
    }

    fn name(&self) -> &str {
        "count-calls"
    }
}

#[test]
fn custom_filter_types() {
    let calls = Rc::new(Cell::new(0));
    let counter = CountCalls {
        calls: Rc::clone(&calls),
    };
    assert_eq!(counter.name(), "count-calls");

    let filters: [BoxedFilter<'_>; 1] = [Box::new(counter)];
    transform("f(g(), h()); if (i()) j()", &filters).unwrap();
    assert_eq!(calls.get(), 5);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn filter_errors_halt_traversal() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let fail = fn_filter(|node: Node, next: Next<'_>| {
        if node.as_identifier() == Some("bad") {
            Err(arbor_foundation::Error::filter("bad identifier"))
        } else {
            next.proceed(node)
        }
    });
    let filters = [fail, recorder("seen", &log)];
    let err = transform("ok(); bad(); later()", &filters).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Filter(_)));
    // Toplevel, then `ok()` in full, then `bad()` up to its callee.
    assert_eq!(log.borrow().len(), 6, "{:?}", log.borrow());
    assert_eq!(log.borrow().last().map(String::as_str), Some("seen:Call"));
}

#[test]
fn misplaced_replacement_is_structural() {
    let bad = fn_filter(|node: Node, next: Next<'_>| {
        let name = node.as_identifier().map(str::to_owned);
        match name.as_deref() {
            Some("x") => next.replace(Node::EmptyStatement),
            _ => next.proceed(node),
        }
    });
    let err = transform("f(x)", &[bad]).unwrap_err();
    assert!(matches!(
        &err.kind,
        ErrorKind::Structural { node, field, .. } if node == "Call" && field == "args"
    ));
}
