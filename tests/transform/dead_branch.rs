//! Integration tests for dead-branch elimination

use arbor_syntax::Node;
use arbor_transform::{
    FeatureSet, Next, Verdict, dead_branch_filter, fn_filter, generate, transform,
};

fn prune(source: &str, features: &FeatureSet) -> String {
    let tree = transform(source, &[features.filter()]).unwrap();
    generate(&tree, false, false).unwrap()
}

fn target() -> FeatureSet {
    FeatureSet::new().enable("target")
}

// =============================================================================
// Feature guards
// =============================================================================

#[test]
fn strips_else_branch() {
    assert_eq!(
        prune("if (has('target')) { a() } else { b() }", &target()),
        "{a()}"
    );
}

#[test]
fn strips_then_branch() {
    let features = FeatureSet::new().disable("target");
    assert_eq!(
        prune("if (has('target')) { a() } else { b() }", &features),
        "{b()}"
    );
    assert_eq!(prune("if (has('target')) a(); c()", &features), ";c()");
}

#[test]
fn nested_else_if_chain() {
    let features = FeatureSet::new().disable("a").enable("b");
    let source = "if (has('a')) { 1 } else if (has('b')) { 2 } else { 3 }";
    assert_eq!(prune(source, &features), "{2}");
}

#[test]
fn nested_guard_inside_kept_branch() {
    let source = "if (has('target')) { if (has('other')) { a() } else { b() } }";
    let features = target().disable("other");
    assert_eq!(prune(source, &features), "{{b()}}");
}

#[test]
fn ternary_in_expression_position() {
    assert_eq!(prune("x = has('target') ? 1 : 2", &target()), "x=1");
    assert_eq!(prune("f(has('nope') ? a : b)", &target().strict()), "f(b)");
}

#[test]
fn logical_combinations() {
    let features = FeatureSet::new().enable("a").disable("b");
    assert_eq!(prune("if (has('a') && !has('b')) x()", &features), "x()");
    assert_eq!(prune("if (has('a') && has('b')) x(); else y()", &features), "y()");
    assert_eq!(prune("if (has('b') || has('a')) x()", &features), "x()");
}

#[test]
fn unknown_features_are_kept() {
    let source = r#"if(has("unknown"))a();else b()"#;
    assert_eq!(prune(source, &target()), source);
    assert_eq!(
        prune("if (has('unknown')) a(); else b()", &target().strict()),
        "b()"
    );
}

#[test]
fn partial_knowledge_is_not_folded() {
    // `false && x` is false at run time, but x is still evaluated.
    let features = FeatureSet::new().disable("off");
    let source = r#"if(has("off")&&x())a()"#;
    assert_eq!(prune(source, &features), source);
}

#[test]
fn enabled_guard_with_runtime_flag_keeps_ternary() {
    assert_eq!(
        prune("has('target') && someRuntimeFlag() ? 1 : 2", &target()),
        r#"has("target")&&someRuntimeFlag()?1:2"#
    );
    let source = r#"x=someRuntimeFlag()&&has("target")?a:b"#;
    assert_eq!(prune(source, &target()), source);
}

#[test]
fn guard_must_be_a_plain_call_with_one_string() {
    for source in [
        r#"if(has(name))a()"#,
        r#"if(has("target","x"))a()"#,
        r#"if(obj.has("target"))a()"#,
        r#"if(other("target"))a()"#,
    ] {
        assert_eq!(prune(source, &target()), source);
    }
}

#[test]
fn custom_guard_name() {
    let features = target().with_guard("feature");
    assert_eq!(prune("if (feature('target')) a()", &features), "a()");
    let source = r#"if(has("target"))a()"#;
    assert_eq!(prune(source, &features), source);
}

#[test]
fn pruning_inside_functions_and_loops() {
    let source = "function f() { while (x) { if (has('target')) go(); else stop() } }";
    assert_eq!(prune(source, &target()), "function f(){while(x){go()}}");
}

// =============================================================================
// Custom predicates
// =============================================================================

#[test]
fn closure_predicate() {
    let debug_off = |node: &Node| {
        if node.as_identifier() == Some("DEBUG") {
            Verdict::Fail
        } else {
            Verdict::Next
        }
    };
    let tree = transform("if (DEBUG) log(); run()", &[dead_branch_filter(debug_off)]).unwrap();
    assert_eq!(generate(&tree, false, false).unwrap(), ";run()");
}

#[test]
fn literal_conditions_fold_without_a_predicate() {
    let tree = transform(
        "if (0) a(); if (!0) b(); x = 1 ? c : d",
        &[dead_branch_filter(|_: &Node| Verdict::Next)],
    )
    .unwrap();
    assert_eq!(generate(&tree, false, false).unwrap(), ";b();x=c");
}

#[test]
fn sees_rewrites_from_earlier_filters() {
    let inline_dev = fn_filter(|node: Node, next: Next<'_>| match node {
        Node::If(mut branch) if branch.condition.as_identifier() == Some("DEV") => {
            *branch.condition = Node::Boolean(false);
            next.replace(Node::If(branch))
        }
        other => next.proceed(other),
    });
    let prune = dead_branch_filter(|_: &Node| Verdict::Next);
    let tree = transform("if (DEV) check(); main()", &[inline_dev, prune]).unwrap();
    assert_eq!(generate(&tree, false, false).unwrap(), ";main()");
}
