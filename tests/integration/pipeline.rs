//! Source-to-source pipeline tests
//!
//! Tests the full parse, filter, and generate flow through the root crate.

use arbor::transform::{Source, transform};
use arbor::{
    FeatureSet, GenerateConfig, Next, Node, fn_filter, generate, generate_with_config, parse,
};

// =============================================================================
// Literal rewriting
// =============================================================================

#[test]
fn replaces_number_literals() {
    let clamp = fn_filter(|node: Node, next: Next<'_>| match node {
        Node::Number(n) if n > 5.0 => next.replace(Node::number(5.0)),
        other => next.proceed(other),
    });
    let tree = transform("var a = 1, b = 10;", &[clamp]).unwrap();
    assert_eq!(generate(&tree, false, false).unwrap(), "var a=1,b=5");
}

#[test]
fn replaces_expression_with_literal() {
    let tree = transform(
        "a = 1 + 5",
        &[fn_filter(|node: Node, next: Next<'_>| match node {
            Node::Number(n) if n > 5.0 => next.replace(Node::number(5.0)),
            other => next.proceed(other),
        })],
    )
    .unwrap();
    assert_eq!(generate(&tree, false, false).unwrap(), "a=1+5");
}

#[test]
fn no_filters_is_identity() {
    let source = "function f(a) { return a ? [1, 'x'] : {k: null} }";
    let tree = transform(source, &[]).unwrap();
    assert_eq!(tree, parse(source).unwrap());
}

// =============================================================================
// Feature builds
// =============================================================================

const APP: &str = "
var log = has('debug') ? console.log : function () {};
if (has('legacy')) {
    polyfill();
} else if (has('modern')) {
    fast();
} else {
    slow();
}
function main() {
    if (has('debug')) { log('start') }
    run();
}
";

#[test]
fn production_build() {
    let features = FeatureSet::new().enable("modern").strict();
    let tree = transform(APP, &[features.filter()]).unwrap();
    assert_eq!(
        generate(&tree, true, false).unwrap(),
        "var log=function(){};{fast()}function main(){run()}"
    );
}

#[test]
fn debug_build() {
    let features = FeatureSet::new().with_enabled(["debug", "legacy"]);
    let tree = transform(APP, &[features.filter()]).unwrap();
    assert_eq!(
        generate(&tree, false, true).unwrap(),
        "var log = console.log;\n{\n    polyfill();\n}\nfunction main() {\n    {\n        log(\"start\");\n    }\n    run();\n}"
    );
}

#[test]
fn one_filter_serves_many_inputs() {
    let features = FeatureSet::new().enable("x").strict();
    let filters = [features.filter()];
    for (source, expected) in [
        ("if (has('x')) a()", "a()"),
        ("if (has('y')) a()", ";"),
        ("b = has('x') && has('y') ? 1 : 2", "b=2"),
    ] {
        let tree = transform(source, &filters).unwrap();
        assert_eq!(generate(&tree, false, false).unwrap(), expected);
    }
}

// =============================================================================
// Trees in, trees out
// =============================================================================

#[test]
fn json_tree_round_trip() {
    let tree = parse("if (has('a')) x(); else y()").unwrap();
    let json = serde_json::to_string(&tree).unwrap();
    let restored: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, tree);

    let features = FeatureSet::new().disable("a");
    let pruned = transform(Source::Tree(restored), &[features.filter()]).unwrap();
    assert_eq!(generate(&pruned, false, false).unwrap(), "y()");
}

#[test]
fn generate_config_matches_flags() {
    let tree = parse("if (a) { ; b() }").unwrap();
    for (minify, beautify) in [(false, false), (true, false), (false, true), (true, true)] {
        assert_eq!(
            generate(&tree, minify, beautify).unwrap(),
            generate_with_config(&tree, &GenerateConfig::from_flags(minify, beautify)).unwrap()
        );
    }
}
