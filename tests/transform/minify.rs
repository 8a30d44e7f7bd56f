//! Integration tests for the minifier

use arbor_syntax::parse;
use arbor_transform::{
    FeatureSet, GenerateConfig, generate, generate_with_config, minify, minify_filter, transform,
};

fn minified(source: &str) -> String {
    generate(&parse(source).unwrap(), true, false).unwrap()
}

#[test]
fn drops_empty_statements_and_blocks() {
    assert_eq!(minified(";;a();;{};b();{{}}"), "a();b()");
}

#[test]
fn empty_bodies_keep_their_statement() {
    assert_eq!(minified("if (a) {} else {}"), "if(a);");
    assert_eq!(minified("for (;;) {}"), "for(;;);");
    assert_eq!(minified("function f() { ; }"), "function f(){}");
}

#[test]
fn leaves_expressions_alone() {
    assert_eq!(minified("x = {}; y = []"), "x={};y=[]");
}

#[test]
fn minify_after_pruning() {
    let features = FeatureSet::new().disable("legacy");
    let tree = transform(
        "if (has('legacy')) { shim() } start(); if (has('legacy')) {} else {}",
        &[features.filter()],
    )
    .unwrap();
    assert_eq!(generate(&tree, false, false).unwrap(), ";start();{}");
    assert_eq!(generate(&tree, true, false).unwrap(), "start()");
}

#[test]
fn minify_filter_in_the_same_walk() {
    let features = FeatureSet::new().disable("legacy");
    let tree = transform(
        "if (has('legacy')) shim(); { if (has('legacy')) shim() } start()",
        &[features.filter(), minify_filter()],
    )
    .unwrap();
    assert_eq!(generate(&tree, false, false).unwrap(), "start()");
}

#[test]
fn generate_minifies_a_copy() {
    let tree = parse("a();;").unwrap();
    let config = GenerateConfig::minified();
    assert_eq!(generate_with_config(&tree, &config).unwrap(), "a()");
    assert_eq!(generate(&tree, false, false).unwrap(), "a();;");
    assert_eq!(minify(tree).unwrap(), parse("a()").unwrap());
}
