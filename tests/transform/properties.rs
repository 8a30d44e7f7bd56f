//! Property tests for the transform layer

use std::cell::RefCell;
use std::rc::Rc;

use arbor_syntax::visitor::{NodeCounter, walk_node};
use arbor_syntax::{Node, parse};
use arbor_transform::{FeatureSet, Next, fn_filter, generate, transform};
use proptest::prelude::*;

const FEATURES: &[&str] = &["a", "b", "c"];

/// A statement guarded by one or two features, with both branches marked.
fn guarded_statement() -> impl Strategy<Value = String> {
    let feature = prop::sample::select(FEATURES);
    (feature.clone(), feature, 0..4usize, 0..100u32).prop_map(|(f, g, shape, n)| match shape {
        0 => format!("if (has('{f}')) {{ on{n}() }} else {{ off{n}() }}"),
        1 => format!("x{n} = has('{f}') ? on{n} : off{n};"),
        2 => format!("if (has('{f}') && !has('{g}')) on{n}(); else if (has('{g}')) mid{n}(); else off{n}();"),
        _ => format!("plain{n}();"),
    })
}

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(guarded_statement(), 0..6).prop_map(|parts| parts.join("\n"))
}

fn feature_set() -> impl Strategy<Value = FeatureSet> {
    prop::collection::vec(any::<bool>(), FEATURES.len()).prop_map(|flags| {
        FEATURES
            .iter()
            .zip(flags)
            .fold(FeatureSet::new(), |set, (name, on)| {
                if on {
                    set.enable(*name)
                } else {
                    set.disable(*name)
                }
            })
    })
}

fn preorder(node: &Node, out: &mut Vec<String>) {
    out.push(node.kind().to_string());
    for child in node.children() {
        preorder(child, out);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// With every feature known, no guard survives.
    #[test]
    fn known_features_leave_no_guards(source in program(), features in feature_set()) {
        let tree = transform(source.as_str(), &[features.filter()]).unwrap();
        let out = generate(&tree, false, false).unwrap();
        prop_assert!(!out.contains("has("), "{}", out);
    }

    /// Pruned output is valid source, and pruning it again changes nothing.
    #[test]
    fn pruning_is_idempotent(source in program(), features in feature_set()) {
        let once = transform(source.as_str(), &[features.filter()]).unwrap();
        let printed = generate(&once, false, false).unwrap();
        let twice = transform(printed.as_str(), &[features.filter()]).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Pruning never adds nodes.
    #[test]
    fn pruning_shrinks_tree(source in program(), features in feature_set()) {
        let before = parse(&source).unwrap();
        let after = transform(before.clone(), &[features.filter()]).unwrap();

        let mut count_before = NodeCounter::default();
        walk_node(&mut count_before, &before);
        let mut count_after = NodeCounter::default();
        walk_node(&mut count_after, &after);
        prop_assert!(count_after.total <= count_before.total);
    }

    /// Filters see nodes in pre-order, the same order as a recursive walk.
    #[test]
    fn walk_order_is_preorder(source in program()) {
        let tree = parse(&source).unwrap();
        let mut expected = Vec::new();
        preorder(&tree, &mut expected);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let record = fn_filter(move |node: Node, next: Next<'_>| {
            log.borrow_mut().push(node.kind().to_string());
            next.proceed(node)
        });
        transform(tree, &[record]).unwrap();
        prop_assert_eq!(&*seen.borrow(), &expected);
    }
}
