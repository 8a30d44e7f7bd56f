//! Feature-guard predicate.
//!
//! A [`FeatureSet`] decides calls of the form `has('name')` from lists of
//! enabled and disabled features, so that dead-branch elimination can strip
//! code for features a build leaves out.

use std::collections::BTreeSet;

use arbor_syntax::Node;

use crate::chain::BoxedFilter;
use crate::dead_branch::{Predicate, Verdict, dead_branch_filter};

/// Default name of the guard function.
pub const DEFAULT_GUARD: &str = "has";

/// Known features and the verdicts their guards produce.
///
/// Enabling a feature removes it from the disabled list and vice versa, so
/// the last call wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureSet {
    enabled: BTreeSet<String>,
    disabled: BTreeSet<String>,
    unlisted: Verdict,
    guard: String,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureSet {
    /// Creates an empty set. Unlisted features stay undetermined.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: BTreeSet::new(),
            disabled: BTreeSet::new(),
            unlisted: Verdict::Next,
            guard: DEFAULT_GUARD.to_string(),
        }
    }

    /// Marks `feature` as present.
    #[must_use]
    pub fn enable(mut self, feature: impl Into<String>) -> Self {
        let feature = feature.into();
        self.disabled.remove(&feature);
        self.enabled.insert(feature);
        self
    }

    /// Marks `feature` as absent.
    #[must_use]
    pub fn disable(mut self, feature: impl Into<String>) -> Self {
        let feature = feature.into();
        self.enabled.remove(&feature);
        self.disabled.insert(feature);
        self
    }

    /// Enables every feature in `features`.
    #[must_use]
    pub fn with_enabled<I, S>(self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        features.into_iter().fold(self, Self::enable)
    }

    /// Disables every feature in `features`.
    #[must_use]
    pub fn with_disabled<I, S>(self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        features.into_iter().fold(self, Self::disable)
    }

    /// Sets the verdict for features in neither list.
    #[must_use]
    pub fn with_unlisted(mut self, verdict: Verdict) -> Self {
        self.unlisted = verdict;
        self
    }

    /// Treats every unlisted feature as absent.
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_unlisted(Verdict::Fail)
    }

    /// Sets the name of the guard function.
    #[must_use]
    pub fn with_guard(mut self, name: impl Into<String>) -> Self {
        self.guard = name.into();
        self
    }

    /// Name of the guard function.
    #[must_use]
    pub fn guard(&self) -> &str {
        &self.guard
    }

    /// Verdict for a feature name.
    #[must_use]
    pub fn verdict(&self, feature: &str) -> Verdict {
        if self.enabled.contains(feature) {
            Verdict::Pass
        } else if self.disabled.contains(feature) {
            Verdict::Fail
        } else {
            self.unlisted
        }
    }

    /// Returns the feature name when `node` is a guard call with a single
    /// string argument.
    #[must_use]
    pub fn guarded_feature<'n>(&self, node: &'n Node) -> Option<&'n str> {
        let Node::Call(call) = node else {
            return None;
        };
        if call.expression.as_identifier() != Some(self.guard.as_str()) {
            return None;
        }
        match call.args.as_slice() {
            [argument] => argument.as_string(),
            _ => None,
        }
    }

    /// Builds a dead-branch filter that decides guards with this set.
    #[must_use]
    pub fn filter(&self) -> BoxedFilter<'_> {
        dead_branch_filter(move |node: &Node| self.test(node))
    }
}

impl Predicate for FeatureSet {
    fn test(&self, node: &Node) -> Verdict {
        self.guarded_feature(node)
            .map_or(Verdict::Next, |feature| self.verdict(feature))
    }
}
