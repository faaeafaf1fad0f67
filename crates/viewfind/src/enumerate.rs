//! Index-bounded enumeration.
//!
//! The tree can only answer "which single node matches this predicate?", so
//! all matches are discovered one ordinal at a time: probe `base @ 0`,
//! `base @ 1`, ... until a probe reports that nothing matches. Each probe
//! rescans the tree, which makes a full enumeration quadratic in the number
//! of matches.

use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace, warn};

use crate::config::FinderConfig;
use crate::handle::{Displayed, ElementHandle, Exists, ViewAssertion};
use crate::predicate::Predicate;
use crate::result::{FinderError, FinderResult};
use crate::tree::ViewTree;

/// Ordered handles, one per match, in traversal order
pub type ResultSet = Vec<ElementHandle>;

/// The check used to decide whether an ordinal still has a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The match must exist and be displayed
    Displayed,
    /// The match must exist
    Exists,
}

impl Probe {
    /// Probe implied by a configuration
    #[must_use]
    pub const fn from_config(config: &FinderConfig) -> Self {
        if config.require_displayed {
            Self::Displayed
        } else {
            Self::Exists
        }
    }

    fn assertion(self) -> &'static dyn ViewAssertion {
        match self {
            Self::Displayed => &Displayed,
            Self::Exists => &Exists,
        }
    }
}

/// Lazy sequence of handles for every match of a base predicate.
///
/// Yields `Ok(handle)` per match, stops at the first "no match", and yields a
/// single `Err` for any other failure. It is fused either way.
pub struct Enumeration<'t> {
    tree: &'t dyn ViewTree,
    base: Predicate,
    probe: Probe,
    limit: usize,
    next_ordinal: usize,
    finished: bool,
}

impl<'t> Enumeration<'t> {
    /// Enumerate matches of `base` in `tree`
    #[must_use]
    pub fn new(tree: &'t dyn ViewTree, base: Predicate, config: &FinderConfig) -> Self {
        Self {
            tree,
            base,
            probe: Probe::from_config(config),
            limit: config.max_enumeration_steps,
            next_ordinal: 0,
            finished: false,
        }
    }

    /// Override the probe implied by the configuration
    #[must_use]
    pub const fn with_probe(mut self, probe: Probe) -> Self {
        self.probe = probe;
        self
    }

    /// Number of handles yielded so far
    #[must_use]
    pub const fn discovered(&self) -> usize {
        self.next_ordinal
    }
}

impl fmt::Debug for Enumeration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumeration")
            .field("base", &self.base)
            .field("probe", &self.probe)
            .field("next_ordinal", &self.next_ordinal)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl Iterator for Enumeration<'_> {
    type Item = FinderResult<ElementHandle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.next_ordinal >= self.limit {
            self.finished = true;
            warn!(
                limit = self.limit,
                predicate = %self.base,
                "enumeration hit its step bound"
            );
            return Some(Err(FinderError::EnumerationLimit { limit: self.limit }));
        }

        let handle = ElementHandle::new(self.base.at_ordinal(self.next_ordinal));
        match handle.check(self.tree, self.probe.assertion()) {
            Ok(()) => {
                trace!(ordinal = self.next_ordinal, "match found");
                self.next_ordinal += 1;
                Some(Ok(handle))
            }
            Err(err) if err.is_no_match() => {
                self.finished = true;
                debug!(
                    matches = self.next_ordinal,
                    predicate = %self.base,
                    "enumeration complete"
                );
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Enumeration<'_> {}

/// Collect every match of `base`; any failure discards the partial result
pub fn enumerate(
    tree: &dyn ViewTree,
    base: &Predicate,
    config: &FinderConfig,
) -> FinderResult<ResultSet> {
    Enumeration::new(tree, base.clone(), config).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::ViewHierarchy;
    use crate::tree::{NodeId, View};
    use std::cell::Cell;

    struct CountingTree<'a> {
        inner: &'a ViewHierarchy,
        queries: Cell<usize>,
    }

    impl<'a> CountingTree<'a> {
        fn new(inner: &'a ViewHierarchy) -> Self {
            Self {
                inner,
                queries: Cell::new(0),
            }
        }
    }

    impl ViewTree for CountingTree<'_> {
        fn root(&self) -> Option<NodeId> {
            self.inner.root()
        }

        fn view(&self, node: NodeId) -> Option<&View> {
            self.inner.view(node)
        }

        fn children(&self, node: NodeId) -> &[NodeId] {
            self.inner.children(node)
        }

        fn parent(&self, node: NodeId) -> Option<NodeId> {
            self.inner.parent(node)
        }

        fn find_unique(&self, predicate: &Predicate) -> FinderResult<Option<NodeId>> {
            self.queries.set(self.queries.get() + 1);
            crate::tree::scan_unique(self, predicate)
        }
    }

    fn list_of(texts: &[&str]) -> ViewHierarchy {
        let mut tree = ViewHierarchy::new();
        let root = tree.set_root(View::new("android.widget.ListView"));
        for text in texts {
            tree.add_child(root, View::new("android.widget.TextView").with_text(*text))
                .unwrap();
        }
        tree
    }

    fn resolved(tree: &dyn ViewTree, handles: &[ElementHandle]) -> Vec<NodeId> {
        handles.iter().map(|h| h.resolve(tree).unwrap()).collect()
    }

    #[test]
    fn test_k_matches_take_k_plus_one_queries() {
        for k in 0..5 {
            let texts: Vec<&str> = std::iter::repeat("Save").take(k).collect();
            let tree = list_of(&texts);
            let counting = CountingTree::new(&tree);
            let handles =
                enumerate(&counting, &Predicate::with_text("Save"), &FinderConfig::default())
                    .unwrap();
            assert_eq!(handles.len(), k);
            assert_eq!(counting.queries.get(), k + 1);
        }
    }

    #[test]
    fn test_order_matches_traversal() {
        let tree = list_of(&["a", "Save", "b", "Save", "Save"]);
        let base = Predicate::with_text("Save");
        let handles = enumerate(&tree, &base, &FinderConfig::default()).unwrap();
        let expected: Vec<NodeId> = crate::tree::traverse(&tree)
            .filter(|n| base.matches(&tree, *n).unwrap())
            .collect();
        assert_eq!(resolved(&tree, &handles), expected);
    }

    #[test]
    fn test_zero_matches_is_empty_not_error() {
        let tree = list_of(&["a", "b"]);
        let handles =
            enumerate(&tree, &Predicate::with_text("Missing"), &FinderConfig::default())
                .unwrap();
        assert!(handles.is_empty());
    }

    #[test]
    fn test_hidden_match_propagates_assertion_failure() {
        let mut tree = list_of(&["Save"]);
        let root = tree.root().unwrap();
        tree.add_child(root, View::new("android.widget.TextView").with_text("Save").hidden())
            .unwrap();

        let err = enumerate(&tree, &Predicate::with_text("Save"), &FinderConfig::default())
            .unwrap_err();
        assert!(matches!(err, FinderError::AssertionFailed { .. }));

        let lenient = FinderConfig::default().with_require_displayed(false);
        let handles = enumerate(&tree, &Predicate::with_text("Save"), &lenient).unwrap();
        assert_eq!(handles.len(), 2);
    }

    #[test]
    fn test_fault_discards_partial_result() {
        let tree = list_of(&["a", "b", "c"]);
        let faulty = Predicate::from_fn("faults on text c", |tree, node| {
            match tree.view(node).and_then(|v| v.text.as_deref()) {
                Some("c") => Err(FinderError::selector_fault("//c", "evaluation fault")),
                Some(_) => Ok(true),
                None => Ok(false),
            }
        });
        let mut lazy = Enumeration::new(&tree, faulty.clone(), &FinderConfig::default());
        assert!(matches!(
            lazy.next(),
            Some(Err(FinderError::SelectorEvaluationFault { .. }))
        ));
        assert!(lazy.next().is_none());

        let err = enumerate(&tree, &faulty, &FinderConfig::default()).unwrap_err();
        assert!(matches!(err, FinderError::SelectorEvaluationFault { .. }));
    }

    #[test]
    fn test_step_bound_is_an_error() {
        let tree = list_of(&["Save", "Save", "Save"]);
        let config = FinderConfig::default().with_max_enumeration_steps(2);
        let err = enumerate(&tree, &Predicate::with_text("Save"), &config).unwrap_err();
        assert_eq!(err, FinderError::EnumerationLimit { limit: 2 });
    }

    #[test]
    fn test_lazy_enumeration_is_fused() {
        let tree = list_of(&["Save"]);
        let mut lazy = Enumeration::new(&tree, Predicate::with_text("Save"), &FinderConfig::default());
        assert!(lazy.next().unwrap().is_ok());
        assert_eq!(lazy.discovered(), 1);
        assert!(lazy.next().is_none());
        assert!(lazy.next().is_none());
    }

    #[test]
    fn test_rerun_is_identical() {
        let tree = list_of(&["Save", "x", "Save"]);
        let base = Predicate::with_text("Save");
        let first = enumerate(&tree, &base, &FinderConfig::default()).unwrap();
        let second = enumerate(&tree, &base, &FinderConfig::default()).unwrap();
        assert_eq!(resolved(&tree, &first), resolved(&tree, &second));
    }
}
