//! Lazily-bound element handles.
//!
//! An [`ElementHandle`] holds a predicate, never a node. Every `check` or
//! `perform` resolves the predicate against the tree as it is at that moment,
//! so a handle may go stale (`NoMatchingElement`) or become ambiguous
//! (`AmbiguousMatch`) between calls.

use crate::predicate::Predicate;
use crate::result::{FinderError, FinderResult};
use crate::tree::{NodeId, ViewTree};

/// An assertion evaluated against the node a handle resolves to
pub trait ViewAssertion {
    /// Check the bound node
    fn check(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<()>;
}

impl<F> ViewAssertion for F
where
    F: Fn(&dyn ViewTree, NodeId) -> FinderResult<()>,
{
    fn check(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<()> {
        self(tree, node)
    }
}

/// An action performed on the node a handle resolves to
pub trait ViewAction<T: ?Sized> {
    /// Act on the bound node
    fn perform(&self, tree: &mut T, node: NodeId) -> FinderResult<()>;
}

impl<T, F> ViewAction<T> for F
where
    T: ?Sized,
    F: Fn(&mut T, NodeId) -> FinderResult<()>,
{
    fn perform(&self, tree: &mut T, node: NodeId) -> FinderResult<()> {
        self(tree, node)
    }
}

/// The node is effectively visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displayed;

impl ViewAssertion for Displayed {
    fn check(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<()> {
        if tree.is_displayed(node) {
            Ok(())
        } else {
            Err(FinderError::assertion_failed(format!(
                "'is displayed on the screen to the user' doesn't match view {node}"
            )))
        }
    }
}

/// The node exists; resolving it is the whole check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exists;

impl ViewAssertion for Exists {
    fn check(&self, _tree: &dyn ViewTree, _node: NodeId) -> FinderResult<()> {
        Ok(())
    }
}

/// The node's text equals the given string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasText(pub String);

impl ViewAssertion for HasText {
    fn check(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<()> {
        let actual = tree.view(node).and_then(|view| view.text.as_deref());
        if actual == Some(self.0.as_str()) {
            Ok(())
        } else {
            Err(FinderError::assertion_failed(format!(
                "expected text {:?} on view {node}, found {actual:?}",
                self.0
            )))
        }
    }
}

/// A reference to "the node matching this predicate", resolved on use
#[derive(Debug, Clone)]
pub struct ElementHandle {
    predicate: Predicate,
}

impl ElementHandle {
    /// Wrap a predicate
    #[must_use]
    pub const fn new(predicate: Predicate) -> Self {
        Self { predicate }
    }

    /// The wrapped predicate
    #[must_use]
    pub const fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// The node this handle currently binds to
    pub fn resolve(&self, tree: &dyn ViewTree) -> FinderResult<NodeId> {
        tree.find_unique(&self.predicate)?
            .ok_or_else(|| FinderError::no_matching_element(self.predicate.to_string()))
    }

    /// Run `assertion` against the currently bound node
    pub fn check(&self, tree: &dyn ViewTree, assertion: &dyn ViewAssertion) -> FinderResult<()> {
        let node = self.resolve(tree)?;
        assertion.check(tree, node)
    }

    /// Run `action` on the currently bound node
    pub fn perform<T: ViewTree>(&self, tree: &mut T, action: &dyn ViewAction<T>) -> FinderResult<()> {
        let node = self.resolve(&*tree)?;
        action.perform(tree, node)
    }
}
