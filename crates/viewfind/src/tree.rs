//! The live view tree seen by predicates and handles.
//!
//! A [`ViewTree`] is the collaborator that owns the real hierarchy. The core
//! only ever reads it through this trait, one query at a time, and never
//! remembers what a query returned.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::predicate::Predicate;
use crate::result::{FinderError, FinderResult};

/// Opaque reference to a node inside one [`ViewTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Create a node id from a tree-specific index
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The tree-specific index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Numeric resource identifier assigned to a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attributes of a single view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// Resource id, if the view has one
    pub resource_id: Option<ResourceId>,
    /// Fully-qualified runtime class name
    pub class_name: String,
    /// Rendered text
    pub text: Option<String>,
    /// Accessibility content description
    pub content_description: Option<String>,
    /// Whether the view itself is visible
    pub displayed: bool,
}

impl View {
    /// Create a displayed view of the given class
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            resource_id: None,
            class_name: class_name.into(),
            text: None,
            content_description: None,
            displayed: true,
        }
    }

    /// Set the resource id
    #[must_use]
    pub const fn with_id(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    /// Set the rendered text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the content description
    #[must_use]
    pub fn with_content_description(mut self, description: impl Into<String>) -> Self {
        self.content_description = Some(description.into());
        self
    }

    /// Mark the view hidden
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Class name without its package
    #[must_use]
    pub fn simple_class_name(&self) -> &str {
        self.class_name
            .rsplit_once('.')
            .map_or(self.class_name.as_str(), |(_, simple)| simple)
    }
}

/// Read access to a live view hierarchy.
///
/// Implementations answer structural questions about the current state and
/// provide the single-match query primitive. Nodes that no longer exist
/// return `None` from [`ViewTree::view`].
pub trait ViewTree {
    /// Root of the hierarchy, if there is one
    fn root(&self) -> Option<NodeId>;

    /// Attributes of a node
    fn view(&self, node: NodeId) -> Option<&View>;

    /// Children of a node in drawing order
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Parent of a node
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Resolve the single node satisfying `predicate`.
    ///
    /// Returns `Ok(None)` when nothing matches and
    /// [`FinderError::AmbiguousMatch`] when more than one node does.
    /// [`scan_unique`] is a complete implementation.
    fn find_unique(&self, predicate: &Predicate) -> FinderResult<Option<NodeId>>;

    /// Whether a node is effectively visible: it and all its ancestors are
    /// displayed.
    fn is_displayed(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            match self.view(id) {
                Some(view) if view.displayed => current = self.parent(id),
                _ => return false,
            }
        }
        true
    }
}

/// Depth-first pre-order traversal of a [`ViewTree`]
#[derive(Clone)]
pub struct Traversal<'t> {
    tree: &'t dyn ViewTree,
    stack: Vec<NodeId>,
}

impl fmt::Debug for Traversal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("stack", &self.stack)
            .finish_non_exhaustive()
    }
}

impl Iterator for Traversal<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(node).iter().rev().copied());
        Some(node)
    }
}

/// Walk `tree` in traversal order, starting at its root
#[must_use]
pub fn traverse(tree: &dyn ViewTree) -> Traversal<'_> {
    Traversal {
        tree,
        stack: tree.root().into_iter().collect(),
    }
}

/// Reference implementation of [`ViewTree::find_unique`].
///
/// Takes the predicate's whole selection, so a second match is always
/// detected. Predicates that can select in one pass (path queries and the
/// ordinals built on them) cost one evaluation instead of one per node.
pub fn scan_unique(tree: &dyn ViewTree, predicate: &Predicate) -> FinderResult<Option<NodeId>> {
    match predicate.select(tree)?.as_slice() {
        [] => Ok(None),
        [node] => Ok(Some(*node)),
        _ => Err(FinderError::ambiguous_match(predicate.to_string())),
    }
}
