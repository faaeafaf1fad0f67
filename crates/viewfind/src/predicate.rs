//! View predicates.
//!
//! A [`Predicate`] is a shared, immutable test over one node of a
//! [`ViewTree`]. It is evaluated against whatever the tree looks like at the
//! moment of the query and never caches anything between evaluations.

use std::fmt;
use std::sync::Arc;

use crate::result::FinderResult;
use crate::tree::{traverse, NodeId, ResourceId, ViewTree};

/// A boolean test over a node, with a human-readable description
pub trait Matcher: Send + Sync {
    /// Whether `node` satisfies this matcher in the current state of `tree`
    fn matches(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<bool>;

    /// Write a description of what this matcher accepts
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Every accepted node in traversal order, for matchers that can compute
    /// their whole selection in one pass. `None` means "ask node by node".
    fn select(&self, _tree: &dyn ViewTree) -> FinderResult<Option<Vec<NodeId>>> {
        Ok(None)
    }
}

/// A cheaply clonable view predicate
#[derive(Clone)]
pub struct Predicate {
    matcher: Arc<dyn Matcher>,
}

impl Predicate {
    /// Wrap a matcher
    #[must_use]
    pub fn new(matcher: impl Matcher + 'static) -> Self {
        Self {
            matcher: Arc::new(matcher),
        }
    }

    /// Build a predicate from a description and a plain function
    #[must_use]
    pub fn from_fn<F>(description: impl Into<String>, f: F) -> Self
    where
        F: Fn(&dyn ViewTree, NodeId) -> FinderResult<bool> + Send + Sync + 'static,
    {
        Self::new(FnMatcher {
            description: description.into(),
            f,
        })
    }

    /// Views whose resource id equals `id`; `None` matches nothing
    #[must_use]
    pub fn with_id(id: Option<ResourceId>) -> Self {
        Self::new(WithId(id))
    }

    /// Views whose class name ends with `suffix`
    #[must_use]
    pub fn with_class_name_suffix(suffix: impl Into<String>) -> Self {
        Self::new(WithClassNameSuffix(suffix.into()))
    }

    /// Views whose text is exactly `text`
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(WithText(text.into()))
    }

    /// Views whose content description is exactly `description`
    #[must_use]
    pub fn with_content_description(description: impl Into<String>) -> Self {
        Self::new(WithContentDescription(description.into()))
    }

    /// The `ordinal`-th (0-based) node satisfying this predicate
    #[must_use]
    pub fn at_ordinal(&self, ordinal: usize) -> Self {
        Self::new(OrdinalPredicate::new(self.clone(), ordinal))
    }

    /// Evaluate against `node`
    pub fn matches(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<bool> {
        self.matcher.matches(tree, node)
    }

    /// Every node satisfying this predicate, in traversal order
    pub fn select(&self, tree: &dyn ViewTree) -> FinderResult<Vec<NodeId>> {
        if let Some(selected) = self.matcher.select(tree)? {
            return Ok(selected);
        }
        let mut selected = Vec::new();
        for node in traverse(tree) {
            if self.matcher.matches(tree, node)? {
                selected.push(node);
            }
        }
        Ok(selected)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.matcher.describe(f)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({self})")
    }
}

/// A base predicate restricted to its `ordinal`-th match in traversal order.
///
/// The position is recounted from the root on every evaluation, so the same
/// value stays correct across tree mutations.
#[derive(Debug, Clone)]
pub struct OrdinalPredicate {
    base: Predicate,
    ordinal: usize,
}

impl OrdinalPredicate {
    /// Restrict `base` to its `ordinal`-th match
    #[must_use]
    pub const fn new(base: Predicate, ordinal: usize) -> Self {
        Self { base, ordinal }
    }

    /// The unrestricted predicate
    #[must_use]
    pub const fn base(&self) -> &Predicate {
        &self.base
    }

    /// The 0-based position selected
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }
}

impl Matcher for OrdinalPredicate {
    fn matches(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<bool> {
        if let Some(selected) = self.base.matcher.select(tree)? {
            return Ok(selected.get(self.ordinal) == Some(&node));
        }
        if !self.base.matches(tree, node)? {
            return Ok(false);
        }
        let mut seen = 0;
        for candidate in traverse(tree) {
            if candidate == node {
                return Ok(seen == self.ordinal);
            }
            if self.base.matches(tree, candidate)? {
                seen += 1;
                if seen > self.ordinal {
                    return Ok(false);
                }
            }
        }
        Ok(false)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "with index: <{}> {}", self.ordinal, self.base)
    }

    fn select(&self, tree: &dyn ViewTree) -> FinderResult<Option<Vec<NodeId>>> {
        let nth = self.base.select(tree)?.get(self.ordinal).copied();
        Ok(Some(nth.into_iter().collect()))
    }
}

struct WithId(Option<ResourceId>);

impl Matcher for WithId {
    fn matches(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<bool> {
        Ok(self.0.is_some() && tree.view(node).and_then(|view| view.resource_id) == self.0)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "with id: {id}"),
            None => f.write_str("with id: <unresolved>"),
        }
    }
}

struct WithClassNameSuffix(String);

impl Matcher for WithClassNameSuffix {
    fn matches(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<bool> {
        Ok(tree
            .view(node)
            .is_some_and(|view| view.class_name.ends_with(&self.0)))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "with class name: a string ending with {:?}", self.0)
    }
}

struct WithText(String);

impl Matcher for WithText {
    fn matches(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<bool> {
        Ok(tree
            .view(node)
            .and_then(|view| view.text.as_deref())
            == Some(self.0.as_str()))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "with text: is {:?}", self.0)
    }
}

struct WithContentDescription(String);

impl Matcher for WithContentDescription {
    fn matches(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<bool> {
        Ok(tree
            .view(node)
            .and_then(|view| view.content_description.as_deref())
            == Some(self.0.as_str()))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "with content description: {:?}", self.0)
    }
}

struct FnMatcher<F> {
    description: String,
    f: F,
}

impl<F> Matcher for FnMatcher<F>
where
    F: Fn(&dyn ViewTree, NodeId) -> FinderResult<bool> + Send + Sync,
{
    fn matches(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<bool> {
        (self.f)(tree, node)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
