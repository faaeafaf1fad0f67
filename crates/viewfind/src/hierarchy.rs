//! In-memory view hierarchy.
//!
//! [`ViewHierarchy`] is a plain arena-backed [`ViewTree`] used by the CLI,
//! the tests and anyone embedding the finder without a real UI toolkit.
//! Fixtures describe it with the serde-friendly [`ViewSpec`].

use serde::{Deserialize, Serialize};

use crate::handle::ViewAction;
use crate::predicate::Predicate;
use crate::result::{FinderError, FinderResult};
use crate::tree::{scan_unique, NodeId, ResourceId, View, ViewTree};

#[derive(Debug, Clone)]
struct Slot {
    view: View,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

/// Mutable in-memory view tree
#[derive(Debug, Clone, Default)]
pub struct ViewHierarchy {
    slots: Vec<Slot>,
    root: Option<NodeId>,
}

impl ViewHierarchy {
    /// Create an empty hierarchy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hierarchy from a fixture description
    #[must_use]
    pub fn from_spec(spec: &ViewSpec) -> Self {
        let mut tree = Self::new();
        let root = tree.set_root(spec.to_view());
        let mut pending: Vec<(NodeId, &ViewSpec)> = vec![(root, spec)];
        while let Some((parent, spec)) = pending.pop() {
            for child in &spec.children {
                if let Some(id) = tree.add_child(parent, child.to_view()) {
                    pending.push((id, child));
                }
            }
        }
        tree
    }

    /// Replace the whole tree with a single root view
    pub fn set_root(&mut self, view: View) -> NodeId {
        if let Some(old) = self.root {
            self.detach(old);
        }
        let id = self.push(view, None);
        self.root = Some(id);
        id
    }

    /// Append `view` as the last child of `parent`.
    ///
    /// Returns `None` when `parent` is not part of the tree.
    pub fn add_child(&mut self, parent: NodeId, view: View) -> Option<NodeId> {
        if !self.is_attached(parent) {
            return None;
        }
        let id = self.push(view, Some(parent));
        self.slots[parent.index()].children.push(id);
        Some(id)
    }

    /// Mutable attributes of an attached node
    pub fn view_mut(&mut self, node: NodeId) -> Option<&mut View> {
        self.slots
            .get_mut(node.index())
            .filter(|slot| slot.attached)
            .map(|slot| &mut slot.view)
    }

    /// Detach `node` and its whole subtree
    pub fn remove(&mut self, node: NodeId) -> FinderResult<()> {
        if !self.is_attached(node) {
            return Err(FinderError::action_failed(format!(
                "view {node} is not attached"
            )));
        }
        match self.slots[node.index()].parent {
            Some(parent) => self.slots[parent.index()].children.retain(|c| *c != node),
            None => self.root = None,
        }
        self.detach(node);
        Ok(())
    }

    /// Number of attached views
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.attached).count()
    }

    /// True when no view is attached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.slots.get(node.index()).is_some_and(|slot| slot.attached)
    }

    fn push(&mut self, view: View, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.slots.len());
        self.slots.push(Slot {
            view,
            parent,
            children: Vec::new(),
            attached: true,
        });
        id
    }

    fn detach(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            let slot = &mut self.slots[id.index()];
            slot.attached = false;
            pending.append(&mut slot.children);
        }
    }
}

impl ViewTree for ViewHierarchy {
    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn view(&self, node: NodeId) -> Option<&View> {
        self.slots
            .get(node.index())
            .filter(|slot| slot.attached)
            .map(|slot| &slot.view)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.slots
            .get(node.index())
            .filter(|slot| slot.attached)
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slots
            .get(node.index())
            .filter(|slot| slot.attached)
            .and_then(|slot| slot.parent)
    }

    fn find_unique(&self, predicate: &Predicate) -> FinderResult<Option<NodeId>> {
        scan_unique(self, predicate)
    }
}

const fn displayed_by_default() -> bool {
    true
}

/// Serializable description of a view and its subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// Fully-qualified class name
    #[serde(rename = "class")]
    pub class_name: String,
    /// Numeric resource id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    /// Rendered text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Content description
    #[serde(
        default,
        rename = "content-desc",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_description: Option<String>,
    /// Whether the view is displayed
    #[serde(default = "displayed_by_default")]
    pub displayed: bool,
    /// Child views in drawing order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewSpec>,
}

impl ViewSpec {
    fn to_view(&self) -> View {
        View {
            resource_id: self.id,
            class_name: self.class_name.clone(),
            text: self.text.clone(),
            content_description: self.content_description.clone(),
            displayed: self.displayed,
        }
    }
}

fn attached_view(tree: &mut ViewHierarchy, node: NodeId) -> FinderResult<&mut View> {
    tree.view_mut(node)
        .ok_or_else(|| FinderError::action_failed(format!("view {node} is not attached")))
}

/// Replace the text of a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceText(pub String);

impl ViewAction<ViewHierarchy> for ReplaceText {
    fn perform(&self, tree: &mut ViewHierarchy, node: NodeId) -> FinderResult<()> {
        attached_view(tree, node)?.text = Some(self.0.clone());
        Ok(())
    }
}

/// Clear the text of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearText;

impl ViewAction<ViewHierarchy> for ClearText {
    fn perform(&self, tree: &mut ViewHierarchy, node: NodeId) -> FinderResult<()> {
        attached_view(tree, node)?.text = Some(String::new());
        Ok(())
    }
}

/// Show or hide a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetDisplayed(pub bool);

impl ViewAction<ViewHierarchy> for SetDisplayed {
    fn perform(&self, tree: &mut ViewHierarchy, node: NodeId) -> FinderResult<()> {
        attached_view(tree, node)?.displayed = self.0;
        Ok(())
    }
}

/// Remove a view and its subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remove;

impl ViewAction<ViewHierarchy> for Remove {
    fn perform(&self, tree: &mut ViewHierarchy, node: NodeId) -> FinderResult<()> {
        tree.remove(node)
    }
}
