//! viewfind: locator resolution over a live view tree
//!
//! The underlying tree can only answer "which single view matches this
//! predicate?" and fails when more than one does. viewfind builds find-one
//! and find-all on top of that primitive.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                       viewfind Architecture                      │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  (tag, selector)                                                 │
//! │        │                                                         │
//! │        ▼                                                         │
//! │  ┌────────────┐   Predicate   ┌─────────────┐   ElementHandle*   │
//! │  │ Dispatcher │──────────────►│ Enumeration │───────────────────►│
//! │  └────────────┘               └─────────────┘                    │
//! │     │      │                         │  base @ 0, 1, 2, ...      │
//! │     ▼      ▼                         ▼                           │
//! │  IdResolver  PathQueryEngine      ViewTree::find_unique          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use viewfind::prelude::*;
//!
//! let mut tree = ViewHierarchy::new();
//! let root = tree.set_root(View::new("android.widget.LinearLayout"));
//! for _ in 0..3 {
//!     tree.add_child(root, View::new("android.widget.Button").with_text("Save"));
//! }
//!
//! let resources = ResourceTable::new();
//! let paths = PathEngine::new();
//! let finder = Finder::new(&tree, &resources, &paths);
//!
//! assert_eq!(finder.find_all("text", "Save")?.len(), 3);
//! assert!(finder.find_one("xpath", "//Button")?.is_some());
//! assert!(finder.find_all("text", "Missing")?.is_empty());
//! assert!(finder.find_all("css selector", "button").is_err());
//! # Ok::<(), viewfind::FinderError>(())
//! ```

#![warn(missing_docs)]

mod config;
mod dispatch;
mod enumerate;
mod finder;
mod handle;
mod hierarchy;
mod path;
mod predicate;
mod resources;
mod result;
mod strategy;
mod tree;

pub use config::{FinderConfig, DEFAULT_MAX_ENUMERATION_STEPS};
pub use dispatch::Dispatcher;
pub use enumerate::{enumerate, Enumeration, Probe, ResultSet};
pub use finder::Finder;
pub use handle::{Displayed, ElementHandle, Exists, HasText, ViewAction, ViewAssertion};
pub use hierarchy::{ClearText, Remove, ReplaceText, SetDisplayed, ViewHierarchy, ViewSpec};
pub use path::{PathEngine, PathExpr, PathQueryEngine};
pub use predicate::{Matcher, OrdinalPredicate, Predicate};
pub use resources::{IdResolver, ResourceTable, ID_RESOURCE_TYPE};
pub use result::{FinderError, FinderResult};
pub use strategy::{MatchMode, Strategy};
pub use tree::{scan_unique, traverse, NodeId, ResourceId, Traversal, View, ViewTree};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        ElementHandle, Finder, FinderConfig, FinderError, FinderResult, IdResolver, MatchMode,
        NodeId, PathEngine, PathQueryEngine, Predicate, ResourceId, ResourceTable, ResultSet,
        Strategy, View, ViewAction, ViewAssertion, ViewHierarchy, ViewTree,
    };
    pub use super::{ClearText, Displayed, Exists, HasText, Remove, ReplaceText, SetDisplayed};
}
