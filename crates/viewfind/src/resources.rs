//! Resource identifier resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tree::ResourceId;

/// Resource type accepted in qualified names (`package:id/name`)
pub const ID_RESOURCE_TYPE: &str = "id";

/// Resolves a symbolic id name to the numeric id used by views
pub trait IdResolver {
    /// Look up `name` in `target_package`; `None` when it is unknown
    fn resolve_id(&self, name: &str, target_package: &str) -> Option<ResourceId>;
}

impl<F> IdResolver for F
where
    F: Fn(&str, &str) -> Option<ResourceId>,
{
    fn resolve_id(&self, name: &str, target_package: &str) -> Option<ResourceId> {
        self(name, target_package)
    }
}

/// In-memory table of id resources, keyed by package then entry name.
///
/// Names may be bare (`save`), typed (`id/save`) or fully qualified
/// (`com.example:id/save`); a qualified package overrides the target package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceTable {
    packages: BTreeMap<String, BTreeMap<String, ResourceId>>,
}

impl ResourceTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an id
    pub fn insert(&mut self, package: impl Into<String>, name: impl Into<String>, id: ResourceId) {
        self.packages
            .entry(package.into())
            .or_default()
            .insert(name.into(), id);
    }

    /// Builder-style [`ResourceTable::insert`]
    #[must_use]
    pub fn with(mut self, package: impl Into<String>, name: impl Into<String>, id: ResourceId) -> Self {
        self.insert(package, name, id);
        self
    }

    /// Number of registered ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.values().map(BTreeMap::len).sum()
    }

    /// True when no id is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IdResolver for ResourceTable {
    fn resolve_id(&self, name: &str, target_package: &str) -> Option<ResourceId> {
        let (package, rest) = name
            .split_once(':')
            .unwrap_or((target_package, name));
        let entry = match rest.split_once('/') {
            Some((kind, entry)) if kind == ID_RESOURCE_TYPE => entry,
            Some(_) => return None,
            None => rest,
        };
        self.packages.get(package)?.get(entry).copied()
    }
}
