//! Find-one and find-all over a live view tree.

use std::fmt;

use tracing::debug;

use crate::config::FinderConfig;
use crate::dispatch::Dispatcher;
use crate::enumerate::{Enumeration, Probe, ResultSet};
use crate::handle::ElementHandle;
use crate::path::PathQueryEngine;
use crate::predicate::Predicate;
use crate::resources::IdResolver;
use crate::result::FinderResult;
use crate::strategy::{MatchMode, Strategy};
use crate::tree::ViewTree;

/// Locates views by strategy and selector.
///
/// A finder borrows its collaborators for the duration of a lookup. The
/// handles it returns do not borrow anything, so the tree can be mutated
/// between lookups and handles re-resolve against the new state.
pub struct Finder<'a> {
    tree: &'a dyn ViewTree,
    resolver: &'a dyn IdResolver,
    paths: &'a dyn PathQueryEngine,
    config: FinderConfig,
}

impl fmt::Debug for Finder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> Finder<'a> {
    /// Create a finder with the default configuration
    #[must_use]
    pub fn new(
        tree: &'a dyn ViewTree,
        resolver: &'a dyn IdResolver,
        paths: &'a dyn PathQueryEngine,
    ) -> Self {
        Self {
            tree,
            resolver,
            paths,
            config: FinderConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: FinderConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// First view matching `selector` under the strategy named by `tag`.
    ///
    /// `Ok(None)` when nothing matches. Presence is decided by existence
    /// alone, so a hidden view is still returned.
    pub fn find_one(&self, tag: &str, selector: &str) -> FinderResult<Option<ElementHandle>> {
        self.find_one_by(tag.parse()?, selector)
    }

    /// Every view matching `selector` under the strategy named by `tag`
    pub fn find_all(&self, tag: &str, selector: &str) -> FinderResult<ResultSet> {
        self.find_all_by(tag.parse()?, selector)
    }

    /// Typed variant of [`Finder::find_one`]
    pub fn find_one_by(&self, strategy: Strategy, selector: &str) -> FinderResult<Option<ElementHandle>> {
        let predicate = self
            .dispatcher()
            .resolve(strategy, selector, MatchMode::Single)?;
        let found = self
            .enumeration(predicate)
            .with_probe(Probe::Exists)
            .next()
            .transpose()?;
        debug!(%strategy, selector, found = found.is_some(), "find one");
        Ok(found)
    }

    /// Typed variant of [`Finder::find_all`]
    pub fn find_all_by(&self, strategy: Strategy, selector: &str) -> FinderResult<ResultSet> {
        let predicate = self
            .dispatcher()
            .resolve(strategy, selector, MatchMode::Multi)?;
        let handles: ResultSet = self.enumeration(predicate).collect::<FinderResult<_>>()?;
        debug!(%strategy, selector, count = handles.len(), "find all");
        Ok(handles)
    }

    /// Lazily enumerate the matches of an arbitrary predicate
    #[must_use]
    pub fn enumeration(&self, base: Predicate) -> Enumeration<'a> {
        Enumeration::new(self.tree, base, &self.config)
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(self.resolver, self.paths, &self.config.target_package)
    }
}
