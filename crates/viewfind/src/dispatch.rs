//! Strategy dispatch: strategy + selector -> predicate.
//!
//! This is the one place where the closed set of strategies turns into
//! behavior. Only the path strategy differs between single and multi mode: a
//! path query can structurally select several nodes, so single mode asks the
//! engine for its first selection up front. The other strategies build the
//! same predicate in both modes.

use std::fmt;

use tracing::debug;

use crate::path::PathQueryEngine;
use crate::predicate::Predicate;
use crate::resources::IdResolver;
use crate::result::FinderResult;
use crate::strategy::{MatchMode, Strategy};

/// Builds base predicates from the collaborators a strategy needs
#[derive(Clone, Copy)]
pub struct Dispatcher<'a> {
    resolver: &'a dyn IdResolver,
    paths: &'a dyn PathQueryEngine,
    target_package: &'a str,
}

impl fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("target_package", &self.target_package)
            .finish_non_exhaustive()
    }
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher over the given collaborators
    #[must_use]
    pub fn new(
        resolver: &'a dyn IdResolver,
        paths: &'a dyn PathQueryEngine,
        target_package: &'a str,
    ) -> Self {
        Self {
            resolver,
            paths,
            target_package,
        }
    }

    /// Build the predicate for a strategy tag.
    ///
    /// Unknown tags fail before any collaborator is consulted.
    pub fn resolve_tag(&self, tag: &str, selector: &str, mode: MatchMode) -> FinderResult<Predicate> {
        let strategy: Strategy = tag.parse()?;
        self.resolve(strategy, selector, mode)
    }

    /// Build the predicate for a strategy
    pub fn resolve(&self, strategy: Strategy, selector: &str, mode: MatchMode) -> FinderResult<Predicate> {
        let predicate = match strategy {
            Strategy::Id => {
                let id = self.resolver.resolve_id(selector, self.target_package);
                if id.is_none() {
                    debug!(
                        name = selector,
                        package = self.target_package,
                        "resource id did not resolve"
                    );
                }
                Predicate::with_id(id)
            }
            Strategy::ClassName => Predicate::with_class_name_suffix(selector),
            Strategy::Text => Predicate::with_text(selector),
            Strategy::AccessibilityId => Predicate::with_content_description(selector),
            Strategy::XPath => match mode {
                MatchMode::Single => self.paths.compile_nth(selector, 0)?,
                MatchMode::Multi => self.paths.compile(selector)?,
            },
        };
        debug!(%strategy, ?mode, predicate = %predicate, "built predicate");
        Ok(predicate)
    }
}
