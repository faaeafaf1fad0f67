//! Runs find-one / find-all against a fixture

use serde::{Deserialize, Serialize};
use tracing::info;
use viewfind::{
    ElementHandle, Finder, MatchMode, NodeId, PathEngine, ResourceId, ViewHierarchy, ViewTree,
};

use crate::commands::LookupArgs;
use crate::error::CliResult;
use crate::fixture::Fixture;

/// One matched view as reported to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedView {
    /// Node index in the hierarchy
    pub node: usize,
    /// Fully-qualified class name
    pub class: String,
    /// Numeric resource id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    /// Rendered text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Content description
    #[serde(rename = "content-desc", skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,
    /// Whether the view is displayed
    pub displayed: bool,
}

impl MatchedView {
    fn capture(tree: &ViewHierarchy, node: NodeId) -> Option<Self> {
        let view = tree.view(node)?;
        Some(Self {
            node: node.index(),
            class: view.class_name.clone(),
            id: view.resource_id,
            text: view.text.clone(),
            content_description: view.content_description.clone(),
            displayed: tree.is_displayed(node),
        })
    }
}

/// Outcome of a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupReport {
    /// Strategy tag as given
    pub strategy: String,
    /// Selector as given
    pub selector: String,
    /// Whether every match was requested
    pub all: bool,
    /// Matches in traversal order
    pub matches: Vec<MatchedView>,
}

impl LookupReport {
    /// True when nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Run a lookup in the given mode against a loaded fixture
pub fn run_lookup(fixture: &Fixture, args: &LookupArgs, mode: MatchMode) -> CliResult<LookupReport> {
    let tree = fixture.hierarchy();
    let paths = PathEngine::new();

    let mut config = fixture.finder_config();
    if let Some(package) = &args.package {
        config = config.with_target_package(package.clone());
    }
    if args.no_displayed {
        config = config.with_require_displayed(false);
    }

    let finder = Finder::new(&tree, &fixture.resources, &paths).with_config(config);
    let handles: Vec<ElementHandle> = match mode {
        MatchMode::Single => finder
            .find_one(&args.strategy, &args.selector)?
            .into_iter()
            .collect(),
        MatchMode::Multi => finder.find_all(&args.strategy, &args.selector)?,
    };

    let mut matches = Vec::with_capacity(handles.len());
    for handle in &handles {
        let node = handle.resolve(&tree)?;
        matches.extend(MatchedView::capture(&tree, node));
    }
    info!(
        strategy = %args.strategy,
        selector = %args.selector,
        matches = matches.len(),
        "lookup finished"
    );

    Ok(LookupReport {
        strategy: args.strategy.clone(),
        selector: args.selector.clone(),
        all: mode == MatchMode::Multi,
        matches,
    })
}
