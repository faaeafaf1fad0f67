//! Path queries over a view tree.
//!
//! [`PathQueryEngine`] is the collaborator that turns a path selector into a
//! [`Predicate`]. [`PathEngine`] implements a small XPath subset:
//!
//! - `/step` (child) and `//step` (descendant) axes; a selector without a
//!   leading slash starts with a child step from the document;
//! - node tests `*` or a class name, matched against either the simple or
//!   the fully-qualified class name;
//! - `[@attr='value']` (or double quotes) for `resource-id`, `class`,
//!   `text`, `content-desc` and `displayed`;
//! - 1-based positional predicates `[n]`, counted among the siblings that
//!   passed the previous filters.
//!
//! Results are in traversal order without duplicates. Every evaluation
//! re-reads the tree.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::predicate::{Matcher, Predicate};
use crate::result::{FinderError, FinderResult};
use crate::tree::{traverse, NodeId, ViewTree};

/// Compiles path selectors into predicates
pub trait PathQueryEngine {
    /// Predicate satisfied by every node the selector selects
    fn compile(&self, selector: &str) -> FinderResult<Predicate>;

    /// Predicate satisfied only by the `ordinal`-th (0-based) selected node
    fn compile_nth(&self, selector: &str, ordinal: usize) -> FinderResult<Predicate>;
}

/// XPath-subset engine over any [`ViewTree`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PathEngine;

impl PathEngine {
    /// Create the engine
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a selector without building a predicate
    pub fn parse(&self, selector: &str) -> FinderResult<PathExpr> {
        PathExpr::parse(selector).map_err(|message| FinderError::selector_fault(selector, message))
    }

    /// Nodes selected by `selector`, in traversal order
    pub fn select(&self, tree: &dyn ViewTree, selector: &str) -> FinderResult<Vec<NodeId>> {
        Ok(self.parse(selector)?.evaluate(tree))
    }
}

impl PathQueryEngine for PathEngine {
    fn compile(&self, selector: &str) -> FinderResult<Predicate> {
        let expr = self.parse(selector)?;
        Ok(Predicate::new(PathMatcher {
            source: selector.to_string(),
            expr: Arc::new(expr),
            ordinal: None,
        }))
    }

    fn compile_nth(&self, selector: &str, ordinal: usize) -> FinderResult<Predicate> {
        let expr = self.parse(selector)?;
        Ok(Predicate::new(PathMatcher {
            source: selector.to_string(),
            expr: Arc::new(expr),
            ordinal: Some(ordinal),
        }))
    }
}

struct PathMatcher {
    source: String,
    expr: Arc<PathExpr>,
    ordinal: Option<usize>,
}

impl PathMatcher {
    fn selection(&self, tree: &dyn ViewTree) -> Vec<NodeId> {
        let selected = self.expr.evaluate(tree);
        match self.ordinal {
            Some(ordinal) => selected.get(ordinal).copied().into_iter().collect(),
            None => selected,
        }
    }
}

impl Matcher for PathMatcher {
    fn matches(&self, tree: &dyn ViewTree, node: NodeId) -> FinderResult<bool> {
        Ok(self.selection(tree).contains(&node))
    }

    fn select(&self, tree: &dyn ViewTree) -> FinderResult<Option<Vec<NodeId>>> {
        Ok(Some(self.selection(tree)))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "with xpath {:?}", self.source)?;
        if let Some(ordinal) = self.ordinal {
            write!(f, " at index {ordinal}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Any,
    Class(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    ResourceId,
    Class,
    Text,
    ContentDesc,
    Displayed,
}

impl Attribute {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "resource-id" => Some(Self::ResourceId),
            "class" => Some(Self::Class),
            "text" => Some(Self::Text),
            "content-desc" => Some(Self::ContentDesc),
            "displayed" => Some(Self::Displayed),
            _ => None,
        }
    }

    fn value(self, tree: &dyn ViewTree, node: NodeId) -> Option<String> {
        let view = tree.view(node)?;
        match self {
            Self::ResourceId => view.resource_id.map(|id| id.to_string()),
            Self::Class => Some(view.class_name.clone()),
            Self::Text => view.text.clone(),
            Self::ContentDesc => view.content_description.clone(),
            Self::Displayed => Some(tree.is_displayed(node).to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    Equals(Attribute, String),
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NodeTest,
    filters: Vec<Filter>,
}

/// A parsed path selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Document,
    Node(NodeId),
}

type Pattern = OnceLock<Result<Regex, regex::Error>>;

fn compiled(cell: &'static Pattern, pattern: &str) -> Result<&'static Regex, String> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|err| format!("internal pattern failed to compile: {err}"))
}

fn name_pattern() -> Result<&'static Regex, String> {
    static PATTERN: Pattern = OnceLock::new();
    compiled(&PATTERN, r"^(\*|[A-Za-z_$][\w.$]*)$")
}

fn attribute_pattern() -> Result<&'static Regex, String> {
    static PATTERN: Pattern = OnceLock::new();
    compiled(
        &PATTERN,
        r#"^@([A-Za-z][\w-]*)\s*=\s*(?:'([^']*)'|"([^"]*)")$"#,
    )
}

fn position_pattern() -> Result<&'static Regex, String> {
    static PATTERN: Pattern = OnceLock::new();
    compiled(&PATTERN, r"^\s*([1-9][0-9]*)\s*$")
}

impl PathExpr {
    fn parse(selector: &str) -> Result<Self, String> {
        if selector.is_empty() {
            return Err("empty path".to_string());
        }
        let mut steps = Vec::new();
        let mut rest = selector;
        while !rest.is_empty() {
            let axis = if let Some(after) = rest.strip_prefix("//") {
                rest = after;
                Axis::Descendant
            } else if let Some(after) = rest.strip_prefix('/') {
                rest = after;
                Axis::Child
            } else if steps.is_empty() {
                Axis::Child
            } else {
                return Err(format!("expected '/' before {rest:?}"));
            };

            let end = rest.find(&['[', '/'][..]).unwrap_or(rest.len());
            let name = &rest[..end];
            if !name_pattern()?.is_match(name) {
                return Err(if name.is_empty() {
                    "expected a node test".to_string()
                } else {
                    format!("invalid node test {name:?}")
                });
            }
            let test = if name == "*" {
                NodeTest::Any
            } else {
                NodeTest::Class(name.to_string())
            };
            rest = &rest[end..];

            let mut filters = Vec::new();
            while rest.starts_with('[') {
                let close = closing_bracket(rest)?;
                filters.push(parse_filter(&rest[1..close])?);
                rest = &rest[close + 1..];
            }
            steps.push(Step { axis, test, filters });
        }
        Ok(Self { steps })
    }

    /// Nodes selected in the current state of `tree`, in traversal order
    #[must_use]
    pub fn evaluate(&self, tree: &dyn ViewTree) -> Vec<NodeId> {
        let order: HashMap<NodeId, usize> = traverse(tree)
            .enumerate()
            .map(|(position, node)| (node, position))
            .collect();

        let mut context = vec![Context::Document];
        for step in &self.steps {
            let mut selected = Vec::new();
            for origin in &context {
                let origins = match step.axis {
                    Axis::Child => vec![*origin],
                    Axis::Descendant => descendants_or_self(tree, *origin),
                };
                for parent in origins {
                    selected.extend(step.select(tree, &children_of(tree, parent)));
                }
            }
            selected.sort_by_key(|node| order.get(node).copied().unwrap_or(usize::MAX));
            selected.dedup();
            context = selected.into_iter().map(Context::Node).collect();
        }

        context
            .into_iter()
            .filter_map(|ctx| match ctx {
                Context::Node(node) => Some(node),
                Context::Document => None,
            })
            .collect()
    }
}

impl Step {
    fn select(&self, tree: &dyn ViewTree, candidates: &[NodeId]) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = candidates
            .iter()
            .copied()
            .filter(|node| self.test_matches(tree, *node))
            .collect();
        for filter in &self.filters {
            nodes = match filter {
                Filter::Equals(attribute, expected) => nodes
                    .into_iter()
                    .filter(|node| attribute.value(tree, *node).as_deref() == Some(expected.as_str()))
                    .collect(),
                Filter::Position(position) => nodes.get(position - 1).copied().into_iter().collect(),
            };
        }
        nodes
    }

    fn test_matches(&self, tree: &dyn ViewTree, node: NodeId) -> bool {
        match &self.test {
            NodeTest::Any => tree.view(node).is_some(),
            NodeTest::Class(name) => tree.view(node).is_some_and(|view| {
                view.class_name == *name || view.simple_class_name() == name
            }),
        }
    }
}

fn children_of(tree: &dyn ViewTree, context: Context) -> Vec<NodeId> {
    match context {
        Context::Document => tree.root().into_iter().collect(),
        Context::Node(node) => tree.children(node).to_vec(),
    }
}

fn descendants_or_self(tree: &dyn ViewTree, context: Context) -> Vec<Context> {
    match context {
        Context::Document => std::iter::once(Context::Document)
            .chain(traverse(tree).map(Context::Node))
            .collect(),
        Context::Node(node) => {
            let mut out = Vec::new();
            let mut stack = vec![node];
            while let Some(id) = stack.pop() {
                out.push(Context::Node(id));
                stack.extend(tree.children(id).iter().rev().copied());
            }
            out
        }
    }
}

/// Index of the `]` closing the bracket that opens `text`, skipping quotes
fn closing_bracket(text: &str) -> Result<usize, String> {
    let mut quote = None;
    for (index, ch) in text.char_indices().skip(1) {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(ch),
            (None, ']') => return Ok(index),
            (None, '[') => return Err("nested predicates are not supported".to_string()),
            (None, _) => {}
        }
    }
    Err(format!("unterminated predicate {text:?}"))
}

fn parse_filter(body: &str) -> Result<Filter, String> {
    if let Some(captures) = attribute_pattern()?.captures(body) {
        let name = &captures[1];
        let attribute =
            Attribute::parse(name).ok_or_else(|| format!("unsupported attribute @{name}"))?;
        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .map_or("", |m| m.as_str());
        return Ok(Filter::Equals(attribute, value.to_string()));
    }
    if let Some(captures) = position_pattern()?.captures(body) {
        let position = captures[1]
            .parse()
            .map_err(|_| format!("position out of range: {}", &captures[1]))?;
        return Ok(Filter::Position(position));
    }
    Err(format!("unsupported predicate [{body}]"))
}
