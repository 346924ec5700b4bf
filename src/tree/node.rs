use crate::types::RouteMode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RouteNode {
    pub name: Option<String>,
    /// Absolute for root nodes, relative to the parent for children.
    pub path: String,
    pub file: Option<PathBuf>,
    pub children: Vec<RouteNode>,
    pub mode: RouteMode,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alias: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Value>,
}

impl RouteNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn for_file(file: impl Into<PathBuf>, mode: RouteMode) -> Self {
        Self {
            file: Some(file.into()),
            mode,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }

    /// Depth-first walk over this node and its descendants, passing each
    /// node's full path.
    pub fn walk<'a, F>(&'a self, parent_path: &str, visit: &mut F)
    where
        F: FnMut(&'a RouteNode, &str),
    {
        let path = crate::path::full_path([parent_path, self.path.as_str()]);
        visit(self, &path);
        for child in &self.children {
            child.walk(&path, visit);
        }
    }
}

/// Visits every node of a forest with its full path.
pub fn walk_forest<'a, F>(forest: &'a [RouteNode], mut visit: F)
where
    F: FnMut(&'a RouteNode, &str),
{
    for node in forest {
        node.walk("", &mut visit);
    }
}

/// Finds the first node, in depth-first order, carrying `name`.
/// Returns `None` when no node in the forest has that name.
pub fn find_route_by_name<'a>(routes: &'a [RouteNode], name: &str) -> Option<&'a RouteNode> {
    find_route(routes, &|route: &RouteNode| route.name.as_deref() == Some(name))
}

pub(crate) fn find_route<'a, P>(routes: &'a [RouteNode], predicate: &P) -> Option<&'a RouteNode>
where
    P: Fn(&RouteNode) -> bool,
{
    for route in routes {
        if predicate(route) {
            return Some(route);
        }
        if let Some(found) = find_route(&route.children, predicate) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<RouteNode> {
        vec![
            RouteNode::new("/").with_name("index"),
            RouteNode::new("/blog").with_children(vec![
                RouteNode::new("").with_name("blog"),
                RouteNode::new(":slug()").with_name("blog-slug"),
            ]),
        ]
    }

    #[test]
    fn find_by_name_descends_into_children() {
        let forest = sample();
        let found = find_route_by_name(&forest, "blog-slug").expect("nested name should be found");
        assert_eq!(found.path, ":slug()");
    }

    #[test]
    fn find_by_name_returns_none_for_missing_name() {
        let forest = sample();
        assert!(find_route_by_name(&forest, "missing").is_none());
    }

    #[test]
    fn walk_reports_full_paths() {
        let forest = sample();
        let mut paths = Vec::new();
        walk_forest(&forest, |_, path| paths.push(path.to_string()));
        assert_eq!(paths, vec!["/", "/blog", "/blog", "/blog/:slug()"]);
    }
}
