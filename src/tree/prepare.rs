use super::RouteNode;
use super::node::find_route;
use crate::diagnostics::{ConsistencyWarning, Diagnostics};
use crate::types::RouteMode;
use hashbrown::HashSet as FastHashSet;

/// Turns a raw accumulated name (`blog/index`, `user/id`) into its final
/// form (`blog`, `user-id`).
pub fn finalize_route_name(raw: &str) -> String {
    raw.strip_suffix("/index").unwrap_or(raw).replace('/', "-")
}

pub(crate) fn prepare_routes(routes: &mut [RouteNode], nested: bool) {
    for route in routes.iter_mut() {
        route.name = route
            .name
            .take()
            .map(|raw| finalize_route_name(&raw))
            .filter(|name| !name.is_empty());

        if nested {
            if let Some(relative) = route.path.strip_prefix('/') {
                route.path = relative.to_string();
            }
        } else if route.path.is_empty() {
            route.path.push('/');
        }

        prepare_routes(&mut route.children, true);

        // an empty-path child is the default view; a named parent would shadow it
        if route.children.iter().any(|child| child.path.is_empty()) {
            route.name = None;
        }
    }
}

pub(crate) fn report_duplicate_names(forest: &[RouteNode], diagnostics: &mut Diagnostics) {
    let mut seen: FastHashSet<(String, RouteMode)> = FastHashSet::new();
    visit_names(forest, forest, &mut seen, diagnostics);
}

fn visit_names(
    forest: &[RouteNode],
    routes: &[RouteNode],
    seen: &mut FastHashSet<(String, RouteMode)>,
    diagnostics: &mut Diagnostics,
) {
    for route in routes {
        if let Some(name) = route.name.as_deref()
            && !seen.insert((name.to_string(), route.mode))
        {
            let existing = find_route(forest, &|other: &RouteNode| {
                !std::ptr::eq(other, route)
                    && other.mode == route.mode
                    && other.name.as_deref() == Some(name)
            });
            diagnostics.warn(ConsistencyWarning::DuplicateRouteName {
                name: name.to_string(),
                mode: route.mode,
                file: route.file.clone(),
                existing: existing.and_then(|node| node.file.clone()),
            });
        }
        visit_names(forest, &route.children, seen, diagnostics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_index_and_joins_with_dashes() {
        assert_eq!(finalize_route_name("blog/index"), "blog");
        assert_eq!(finalize_route_name("index"), "index");
        assert_eq!(finalize_route_name("user/id/posts"), "user-id-posts");
    }

    #[test]
    fn nested_paths_lose_leading_slash() {
        let mut routes = vec![
            RouteNode::new("/parent")
                .with_name("parent")
                .with_children(vec![RouteNode::new("/child").with_name("parent/child")]),
        ];
        prepare_routes(&mut routes, false);
        assert_eq!(routes[0].path, "/parent");
        assert_eq!(routes[0].children[0].path, "child");
        assert_eq!(routes[0].children[0].name.as_deref(), Some("parent-child"));
    }

    #[test]
    fn default_child_removes_parent_name() {
        let mut routes = vec![
            RouteNode::new("/parent")
                .with_name("parent")
                .with_children(vec![RouteNode::new("/").with_name("parent/index")]),
        ];
        prepare_routes(&mut routes, false);
        assert_eq!(routes[0].name, None);
        assert_eq!(routes[0].children[0].path, "");
        assert_eq!(routes[0].children[0].name.as_deref(), Some("parent"));
    }

    #[test]
    fn duplicate_in_other_branch_is_reported_once() {
        let mut a = RouteNode::new("/a").with_name("same");
        a.file = Some("a.vue".into());
        let mut b = RouteNode::new("nested").with_name("same");
        b.file = Some("b.vue".into());
        let forest = vec![a, RouteNode::new("/x").with_children(vec![b])];

        let mut diagnostics = Diagnostics::new();
        report_duplicate_names(&forest, &mut diagnostics);

        assert_eq!(diagnostics.warnings.len(), 1);
        match &diagnostics.warnings[0] {
            ConsistencyWarning::DuplicateRouteName { file, existing, .. } => {
                assert_eq!(file.as_deref(), Some(std::path::Path::new("b.vue")));
                assert_eq!(existing.as_deref(), Some(std::path::Path::new("a.vue")));
            }
            other => panic!("unexpected warning: {other:?}"),
        }
    }
}
