use super::RouteRecord;
use crate::path::full_path;
use hashbrown::HashSet as FastHashSet;

/// Full paths that can be rendered ahead of time: file-backed routes whose
/// path is static and carries no parameter, under ancestors that are static
/// too. Escaped colons come back as literal `:`. Order is depth-first;
/// duplicates are dropped.
pub fn prerender_paths(records: &[RouteRecord]) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = FastHashSet::new();
    collect_paths(records, "", &mut out, &mut seen);
    out
}

fn collect_paths(
    records: &[RouteRecord],
    parent: &str,
    out: &mut Vec<String>,
    seen: &mut FastHashSet<String>,
) {
    for record in records {
        let Some(path) = record.static_path() else {
            continue;
        };
        let full = full_path([parent, path]);
        if record.file.is_some() && !has_param(&full) {
            let url = full.replace("\\:", ":");
            if seen.insert(url.clone()) {
                out.push(url);
            }
        }
        collect_paths(&record.children, &full, out, seen);
    }
}

/// A `:` not escaped with `\` starts a parameter.
fn has_param(path: &str) -> bool {
    let bytes = path.as_bytes();
    memchr::memchr_iter(b':', bytes).any(|at| at == 0 || bytes[at - 1] != b'\\')
}

/// Statically known route names, depth-first.
pub fn route_names(records: &[RouteRecord]) -> Vec<String> {
    let mut names = Vec::new();
    collect_names(records, &mut names);
    names
}

fn collect_names(records: &[RouteRecord], names: &mut Vec<String>) {
    for record in records {
        if let Some(name) = record.static_name() {
            names.push(name.to_string());
        }
        collect_names(&record.children, names);
    }
}
