use super::RouteNode;
use super::prepare::{prepare_routes, report_duplicate_names};
use crate::diagnostics::{ConsistencyWarning, Diagnostics};
use crate::path::{collapse_index, join_url, with_leading_slash};
use crate::pattern::{SegmentResult, TokenizedSegment, compile_segment, tokenize_segment};
use crate::types::{RouteMode, ScannedFile};

const INDEX_SEGMENT: &str = "index";

/// Forest produced by one build, with the diagnostics gathered on the way.
#[derive(Debug, Default)]
pub struct TreeBuild {
    pub routes: Vec<RouteNode>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    server_components: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            server_components: true,
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// When disabled, a `.server` marker is stripped but the route keeps
    /// mode `all`.
    pub fn server_components(mut self, value: bool) -> Self {
        self.server_components = value;
        self
    }

    /// Builds the whole route forest from scratch.
    #[tracing::instrument(level = "trace", skip(self, files), fields(files = files.len() as u64))]
    pub fn build(&self, files: &[ScannedFile]) -> TreeBuild {
        let mut sorted: Vec<&ScannedFile> = files.iter().collect();
        sorted.sort_by_key(|file| file.relative_path.len());

        let mut routes: Vec<RouteNode> = Vec::new();
        let mut diagnostics = Diagnostics::new();

        for file in sorted {
            if let Err(err) = self.insert_file(&mut routes, file, &mut diagnostics) {
                diagnostics.file_error(file.absolute_path.clone(), err);
            }
        }

        prepare_routes(&mut routes, false);
        report_duplicate_names(&routes, &mut diagnostics);

        tracing::event!(tracing::Level::TRACE, operation = "build", routes = routes.len() as u64);
        TreeBuild {
            routes,
            diagnostics,
        }
    }

    fn insert_file(
        &self,
        routes: &mut Vec<RouteNode>,
        file: &ScannedFile,
        diagnostics: &mut Diagnostics,
    ) -> SegmentResult<()> {
        let (segments, mode) = self.split_segments(&file.relative_path);

        // Tokenize up front so a bad segment drops the file without touching the forest.
        let tokenized = segments
            .iter()
            .map(|segment| tokenize_segment(segment))
            .collect::<SegmentResult<Vec<TokenizedSegment>>>()?;

        let mut route = RouteNode::for_file(file.absolute_path.clone(), mode);
        let mut name = String::new();
        let mut trail: Vec<usize> = Vec::new();

        for (i, (segment, tokens)) in segments.iter().zip(tokenized.iter()).enumerate() {
            for &character in &tokens.ignored {
                diagnostics.warn(ConsistencyWarning::IgnoredParamCharacter {
                    file: file.absolute_path.clone(),
                    segment: (*segment).to_string(),
                    character,
                });
            }

            if tokens.is_transparent() {
                continue;
            }

            let label = tokens.label();
            if !name.is_empty() {
                name.push('/');
            }
            name.push_str(&label);

            let segment_path = compile_segment(&tokens.tokens, i + 1 < segments.len());
            let candidate = with_leading_slash(&join_url(&route.path, &collapse_index(&segment_path)))
                .into_owned();

            let siblings = siblings_mut(routes, &trail);
            let layout = siblings
                .iter()
                .position(|node| node.name.as_deref() == Some(name.as_str()) && node.path == candidate);

            if let Some(pos) = layout {
                trail.push(pos);
                route.path.clear();
            } else if label == INDEX_SEGMENT && route.path.is_empty() {
                route.path.push('/');
            } else if label != INDEX_SEGMENT {
                route.path = join_url(&route.path, &segment_path);
            }
        }

        route.name = Some(name);
        siblings_mut(routes, &trail).push(route);
        Ok(())
    }

    fn split_segments<'a>(&self, relative_path: &'a str) -> (Vec<&'a str>, RouteMode) {
        let stem = strip_extension(relative_path);
        let mut segments: Vec<&str> = stem.split('/').collect();
        let mut mode = RouteMode::All;

        if let Some(last) = segments.last_mut() {
            let segment: &'a str = *last;
            if let Some(base) = segment.strip_suffix(".server") {
                *last = base;
                if self.server_components {
                    mode = RouteMode::Server;
                }
            } else if let Some(base) = segment.strip_suffix(".client") {
                *last = base;
                mode = RouteMode::Client;
            }
        }

        (segments, mode)
    }
}

fn strip_extension(relative_path: &str) -> &str {
    let file_start = relative_path.rfind('/').map_or(0, |i| i + 1);
    match relative_path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &relative_path[..file_start + dot],
        _ => relative_path,
    }
}

fn siblings_mut<'a>(routes: &'a mut Vec<RouteNode>, trail: &[usize]) -> &'a mut Vec<RouteNode> {
    let mut list = routes;
    for &index in trail {
        list = &mut list[index].children;
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_the_last_extension() {
        assert_eq!(strip_extension("blog/[slug].vue"), "blog/[slug]");
        assert_eq!(strip_extension("about.client.vue"), "about.client");
        assert_eq!(strip_extension("v1.2/index"), "v1.2/index");
        assert_eq!(strip_extension("a/.hidden"), "a/.hidden");
    }

    #[test]
    fn detects_mode_markers() {
        let builder = TreeBuilder::new();
        let (segments, mode) = builder.split_segments("admin/panel.server.vue");
        assert_eq!(segments, vec!["admin", "panel"]);
        assert_eq!(mode, RouteMode::Server);

        let (segments, mode) = builder.split_segments("chart.client.ts");
        assert_eq!(segments, vec!["chart"]);
        assert_eq!(mode, RouteMode::Client);
    }

    #[test]
    fn server_marker_without_server_components_keeps_mode_all() {
        let builder = TreeBuilder::new().server_components(false);
        let (segments, mode) = builder.split_segments("panel.server.vue");
        assert_eq!(segments, vec!["panel"]);
        assert_eq!(mode, RouteMode::All);
    }
}
