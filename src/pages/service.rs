use super::PagesOptions;
use crate::diagnostics::Diagnostics;
use crate::errors::PagesResult;
use crate::meta::{ExtractedMeta, MetaExtractor};
use crate::normalize::{
    ModuleLoader, RouteRecord, SourceModuleLoader, augment_routes, normalize_routes,
    prerender_paths, route_names,
};
use crate::tree::{RouteNode, TreeBuilder};
use crate::types::ScannedFile;
use hashbrown::HashMap as FastHashMap;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Everything one rebuild produced.
#[derive(Debug)]
pub struct RouteBuild {
    pub generation: u64,
    /// Augmented forest, after the caller's hook ran.
    pub forest: Vec<RouteNode>,
    pub routes: Vec<RouteRecord>,
    pub metas: FastHashMap<PathBuf, ExtractedMeta>,
    pub diagnostics: Diagnostics,
}

impl RouteBuild {
    pub fn prerender_paths(&self) -> Vec<String> {
        prerender_paths(&self.routes)
    }

    pub fn route_names(&self) -> Vec<String> {
        route_names(&self.routes)
    }
}

#[derive(Debug)]
pub struct PageRoutes {
    options: PagesOptions,
    extractor: Arc<MetaExtractor>,
    loader: Arc<dyn ModuleLoader>,
    generation: AtomicU64,
    current: RwLock<Option<Arc<RouteBuild>>>,
}

impl PageRoutes {
    pub fn new(options: Option<PagesOptions>) -> PagesResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;

        let extractor = Arc::new(MetaExtractor::new(options.extract_options()));
        let loader: Arc<dyn ModuleLoader> = Arc::new(SourceModuleLoader::new(Arc::clone(&extractor)));
        Ok(Self {
            options,
            extractor,
            loader,
            generation: AtomicU64::new(0),
            current: RwLock::new(None),
        })
    }

    /// Replaces the loader attached to every emitted metadata module.
    pub fn with_loader(mut self, loader: Arc<dyn ModuleLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn options(&self) -> &PagesOptions {
        &self.options
    }

    pub fn extractor(&self) -> &Arc<MetaExtractor> {
        &self.extractor
    }

    /// Latest published build.
    pub fn current(&self) -> Option<Arc<RouteBuild>> {
        self.current.read().clone()
    }

    pub fn rebuild(&self, files: &[ScannedFile]) -> PagesResult<Arc<RouteBuild>> {
        self.rebuild_with(files, |_| {})
    }

    /// Recomputes the whole route set from `files`. `hook` may edit the
    /// augmented forest before normalization.
    ///
    /// The result is published as [`current`](Self::current) only if no
    /// newer rebuild started in the meantime.
    #[tracing::instrument(level = "trace", skip(self, files, hook), fields(files = files.len() as u64))]
    pub fn rebuild_with<F>(&self, files: &[ScannedFile], hook: F) -> PagesResult<Arc<RouteBuild>>
    where
        F: FnOnce(&mut Vec<RouteNode>),
    {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        let tree = TreeBuilder::new()
            .server_components(self.options.server_components)
            .build(files);
        let mut forest = tree.routes;
        let mut diagnostics = tree.diagnostics;

        let mut metas = FastHashMap::new();
        if self.options.scan_meta {
            let report = self
                .extractor
                .extract_files(files, self.options.extract_concurrency)?;
            for (file, error) in report.failures {
                diagnostics.file_error(file, error);
            }
            metas = report.metas;
        }

        augment_routes(&mut forest, &metas);
        hook(&mut forest);

        let routes = normalize_routes(
            &forest,
            &metas,
            self.options.override_meta,
            Arc::clone(&self.loader),
        );

        let build = Arc::new(RouteBuild {
            generation,
            forest,
            routes,
            metas,
            diagnostics,
        });

        let mut current = self.current.write();
        if self.generation.load(Ordering::Acquire) == generation {
            *current = Some(Arc::clone(&build));
        } else {
            tracing::debug!(generation, "superseded rebuild was not published");
        }

        Ok(build)
    }
}
