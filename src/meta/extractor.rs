use super::{ExtractError, ExtractOptions, ExtractResult, ExtractedMeta, MetaCache, extract_page_meta};
use crate::types::ScannedFile;
use hashbrown::{HashMap as FastHashMap, HashSet as FastHashSet};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Outcome of extracting a batch of files.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Files whose reserved call resolved; files without one are absent.
    pub metas: FastHashMap<PathBuf, ExtractedMeta>,
    pub failures: Vec<(PathBuf, ExtractError)>,
    /// Distinct files that were read.
    pub files_read: usize,
}

impl ExtractionReport {
    pub fn get(&self, file: &Path) -> Option<&ExtractedMeta> {
        self.metas.get(file)
    }
}

/// Owns the extraction options and the per-file result cache.
#[derive(Debug, Default)]
pub struct MetaExtractor {
    options: ExtractOptions,
    cache: MetaCache,
}

impl MetaExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            cache: MetaCache::new(),
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn cache(&self) -> &MetaCache {
        &self.cache
    }

    /// Extracts from in-memory text, reusing the cached result when the
    /// text for `file` has not changed.
    pub fn extract(&self, source: &str, file: &Path) -> ExtractResult<Option<ExtractedMeta>> {
        if let Some(cached) = self.cache.get(file, source) {
            return Ok(cached);
        }
        let meta = extract_page_meta(source, file, &self.options)?;
        self.cache.insert(file.to_path_buf(), source, meta.clone());
        Ok(meta)
    }

    pub fn extract_file(&self, file: &Path) -> ExtractResult<Option<ExtractedMeta>> {
        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(source) => {
                // a file that can no longer be read keeps no stale result
                self.cache.invalidate(file);
                return Err(ExtractError::Read {
                    file: file.to_path_buf(),
                    source,
                });
            }
        };
        self.extract(&source, file)
    }

    /// Reads and extracts every distinct file on a pool of at most
    /// `concurrency` workers. A file listed twice is read once.
    #[tracing::instrument(level = "trace", skip(self, files), fields(files = files.len() as u64))]
    pub fn extract_files(
        &self,
        files: &[ScannedFile],
        concurrency: usize,
    ) -> ExtractResult<ExtractionReport> {
        let mut seen: FastHashSet<&Path> = FastHashSet::with_capacity(files.len());
        let unique: Vec<&Path> = files
            .iter()
            .map(|file| file.absolute_path.as_path())
            .filter(|path| seen.insert(*path))
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(concurrency.max(1))
            .build()
            .map_err(|err| ExtractError::WorkerPool {
                message: err.to_string(),
            })?;

        let results: Vec<(PathBuf, ExtractResult<Option<ExtractedMeta>>)> = pool.install(|| {
            unique
                .par_iter()
                .map(|path| (path.to_path_buf(), self.extract_file(path)))
                .collect()
        });

        let mut report = ExtractionReport {
            files_read: unique.len(),
            ..ExtractionReport::default()
        };
        for (path, result) in results {
            match result {
                Ok(Some(meta)) => {
                    report.metas.insert(path, meta);
                }
                Ok(None) => {}
                Err(err) => report.failures.push((path, err)),
            }
        }

        tracing::event!(
            tracing::Level::TRACE,
            operation = "extract_files",
            read = report.files_read as u64,
            extracted = report.metas.len() as u64,
            failed = report.failures.len() as u64
        );
        Ok(report)
    }
}
