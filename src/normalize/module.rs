use crate::meta::{ExtractResult, ExtractedMeta, MetaExtractor};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

pub const METADATA_MODULE_QUERY: &str = "?macro=true";
const METADATA_BINDING: &str = "__page_meta";

pub type LoadFuture = Pin<Box<dyn Future<Output = ExtractResult<Map<String, Value>>> + Send>>;

/// The isolated fragment holding only a page's declarative call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataModule {
    pub id: String,
    pub file: PathBuf,
    pub code: String,
}

impl MetadataModule {
    pub fn new(file: &Path, meta: Option<&ExtractedMeta>) -> Self {
        let code = match meta.and_then(|meta| meta.definition.as_deref()) {
            Some(definition) => format!(
                "const {METADATA_BINDING} = {definition}\nexport default {METADATA_BINDING}\n"
            ),
            None => "export default {}\n".to_string(),
        };
        Self {
            id: format!("{}{METADATA_MODULE_QUERY}", file.display()),
            file: file.to_path_buf(),
            code,
        }
    }
}

/// Evaluates a metadata module into the record the page declares.
pub trait ModuleLoader: fmt::Debug + Send + Sync {
    fn load(&self, module: &MetadataModule) -> LoadFuture;
}

/// Loads a module by re-extracting its page file; only statically
/// resolvable entries come back.
#[derive(Debug, Clone)]
pub struct SourceModuleLoader {
    extractor: Arc<MetaExtractor>,
}

impl SourceModuleLoader {
    pub fn new(extractor: Arc<MetaExtractor>) -> Self {
        Self { extractor }
    }
}

impl ModuleLoader for SourceModuleLoader {
    fn load(&self, module: &MetadataModule) -> LoadFuture {
        let extractor = Arc::clone(&self.extractor);
        let file = module.file.clone();
        Box::pin(async move {
            let meta = extractor.extract_file(&file)?;
            ExtractResult::Ok(meta.map(|meta| meta.to_object()).unwrap_or_default())
        })
    }
}

/// A record's handle on its metadata module and the loader that evaluates it.
#[derive(Clone)]
pub struct MetadataModuleRef {
    module: Arc<MetadataModule>,
    loader: Arc<dyn ModuleLoader>,
}

impl MetadataModuleRef {
    pub fn new(module: MetadataModule, loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            module: Arc::new(module),
            loader,
        }
    }

    pub fn id(&self) -> &str {
        &self.module.id
    }

    pub fn module(&self) -> &MetadataModule {
        &self.module
    }

    pub fn load(&self) -> LoadFuture {
        self.loader.load(&self.module)
    }
}

impl fmt::Debug for MetadataModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataModuleRef")
            .field("id", &self.module.id)
            .finish()
    }
}

impl PartialEq for MetadataModuleRef {
    fn eq(&self, other: &Self) -> bool {
        self.module == other.module
    }
}

impl Serialize for MetadataModuleRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.module.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_binds_the_call_argument() {
        let meta = ExtractedMeta {
            definition: Some("{ name: 'home' }".to_string()),
            ..ExtractedMeta::default()
        };
        let module = MetadataModule::new(Path::new("/app/pages/index.vue"), Some(&meta));
        assert_eq!(module.id, "/app/pages/index.vue?macro=true");
        assert_eq!(
            module.code,
            "const __page_meta = { name: 'home' }\nexport default __page_meta\n"
        );
    }

    #[test]
    fn module_without_call_exports_empty_object() {
        let module = MetadataModule::new(Path::new("/app/pages/about.vue"), None);
        assert_eq!(module.code, "export default {}\n");
    }
}
