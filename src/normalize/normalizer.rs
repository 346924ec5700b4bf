use super::{FieldValue, MetadataModule, MetadataModuleRef, ModuleLoader, RouteRecord};
use crate::meta::{ExtractedMeta, PageMetaKey};
use crate::tree::RouteNode;
use hashbrown::HashMap as FastHashMap;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// Copies statically extracted values onto the nodes of their files.
///
/// Entries a node already carries in its `meta` bag win over extracted ones.
#[tracing::instrument(level = "trace", skip_all, fields(files = metas.len() as u64))]
pub fn augment_routes(forest: &mut [RouteNode], metas: &FastHashMap<PathBuf, ExtractedMeta>) {
    for node in forest.iter_mut() {
        if let Some(meta) = node.file.as_ref().and_then(|file| metas.get(file)) {
            augment_node(node, meta);
        }
        augment_routes(&mut node.children, metas);
    }
}

fn augment_node(node: &mut RouteNode, meta: &ExtractedMeta) {
    if let Some(name) = &meta.name {
        node.name = Some(name.clone());
    }
    if let Some(path) = &meta.path {
        node.path = path.clone();
    }
    if let Some(props) = &meta.props {
        node.props = Some(props.clone());
    }
    if let Some(alias) = &meta.alias {
        node.alias = alias.clone();
    }
    if let Some(redirect) = &meta.redirect {
        node.redirect = Some(redirect.clone());
    }
    if !meta.meta.is_empty() {
        let mut bag = meta.meta.clone();
        bag.extend(std::mem::take(&mut node.meta));
        node.meta = bag;
    }
}

/// Reconciles tree values with extracted metadata.
#[derive(Debug)]
pub struct Normalizer<'a> {
    metas: &'a FastHashMap<PathBuf, ExtractedMeta>,
    override_meta: bool,
    loader: Arc<dyn ModuleLoader>,
}

impl<'a> Normalizer<'a> {
    pub fn new(
        metas: &'a FastHashMap<PathBuf, ExtractedMeta>,
        override_meta: bool,
        loader: Arc<dyn ModuleLoader>,
    ) -> Self {
        Self {
            metas,
            override_meta,
            loader,
        }
    }

    pub fn normalize(&self, forest: &[RouteNode]) -> Vec<RouteRecord> {
        forest.iter().map(|node| self.record(node)).collect()
    }

    fn record(&self, node: &RouteNode) -> RouteRecord {
        let extracted = node.file.as_ref().and_then(|file| self.metas.get(file));

        let path = self
            .field(PageMetaKey::Path, Some(Value::String(node.path.clone())), extracted)
            .unwrap_or_else(|| FieldValue::from_static(node.path.clone()));
        let alias = (!node.alias.is_empty())
            .then(|| Value::Array(node.alias.iter().cloned().map(Value::String).collect()));
        let meta = (!node.meta.is_empty()).then(|| Value::Object(node.meta.clone()));

        let module = node.file.as_ref().map(|file| {
            MetadataModuleRef::new(MetadataModule::new(file, extracted), Arc::clone(&self.loader))
        });

        RouteRecord {
            name: self.field(PageMetaKey::Name, node.name.clone().map(Value::String), extracted),
            path,
            file: node.file.clone(),
            mode: node.mode,
            props: self.field(PageMetaKey::Props, node.props.clone(), extracted),
            alias: self.field(PageMetaKey::Alias, alias, extracted),
            redirect: self.field(PageMetaKey::Redirect, node.redirect.clone(), extracted),
            meta: self.field(PageMetaKey::Meta, meta, extracted),
            children: self.normalize(&node.children),
            module,
        }
    }

    fn field(
        &self,
        key: PageMetaKey,
        tree: Option<Value>,
        extracted: Option<&ExtractedMeta>,
    ) -> Option<FieldValue> {
        let dynamic = extracted.is_some_and(|meta| meta.is_dynamic(key));
        let value = extracted.and_then(|meta| meta.value(key));

        if self.override_meta {
            if dynamic {
                return Some(FieldValue::Deferred {
                    key,
                    fallback: tree,
                });
            }
            let value = match (key, value, tree) {
                (PageMetaKey::Meta, Some(Value::Object(extracted)), Some(Value::Object(mut bag))) => {
                    bag.extend(extracted);
                    Some(Value::Object(bag))
                }
                (_, Some(value), _) => Some(value),
                (_, None, tree) => tree,
            };
            return value.map(|value| FieldValue::Static { value });
        }

        match tree {
            Some(value) => Some(FieldValue::Static { value }),
            None if dynamic || value.is_some() => Some(FieldValue::Deferred {
                key,
                fallback: value,
            }),
            None => None,
        }
    }
}

/// Produces the final route records for a forest.
#[tracing::instrument(level = "trace", skip_all, fields(routes = forest.len() as u64, override_meta = override_meta))]
pub fn normalize_routes(
    forest: &[RouteNode],
    metas: &FastHashMap<PathBuf, ExtractedMeta>,
    override_meta: bool,
    loader: Arc<dyn ModuleLoader>,
) -> Vec<RouteRecord> {
    Normalizer::new(metas, override_meta, loader).normalize(forest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RouteMode;
    use serde_json::json;

    #[test]
    fn augment_keeps_node_meta_over_extracted() {
        let file = PathBuf::from("/pages/index.vue");
        let mut node = RouteNode::for_file(file.clone(), RouteMode::All).with_name("index");
        node.meta.insert("layout".into(), json!("hook"));

        let mut meta = ExtractedMeta::default();
        meta.alias = Some(vec!["/home".into()]);
        meta.meta.insert("layout".into(), json!("page"));
        meta.meta.insert("auth".into(), json!(true));

        let mut metas = FastHashMap::new();
        metas.insert(file, meta);
        let mut forest = vec![node];
        augment_routes(&mut forest, &metas);

        assert_eq!(forest[0].alias, vec!["/home".to_string()]);
        assert_eq!(forest[0].meta.get("layout"), Some(&json!("hook")));
        assert_eq!(forest[0].meta.get("auth"), Some(&json!(true)));
    }
}
