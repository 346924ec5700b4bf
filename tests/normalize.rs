use bunner_pages_rs::meta::{
    ExtractOptions, ExtractResult, ExtractedMeta, MetaExtractor, PageMetaKey, extract_page_meta,
};
use bunner_pages_rs::normalize::{
    FieldValue, LoadFuture, MetadataModule, ModuleLoader, RouteRecord, SourceModuleLoader,
    augment_routes, normalize_routes, prerender_paths, route_names,
};
use bunner_pages_rs::tree::{RouteNode, TreeBuilder};
use bunner_pages_rs::ScannedFile;
use hashbrown::HashMap;
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ROOT: &str = "/app/pages";

#[derive(Debug)]
struct StaticLoader {
    record: Map<String, Value>,
}

impl ModuleLoader for StaticLoader {
    fn load(&self, _module: &MetadataModule) -> LoadFuture {
        let record = self.record.clone();
        Box::pin(async move { ExtractResult::Ok(record) })
    }
}

fn page(relative: &str) -> ScannedFile {
    ScannedFile::new(relative, format!("{ROOT}/{relative}"))
}

fn forest(relatives: &[&str]) -> Vec<RouteNode> {
    let files: Vec<ScannedFile> = relatives.iter().map(|r| page(r)).collect();
    TreeBuilder::new().build(&files).routes
}

fn metas(sources: &[(&str, &str)]) -> HashMap<PathBuf, ExtractedMeta> {
    let mut out = HashMap::new();
    for (relative, source) in sources {
        let file = PathBuf::from(format!("{ROOT}/{relative}"));
        if let Some(meta) = extract_page_meta(source, &file, &ExtractOptions::default())
            .expect("extraction should succeed")
        {
            out.insert(file, meta);
        }
    }
    out
}

fn source_loader() -> Arc<dyn ModuleLoader> {
    Arc::new(SourceModuleLoader::new(Arc::new(MetaExtractor::default())))
}

fn by_file<'a>(records: &'a [RouteRecord], relative: &str) -> &'a RouteRecord {
    let file = PathBuf::from(format!("{ROOT}/{relative}"));
    records
        .iter()
        .find(|record| record.file.as_deref() == Some(file.as_path()))
        .unwrap_or_else(|| panic!("record for `{relative}` should exist"))
}

#[test]
fn normalize_when_override_and_static_value_then_extracted_value_wins() {
    let forest = forest(&["about.vue"]);
    let metas = metas(&[("about.vue", "<script setup>definePageMeta({ name: 'info' })</script>")]);

    let records = normalize_routes(&forest, &metas, true, source_loader());
    let about = by_file(&records, "about.vue");

    assert_eq!(about.name, Some(FieldValue::from_static("info")));
    assert_eq!(about.path, FieldValue::from_static("/about"));
}

#[test]
fn normalize_when_override_and_dynamic_value_then_field_is_deferred_to_tree_value() {
    let forest = forest(&["about.vue"]);
    let metas = metas(&[(
        "about.vue",
        "<script setup>definePageMeta({ name: buildName() })</script>",
    )]);

    let records = normalize_routes(&forest, &metas, true, source_loader());
    assert_eq!(
        by_file(&records, "about.vue").name,
        Some(FieldValue::Deferred {
            key: PageMetaKey::Name,
            fallback: Some(json!("about")),
        })
    );
}

#[test]
fn normalize_when_not_override_then_tree_value_wins() {
    let forest = forest(&["about.vue"]);
    let metas = metas(&[(
        "about.vue",
        "<script setup>definePageMeta({ name: 'info', props: resolveProps() })</script>",
    )]);

    let records = normalize_routes(&forest, &metas, false, source_loader());
    let about = by_file(&records, "about.vue");

    assert_eq!(about.name, Some(FieldValue::from_static("about")));
    assert_eq!(
        about.props,
        Some(FieldValue::Deferred {
            key: PageMetaKey::Props,
            fallback: None,
        })
    );
}

#[test]
fn normalize_when_augmented_then_static_values_reach_the_record() {
    let mut forest = forest(&["index.vue"]);
    let metas = metas(&[(
        "index.vue",
        "<script setup>definePageMeta({ alias: '/home', redirect: '/start' })</script>",
    )]);

    augment_routes(&mut forest, &metas);
    assert_eq!(forest[0].alias, vec!["/home".to_string()]);

    let records = normalize_routes(&forest, &metas, false, source_loader());
    let index = by_file(&records, "index.vue");
    assert_eq!(index.alias, Some(FieldValue::from_static(json!(["/home"]))));
    assert_eq!(index.redirect, Some(FieldValue::from_static("/start")));
}

#[test]
fn normalize_when_file_has_no_call_then_module_is_still_referenced() {
    let forest = forest(&["about.vue"]);
    let records = normalize_routes(&forest, &HashMap::new(), true, source_loader());

    let module = by_file(&records, "about.vue")
        .module
        .as_ref()
        .expect("file-backed records always reference a module");
    assert_eq!(module.id(), "/app/pages/about.vue?macro=true");
    assert_eq!(module.module().code, "export default {}\n");
}

#[test]
fn normalize_when_serialized_then_fields_are_tagged() {
    let forest = forest(&["about.vue"]);
    let records = normalize_routes(&forest, &HashMap::new(), true, source_loader());
    let value = serde_json::to_value(&records[0]).expect("record should serialize");

    assert_eq!(value["name"], json!({ "kind": "static", "value": "about" }));
    assert_eq!(value["path"], json!({ "kind": "static", "value": "/about" }));
    assert_eq!(value["module"]["id"], json!("/app/pages/about.vue?macro=true"));
}

#[tokio::test]
async fn module_when_loaded_then_deferred_field_resolves_against_it() {
    let forest = forest(&["about.vue"]);
    let metas = metas(&[(
        "about.vue",
        "<script setup>definePageMeta({ name: buildName(), title: 'About' })</script>",
    )]);

    let mut record = Map::new();
    record.insert("name".into(), json!("about-us"));
    record.insert("title".into(), json!("About us"));
    let loader: Arc<dyn ModuleLoader> = Arc::new(StaticLoader { record });

    let records = normalize_routes(&forest, &metas, true, loader);
    let about = by_file(&records, "about.vue");
    let module = about.module.as_ref().expect("module should be referenced");
    let loaded = module.load().await.expect("module should load");

    let name = about.name.as_ref().expect("name should be present");
    assert_eq!(name.resolve(&loaded), Some(json!("about-us")));

    let meta = about.meta.as_ref().expect("meta should be present");
    assert!(meta.is_deferred());
    assert_eq!(meta.resolve(&loaded), Some(json!({ "title": "About us" })));
}

#[tokio::test]
async fn source_loader_when_loading_then_returns_static_record() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let file = dir.path().join("index.vue");
    std::fs::write(
        &file,
        "<script setup>\ndefinePageMeta({ name: 'home', layout: 'wide' })\n</script>",
    )
    .expect("write");

    let loader = source_loader();
    let module = MetadataModule::new(Path::new(&file), None);
    let record = loader.load(&module).await.expect("module should load");

    assert_eq!(Value::Object(record), json!({ "name": "home", "layout": "wide" }));
}

#[test]
fn plan_when_routes_are_static_then_they_are_prerendered() {
    let forest = forest(&["index.vue", "about.vue", "docs/index.vue", "blog/[slug].vue"]);
    let records = normalize_routes(&forest, &HashMap::new(), true, source_loader());

    assert_eq!(prerender_paths(&records), vec!["/", "/about", "/docs"]);
    assert_eq!(route_names(&records), vec!["index", "about", "docs", "blog-slug"]);
}

#[test]
fn plan_when_static_segment_has_escaped_colon_then_route_is_prerendered() {
    let forest = forest(&["time:now.vue", "time:now/[id].vue"]);
    let records = normalize_routes(&forest, &HashMap::new(), true, source_loader());

    assert_eq!(records[0].static_path(), Some("/time\\:now"));
    assert_eq!(prerender_paths(&records), vec!["/time:now"]);
}

#[test]
fn plan_when_path_is_deferred_then_route_is_skipped() {
    let forest = forest(&["index.vue", "about.vue"]);
    let metas = metas(&[(
        "about.vue",
        "<script setup>definePageMeta({ path: localizedPath('about') })</script>",
    )]);
    let records = normalize_routes(&forest, &metas, true, source_loader());

    assert!(by_file(&records, "about.vue").path.is_deferred());
    assert_eq!(prerender_paths(&records), vec!["/"]);
}
