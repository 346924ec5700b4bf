mod module;
mod normalizer;
mod plan;
mod record;

pub use module::{
    LoadFuture, METADATA_MODULE_QUERY, MetadataModule, MetadataModuleRef, ModuleLoader,
    SourceModuleLoader,
};
pub use normalizer::{Normalizer, augment_routes, normalize_routes};
pub use plan::{prerender_paths, route_names};
pub use record::{FieldValue, RouteRecord};
