pub mod diagnostics;
pub mod errors;
pub mod meta;
pub mod normalize;
pub mod pages;
pub mod path;
pub mod pattern;
pub mod tree;
pub mod types;

pub use diagnostics::{ConsistencyWarning, Diagnostics, FileError};
pub use errors::{PagesError, PagesResult};
pub use meta::{ExtractedMeta, MetaExtractor, PageMetaKey, extract_page_meta};
pub use normalize::{FieldValue, MetadataModule, MetadataModuleRef, ModuleLoader, RouteRecord};
pub use pages::{PageRoutes, PagesOptions, PagesOptionsBuilder, RouteBuild};
pub use pattern::{SegmentToken, compile_segment, tokenize_segment};
pub use tree::{RouteNode, TreeBuilder};
pub use types::{RouteMode, ScannedFile};
