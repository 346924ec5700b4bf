mod cache;
mod error;
mod extract;
mod extractor;
mod key;
mod literal;
mod source;

pub use cache::{CacheStats, MetaCache};
pub use error::{ExtractError, ExtractResult};
pub use extract::{DEFAULT_RESERVED_NAME, ExtractOptions, extract_page_meta};
pub use extractor::{ExtractionReport, MetaExtractor};
pub use key::{ExtractedMeta, PageMetaKey};
pub use source::{ScriptBlock, ScriptLang, SourceKind};
