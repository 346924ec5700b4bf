mod options;
mod service;

pub use options::{DEFAULT_EXTRACT_CONCURRENCY, OptionsError, PagesOptions, PagesOptionsBuilder};
pub use service::{PageRoutes, RouteBuild};
