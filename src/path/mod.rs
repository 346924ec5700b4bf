mod join;

pub use join::{collapse_index, full_path, has_duplicate_slash, join_url, with_leading_slash};
