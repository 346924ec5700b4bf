mod compiler;
mod error;
mod lexer;
mod token;

pub use compiler::{compile_segment, encode_static};
pub use error::{SegmentError, SegmentResult};
pub use lexer::tokenize_segment;
pub use token::{SegmentToken, SegmentTokens, TokenizedSegment};
