use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SegmentError {
    #[error("empty param in segment '{segment}'")]
    EmptyParam { segment: String },
    #[error("empty group in segment '{segment}'")]
    EmptyGroup { segment: String },
    #[error("unfinished param \"{buffer}\" in segment '{segment}'")]
    UnfinishedParam { segment: String, buffer: String },
    #[error("catchall param '{name}' must be the only param in segment '{segment}'")]
    CatchallNotAlone { segment: String, name: String },
}

pub type SegmentResult<T> = Result<T, SegmentError>;
