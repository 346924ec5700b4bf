use crate::meta::ExtractError;
use crate::pages::OptionsError;
use crate::pattern::SegmentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PagesError {
    #[error(transparent)]
    Segment(#[from] SegmentError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Options(#[from] OptionsError),
}

impl PagesError {
    /// Hard errors are author-facing and must not be downgraded to warnings.
    pub fn is_hard(&self) -> bool {
        matches!(self, Self::Extract(err) if err.is_hard())
    }
}

pub type PagesResult<T> = Result<T, PagesError>;
