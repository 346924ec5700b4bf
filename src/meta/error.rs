use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read '{file}': {source}")]
    Read {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse script in '{file}': {message}")]
    Parse { file: PathBuf, message: String },
    #[error("`{name}` is called {count} times in '{file}'; expected a single top-level call")]
    MultipleCalls {
        name: String,
        file: PathBuf,
        count: usize,
    },
    #[error("`{name}` must be called with exactly one argument in '{file}' (got {count})")]
    ArgumentCount {
        name: String,
        file: PathBuf,
        count: usize,
    },
    #[error("`{name}` must be called with an object literal in '{file}'")]
    NotObjectLiteral { name: String, file: PathBuf },
    #[error("`{name}` cannot take a spread argument in '{file}'")]
    SpreadArgument { name: String, file: PathBuf },
    #[error("`{name}` must be called by its bare identifier in '{file}'")]
    UnsupportedCallee { name: String, file: PathBuf },
    #[error("`{expression}` is not allowed inside `{name}` in '{file}'")]
    DisallowedExpression {
        name: String,
        file: PathBuf,
        expression: &'static str,
    },
    #[error("failed to start extraction workers: {message}")]
    WorkerPool { message: String },
}

impl ExtractError {
    /// The author's code cannot behave as declared at build or run time.
    pub fn is_hard(&self) -> bool {
        matches!(self, Self::DisallowedExpression { .. })
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;
