use crate::errors::PagesError;
use crate::types::RouteMode;
use std::fmt;
use std::path::PathBuf;

/// Non-fatal findings that never abort a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyWarning {
    DuplicateRouteName {
        name: String,
        mode: RouteMode,
        file: Option<PathBuf>,
        existing: Option<PathBuf>,
    },
    IgnoredParamCharacter {
        file: PathBuf,
        segment: String,
        character: char,
    },
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRouteName {
                name,
                file,
                existing,
                ..
            } => {
                let file = file
                    .as_ref()
                    .map_or_else(|| "<virtual>".to_string(), |p| p.display().to_string());
                match existing {
                    Some(existing) => write!(
                        f,
                        "route name `{name}` generated for `{file}` is the same as `{}`",
                        existing.display()
                    ),
                    None => write!(f, "route name `{name}` generated for `{file}` is a duplicate"),
                }
            }
            Self::IgnoredParamCharacter {
                file,
                segment,
                character,
            } => write!(
                f,
                "'{character}' is not allowed in a dynamic route parameter and has been ignored; consider renaming `{segment}` in `{}`",
                file.display()
            ),
        }
    }
}

/// An error scoped to a single page file.
#[derive(Debug)]
pub struct FileError {
    pub file: PathBuf,
    pub error: PagesError,
}

impl FileError {
    pub fn is_hard(&self) -> bool {
        self.error.is_hard()
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    pub warnings: Vec<ConsistencyWarning>,
    pub errors: Vec<FileError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: ConsistencyWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn file_error(&mut self, file: PathBuf, error: impl Into<PagesError>) {
        let error = error.into();
        if error.is_hard() {
            tracing::error!(file = %file.display(), "{error}");
        } else {
            tracing::warn!(file = %file.display(), "{error}");
        }
        self.errors.push(FileError { file, error });
    }

    pub fn hard_errors(&self) -> impl Iterator<Item = &FileError> {
        self.errors.iter().filter(|e| e.is_hard())
    }

    pub fn has_hard_errors(&self) -> bool {
        self.hard_errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}
