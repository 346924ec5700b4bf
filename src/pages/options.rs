use crate::meta::{DEFAULT_RESERVED_NAME, ExtractOptions, PageMetaKey};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

pub const DEFAULT_EXTRACT_CONCURRENCY: usize = 8;

static JS_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern should compile")
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PagesOptions {
    pub reserved_name: String,
    pub extra_extraction_keys: Vec<String>,
    pub override_meta: bool,
    pub scan_meta: bool,
    pub server_components: bool,
    pub extract_concurrency: usize,
}

impl Default for PagesOptions {
    fn default() -> Self {
        Self {
            reserved_name: DEFAULT_RESERVED_NAME.to_string(),
            extra_extraction_keys: Vec::new(),
            override_meta: true,
            scan_meta: true,
            server_components: true,
            extract_concurrency: DEFAULT_EXTRACT_CONCURRENCY,
        }
    }
}

impl PagesOptions {
    pub fn builder() -> PagesOptionsBuilder {
        PagesOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if !JS_IDENTIFIER.is_match(&self.reserved_name) {
            return Err(OptionsError::InvalidReservedName {
                name: self.reserved_name.clone(),
            });
        }
        for (i, key) in self.extra_extraction_keys.iter().enumerate() {
            if !JS_IDENTIFIER.is_match(key) {
                return Err(OptionsError::InvalidExtraKey { key: key.clone() });
            }
            if PageMetaKey::from_allow_listed(key).is_some() {
                return Err(OptionsError::ExtraKeyShadowsAllowList { key: key.clone() });
            }
            if self.extra_extraction_keys[..i].contains(key) {
                return Err(OptionsError::DuplicateExtraKey { key: key.clone() });
            }
        }
        if self.extract_concurrency == 0 {
            return Err(OptionsError::ConcurrencyInvalid { provided: 0 });
        }
        Ok(())
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            reserved_name: self.reserved_name.clone(),
            extra_keys: self.extra_extraction_keys.clone(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct PagesOptionsBuilder {
    options: PagesOptions,
}

impl PagesOptionsBuilder {
    pub fn reserved_name<S: Into<String>>(mut self, name: S) -> Self {
        self.options.reserved_name = name.into();
        self
    }

    pub fn extra_extraction_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extra_extraction_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn override_meta(mut self, value: bool) -> Self {
        self.options.override_meta = value;
        self
    }

    pub fn scan_meta(mut self, value: bool) -> Self {
        self.options.scan_meta = value;
        self
    }

    pub fn server_components(mut self, value: bool) -> Self {
        self.options.server_components = value;
        self
    }

    pub fn extract_concurrency(mut self, value: usize) -> Self {
        self.options.extract_concurrency = value;
        self
    }

    pub fn build(self) -> Result<PagesOptions, OptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("reserved call name '{name}' is not a valid identifier")]
    InvalidReservedName { name: String },
    #[error("extra extraction key '{key}' is not a valid identifier")]
    InvalidExtraKey { key: String },
    #[error("extra extraction key '{key}' is already extracted by default")]
    ExtraKeyShadowsAllowList { key: String },
    #[error("extra extraction key '{key}' is listed more than once")]
    DuplicateExtraKey { key: String },
    #[error("extract_concurrency must be at least 1 (got {provided})")]
    ConcurrencyInvalid { provided: usize },
}
