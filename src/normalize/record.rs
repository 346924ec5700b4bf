use super::MetadataModuleRef;
use crate::meta::PageMetaKey;
use crate::types::RouteMode;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A normalized route field: either known at build time, or deferred to
/// the page's metadata module with an optional fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldValue {
    Static {
        value: Value,
    },
    Deferred {
        key: PageMetaKey,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<Value>,
    },
}

impl FieldValue {
    pub fn from_static(value: impl Into<Value>) -> Self {
        Self::Static {
            value: value.into(),
        }
    }

    pub fn as_static(&self) -> Option<&Value> {
        match self {
            Self::Static { value } => Some(value),
            Self::Deferred { .. } => None,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred { .. })
    }

    /// Evaluates the field against the record a metadata module loaded.
    ///
    /// A missing or `null` module value falls back. For `meta`, every
    /// non allow-listed entry of the record is laid over the fallback bag.
    pub fn resolve(&self, record: &Map<String, Value>) -> Option<Value> {
        let (key, fallback) = match self {
            Self::Static { value } => return Some(value.clone()),
            Self::Deferred { key, fallback } => (*key, fallback),
        };

        if key == PageMetaKey::Meta {
            let mut bag = match fallback {
                Some(Value::Object(map)) => map.clone(),
                _ => Map::new(),
            };
            for (name, value) in record {
                if PageMetaKey::from_allow_listed(name).is_none() {
                    bag.insert(name.clone(), value.clone());
                }
            }
            return (!bag.is_empty()).then_some(Value::Object(bag));
        }

        record
            .get(key.as_str())
            .filter(|value| !value.is_null())
            .cloned()
            .or_else(|| fallback.clone())
    }
}

/// Final route record handed to the matcher generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldValue>,
    pub path: FieldValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub mode: RouteMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<FieldValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<MetadataModuleRef>,
}

impl RouteRecord {
    pub fn field(&self, key: PageMetaKey) -> Option<&FieldValue> {
        match key {
            PageMetaKey::Name => self.name.as_ref(),
            PageMetaKey::Path => Some(&self.path),
            PageMetaKey::Props => self.props.as_ref(),
            PageMetaKey::Alias => self.alias.as_ref(),
            PageMetaKey::Redirect => self.redirect.as_ref(),
            PageMetaKey::Meta => self.meta.as_ref(),
        }
    }

    pub fn static_name(&self) -> Option<&str> {
        self.name.as_ref()?.as_static()?.as_str()
    }

    pub fn static_path(&self) -> Option<&str> {
        self.path.as_static()?.as_str()
    }
}
