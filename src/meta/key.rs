use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Keys the extractor resolves by name, plus `Meta` for the free-form bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMetaKey {
    Name,
    Path,
    Props,
    Alias,
    Redirect,
    Meta,
}

impl PageMetaKey {
    pub const ALLOW_LIST: [PageMetaKey; 5] = [
        PageMetaKey::Name,
        PageMetaKey::Path,
        PageMetaKey::Props,
        PageMetaKey::Alias,
        PageMetaKey::Redirect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Path => "path",
            Self::Props => "props",
            Self::Alias => "alias",
            Self::Redirect => "redirect",
            Self::Meta => "meta",
        }
    }

    /// Looks up an allow-listed key; `meta` is not one of them.
    pub fn from_allow_listed(key: &str) -> Option<Self> {
        Self::ALLOW_LIST.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for PageMetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statically resolved contents of a page's declarative metadata call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub dynamic_keys: BTreeSet<PageMetaKey>,
    /// Source text of the call's object literal argument.
    #[serde(skip)]
    pub definition: Option<String>,
}

impl ExtractedMeta {
    pub fn is_dynamic(&self, key: PageMetaKey) -> bool {
        self.dynamic_keys.contains(&key)
    }

    /// Static value of `key` as JSON, if one was resolved.
    pub fn value(&self, key: PageMetaKey) -> Option<Value> {
        match key {
            PageMetaKey::Name => self.name.clone().map(Value::String),
            PageMetaKey::Path => self.path.clone().map(Value::String),
            PageMetaKey::Props => self.props.clone(),
            PageMetaKey::Alias => self
                .alias
                .as_ref()
                .map(|aliases| Value::Array(aliases.iter().cloned().map(Value::String).collect())),
            PageMetaKey::Redirect => self.redirect.clone(),
            PageMetaKey::Meta => (!self.meta.is_empty()).then(|| Value::Object(self.meta.clone())),
        }
    }

    /// The statically known part of the call's object, as the page itself
    /// would declare it.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut object = Map::new();
        for key in PageMetaKey::ALLOW_LIST {
            if let Some(value) = self.value(key) {
                object.insert(key.as_str().to_string(), value);
            }
        }
        for (key, value) in &self.meta {
            object.insert(key.clone(), value.clone());
        }
        object
    }

    pub(crate) fn clear(&mut self, key: PageMetaKey) {
        match key {
            PageMetaKey::Name => self.name = None,
            PageMetaKey::Path => self.path = None,
            PageMetaKey::Props => self.props = None,
            PageMetaKey::Alias => self.alias = None,
            PageMetaKey::Redirect => self.redirect = None,
            PageMetaKey::Meta => self.meta.clear(),
        }
    }

    /// Applies a resolved literal to an allow-listed key. Returns `false`
    /// when a string-typed key (`name`, `path`, `alias`) gets another shape;
    /// `props` and `redirect` keep any literal as written.
    pub(crate) fn assign(&mut self, key: PageMetaKey, value: Value) -> bool {
        match (key, value) {
            (PageMetaKey::Name, Value::String(s)) => self.name = Some(s),
            (PageMetaKey::Path, Value::String(s)) => self.path = Some(s),
            (PageMetaKey::Alias, Value::String(s)) => self.alias = Some(vec![s]),
            (PageMetaKey::Alias, Value::Array(items)) => {
                let mut aliases = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => aliases.push(s),
                        _ => return false,
                    }
                }
                self.alias = Some(aliases);
            }
            (PageMetaKey::Redirect, value) => self.redirect = Some(value),
            (PageMetaKey::Props, value) => self.props = Some(value),
            _ => return false,
        }
        true
    }
}
