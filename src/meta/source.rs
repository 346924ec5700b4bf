use oxc::span::SourceType;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static SFC_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<script(?P<attrs>(?:[^>"']|"[^"]*"|'[^']*')*)>(?P<content>.*?)</script[^>]*>"#,
    )
        .expect("sfc script pattern should compile")
});

static SCRIPT_LANG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\blang\s*=\s*["']?(?P<lang>[A-Za-z]+)"#).expect("lang pattern should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLang {
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl ScriptLang {
    pub fn source_type(self) -> SourceType {
        match self {
            Self::Js => SourceType::mjs(),
            Self::Jsx => SourceType::jsx(),
            Self::Ts => SourceType::ts(),
            Self::Tsx => SourceType::tsx(),
        }
    }

    fn from_sfc_attrs(attrs: &str) -> Self {
        let lang = SCRIPT_LANG
            .captures(attrs)
            .and_then(|caps| caps.name("lang"))
            .map(|m| m.as_str().to_ascii_lowercase());
        match lang.as_deref() {
            Some("tsx" | "jsx") => Self::Tsx,
            _ => Self::Ts,
        }
    }
}

/// How a page file carries its script, resolved once from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Markup with embedded `<script>` blocks.
    Sfc,
    Script(ScriptLang),
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        let kind = match ext {
            "vue" => Self::Sfc,
            "js" | "mjs" | "cjs" => Self::Script(ScriptLang::Js),
            "jsx" => Self::Script(ScriptLang::Jsx),
            "ts" | "mts" | "cts" => Self::Script(ScriptLang::Ts),
            "tsx" => Self::Script(ScriptLang::Tsx),
            _ => return None,
        };
        Some(kind)
    }

    pub fn script_blocks<'s>(&self, source: &'s str) -> Vec<ScriptBlock<'s>> {
        match self {
            Self::Script(lang) => vec![ScriptBlock {
                code: source,
                lang: *lang,
            }],
            Self::Sfc => SFC_SCRIPT
                .captures_iter(source)
                .filter_map(|caps| {
                    let code = caps.name("content")?.as_str().trim();
                    if code.is_empty() {
                        return None;
                    }
                    let attrs = caps.name("attrs").map_or("", |m| m.as_str());
                    Some(ScriptBlock {
                        code,
                        lang: ScriptLang::from_sfc_attrs(attrs),
                    })
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptBlock<'s> {
    pub code: &'s str,
    pub lang: ScriptLang,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_extension() {
        assert_eq!(SourceKind::from_path(Path::new("a/b.vue")), Some(SourceKind::Sfc));
        assert_eq!(
            SourceKind::from_path(Path::new("a/b.tsx")),
            Some(SourceKind::Script(ScriptLang::Tsx))
        );
        assert_eq!(SourceKind::from_path(Path::new("a/b.md")), None);
        assert_eq!(SourceKind::from_path(Path::new("a/b")), None);
    }

    #[test]
    fn sfc_yields_every_script_block() {
        let sfc = r#"<template><div /></template>
<script lang="ts">
export default {}
</script>
<script setup lang="tsx">
definePageMeta({ name: 'x' })
</script>"#;
        let blocks = SourceKind::Sfc.script_blocks(sfc);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lang, ScriptLang::Ts);
        assert_eq!(blocks[0].code, "export default {}");
        assert_eq!(blocks[1].lang, ScriptLang::Tsx);
        assert_eq!(blocks[1].code, "definePageMeta({ name: 'x' })");
    }

    #[test]
    fn sfc_attribute_values_may_contain_angle_brackets() {
        let sfc = r#"<script setup lang="ts" generic="T extends Record<string, unknown>">
definePageMeta({ name: 'x' })
</script>"#;
        let blocks = SourceKind::Sfc.script_blocks(sfc);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lang, ScriptLang::Ts);
        assert_eq!(blocks[0].code, "definePageMeta({ name: 'x' })");
    }

    #[test]
    fn sfc_without_script_has_no_blocks() {
        assert!(SourceKind::Sfc.script_blocks("<template />").is_empty());
    }
}
