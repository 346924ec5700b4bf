use super::literal::{evaluate, find_in_object, property_key};
use super::source::{ScriptBlock, SourceKind};
use super::{ExtractError, ExtractResult, ExtractedMeta, PageMetaKey};
use oxc::allocator::Allocator;
use oxc::ast::ast::{Argument, CallExpression, Expression, ObjectPropertyKind, Statement};
use oxc::parser::Parser;
use std::path::Path;

pub const DEFAULT_RESERVED_NAME: &str = "definePageMeta";

/// What the extractor looks for: the call name and the caller's extra keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub reserved_name: String,
    pub extra_keys: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            reserved_name: DEFAULT_RESERVED_NAME.to_string(),
            extra_keys: Vec::new(),
        }
    }
}

impl ExtractOptions {
    fn is_extra(&self, key: &str) -> bool {
        self.extra_keys.iter().any(|k| k == key)
    }
}

enum CallShape {
    Direct,
    Indirect,
}

/// Statically resolves the reserved metadata call of one file.
///
/// Returns `Ok(None)` when the file kind carries no script, or when no
/// top-level call is present.
#[tracing::instrument(level = "trace", skip(source, file, options), fields(file = %file.display(), len = source.len() as u64))]
pub fn extract_page_meta(
    source: &str,
    file: &Path,
    options: &ExtractOptions,
) -> ExtractResult<Option<ExtractedMeta>> {
    let Some(kind) = SourceKind::from_path(file) else {
        return Ok(None);
    };

    let name = options.reserved_name.as_str();
    if memchr::memmem::find(source.as_bytes(), name.as_bytes()).is_none() {
        return Ok(None);
    }

    let blocks: Vec<ScriptBlock<'_>> = kind
        .script_blocks(source)
        .into_iter()
        .filter(|block| memchr::memmem::find(block.code.as_bytes(), name.as_bytes()).is_some())
        .collect();

    let mut found: Vec<ExtractedMeta> = Vec::new();
    let mut calls = 0usize;

    for block in &blocks {
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, block.code, block.lang.source_type()).parse();
        if parsed.panicked || !parsed.errors.is_empty() {
            let message = parsed
                .errors
                .first()
                .map_or_else(|| "parser aborted".to_string(), |e| e.to_string());
            return Err(ExtractError::Parse {
                file: file.to_path_buf(),
                message,
            });
        }

        for statement in parsed.program.body.iter() {
            let Statement::ExpressionStatement(statement) = statement else {
                continue;
            };
            let Expression::CallExpression(call) = &statement.expression else {
                continue;
            };
            match call_shape(call, name) {
                Some(CallShape::Direct) => {
                    calls += 1;
                    if calls > 1 {
                        continue;
                    }
                    found.push(resolve_call(call, block.code, file, options)?);
                }
                Some(CallShape::Indirect) => {
                    return Err(ExtractError::UnsupportedCallee {
                        name: name.to_string(),
                        file: file.to_path_buf(),
                    });
                }
                None => {}
            }
        }
    }

    if calls > 1 {
        return Err(ExtractError::MultipleCalls {
            name: name.to_string(),
            file: file.to_path_buf(),
            count: calls,
        });
    }

    Ok(found.pop())
}

fn call_shape(call: &CallExpression<'_>, name: &str) -> Option<CallShape> {
    match &call.callee {
        Expression::Identifier(ident) if ident.name.as_str() == name => Some(CallShape::Direct),
        Expression::StaticMemberExpression(member) if member.property.name.as_str() == name => {
            Some(CallShape::Indirect)
        }
        Expression::ComputedMemberExpression(member) => match &member.expression {
            Expression::StringLiteral(lit) if lit.value.as_str() == name => Some(CallShape::Indirect),
            _ => None,
        },
        _ => None,
    }
}

fn resolve_call(
    call: &CallExpression<'_>,
    code: &str,
    file: &Path,
    options: &ExtractOptions,
) -> ExtractResult<ExtractedMeta> {
    let name = options.reserved_name.as_str();

    if call.arguments.len() != 1 {
        return Err(ExtractError::ArgumentCount {
            name: name.to_string(),
            file: file.to_path_buf(),
            count: call.arguments.len(),
        });
    }

    let object = match &call.arguments[0] {
        Argument::ObjectExpression(object) => object,
        Argument::SpreadElement(_) => {
            return Err(ExtractError::SpreadArgument {
                name: name.to_string(),
                file: file.to_path_buf(),
            });
        }
        _ => {
            return Err(ExtractError::NotObjectLiteral {
                name: name.to_string(),
                file: file.to_path_buf(),
            });
        }
    };

    if let Some(expression) = find_in_object(object) {
        return Err(ExtractError::DisallowedExpression {
            name: name.to_string(),
            file: file.to_path_buf(),
            expression,
        });
    }

    let mut meta = ExtractedMeta {
        definition: code
            .get(object.span.start as usize..object.span.end as usize)
            .map(str::to_string),
        ..ExtractedMeta::default()
    };

    for property in object.properties.iter() {
        let property = match property {
            ObjectPropertyKind::ObjectProperty(property) => property,
            ObjectPropertyKind::SpreadProperty(_) => {
                meta.dynamic_keys.insert(PageMetaKey::Meta);
                continue;
            }
        };

        let Some(key) = property_key(property) else {
            meta.dynamic_keys.insert(PageMetaKey::Meta);
            continue;
        };
        let value = evaluate(&property.value);

        if let Some(allowed) = PageMetaKey::from_allow_listed(key) {
            let assigned = value.is_some_and(|value| meta.assign(allowed, value));
            if assigned {
                meta.dynamic_keys.remove(&allowed);
            } else {
                tracing::debug!(
                    key = %key,
                    file = %file.display(),
                    "skipping extraction of `{key}` metadata as it is not statically resolvable"
                );
                meta.clear(allowed);
                meta.dynamic_keys.insert(allowed);
            }
        } else if options.is_extra(key) {
            match value {
                Some(value) => {
                    meta.meta.insert(key.to_string(), value);
                }
                None => {
                    tracing::debug!(key = %key, file = %file.display(), "extra key is not statically resolvable");
                    meta.dynamic_keys.insert(PageMetaKey::Meta);
                }
            }
        } else {
            if let Some(value) = value {
                meta.meta.insert(key.to_string(), value);
            }
            meta.dynamic_keys.insert(PageMetaKey::Meta);
        }
    }

    Ok(meta)
}
