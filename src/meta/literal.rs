//! Restricted evaluation of object-literal trees.
//!
//! Only JSON-shaped literals resolve: strings, booleans, numbers, `null`,
//! arrays and objects built from them. Anything else (identifiers, calls,
//! templates, functions, operators) is left for load-time evaluation.

use oxc::ast::ast::{
    ArrowFunctionExpression, AwaitExpression, Expression, Function, ObjectExpression,
    ObjectProperty, ObjectPropertyKind, PropertyKey,
};
use oxc::ast_visit::Visit;
use oxc::syntax::scope::ScopeFlags;
use serde_json::{Map, Number, Value};

pub(crate) fn evaluate(expr: &Expression<'_>) -> Option<Value> {
    match expr {
        Expression::StringLiteral(lit) => Some(Value::String(lit.value.as_str().to_string())),
        Expression::BooleanLiteral(lit) => Some(Value::Bool(lit.value)),
        Expression::NullLiteral(_) => Some(Value::Null),
        Expression::NumericLiteral(lit) => number(lit.value),
        Expression::ArrayExpression(array) => {
            let mut items = Vec::with_capacity(array.elements.len());
            for element in array.elements.iter() {
                items.push(evaluate(element.as_expression()?)?);
            }
            Some(Value::Array(items))
        }
        Expression::ObjectExpression(object) => evaluate_object(object).map(Value::Object),
        Expression::ParenthesizedExpression(inner) => evaluate(&inner.expression),
        _ => None,
    }
}

fn evaluate_object(object: &ObjectExpression<'_>) -> Option<Map<String, Value>> {
    let mut out = Map::new();
    for property in object.properties.iter() {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            return None;
        };
        if property.method {
            return None;
        }
        let key = property_key(property)?;
        out.insert(key.to_string(), evaluate(&property.value)?);
    }
    Some(out)
}

fn number(value: f64) -> Option<Value> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return Some(Value::from(value as i64));
    }
    Number::from_f64(value).map(Value::Number)
}

/// Name of a property written as an identifier or string literal.
pub(crate) fn property_key<'b>(property: &'b ObjectProperty<'_>) -> Option<&'b str> {
    match &property.key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.as_str()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.as_str()),
        _ => None,
    }
}

/// Finds an `await` outside any nested function body.
#[derive(Debug, Default)]
struct DisallowedFinder {
    found: Option<&'static str>,
}

impl<'a> Visit<'a> for DisallowedFinder {
    fn visit_await_expression(&mut self, _it: &AwaitExpression<'a>) {
        self.found.get_or_insert("await");
    }

    fn visit_function(&mut self, _it: &Function<'a>, _flags: ScopeFlags) {}

    fn visit_arrow_function_expression(&mut self, _it: &ArrowFunctionExpression<'a>) {}
}

/// Looks for an expression form that can never run as declared.
pub(crate) fn find_in_object<'a>(object: &ObjectExpression<'a>) -> Option<&'static str> {
    let mut finder = DisallowedFinder::default();
    finder.visit_object_expression(object);
    finder.found
}
