//! Per-value type inference: leaf classification plus list unification.
//!
//! `infer` is pure and total over any JSON value. It never descends into
//! object *fields*; object-valued fields are intercepted by the walker and
//! only reach this module as generic `Any` leaves (e.g. inside mixed arrays).

pub mod datetime;

use serde_json::{Number, Value};

use crate::ir::{Primitive, TypeDescriptor};

/// Map one JSON value to its type descriptor.
pub fn infer(value: &Value) -> TypeDescriptor {
    match value {
        Value::Null => TypeDescriptor::Primitive(Primitive::Null),
        Value::Bool(_) => TypeDescriptor::Primitive(Primitive::Bool),
        Value::Number(n) => {
            if is_integer_valued(n) {
                TypeDescriptor::Primitive(Primitive::Integer)
            } else {
                TypeDescriptor::Primitive(Primitive::Float)
            }
        }
        Value::String(s) => match datetime::classify(s) {
            Some(kind) => TypeDescriptor::Primitive(kind),
            None => TypeDescriptor::Primitive(Primitive::Str),
        },
        Value::Array(items) => TypeDescriptor::List(Box::new(unify_elements(items))),
        Value::Object(_) => TypeDescriptor::Primitive(Primitive::Any),
    }
}

// `1.0` arrives as an f64; integer-valued floats still classify as int.
fn is_integer_valued(n: &Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

/// Unify array elements into one element type: exactly one distinct
/// descriptor keeps it, disagreement or an empty array widens to `Any`.
fn unify_elements(items: &[Value]) -> TypeDescriptor {
    let mut elements = items.iter().map(infer);
    let Some(first) = elements.next() else {
        return TypeDescriptor::Primitive(Primitive::Any);
    };
    if elements.all(|ty| ty == first) {
        first
    } else {
        TypeDescriptor::Primitive(Primitive::Any)
    }
}

// ------------------------------- Tests ------------------------------------ //
