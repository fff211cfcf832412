//! Structure walking: one object in, one structure descriptor out.
//!
//! Nested objects are not recursed into; they are deferred onto the
//! context's breadth-first queue and processed in discovery order by the
//! emitter's drain loop.

use std::collections::VecDeque;

use indexmap::IndexSet;
use serde_json::{Map, Value};

use crate::codegen::GenerateOptions;
use crate::ir::{FieldDescriptor, StructureDescriptor, TypeDescriptor};
use crate::{inference, naming};

/// Nested structure discovered during a walk, waiting to be processed.
#[derive(Debug)]
pub struct PendingStructure<'a> {
    pub name: String,
    pub value: &'a Map<String, Value>,
}

/// Per-call working state. Created fresh by `generate`, never shared, so
/// concurrent calls with independent inputs cannot interfere.
#[derive(Debug, Default)]
pub struct GenerationContext<'a> {
    pub queue: VecDeque<PendingStructure<'a>>,
    /// Names already walked; the first structure to claim a name wins.
    pub processed: IndexSet<String>,
}

impl<'a> GenerationContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    fn enqueue(&mut self, name: String, value: &'a Map<String, Value>) {
        self.queue.push_back(PendingStructure { name, value });
    }
}

/// Produce the descriptor for one object's fields, in input key order.
pub fn walk_object<'a>(
    name: &str,
    object: &'a Map<String, Value>,
    ctx: &mut GenerationContext<'a>,
    options: &GenerateOptions,
) -> StructureDescriptor {
    let mut fields = Vec::with_capacity(object.len());

    for (key, value) in object {
        let converted = options.convert_case && naming::is_camel_case(key);
        let emitted_name = if converted { naming::camel_to_snake(key) } else { key.clone() };

        let ty = match value {
            Value::Object(nested) => {
                let nested_name = naming::to_pascal_case(&emitted_name);
                ctx.enqueue(nested_name.clone(), nested);
                TypeDescriptor::Reference(nested_name)
            }
            Value::Array(items) => match items.first().and_then(Value::as_object) {
                // Only the first element defines the nested schema.
                Some(first) => {
                    let element_name = singular_name(&emitted_name);
                    ctx.enqueue(element_name.clone(), first);
                    TypeDescriptor::List(Box::new(TypeDescriptor::Reference(element_name)))
                }
                None => inference::infer(value),
            },
            other => inference::infer(other),
        };

        fields.push(FieldDescriptor {
            is_aliased: converted && emitted_name != *key,
            original_key: key.clone(),
            emitted_name,
            ty,
            optional: options.make_optional,
        });
    }

    // The populate-by-name config follows the option, not whether any field
    // was actually renamed; empty bodies render as `pass` and skip it.
    let uses_aliasing = options.convert_case && !fields.is_empty();

    StructureDescriptor { name: name.to_string(), fields, uses_aliasing }
}

// PascalCase the field name, then strip one trailing `s`. Naive on purpose:
// `Series` becomes `Serie`.
fn singular_name(emitted_name: &str) -> String {
    let pascal = naming::to_pascal_case(emitted_name);
    match pascal.strip_suffix('s') {
        Some(stripped) => stripped.to_string(),
        None => pascal,
    }
}

// ------------------------------- Tests ------------------------------------ //
