//! Final assembly: drain the pending-structure queue, compute the import
//! set, and render the pydantic module text.
//!
//! Orchestration lives here so the walker stays a pure per-structure step;
//! `generate` owns the queue and the rendering order (nested structures in
//! discovery order, root last).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::ir::{FieldDescriptor, Primitive, SpecialTypes, StructureDescriptor, TypeDescriptor};
use crate::walk::{self, GenerationContext};

const INDENT: &str = "    ";

/// Engine options. Deserializable so an enclosing service can take them
/// straight from a request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Name of the top-level generated model.
    pub root_name: String,
    /// Render every field as `T | None = None`.
    pub make_optional: bool,
    /// Convert camelCase keys to snake_case and alias the original key.
    pub convert_case: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            root_name: "MyModel".to_string(),
            make_optional: false,
            convert_case: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("top-level JSON value must be an object, got {kind}")]
    InvalidInput { kind: &'static str },
}

/// Entry point: JSON object in, pydantic model source out.
///
/// Deterministic: identical input (including key order) and options yield
/// byte-identical output. Each call owns its whole working state.
pub fn generate(root: &Value, options: &GenerateOptions) -> Result<String, GenerateError> {
    let Some(object) = root.as_object() else {
        return Err(GenerateError::InvalidInput { kind: json_kind(root) });
    };

    let mut ctx = GenerationContext::new();
    let root_structure = walk::walk_object(&options.root_name, object, &mut ctx, options);

    // Breadth-first drain. A name that was already walked is skipped, so the
    // first structure to claim it wins; differently-shaped same-name objects
    // are not reconciled.
    let mut nested = Vec::new();
    while let Some(pending) = ctx.queue.pop_front() {
        if !ctx.processed.insert(pending.name.clone()) {
            continue;
        }
        let structure = walk::walk_object(&pending.name, pending.value, &mut ctx, options);
        nested.push(structure);
    }

    let special = nested
        .iter()
        .chain(std::iter::once(&root_structure))
        .fold(SpecialTypes::default(), |acc, s| acc.union(s.special_types()));

    let mut cg = Codegen::new();
    cg.emit(&nested, &root_structure, special);
    Ok(cg.into_string())
}

// ------------------------------ Rendering --------------------------------- //

/// Line buffer for one emitted module.
pub struct Codegen {
    lines: Vec<String>,
}

impl Codegen {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Imports, two blank lines, nested structures in discovery order (one
    /// blank line after each), root structure last.
    pub fn emit(&mut self, nested: &[StructureDescriptor], root: &StructureDescriptor, special: SpecialTypes) {
        self.lines.push("from pydantic import BaseModel, Field, ConfigDict".to_string());
        self.lines.push("from typing import Any".to_string());
        if let Some(line) = datetime_import(special) {
            self.lines.push(line);
        }
        self.lines.push(String::new());
        self.lines.push(String::new());

        for structure in nested {
            self.emit_structure(structure);
            self.lines.push(String::new());
        }
        self.emit_structure(root);
    }

    fn emit_structure(&mut self, structure: &StructureDescriptor) {
        self.lines.push(format!("class {}(BaseModel):", structure.name));
        if structure.fields.is_empty() {
            self.lines.push(format!("{INDENT}pass"));
            return;
        }
        for field in &structure.fields {
            self.lines.push(field_line(field));
        }
        if structure.uses_aliasing {
            self.lines.push(String::new());
            self.lines.push(format!("{INDENT}model_config = ConfigDict(populate_by_name=True)"));
        }
    }

    pub fn into_string(self) -> String {
        self.lines.join("\n")
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

fn datetime_import(special: SpecialTypes) -> Option<String> {
    match (special.date, special.datetime) {
        (true, false) => Some("from datetime import date".to_string()),
        (false, true) => Some("from datetime import datetime".to_string()),
        (true, true) => Some("from datetime import date, datetime".to_string()),
        (false, false) => None,
    }
}

// One default slot per field; the alias rides inside the Field(...) call.
fn field_line(field: &FieldDescriptor) -> String {
    let name = &field.emitted_name;
    let ty = render_type(&field.ty);
    match (field.is_aliased, field.optional) {
        (false, false) => format!("{INDENT}{name}: {ty}"),
        (false, true) => format!("{INDENT}{name}: {ty} | None = None"),
        (true, false) => format!("{INDENT}{name}: {ty} = Field(alias='{}')", field.original_key),
        (true, true) => format!(
            "{INDENT}{name}: {ty} | None = Field(alias='{}', default=None)",
            field.original_key
        ),
    }
}

fn render_type(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Primitive(p) => primitive_name(*p).to_string(),
        TypeDescriptor::List(item) => format!("list[{}]", render_type(item)),
        TypeDescriptor::Reference(name) => name.clone(),
    }
}

fn primitive_name(p: Primitive) -> &'static str {
    match p {
        Primitive::Null => "None",
        Primitive::Bool => "bool",
        Primitive::Integer => "int",
        Primitive::Float => "float",
        Primitive::Str => "str",
        Primitive::Date => "date",
        Primitive::DateTime => "datetime",
        Primitive::Any => "Any",
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_line_covers_all_four_shapes() {
        let mut field = FieldDescriptor {
            original_key: "userId".to_string(),
            emitted_name: "user_id".to_string(),
            ty: TypeDescriptor::Primitive(Primitive::Integer),
            is_aliased: false,
            optional: false,
        };
        assert_eq!(field_line(&field), "    user_id: int");

        field.optional = true;
        assert_eq!(field_line(&field), "    user_id: int | None = None");

        field.optional = false;
        field.is_aliased = true;
        assert_eq!(field_line(&field), "    user_id: int = Field(alias='userId')");

        field.optional = true;
        assert_eq!(
            field_line(&field),
            "    user_id: int | None = Field(alias='userId', default=None)"
        );
    }

    #[test]
    fn type_rendering() {
        assert_eq!(render_type(&TypeDescriptor::Primitive(Primitive::Null)), "None");
        assert_eq!(render_type(&TypeDescriptor::Reference("Comment".into())), "Comment");
        assert_eq!(
            render_type(&TypeDescriptor::List(Box::new(TypeDescriptor::List(Box::new(
                TypeDescriptor::Primitive(Primitive::Str)
            ))))),
            "list[list[str]]"
        );
    }

    #[test]
    fn exact_output_for_a_nested_document() {
        let doc = json!({"profile": {"age": 1}});
        let out = generate(&doc, &GenerateOptions::default()).unwrap();
        assert_eq!(
            out,
            "from pydantic import BaseModel, Field, ConfigDict\n\
             from typing import Any\n\
             \n\
             \n\
             class Profile(BaseModel):\n\
             \x20   age: int\n\
             \n\
             class MyModel(BaseModel):\n\
             \x20   profile: Profile"
        );
    }

    #[test]
    fn empty_object_renders_an_explicit_pass_body() {
        let out = generate(&json!({}), &GenerateOptions::default()).unwrap();
        assert!(out.ends_with("class MyModel(BaseModel):\n    pass"));
    }

    #[test]
    fn empty_nested_objects_also_get_a_pass_body() {
        let out = generate(&json!({"meta": {}}), &GenerateOptions::default()).unwrap();
        assert!(out.contains("class Meta(BaseModel):\n    pass"));
    }

    #[test]
    fn date_import_variants() {
        let opts = GenerateOptions::default();

        let out = generate(&json!({"d": "2023-01-01"}), &opts).unwrap();
        assert!(out.contains("from datetime import date\n"));
        assert!(!out.contains("import date, datetime"));

        let out = generate(&json!({"t": "2023-01-15T14:30:45Z"}), &opts).unwrap();
        assert!(out.contains("from datetime import datetime\n"));

        let out = generate(&json!({"d": "2023-01-01", "t": "2023-01-15T14:30:45Z"}), &opts).unwrap();
        assert!(out.contains("from datetime import date, datetime\n"));

        let out = generate(&json!({"s": "plain"}), &opts).unwrap();
        assert!(!out.contains("from datetime import"));
    }

    #[test]
    fn dates_inside_lists_still_produce_the_import() {
        let out = generate(&json!({"dates": ["2023-01-01", "2023-06-01"]}), &GenerateOptions::default())
            .unwrap();
        assert!(out.contains("from datetime import date\n"));
        assert!(out.contains("dates: list[date]"));
    }

    #[test]
    fn duplicate_nested_names_keep_the_first_shape() {
        // both fields pascal-case to `Address`; the first one wins
        let doc = json!({
            "address": {"street": "x"},
            "Address": {"city": "y"}
        });
        let out = generate(&doc, &GenerateOptions::default()).unwrap();
        assert_eq!(out.matches("class Address(BaseModel):").count(), 1);
        assert!(out.contains("street: str"));
        assert!(!out.contains("city"));
    }

    #[test]
    fn breadth_first_discovery_order() {
        let doc = json!({
            "a": {"inner": {"x": 1}},
            "b": {"y": 2}
        });
        let out = generate(&doc, &GenerateOptions::default()).unwrap();
        let a = out.find("class A(BaseModel):").unwrap();
        let b = out.find("class B(BaseModel):").unwrap();
        let inner = out.find("class Inner(BaseModel):").unwrap();
        let root = out.find("class MyModel(BaseModel):").unwrap();
        // siblings before grandchildren, root last
        assert!(a < b && b < inner && inner < root);
    }

    #[test]
    fn invalid_top_level_values_are_refused() {
        let opts = GenerateOptions::default();
        assert!(matches!(
            generate(&json!([1, 2, 3]), &opts),
            Err(GenerateError::InvalidInput { kind: "an array" })
        ));
        assert!(matches!(
            generate(&json!("x"), &opts),
            Err(GenerateError::InvalidInput { kind: "a string" })
        ));
        assert!(matches!(
            generate(&json!(null), &opts),
            Err(GenerateError::InvalidInput { kind: "null" })
        ));
    }

    #[test]
    fn root_name_comes_from_options() {
        let opts = GenerateOptions { root_name: "Payload".to_string(), ..GenerateOptions::default() };
        let out = generate(&json!({"a": 1}), &opts).unwrap();
        assert!(out.ends_with("class Payload(BaseModel):\n    a: int"));
    }
}
