// Strongly-typed IR for codegen. No serde_json::Value here.

/// Leaf type kinds the emitter can name directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Null,
    Bool,
    Integer,
    Float,
    Str,
    Date,
    DateTime,
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    /// Element type after unification; `Any` on disagreement or empty input.
    List(Box<TypeDescriptor>),
    /// Points at another structure by name rather than embedding it.
    Reference(String),
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub original_key: String,
    /// Identifier used in output; differs from `original_key` when aliased.
    pub emitted_name: String,
    pub ty: TypeDescriptor,
    pub is_aliased: bool,
    pub optional: bool,
}

#[derive(Debug, Clone)]
pub struct StructureDescriptor {
    pub name: String,
    /// Input key order; emission preserves it.
    pub fields: Vec<FieldDescriptor>,
    pub uses_aliasing: bool,
}

/// Which calendar types appear somewhere in a descriptor tree. Drives the
/// conditional `from datetime import ...` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialTypes {
    pub date: bool,
    pub datetime: bool,
}

impl SpecialTypes {
    pub fn union(self, other: Self) -> Self {
        Self {
            date: self.date || other.date,
            datetime: self.datetime || other.datetime,
        }
    }
}

impl TypeDescriptor {
    /// Date/datetime usage, including inside nested `List`s.
    pub fn special_types(&self) -> SpecialTypes {
        match self {
            TypeDescriptor::Primitive(Primitive::Date) => SpecialTypes { date: true, datetime: false },
            TypeDescriptor::Primitive(Primitive::DateTime) => SpecialTypes { date: false, datetime: true },
            TypeDescriptor::Primitive(_) | TypeDescriptor::Reference(_) => SpecialTypes::default(),
            TypeDescriptor::List(item) => item.special_types(),
        }
    }
}

impl StructureDescriptor {
    pub fn special_types(&self) -> SpecialTypes {
        self.fields
            .iter()
            .fold(SpecialTypes::default(), |acc, field| acc.union(field.ty.special_types()))
    }
}
