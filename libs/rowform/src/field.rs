use serde::Serialize;

use crate::scalar::ScalarType;
use crate::schema::SchemaRef;

// ════════════════════════════════════════════════════════════════
//  Field Kind
// ════════════════════════════════════════════════════════════════

/// Structural category of a field: scalar, nested record or array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Scalar(ScalarType),
    /// Nested record, sharing the nested type's schema.
    Record(SchemaRef),
    Array(Box<FieldKind>),
}

impl FieldKind {
    pub fn array(element: FieldKind) -> Self {
        FieldKind::Array(Box::new(element))
    }

    /// Structural comparison: scalars must be equal, nested schemas must
    /// agree on field names and kinds, arrays on their element kinds.
    /// Nullability and record type names are not compared.
    pub fn is_compatible_with(&self, other: &FieldKind) -> bool {
        match (self, other) {
            (FieldKind::Scalar(a), FieldKind::Scalar(b)) => a == b,
            (FieldKind::Record(a), FieldKind::Record(b)) => a.is_compatible_with(b),
            (FieldKind::Array(a), FieldKind::Array(b)) => a.is_compatible_with(b),
            _ => false,
        }
    }

    /// Number of record levels below this kind.
    pub fn record_depth(&self) -> usize {
        match self {
            FieldKind::Scalar(_) => 0,
            FieldKind::Record(schema) => 1 + schema.depth(),
            FieldKind::Array(element) => element.record_depth(),
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Scalar(s) => write!(f, "{s}"),
            FieldKind::Record(schema) => write!(f, "row<{}>", schema.name()),
            FieldKind::Array(element) => write!(f, "array<{element}>"),
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  Field Descriptor
// ════════════════════════════════════════════════════════════════

/// One field in a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    nullable: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind, nullable: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable,
        }
    }

    /// Shortcut: non-nullable scalar field.
    pub fn scalar(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self::new(name, FieldKind::Scalar(scalar), false)
    }

    /// Shortcut: nullable scalar field.
    pub fn nullable(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self::new(name, FieldKind::Scalar(scalar), true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl std::fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nullable {
            write!(f, "{}: {}", self.name, self.kind)
        } else {
            write!(f, "{}: {} not null", self.name, self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::schema::Schema;

    #[test]
    fn display() {
        assert_eq!(
            FieldDescriptor::scalar("aLong", ScalarType::Int64).to_string(),
            "aLong: int64 not null"
        );
        assert_eq!(
            FieldDescriptor::new("strings", FieldKind::array(FieldKind::Scalar(ScalarType::String)), true)
                .to_string(),
            "strings: array<string>"
        );
    }

    #[test]
    fn compatibility_ignores_nullability_and_names() {
        let a = Arc::new(
            Schema::builder("A")
                .field(FieldDescriptor::scalar("x", ScalarType::Int32))
                .build()
                .unwrap(),
        );
        let b = Arc::new(
            Schema::builder("B")
                .field(FieldDescriptor::nullable("x", ScalarType::Int32))
                .build()
                .unwrap(),
        );
        let c = Arc::new(
            Schema::builder("A")
                .field(FieldDescriptor::scalar("x", ScalarType::Int64))
                .build()
                .unwrap(),
        );
        assert!(FieldKind::Record(a.clone()).is_compatible_with(&FieldKind::Record(b)));
        assert!(!FieldKind::Record(a.clone()).is_compatible_with(&FieldKind::Record(c)));
        assert!(!FieldKind::array(FieldKind::Record(a.clone())).is_compatible_with(&FieldKind::Record(a)));
    }
}
