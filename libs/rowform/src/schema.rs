use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::SchemaDerivationError;
use crate::field::FieldDescriptor;

/// Shared, read-only handle to a schema. Rows and nested field kinds hold
/// one of these instead of a copy.
pub type SchemaRef = Arc<Schema>;

/// Ordered, immutable description of a record type's fields.
///
/// Field position determines the slot in `Row::values`. Field names are
/// unique and the order never changes after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Name of the record type this schema was derived from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    /// Same field count, order, names and kinds. Nullability and the
    /// record type name are not part of the shape.
    pub fn is_compatible_with(&self, other: &Schema) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name() == b.name() && a.kind().is_compatible_with(b.kind()))
    }

    /// Deepest chain of nested records below this schema.
    pub fn depth(&self) -> usize {
        self.fields
            .iter()
            .map(|f| f.kind().record_depth())
            .max()
            .unwrap_or(0)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {field}")?;
        }
        write!(f, " }}")
    }
}

/// Accumulates fields in order and rejects duplicate names.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    pub fn build(self) -> Result<Schema, SchemaDerivationError> {
        let mut index = HashMap::with_capacity(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            if index.insert(field.name().to_string(), i).is_some() {
                return Err(SchemaDerivationError::DuplicateField {
                    record: self.name,
                    field: field.name().to_string(),
                });
            }
        }
        Ok(Schema {
            name: self.name,
            fields: self.fields,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use crate::scalar::ScalarType;

    fn flat() -> Schema {
        Schema::builder("Flat")
            .field(FieldDescriptor::scalar("aBoolean", ScalarType::Boolean))
            .field(FieldDescriptor::scalar("anInteger", ScalarType::Int32))
            .field(FieldDescriptor::scalar("aString", ScalarType::String))
            .build()
            .unwrap()
    }

    #[test]
    fn positional_and_named_access_agree() {
        let schema = flat();
        assert_eq!(schema.len(), 3);
        for (i, field) in schema.fields().iter().enumerate() {
            assert_eq!(schema.index_of(field.name()), Some(i));
            assert_eq!(schema.field(i), Some(field));
        }
        assert_eq!(schema.index_of("missing"), None);
        assert_eq!(schema.field(3), None);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Schema::builder("Dup")
            .field(FieldDescriptor::scalar("a", ScalarType::Int32))
            .field(FieldDescriptor::nullable("a", ScalarType::String))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaDerivationError::DuplicateField {
                record: "Dup".into(),
                field: "a".into()
            }
        );
    }

    #[test]
    fn order_is_part_of_the_shape() {
        let reordered = Schema::builder("Flat")
            .field(FieldDescriptor::scalar("anInteger", ScalarType::Int32))
            .field(FieldDescriptor::scalar("aBoolean", ScalarType::Boolean))
            .field(FieldDescriptor::scalar("aString", ScalarType::String))
            .build()
            .unwrap();
        assert!(!flat().is_compatible_with(&reordered));
        assert!(flat().is_compatible_with(&flat()));
        assert_ne!(flat(), reordered);
    }

    #[test]
    fn depth_counts_nested_records() {
        let inner = Arc::new(flat());
        let middle = Arc::new(
            Schema::builder("Middle")
                .field(FieldDescriptor::new("inner", FieldKind::Record(inner.clone()), false))
                .field(FieldDescriptor::new(
                    "inners",
                    FieldKind::array(FieldKind::Record(inner)),
                    false,
                ))
                .build()
                .unwrap(),
        );
        let outer = Schema::builder("Outer")
            .field(FieldDescriptor::new("middle", FieldKind::Record(middle), false))
            .build()
            .unwrap();
        assert_eq!(flat().depth(), 0);
        assert_eq!(outer.depth(), 2);
    }

    #[test]
    fn display_lists_fields_in_order() {
        assert_eq!(
            flat().to_string(),
            "Flat { aBoolean: boolean not null, anInteger: int32 not null, aString: string not null }"
        );
    }
}
