use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::ConversionError;
use crate::field::{FieldDescriptor, FieldKind};
use crate::scalar::check_canonical;
use crate::schema::{Schema, SchemaRef};
use crate::value::Value;

/// Generic, schema-tagged record.
///
/// `values[i]` belongs to `schema.fields()[i]`. The schema is shared, never
/// copied. A `Row` can only be built through [`Row::try_new`], so every row
/// in existence satisfies the nullability and kind rules of its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: SchemaRef,
    values: Vec<Value>,
}

impl Row {
    /// Validates `values` against `schema` and wraps them.
    ///
    /// - `NullConstraintViolation` if a non-nullable slot holds `Null`;
    /// - `SchemaMismatch` for a wrong value count, a value of the wrong
    ///   kind, a `Null` array element, or a nested row of another shape;
    /// - `InvalidValue` for decimal text not in plain form or a timestamp
    ///   outside the representable range.
    pub fn try_new(schema: SchemaRef, values: Vec<Value>) -> Result<Self, ConversionError> {
        if values.len() != schema.len() {
            return Err(ConversionError::mismatch(format!(
                "{} expects {} values, got {}",
                schema.name(),
                schema.len(),
                values.len()
            )));
        }
        for (field, value) in schema.fields().iter().zip(&values) {
            check_slot(field, value).map_err(|e| e.with_context(field.name()))?;
        }
        Ok(Self { schema, values })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.schema.index_of(name).map(|i| &self.values[i])
    }
}

fn check_slot(field: &FieldDescriptor, value: &Value) -> Result<(), ConversionError> {
    match value {
        Value::Null if field.is_nullable() => Ok(()),
        Value::Null => Err(ConversionError::null_violation()),
        value => check_kind(field.kind(), value),
    }
}

fn check_kind(kind: &FieldKind, value: &Value) -> Result<(), ConversionError> {
    match (kind, value) {
        (_, Value::Null) => Err(ConversionError::mismatch(
            "arrays cannot hold null elements",
        )),
        (FieldKind::Scalar(scalar), value) if scalar.accepts(value) => check_canonical(value),
        (FieldKind::Record(expected), Value::Record(row)) => check_nested(expected, row),
        (FieldKind::Array(element), Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_kind(element, item).map_err(|e| e.with_context(&format!("[{i}]")))?;
            }
            Ok(())
        }
        (kind, value) => Err(ConversionError::mismatch(format!(
            "expected {kind} value, found {}",
            value.variant_name()
        ))),
    }
}

/// A nested row may carry a schema that differs from the expected one only
/// in nullability, so its values are re-checked against the expected slots.
fn check_nested(expected: &Schema, row: &Row) -> Result<(), ConversionError> {
    if !row.schema.is_compatible_with(expected) {
        return Err(ConversionError::mismatch(format!(
            "expected row<{}>, found row<{}> of a different shape",
            expected.name(),
            row.schema.name()
        )));
    }
    for (field, value) in expected.fields().iter().zip(&row.values) {
        check_slot(field, value).map_err(|e| e.with_context(field.name()))?;
    }
    Ok(())
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in self.schema.fields().iter().zip(&self.values) {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::scalar::ScalarType;
    use crate::schema::Schema;

    fn flat() -> SchemaRef {
        Arc::new(
            Schema::builder("Flat")
                .field(FieldDescriptor::scalar("aBoolean", ScalarType::Boolean))
                .field(FieldDescriptor::scalar("anInteger", ScalarType::Int32))
                .field(FieldDescriptor::nullable("aString", ScalarType::String))
                .build()
                .unwrap(),
        )
    }

    fn holder(inner: SchemaRef) -> SchemaRef {
        Arc::new(
            Schema::builder("Holder")
                .field(FieldDescriptor::new("one", FieldKind::Record(inner.clone()), false))
                .field(FieldDescriptor::new(
                    "many",
                    FieldKind::array(FieldKind::Record(inner)),
                    false,
                ))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn access_by_position_and_name() {
        let row = Row::try_new(
            flat(),
            vec![Value::Bool(true), Value::Int32(42), Value::Str("x".into())],
        )
        .unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.get(1), Some(&Value::Int32(42)));
        assert_eq!(row.get_by_name("aString"), Some(&Value::Str("x".into())));
        assert_eq!(row.get_by_name("nope"), None);
    }

    #[test]
    fn null_only_in_nullable_slots() {
        assert!(Row::try_new(flat(), vec![Value::Bool(true), Value::Int32(1), Value::Null]).is_ok());
        let err = Row::try_new(flat(), vec![Value::Bool(true), Value::Null, Value::Null]).unwrap_err();
        assert_eq!(
            err,
            ConversionError::NullConstraintViolation {
                field: "anInteger".into()
            }
        );
    }

    #[test]
    fn values_must_match_kinds() {
        let err = Row::try_new(
            flat(),
            vec![Value::Bool(true), Value::Int64(1), Value::Null],
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::SchemaMismatch { ref field, .. } if field.as_str() == "anInteger"));

        let err = Row::try_new(flat(), vec![Value::Bool(true)]).unwrap_err();
        assert!(matches!(err, ConversionError::SchemaMismatch { ref field, .. } if field.is_root()));
    }

    #[test]
    fn empty_array_is_not_null() {
        let inner = Row::try_new(flat(), vec![Value::Bool(false), Value::Int32(0), Value::Null]).unwrap();
        let row = Row::try_new(
            holder(flat()),
            vec![Value::Record(inner), Value::Array(vec![])],
        )
        .unwrap();
        assert_eq!(row.get_by_name("many"), Some(&Value::Array(vec![])));
    }

    #[test]
    fn array_elements_are_checked() {
        let inner = Row::try_new(flat(), vec![Value::Bool(false), Value::Int32(0), Value::Null]).unwrap();
        let err = Row::try_new(
            holder(flat()),
            vec![
                Value::Record(inner.clone()),
                Value::Array(vec![Value::Record(inner), Value::Null]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::SchemaMismatch { ref field, .. } if field.as_str() == "many[1]"));
    }

    #[test]
    fn nested_rows_obey_the_stricter_schema() {
        let loose = Arc::new(
            Schema::builder("Flat")
                .field(FieldDescriptor::nullable("aBoolean", ScalarType::Boolean))
                .field(FieldDescriptor::scalar("anInteger", ScalarType::Int32))
                .field(FieldDescriptor::nullable("aString", ScalarType::String))
                .build()
                .unwrap(),
        );
        let inner = Row::try_new(loose, vec![Value::Null, Value::Int32(0), Value::Null]).unwrap();
        let err = Row::try_new(
            holder(flat()),
            vec![Value::Record(inner), Value::Array(vec![])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConversionError::NullConstraintViolation {
                field: "one.aBoolean".into()
            }
        );
    }

    #[test]
    fn decimals_and_timestamps_must_be_canonical() {
        let schema = Arc::new(
            Schema::builder("Ledger")
                .field(FieldDescriptor::scalar("amount", ScalarType::DecimalString))
                .field(FieldDescriptor::new(
                    "bookedAt",
                    FieldKind::array(FieldKind::Scalar(ScalarType::Timestamp)),
                    false,
                ))
                .build()
                .unwrap(),
        );
        let ok = Row::try_new(
            schema.clone(),
            vec![Value::Decimal("-12.500".into()), Value::Array(vec![Value::Timestamp(0)])],
        );
        assert!(ok.is_ok());

        for text in ["1e3", "+1.50", "0001", "abc"] {
            let err = Row::try_new(
                schema.clone(),
                vec![Value::Decimal(text.into()), Value::Array(vec![])],
            )
            .unwrap_err();
            assert!(
                matches!(err, ConversionError::InvalidValue { ref field, .. } if field.as_str() == "amount"),
                "{text}: {err}"
            );
        }

        let err = Row::try_new(
            schema,
            vec![
                Value::Decimal("1".into()),
                Value::Array(vec![Value::Timestamp(0), Value::Timestamp(i64::MAX)]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidValue { ref field, .. } if field.as_str() == "bookedAt[1]"));
    }

    #[test]
    fn serializes_as_an_object_keyed_by_field_name() {
        let row = Row::try_new(
            flat(),
            vec![Value::Bool(true), Value::Int32(42), Value::Null],
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({ "aBoolean": true, "anInteger": 42, "aString": null })
        );
    }
}
