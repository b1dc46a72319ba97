use std::sync::Arc;

use crate::declare::{FieldValue, RowRecord};
use crate::error::{ConversionError, SchemaDerivationError};
use crate::field::FieldKind;
use crate::row::Row;
use crate::schema::SchemaRef;
use crate::value::Value;

// ═══════════════════════════════════════════════════════════════
//  Instance → Row
// ═══════════════════════════════════════════════════════════════

/// Encodes `instance` into a row of `schema`.
///
/// Fields are read off the instance by name in schema order. The result has
/// passed [`Row::try_new`], so an absent value in a non-nullable field
/// surfaces as `NullConstraintViolation` and no partial row is returned.
pub fn to_row<T: RowRecord>(schema: &SchemaRef, instance: &T) -> Result<Row, ConversionError> {
    let mut values = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        let value = instance
            .read_field(field)
            .map_err(|e| e.with_context(field.name()))?;
        values.push(value);
    }
    Row::try_new(Arc::clone(schema), values)
}

// ═══════════════════════════════════════════════════════════════
//  Row → Instance
// ═══════════════════════════════════════════════════════════════

/// Decodes `row` into a `T` laid out by `schema`.
///
/// The row's own schema must have the same field names and kinds in the same
/// order; nullability is checked per value against `schema`.
pub fn from_row<T: RowRecord>(schema: &SchemaRef, row: Row) -> Result<T, ConversionError> {
    if !row.schema().is_compatible_with(schema) {
        return Err(ConversionError::mismatch(format!(
            "row of {} is not compatible with schema {}",
            row.schema().name(),
            schema.name()
        )));
    }
    let mut reader = FieldReader::new(Arc::clone(schema), row.into_values());
    let instance = T::from_fields(&mut reader)?;
    reader.finish()?;
    Ok(instance)
}

/// Hands out the values of one row by field name, each at most once.
pub struct FieldReader {
    schema: SchemaRef,
    values: Vec<Option<Value>>,
}

impl FieldReader {
    fn new(schema: SchemaRef, values: Vec<Value>) -> Self {
        Self {
            schema,
            values: values.into_iter().map(Some).collect(),
        }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Decodes the value of field `name`.
    pub fn take<T: FieldValue>(&mut self, name: &str) -> Result<T, ConversionError> {
        let Some(index) = self.schema.index_of(name) else {
            return Err(ConversionError::mismatch(format!(
                "{} has no field of that name",
                self.schema.name()
            ))
            .with_context(name));
        };
        let field = &self.schema.fields()[index];
        let value = self.values[index].take().ok_or_else(|| {
            ConversionError::mismatch("field read more than once").with_context(name)
        })?;
        if value.is_null() && !field.is_nullable() {
            return Err(ConversionError::null_violation().with_context(name));
        }
        T::from_value(value, field.kind()).map_err(|e| e.with_context(name))
    }

    /// Every schema field must have been consumed.
    fn finish(self) -> Result<(), ConversionError> {
        for (field, value) in self.schema.fields().iter().zip(&self.values) {
            if value.is_some() {
                return Err(ConversionError::mismatch(format!(
                    "field is not part of {}",
                    self.schema.name()
                ))
                .with_context(field.name()));
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════
//  Nested records
// ═══════════════════════════════════════════════════════════════

/// [`FieldValue::to_value`] for record types; used by the derive macro.
pub fn record_to_value<T: RowRecord>(
    instance: &T,
    kind: &FieldKind,
) -> Result<Value, ConversionError> {
    match kind {
        FieldKind::Record(schema) => to_row(schema, instance).map(Value::Record),
        other => Err(ConversionError::mismatch(format!(
            "record {} cannot be stored in a {other} field",
            T::NAME
        ))),
    }
}

/// [`FieldValue::from_value`] for record types; used by the derive macro.
pub fn record_from_value<T: RowRecord>(value: Value, kind: &FieldKind) -> Result<T, ConversionError> {
    let FieldKind::Record(schema) = kind else {
        return Err(ConversionError::mismatch(format!(
            "record {} cannot be read from a {kind} field",
            T::NAME
        )));
    };
    match value {
        Value::Record(row) => from_row(schema, row),
        Value::Null => Err(ConversionError::null_violation()),
        other => Err(ConversionError::mismatch(format!(
            "expected record value, found {}",
            other.variant_name()
        ))),
    }
}

// ═══════════════════════════════════════════════════════════════
//  Conversion functions
// ═══════════════════════════════════════════════════════════════

/// Derives `T`'s schema once and returns an instance → row function bound
/// to it.
pub fn to_row_fn<T: RowRecord>()
-> Result<impl Fn(&T) -> Result<Row, ConversionError> + Send + Sync + 'static, SchemaDerivationError> {
    let schema = T::schema()?;
    Ok(move |instance: &T| to_row(&schema, instance))
}

/// Derives `T`'s schema once and returns a row → instance function bound
/// to it.
pub fn from_row_fn<T: RowRecord>()
-> Result<impl Fn(Row) -> Result<T, ConversionError> + Send + Sync + 'static, SchemaDerivationError> {
    let schema = T::schema()?;
    Ok(move |row: Row| from_row(&schema, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDescriptor;
    use crate::scalar::ScalarType;
    use crate::schema::Schema;

    #[derive(rowform::RowRecord, Debug, Clone, PartialEq)]
    #[row(rename_all = "camelCase")]
    struct Flat {
        a_boolean: bool,
        an_integer: i32,
        a_string: String,
    }

    #[derive(rowform::RowRecord, Debug, Clone, PartialEq)]
    #[row(rename_all = "camelCase", name = "Flat")]
    struct LooseFlat {
        a_boolean: Option<bool>,
        an_integer: Option<i32>,
        a_string: Option<String>,
    }

    #[derive(rowform::RowRecord, Debug, Clone, PartialEq)]
    #[row(rename_all = "camelCase")]
    struct Holder {
        flat: Flat,
        flat_list: Vec<Flat>,
    }

    #[derive(rowform::RowRecord, Debug, Clone, PartialEq)]
    #[row(rename_all = "camelCase")]
    struct Partial {
        a_boolean: bool,
        an_integer: i32,
    }

    fn flat() -> Flat {
        Flat {
            a_boolean: true,
            an_integer: 42,
            a_string: "x".into(),
        }
    }

    #[test]
    fn flat_record_converts_positionally() {
        let schema = Flat::schema().unwrap();
        assert_eq!(
            schema.fields(),
            &[
                FieldDescriptor::scalar("aBoolean", ScalarType::Boolean),
                FieldDescriptor::scalar("anInteger", ScalarType::Int32),
                FieldDescriptor::scalar("aString", ScalarType::String),
            ]
        );

        let row = to_row(&schema, &flat()).unwrap();
        assert_eq!(
            row.values(),
            &[Value::Bool(true), Value::Int32(42), Value::Str("x".into())]
        );
        assert!(Arc::ptr_eq(row.schema(), &schema));
        assert_eq!(from_row::<Flat>(&schema, row).unwrap(), flat());
    }

    #[test]
    fn absent_value_in_mandatory_field_fails_encoding() {
        // Same shape as `LooseFlat` but every field mandatory.
        let strict = Flat::schema().unwrap();
        let loose = LooseFlat {
            a_boolean: Some(true),
            an_integer: None,
            a_string: Some("x".into()),
        };
        let err = to_row(&strict, &loose).unwrap_err();
        assert_eq!(
            err,
            ConversionError::NullConstraintViolation {
                field: "anInteger".into()
            }
        );
    }

    #[test]
    fn null_into_mandatory_field_fails_decoding() {
        let loose_schema = LooseFlat::schema().unwrap();
        let row = to_row(
            &loose_schema,
            &LooseFlat {
                a_boolean: None,
                an_integer: Some(1),
                a_string: None,
            },
        )
        .unwrap();
        let err = from_row::<Flat>(&Flat::schema().unwrap(), row).unwrap_err();
        assert_eq!(
            err,
            ConversionError::NullConstraintViolation {
                field: "aBoolean".into()
            }
        );
    }

    #[test]
    fn nested_errors_report_the_full_path() {
        let loose = LooseFlat::schema().unwrap();
        let strict = Holder::schema().unwrap();
        let good = to_row(&Flat::schema().unwrap(), &flat()).unwrap();
        let bad = to_row(
            &loose,
            &LooseFlat {
                a_boolean: Some(false),
                an_integer: Some(0),
                a_string: None,
            },
        )
        .unwrap();
        let err = Row::try_new(
            strict,
            vec![
                Value::Record(good.clone()),
                Value::Array(vec![Value::Record(good), Value::Record(bad)]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConversionError::NullConstraintViolation {
                field: "flatList[1].aString".into()
            }
        );
    }

    #[test]
    fn incompatible_row_is_a_mismatch() {
        let row = to_row(&Flat::schema().unwrap(), &flat()).unwrap();
        let err = from_row::<Holder>(&Holder::schema().unwrap(), row).unwrap_err();
        assert!(matches!(err, ConversionError::SchemaMismatch { ref field, .. } if field.is_root()));
    }

    #[test]
    fn unread_schema_fields_are_a_mismatch() {
        let schema = Flat::schema().unwrap();
        let row = to_row(&schema, &flat()).unwrap();
        let err = from_row::<Partial>(&schema, row).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::SchemaMismatch { ref field, .. } if field.as_str() == "aString"
        ));
    }

    #[test]
    fn fields_unknown_to_the_schema_are_a_mismatch() {
        let schema = Arc::new(
            Schema::builder("Flat")
                .field(FieldDescriptor::scalar("aBoolean", ScalarType::Boolean))
                .field(FieldDescriptor::scalar("anInteger", ScalarType::Int32))
                .field(FieldDescriptor::scalar("aText", ScalarType::String))
                .build()
                .unwrap(),
        );
        let err = to_row(&schema, &flat()).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::SchemaMismatch { ref field, .. } if field.as_str() == "aText"
        ));
    }

    #[test]
    fn nested_and_repeated_round_trip() {
        let schema = Holder::schema().unwrap();
        let holder = Holder {
            flat: flat(),
            flat_list: vec![flat(), Flat { a_boolean: false, an_integer: -1, a_string: String::new() }, flat()],
        };
        let row = to_row(&schema, &holder).unwrap();
        let nested = row.get_by_name("flatList").and_then(Value::as_array).unwrap();
        assert_eq!(nested.len(), 3);
        assert_eq!(nested[0], nested[2]);
        assert_eq!(to_row(&schema, &from_row::<Holder>(&schema, row.clone()).unwrap()).unwrap(), row);
    }

    #[test]
    fn conversion_functions_capture_the_schema() {
        let to = to_row_fn::<Holder>().unwrap();
        let from = from_row_fn::<Holder>().unwrap();
        let holder = Holder {
            flat: flat(),
            flat_list: vec![],
        };
        let row = to(&holder).unwrap();
        assert_eq!(row.get_by_name("flatList"), Some(&Value::Array(vec![])));
        assert_eq!(from(row).unwrap(), holder);
    }
}
