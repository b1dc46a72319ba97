use std::any::TypeId;

use crate::convert::FieldReader;
use crate::error::{ConversionError, SchemaDerivationError};
use crate::field::{FieldDescriptor, FieldKind};
use crate::registry::SchemaRegistry;
use crate::scalar::ScalarType;
use crate::schema::SchemaRef;
use crate::value::Value;

// ════════════════════════════════════════════════════════════════
//  Declared types
// ════════════════════════════════════════════════════════════════

/// A field type as the host declares it, before derivation resolves it
/// into a [`FieldKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType {
    Scalar(ScalarType),
    /// Native type name, resolved through [`ScalarType::from_type_name`].
    Named(String),
    Record(RecordRef),
    /// Sequence of the inner type.
    Array(Box<DeclaredType>),
    /// Inner type, may be absent.
    Optional(Box<DeclaredType>),
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclaredType::Scalar(s) => f.write_str(s.type_name()),
            DeclaredType::Named(name) => f.write_str(name),
            DeclaredType::Record(r) => f.write_str(r.name()),
            DeclaredType::Array(inner) => write!(f, "Vec<{inner}>"),
            DeclaredType::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}

/// Lazy reference to another record type.
///
/// Holds the declaration as a function pointer so self-referencing types
/// can be declared; derivation detects the cycle.
#[derive(Clone, Copy)]
pub struct RecordRef {
    type_id: TypeId,
    name: &'static str,
    declaration: fn() -> TypeDeclaration,
}

impl RecordRef {
    pub fn of<T: RowRecord>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: T::NAME,
            declaration: T::declaration,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declaration(&self) -> TypeDeclaration {
        (self.declaration)()
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl std::fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RecordRef").field(&self.name).finish()
    }
}

/// One declared field: name, type, and whether it may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredField {
    pub name: String,
    pub ty: DeclaredType,
    pub optional: bool,
}

/// Ordered field list of one record type.
///
/// This is the only thing derivation reads; it is produced by
/// `#[derive(RowRecord)]` or written by hand for explicit registration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    name: String,
    fields: Vec<DeclaredField>,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declares a field whose type is `T`.
    ///
    /// A top-level `Option<U>` makes the field optional with type `U`.
    pub fn field<T: FieldValue>(self, name: impl Into<String>) -> Self {
        match T::declared_type() {
            DeclaredType::Optional(inner) => self.declare(name, *inner, true),
            ty => self.declare(name, ty, false),
        }
    }

    /// Declares a field from an explicit type description.
    pub fn declare(mut self, name: impl Into<String>, ty: DeclaredType, optional: bool) -> Self {
        self.fields.push(DeclaredField {
            name: name.into(),
            ty,
            optional,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[DeclaredField] {
        &self.fields
    }
}

// ════════════════════════════════════════════════════════════════
//  Traits
// ════════════════════════════════════════════════════════════════

/// A native type that can occupy one field of a record.
///
/// Implemented for the primitive table, `Option<T>`, `Vec<T>` and every
/// `#[derive(RowRecord)]` type.
pub trait FieldValue: Sized {
    fn declared_type() -> DeclaredType;

    /// Encode into the slot described by `kind`.
    fn to_value(&self, kind: &FieldKind) -> Result<Value, ConversionError>;

    /// Decode from the slot described by `kind`.
    fn from_value(value: Value, kind: &FieldKind) -> Result<Self, ConversionError>;
}

/// A record type with a statically known field list.
///
/// Usually derived:
///
/// ```ignore
/// #[derive(RowRecord, Debug, Clone, PartialEq)]
/// #[row(rename_all = "camelCase")]
/// pub struct Flat {
///     pub a_boolean: bool,
///     pub an_integer: i32,
///     pub a_string: Option<String>,
/// }
/// ```
pub trait RowRecord: Sized + 'static {
    /// Record type name carried by the derived schema.
    const NAME: &'static str;

    fn declaration() -> TypeDeclaration;

    /// Encode the field named by `field` into its slot value.
    fn read_field(&self, field: &FieldDescriptor) -> Result<Value, ConversionError>;

    /// Rebuild an instance, taking each field from `fields` by name.
    fn from_fields(fields: &mut FieldReader) -> Result<Self, ConversionError>;

    /// Schema from the process-wide registry.
    fn schema() -> Result<SchemaRef, SchemaDerivationError> {
        SchemaRegistry::global().schema_for::<Self>()
    }
}

// ════════════════════════════════════════════════════════════════
//  Optional and sequence fields
// ════════════════════════════════════════════════════════════════

impl<T: FieldValue> FieldValue for Option<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Optional(Box::new(T::declared_type()))
    }

    fn to_value(&self, kind: &FieldKind) -> Result<Value, ConversionError> {
        match self {
            Some(v) => v.to_value(kind),
            None => Ok(Value::Null),
        }
    }

    fn from_value(value: Value, kind: &FieldKind) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value, kind).map(Some),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Array(Box::new(T::declared_type()))
    }

    fn to_value(&self, kind: &FieldKind) -> Result<Value, ConversionError> {
        let FieldKind::Array(element) = kind else {
            return Err(ConversionError::mismatch(format!(
                "native sequence cannot be stored in a {kind} field"
            )));
        };
        let mut items = Vec::with_capacity(self.len());
        for (i, item) in self.iter().enumerate() {
            items.push(
                item.to_value(element)
                    .map_err(|e| e.with_context(&format!("[{i}]")))?,
            );
        }
        Ok(Value::Array(items))
    }

    fn from_value(value: Value, kind: &FieldKind) -> Result<Self, ConversionError> {
        let FieldKind::Array(element) = kind else {
            return Err(ConversionError::mismatch(format!(
                "native sequence cannot be read from a {kind} field"
            )));
        };
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    T::from_value(item, element).map_err(|e| e.with_context(&format!("[{i}]")))
                })
                .collect(),
            Value::Null => Err(ConversionError::null_violation()),
            other => Err(ConversionError::mismatch(format!(
                "expected array value, found {}",
                other.variant_name()
            ))),
        }
    }
}
