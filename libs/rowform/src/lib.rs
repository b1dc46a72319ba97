// Lets code generated by `#[derive(RowRecord)]` resolve `rowform::` paths
// from inside this crate's own tests.
extern crate self as rowform;

pub mod config;
pub mod convert;
pub mod declare;
pub mod derive;
pub mod error;
pub mod field;
pub mod registry;
pub mod row;
pub mod scalar;
pub mod schema;
pub mod value;

pub use rowform_derive::RowRecord;

pub use convert::{FieldReader, from_row, from_row_fn, to_row, to_row_fn};
pub use declare::{DeclaredField, DeclaredType, FieldValue, RecordRef, RowRecord, TypeDeclaration};
pub use derive::SchemaDeriver;
pub use error::{ConversionError, FieldPath, SchemaDerivationError};
pub use field::{FieldDescriptor, FieldKind};
pub use registry::SchemaRegistry;
pub use row::Row;
pub use scalar::ScalarType;
pub use schema::{Schema, SchemaBuilder, SchemaRef};
pub use value::Value;
