//! Record shapes exercised against the converter: flat, all-nullable,
//! repeated primitives, nested plus repeated, and two levels of nesting.

use bigdecimal::BigDecimal;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use rowform::RowRecord;

/// Every primitive that also has an Avro counterpart: bytes instead of
/// byte/short.
#[derive(RowRecord, Debug, Clone, PartialEq)]
#[row(rename_all = "camelCase")]
pub struct AvroPrimitiveDataTypes {
    pub a_boolean: bool,
    pub a_decimal: BigDecimal,
    pub a_bytes: Bytes,
    pub a_double: f64,
    pub a_float: f32,
    pub an_integer: i32,
    pub a_long: i64,
    pub a_string: String,
}

/// Flat record of every primitive kind except bytes and timestamps.
#[derive(RowRecord, Debug, Clone, PartialEq)]
#[row(rename_all = "camelCase")]
pub struct AllPrimitiveDataTypes {
    pub a_boolean: bool,
    pub a_byte: i8,
    pub a_decimal: BigDecimal,
    pub a_double: f64,
    pub a_float: f32,
    pub a_short: i16,
    pub an_integer: i32,
    pub a_long: i64,
    pub a_string: String,
}

/// Flat record where every field may be absent.
#[derive(RowRecord, Debug, Clone, PartialEq, Default)]
#[row(rename_all = "camelCase")]
pub struct NullableAllPrimitiveDataTypes {
    pub a_boolean: Option<bool>,
    pub a_double: Option<f64>,
    pub a_float: Option<f32>,
    pub an_integer: Option<i32>,
    pub a_long: Option<i64>,
    pub a_string: Option<String>,
}

/// A single instant plus a repeated one.
#[derive(RowRecord, Debug, Clone, PartialEq)]
#[row(rename_all = "camelCase")]
pub struct TimeContaining {
    pub instant: DateTime<Utc>,
    pub instant_list: Vec<DateTime<Utc>>,
}

#[derive(RowRecord, Debug, Clone, PartialEq, Default)]
#[row(rename_all = "camelCase")]
pub struct ArrayPrimitiveDataTypes {
    pub boolean_list: Vec<bool>,
    pub double_list: Vec<f64>,
    pub float_list: Vec<f32>,
    pub short_list: Vec<i16>,
    pub integer_list: Vec<i32>,
    pub long_list: Vec<i64>,
    pub string_list: Vec<String>,
}

#[derive(RowRecord, Debug, Clone, PartialEq, Default)]
#[row(rename_all = "camelCase")]
pub struct AvroArrayPrimitiveDataTypes {
    pub boolean_list: Vec<bool>,
    pub decimal_list: Vec<BigDecimal>,
    pub bytes_list: Vec<Bytes>,
    pub double_list: Vec<f64>,
    pub float_list: Vec<f32>,
    pub integer_list: Vec<i32>,
    pub long_list: Vec<i64>,
    pub string_list: Vec<String>,
}

#[derive(RowRecord, Debug, Clone, PartialEq)]
#[row(rename_all = "camelCase")]
pub struct AvroNestedRepeatedDataTypes {
    pub avro_primitive_data_types: AvroPrimitiveDataTypes,
    pub avro_primitive_data_types_list: Vec<AvroPrimitiveDataTypes>,
}

#[derive(RowRecord, Debug, Clone, PartialEq)]
#[row(rename_all = "camelCase")]
pub struct SinglyNestedDataTypes {
    pub all_primitive_data_types: AllPrimitiveDataTypes,
    pub all_primitive_data_types_list: Vec<AllPrimitiveDataTypes>,
}

#[derive(RowRecord, Debug, Clone, PartialEq)]
#[row(rename_all = "camelCase")]
pub struct DoublyNestedDataTypes {
    pub singly_nested_data_types: SinglyNestedDataTypes,
    pub singly_nested_data_types_list: Vec<SinglyNestedDataTypes>,
}
