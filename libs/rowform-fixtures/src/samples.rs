//! Representative instances of every fixture type.

use bigdecimal::BigDecimal;
use bytes::Bytes;
use chrono::{DateTime, TimeDelta, Utc};

use crate::builders::*;
use crate::types::*;

fn decimal(digits: i64, scale: i64) -> BigDecimal {
    BigDecimal::new(digits.into(), scale)
}

fn instant(millis: i64) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::milliseconds(millis)
}

pub fn avro_primitive() -> AvroPrimitiveDataTypes {
    avro_primitive_data_types(
        true,
        decimal(123_456_789, 4),
        Bytes::from_static(b"\x00\x01rowform\xff"),
        1.0e-3,
        -2.5,
        42,
        i64::MAX,
        "avro",
    )
}

pub fn all_primitive() -> AllPrimitiveDataTypes {
    all_primitive_data_types(
        true,
        i8::MIN,
        decimal(-1_050, 2),
        f64::MAX,
        f32::MIN_POSITIVE,
        i16::MAX,
        42,
        -9_007_199_254_740_993,
        "all primitives",
    )
}

pub fn other_all_primitive() -> AllPrimitiveDataTypes {
    all_primitive_data_types(false, 0, decimal(0, 0), 0.0, 0.0, 0, 0, 0, "")
}

pub fn nullable_all_primitive() -> NullableAllPrimitiveDataTypes {
    nullable_all_primitive_data_types(
        Some(false),
        Some(2.75),
        None,
        Some(-1),
        None,
        Some("partially null".into()),
    )
}

/// Every field absent.
pub fn nullable_all_primitive_empty() -> NullableAllPrimitiveDataTypes {
    NullableAllPrimitiveDataTypes::default()
}

pub fn time() -> TimeContaining {
    time_containing(
        instant(1_700_000_000_123),
        [instant(0), instant(-86_400_000), instant(0)],
    )
}

pub fn array_primitive() -> ArrayPrimitiveDataTypes {
    array_primitive_data_types(
        vec![true, false, true, true],
        vec![1.5, -0.25, 1.5],
        vec![],
        vec![i16::MIN, 0, i16::MAX],
        vec![7, 7, 7],
        vec![i64::MIN],
        vec!["a".into(), "".into(), "a".into()],
    )
}

pub fn avro_array_primitive() -> AvroArrayPrimitiveDataTypes {
    avro_array_primitive_data_types(
        vec![false],
        vec![decimal(1, 0), decimal(100, 2), decimal(-5, 10)],
        vec![Bytes::new(), Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef])],
        vec![],
        vec![3.25, 3.25],
        vec![i32::MIN, i32::MAX],
        vec![],
        vec!["x".into(), "y".into()],
    )
}

pub fn avro_nested_repeated() -> AvroNestedRepeatedDataTypes {
    let mut other = avro_primitive();
    other.a_string = "second".into();
    other.a_bytes = Bytes::new();
    avro_nested_repeated_data_types(avro_primitive(), [other, avro_primitive()])
}

pub fn singly_nested() -> SinglyNestedDataTypes {
    singly_nested_data_types(all_primitive(), [other_all_primitive(), all_primitive()])
}

/// One singly nested record holding a primitive record plus a two element
/// list, repeated twice.
pub fn doubly_nested() -> DoublyNestedDataTypes {
    doubly_nested_data_types(
        singly_nested(),
        [
            singly_nested_data_types(other_all_primitive(), Vec::new()),
            singly_nested(),
        ],
    )
}
