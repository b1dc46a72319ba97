//! Construction helpers. Plain field assignment, no schema involved.

use bigdecimal::BigDecimal;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::types::*;

#[allow(clippy::too_many_arguments)]
pub fn avro_primitive_data_types(
    a_boolean: bool,
    a_decimal: BigDecimal,
    a_bytes: Bytes,
    a_double: f64,
    a_float: f32,
    an_integer: i32,
    a_long: i64,
    a_string: impl Into<String>,
) -> AvroPrimitiveDataTypes {
    AvroPrimitiveDataTypes {
        a_boolean,
        a_decimal,
        a_bytes,
        a_double,
        a_float,
        an_integer,
        a_long,
        a_string: a_string.into(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn all_primitive_data_types(
    a_boolean: bool,
    a_byte: i8,
    a_decimal: BigDecimal,
    a_double: f64,
    a_float: f32,
    a_short: i16,
    an_integer: i32,
    a_long: i64,
    a_string: impl Into<String>,
) -> AllPrimitiveDataTypes {
    AllPrimitiveDataTypes {
        a_boolean,
        a_byte,
        a_decimal,
        a_double,
        a_float,
        a_short,
        an_integer,
        a_long,
        a_string: a_string.into(),
    }
}

pub fn nullable_all_primitive_data_types(
    a_boolean: Option<bool>,
    a_double: Option<f64>,
    a_float: Option<f32>,
    an_integer: Option<i32>,
    a_long: Option<i64>,
    a_string: Option<String>,
) -> NullableAllPrimitiveDataTypes {
    NullableAllPrimitiveDataTypes {
        a_boolean,
        a_double,
        a_float,
        an_integer,
        a_long,
        a_string,
    }
}

pub fn time_containing(
    instant: DateTime<Utc>,
    instant_list: impl IntoIterator<Item = DateTime<Utc>>,
) -> TimeContaining {
    TimeContaining {
        instant,
        instant_list: instant_list.into_iter().collect(),
    }
}

pub fn array_primitive_data_types(
    booleans: Vec<bool>,
    doubles: Vec<f64>,
    floats: Vec<f32>,
    shorts: Vec<i16>,
    integers: Vec<i32>,
    longs: Vec<i64>,
    strings: Vec<String>,
) -> ArrayPrimitiveDataTypes {
    ArrayPrimitiveDataTypes {
        boolean_list: booleans,
        double_list: doubles,
        float_list: floats,
        short_list: shorts,
        integer_list: integers,
        long_list: longs,
        string_list: strings,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn avro_array_primitive_data_types(
    booleans: Vec<bool>,
    decimals: Vec<BigDecimal>,
    bytes: Vec<Bytes>,
    doubles: Vec<f64>,
    floats: Vec<f32>,
    integers: Vec<i32>,
    longs: Vec<i64>,
    strings: Vec<String>,
) -> AvroArrayPrimitiveDataTypes {
    AvroArrayPrimitiveDataTypes {
        boolean_list: booleans,
        decimal_list: decimals,
        bytes_list: bytes,
        double_list: doubles,
        float_list: floats,
        integer_list: integers,
        long_list: longs,
        string_list: strings,
    }
}

pub fn avro_nested_repeated_data_types(
    avro_primitive_data_types: AvroPrimitiveDataTypes,
    repeated: impl IntoIterator<Item = AvroPrimitiveDataTypes>,
) -> AvroNestedRepeatedDataTypes {
    AvroNestedRepeatedDataTypes {
        avro_primitive_data_types,
        avro_primitive_data_types_list: repeated.into_iter().collect(),
    }
}

pub fn singly_nested_data_types(
    all_primitive_data_types: AllPrimitiveDataTypes,
    repeated: impl IntoIterator<Item = AllPrimitiveDataTypes>,
) -> SinglyNestedDataTypes {
    SinglyNestedDataTypes {
        all_primitive_data_types,
        all_primitive_data_types_list: repeated.into_iter().collect(),
    }
}

pub fn doubly_nested_data_types(
    singly_nested_data_types: SinglyNestedDataTypes,
    repeated: impl IntoIterator<Item = SinglyNestedDataTypes>,
) -> DoublyNestedDataTypes {
    DoublyNestedDataTypes {
        singly_nested_data_types,
        singly_nested_data_types_list: repeated.into_iter().collect(),
    }
}
