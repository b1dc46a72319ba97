use std::str::FromStr;

use bigdecimal::BigDecimal;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::declare::{DeclaredType, FieldValue};
use crate::error::ConversionError;
use crate::field::FieldKind;
use crate::value::Value;

// ════════════════════════════════════════════════════════════════
//  Scalar Type
// ════════════════════════════════════════════════════════════════

/// Scalar kinds a row slot can carry.
///
/// Each kind has exactly one native Rust type and exactly one [`Value`]
/// variant. Conversions never widen or narrow between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Boolean,
    Byte,
    Short,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Arbitrary precision decimal, carried as plain decimal text.
    DecimalString,
    Bytes,
    /// UTF-8 text.
    String,
    /// UTC instant, milliseconds since the Unix epoch.
    Timestamp,
}

impl ScalarType {
    pub const ALL: [ScalarType; 11] = [
        ScalarType::Boolean,
        ScalarType::Byte,
        ScalarType::Short,
        ScalarType::Int32,
        ScalarType::Int64,
        ScalarType::Float32,
        ScalarType::Float64,
        ScalarType::DecimalString,
        ScalarType::Bytes,
        ScalarType::String,
        ScalarType::Timestamp,
    ];

    /// Native Rust type name this scalar maps to.
    pub fn type_name(self) -> &'static str {
        match self {
            ScalarType::Boolean => "bool",
            ScalarType::Byte => "i8",
            ScalarType::Short => "i16",
            ScalarType::Int32 => "i32",
            ScalarType::Int64 => "i64",
            ScalarType::Float32 => "f32",
            ScalarType::Float64 => "f64",
            ScalarType::DecimalString => "BigDecimal",
            ScalarType::Bytes => "Bytes",
            ScalarType::String => "String",
            ScalarType::Timestamp => "DateTime<Utc>",
        }
    }

    /// Resolves a native type name declared through explicit registration.
    ///
    /// Only the names returned by [`ScalarType::type_name`] are recognised.
    pub fn from_type_name(name: &str) -> Option<ScalarType> {
        ScalarType::ALL.into_iter().find(|s| s.type_name() == name)
    }

    /// Whether `value` is the variant this scalar encodes into.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ScalarType::Boolean, Value::Bool(_))
                | (ScalarType::Byte, Value::Byte(_))
                | (ScalarType::Short, Value::Short(_))
                | (ScalarType::Int32, Value::Int32(_))
                | (ScalarType::Int64, Value::Int64(_))
                | (ScalarType::Float32, Value::Float32(_))
                | (ScalarType::Float64, Value::Float64(_))
                | (ScalarType::DecimalString, Value::Decimal(_))
                | (ScalarType::Bytes, Value::Bytes(_))
                | (ScalarType::String, Value::Str(_))
                | (ScalarType::Timestamp, Value::Timestamp(_))
        )
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarType::Boolean => write!(f, "boolean"),
            ScalarType::Byte => write!(f, "byte"),
            ScalarType::Short => write!(f, "short"),
            ScalarType::Int32 => write!(f, "int32"),
            ScalarType::Int64 => write!(f, "int64"),
            ScalarType::Float32 => write!(f, "float32"),
            ScalarType::Float64 => write!(f, "float64"),
            ScalarType::DecimalString => write!(f, "decimal"),
            ScalarType::Bytes => write!(f, "bytes"),
            ScalarType::String => write!(f, "string"),
            ScalarType::Timestamp => write!(f, "timestamp"),
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  Native type table
// ════════════════════════════════════════════════════════════════

fn expect_scalar(kind: &FieldKind, expected: ScalarType) -> Result<(), ConversionError> {
    match kind {
        FieldKind::Scalar(s) if *s == expected => Ok(()),
        other => Err(ConversionError::mismatch(format!(
            "native {} cannot be stored in a {other} field",
            expected.type_name()
        ))),
    }
}

fn unexpected(expected: ScalarType, value: &Value) -> ConversionError {
    match value {
        Value::Null => ConversionError::null_violation(),
        other => ConversionError::mismatch(format!(
            "expected {expected} value, found {}",
            other.variant_name()
        )),
    }
}

/// Rejects values of the right variant that no native instance encodes to:
/// decimal text not in plain form, and instants chrono cannot represent.
pub(crate) fn check_canonical(value: &Value) -> Result<(), ConversionError> {
    match value {
        Value::Decimal(text) => {
            let parsed = BigDecimal::from_str(text).map_err(|e| {
                ConversionError::invalid(format!("'{text}' is not a decimal: {e}"))
            })?;
            if parsed.to_plain_string() != *text {
                return Err(ConversionError::invalid(format!(
                    "'{text}' is not a plain decimal, expected '{}'",
                    parsed.to_plain_string()
                )));
            }
            Ok(())
        }
        Value::Timestamp(millis) if DateTime::<Utc>::from_timestamp_millis(*millis).is_none() => Err(
            ConversionError::invalid(format!("{millis}ms is outside the supported range")),
        ),
        _ => Ok(()),
    }
}

/// Implements [`FieldValue`] for a native type whose `Value` variant holds
/// it unchanged.
macro_rules! direct_scalar {
    ($native:ty, $scalar:ident, $variant:ident) => {
        impl FieldValue for $native {
            fn declared_type() -> DeclaredType {
                DeclaredType::Scalar(ScalarType::$scalar)
            }

            fn to_value(&self, kind: &FieldKind) -> Result<Value, ConversionError> {
                expect_scalar(kind, ScalarType::$scalar)?;
                Ok(Value::$variant(self.clone()))
            }

            fn from_value(value: Value, kind: &FieldKind) -> Result<Self, ConversionError> {
                expect_scalar(kind, ScalarType::$scalar)?;
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(unexpected(ScalarType::$scalar, &other)),
                }
            }
        }
    };
}

direct_scalar!(bool, Boolean, Bool);
direct_scalar!(i8, Byte, Byte);
direct_scalar!(i16, Short, Short);
direct_scalar!(i32, Int32, Int32);
direct_scalar!(i64, Int64, Int64);
direct_scalar!(f32, Float32, Float32);
direct_scalar!(f64, Float64, Float64);
direct_scalar!(String, String, Str);

impl FieldValue for BigDecimal {
    fn declared_type() -> DeclaredType {
        DeclaredType::Scalar(ScalarType::DecimalString)
    }

    fn to_value(&self, kind: &FieldKind) -> Result<Value, ConversionError> {
        expect_scalar(kind, ScalarType::DecimalString)?;
        // Negative exponents print as padded integers ("0000" for 0e3).
        let (_, scale) = self.as_bigint_and_exponent();
        let text = if scale < 0 {
            self.with_scale(0).to_plain_string()
        } else {
            self.to_plain_string()
        };
        Ok(Value::Decimal(text))
    }

    fn from_value(value: Value, kind: &FieldKind) -> Result<Self, ConversionError> {
        expect_scalar(kind, ScalarType::DecimalString)?;
        match value {
            Value::Decimal(text) => BigDecimal::from_str(&text).map_err(|e| {
                ConversionError::invalid(format!("'{text}' is not a decimal: {e}"))
            }),
            other => Err(unexpected(ScalarType::DecimalString, &other)),
        }
    }
}

impl FieldValue for Bytes {
    fn declared_type() -> DeclaredType {
        DeclaredType::Scalar(ScalarType::Bytes)
    }

    fn to_value(&self, kind: &FieldKind) -> Result<Value, ConversionError> {
        expect_scalar(kind, ScalarType::Bytes)?;
        Ok(Value::Bytes(self.to_vec()))
    }

    fn from_value(value: Value, kind: &FieldKind) -> Result<Self, ConversionError> {
        expect_scalar(kind, ScalarType::Bytes)?;
        match value {
            Value::Bytes(b) => Ok(Bytes::from(b)),
            other => Err(unexpected(ScalarType::Bytes, &other)),
        }
    }
}

impl FieldValue for DateTime<Utc> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Scalar(ScalarType::Timestamp)
    }

    fn to_value(&self, kind: &FieldKind) -> Result<Value, ConversionError> {
        expect_scalar(kind, ScalarType::Timestamp)?;
        // Millisecond slots: anything finer would be silently dropped.
        let nanos = self.timestamp_subsec_nanos();
        if nanos >= 1_000_000_000 {
            return Err(ConversionError::invalid(format!(
                "{self} falls in a leap second"
            )));
        }
        if nanos % 1_000_000 != 0 {
            return Err(ConversionError::invalid(format!(
                "{self} has sub-millisecond precision"
            )));
        }
        Ok(Value::Timestamp(self.timestamp_millis()))
    }

    fn from_value(value: Value, kind: &FieldKind) -> Result<Self, ConversionError> {
        expect_scalar(kind, ScalarType::Timestamp)?;
        match value {
            Value::Timestamp(millis) => DateTime::from_timestamp_millis(millis).ok_or_else(|| {
                ConversionError::invalid(format!("{millis}ms is outside the supported range"))
            }),
            other => Err(unexpected(ScalarType::Timestamp, &other)),
        }
    }
}
