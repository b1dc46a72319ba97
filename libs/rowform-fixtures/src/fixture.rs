use std::str::FromStr;

use rowform::{
    ConversionError, Row, RowRecord, SchemaDerivationError, SchemaRef, SchemaRegistry, from_row,
    to_row,
};

use crate::samples;
use crate::types::*;

/// Names every fixture record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    AvroPrimitive,
    AllPrimitive,
    NullableAllPrimitive,
    TimeContaining,
    ArrayPrimitive,
    AvroArrayPrimitive,
    AvroNestedRepeated,
    SinglyNested,
    DoublyNested,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown fixture '{0}'")]
pub struct UnknownFixture(String);

/// Outcome of converting a sample instance to a row and back.
#[derive(Debug)]
pub struct SampleReport {
    pub row: Row,
    /// Decoded instance equals the sample.
    pub round_trip: bool,
}

impl Fixture {
    pub const ALL: [Fixture; 9] = [
        Fixture::AvroPrimitive,
        Fixture::AllPrimitive,
        Fixture::NullableAllPrimitive,
        Fixture::TimeContaining,
        Fixture::ArrayPrimitive,
        Fixture::AvroArrayPrimitive,
        Fixture::AvroNestedRepeated,
        Fixture::SinglyNested,
        Fixture::DoublyNested,
    ];

    /// Record name, as carried by the derived schema.
    pub fn name(self) -> &'static str {
        match self {
            Fixture::AvroPrimitive => AvroPrimitiveDataTypes::NAME,
            Fixture::AllPrimitive => AllPrimitiveDataTypes::NAME,
            Fixture::NullableAllPrimitive => NullableAllPrimitiveDataTypes::NAME,
            Fixture::TimeContaining => TimeContaining::NAME,
            Fixture::ArrayPrimitive => ArrayPrimitiveDataTypes::NAME,
            Fixture::AvroArrayPrimitive => AvroArrayPrimitiveDataTypes::NAME,
            Fixture::AvroNestedRepeated => AvroNestedRepeatedDataTypes::NAME,
            Fixture::SinglyNested => SinglyNestedDataTypes::NAME,
            Fixture::DoublyNested => DoublyNestedDataTypes::NAME,
        }
    }

    /// Schema from the process-wide registry.
    pub fn schema(self) -> Result<SchemaRef, SchemaDerivationError> {
        self.schema_in(SchemaRegistry::global())
    }

    pub fn schema_in(self, registry: &SchemaRegistry) -> Result<SchemaRef, SchemaDerivationError> {
        match self {
            Fixture::AvroPrimitive => registry.schema_for::<AvroPrimitiveDataTypes>(),
            Fixture::AllPrimitive => registry.schema_for::<AllPrimitiveDataTypes>(),
            Fixture::NullableAllPrimitive => registry.schema_for::<NullableAllPrimitiveDataTypes>(),
            Fixture::TimeContaining => registry.schema_for::<TimeContaining>(),
            Fixture::ArrayPrimitive => registry.schema_for::<ArrayPrimitiveDataTypes>(),
            Fixture::AvroArrayPrimitive => registry.schema_for::<AvroArrayPrimitiveDataTypes>(),
            Fixture::AvroNestedRepeated => registry.schema_for::<AvroNestedRepeatedDataTypes>(),
            Fixture::SinglyNested => registry.schema_for::<SinglyNestedDataTypes>(),
            Fixture::DoublyNested => registry.schema_for::<DoublyNestedDataTypes>(),
        }
    }

    /// Converts the fixture's sample instance to a row and back, using
    /// schemas from `registry`.
    ///
    /// With `empty`, the all-nullable fixture uses its every-field-absent
    /// sample; other fixtures have no nullable fields and ignore it.
    pub fn sample(self, registry: &SchemaRegistry, empty: bool) -> Result<SampleReport, ConversionError> {
        match self {
            Fixture::AvroPrimitive => report(registry, samples::avro_primitive()),
            Fixture::AllPrimitive => report(registry, samples::all_primitive()),
            Fixture::NullableAllPrimitive if empty => {
                report(registry, samples::nullable_all_primitive_empty())
            }
            Fixture::NullableAllPrimitive => report(registry, samples::nullable_all_primitive()),
            Fixture::TimeContaining => report(registry, samples::time()),
            Fixture::ArrayPrimitive => report(registry, samples::array_primitive()),
            Fixture::AvroArrayPrimitive => report(registry, samples::avro_array_primitive()),
            Fixture::AvroNestedRepeated => report(registry, samples::avro_nested_repeated()),
            Fixture::SinglyNested => report(registry, samples::singly_nested()),
            Fixture::DoublyNested => report(registry, samples::doubly_nested()),
        }
    }
}

fn report<T: RowRecord + PartialEq>(
    registry: &SchemaRegistry,
    sample: T,
) -> Result<SampleReport, ConversionError> {
    let schema = registry.schema_for::<T>()?;
    let row = to_row(&schema, &sample)?;
    let decoded: T = from_row(&schema, row.clone())?;
    Ok(SampleReport {
        row,
        round_trip: decoded == sample,
    })
}

impl std::fmt::Display for Fixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Fixture {
    type Err = UnknownFixture;

    /// Accepts the record name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fixture::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFixture(s.to_string()))
    }
}
