use std::fmt;

/// Failure while turning a type declaration into a schema.
///
/// Fatal and surfaced before any row is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaDerivationError {
    #[error("{record}.{field}: unsupported field type '{type_name}'")]
    UnsupportedType {
        record: String,
        field: String,
        type_name: String,
    },

    #[error("cyclic record reference: {}", path.join(" -> "))]
    CyclicReference { path: Vec<String> },

    #[error("{record}: duplicate field name '{field}'")]
    DuplicateField { record: String, field: String },

    #[error("{record}.{field}: arrays of nullable elements are not supported")]
    NullableElement { record: String, field: String },

    #[error("{record}: record nesting exceeds the limit of {limit} levels")]
    DepthExceeded { record: String, limit: usize },
}

/// Dotted path from the root record to the failing field.
///
/// Empty at the root; segments are prepended as the error travels outwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn prepend(self, segment: &str) -> Self {
        if self.0.is_empty() {
            FieldPath(segment.to_string())
        } else if self.0.starts_with('[') {
            FieldPath(format!("{segment}{}", self.0))
        } else {
            FieldPath(format!("{segment}.{}", self.0))
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        FieldPath(s.to_string())
    }
}

/// Failure while converting between an instance and a [`Row`](crate::Row).
///
/// None of these are transient: a conversion either completes or produces
/// nothing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// A null was presented for, or decoded into, a non-nullable field.
    #[error("null constraint violation at '{field}': field is not nullable")]
    NullConstraintViolation { field: FieldPath },

    /// The row's shape does not match the expected schema.
    #[error("schema mismatch at '{field}': {reason}")]
    SchemaMismatch { field: FieldPath, reason: String },

    /// A value of the right kind that cannot be represented exactly.
    #[error("invalid value at '{field}': {reason}")]
    InvalidValue { field: FieldPath, reason: String },

    #[error(transparent)]
    Derivation(#[from] SchemaDerivationError),
}

impl ConversionError {
    pub fn null_violation() -> Self {
        Self::NullConstraintViolation {
            field: FieldPath::default(),
        }
    }

    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            field: FieldPath::default(),
            reason: reason.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: FieldPath::default(),
            reason: reason.into(),
        }
    }

    /// Prefix the field path with the enclosing field name or `[index]`.
    ///
    /// Produces: `"outer.inner"`, `"list[3].inner"`.
    pub fn with_context(self, segment: &str) -> Self {
        match self {
            Self::NullConstraintViolation { field } => Self::NullConstraintViolation {
                field: field.prepend(segment),
            },
            Self::SchemaMismatch { field, reason } => Self::SchemaMismatch {
                field: field.prepend(segment),
                reason,
            },
            Self::InvalidValue { field, reason } => Self::InvalidValue {
                field: field.prepend(segment),
                reason,
            },
            other => other,
        }
    }

    /// Path of the failing field, if the error is tied to one.
    pub fn field(&self) -> Option<&FieldPath> {
        match self {
            Self::NullConstraintViolation { field }
            | Self::SchemaMismatch { field, .. }
            | Self::InvalidValue { field, .. } => Some(field),
            Self::Derivation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builds_dotted_paths() {
        let err = ConversionError::null_violation()
            .with_context("aString")
            .with_context("[1]")
            .with_context("allPrimitiveDataTypesList")
            .with_context("singlyNestedDataTypes");
        assert_eq!(
            err.field().map(FieldPath::as_str),
            Some("singlyNestedDataTypes.allPrimitiveDataTypesList[1].aString")
        );
    }

    #[test]
    fn root_path_displays_as_root() {
        let err = ConversionError::mismatch("field count differs");
        assert_eq!(
            err.to_string(),
            "schema mismatch at '<root>': field count differs"
        );
    }

    #[test]
    fn derivation_errors_pass_through() {
        let err: ConversionError = SchemaDerivationError::CyclicReference {
            path: vec!["A".into(), "B".into(), "A".into()],
        }
        .into();
        assert_eq!(err.clone().with_context("x"), err);
        assert_eq!(err.to_string(), "cyclic record reference: A -> B -> A");
    }
}
