use std::any::TypeId;
use std::sync::Arc;

use crate::declare::{DeclaredType, RecordRef, TypeDeclaration};
use crate::error::SchemaDerivationError;
use crate::field::{FieldDescriptor, FieldKind};
use crate::registry::SchemaRegistry;
use crate::scalar::ScalarType;
use crate::schema::{Schema, SchemaRef};

/// Turns type declarations into schemas.
///
/// Nested record types are looked up in, or derived into, the registry the
/// deriver was created for, so every record type is derived at most once per
/// registry and nested schemas are shared.
pub struct SchemaDeriver<'a> {
    registry: &'a SchemaRegistry,
    max_depth: usize,
    /// Records currently being derived, outermost first.
    stack: Vec<(Option<TypeId>, String)>,
}

impl<'a> SchemaDeriver<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            max_depth: registry.config().max_depth,
            stack: Vec::new(),
        }
    }

    /// Derives the schema of a declaration that is not tied to a Rust type,
    /// such as one built by hand for explicit registration. The result is
    /// not cached; nested record types are.
    pub fn derive(&mut self, declaration: &TypeDeclaration) -> Result<SchemaRef, SchemaDerivationError> {
        self.enter(None, declaration.name())?;
        let result = self.derive_fields(declaration);
        self.stack.pop();
        result.map(Arc::new)
    }

    /// Schema of a record type: from the registry, or derived and inserted.
    pub fn derive_record(&mut self, record: RecordRef) -> Result<SchemaRef, SchemaDerivationError> {
        if let Some(pos) = self
            .stack
            .iter()
            .position(|(id, _)| *id == Some(record.type_id()))
        {
            let mut path: Vec<String> = self.stack[pos..].iter().map(|(_, n)| n.clone()).collect();
            path.push(record.name().to_string());
            return Err(SchemaDerivationError::CyclicReference { path });
        }

        if let Some(schema) = self.registry.get(record.type_id()) {
            if self.stack.len() + 1 + schema.depth() > self.max_depth {
                return Err(self.depth_exceeded(record.name()));
            }
            return Ok(schema);
        }

        self.enter(Some(record.type_id()), record.name())?;
        let result = self.derive_fields(&record.declaration());
        self.stack.pop();

        match result {
            Ok(schema) => Ok(self.registry.insert(record.type_id(), Arc::new(schema))),
            Err(e) => {
                tracing::warn!(record = record.name(), error = %e, "schema derivation failed");
                Err(e)
            }
        }
    }

    fn enter(&mut self, type_id: Option<TypeId>, name: &str) -> Result<(), SchemaDerivationError> {
        if self.stack.len() >= self.max_depth {
            return Err(self.depth_exceeded(name));
        }
        self.stack.push((type_id, name.to_string()));
        Ok(())
    }

    fn depth_exceeded(&self, name: &str) -> SchemaDerivationError {
        let record = self
            .stack
            .first()
            .map(|(_, n)| n.as_str())
            .unwrap_or(name)
            .to_string();
        SchemaDerivationError::DepthExceeded {
            record,
            limit: self.max_depth,
        }
    }

    fn derive_fields(&mut self, declaration: &TypeDeclaration) -> Result<Schema, SchemaDerivationError> {
        let mut builder = Schema::builder(declaration.name());
        for field in declaration.fields() {
            let kind = self.resolve(declaration.name(), &field.name, &field.ty)?;
            builder.push(FieldDescriptor::new(field.name.clone(), kind, field.optional));
        }
        let schema = builder.build()?;
        tracing::debug!(record = schema.name(), fields = schema.len(), "derived schema");
        Ok(schema)
    }

    fn resolve(
        &mut self,
        record: &str,
        field: &str,
        ty: &DeclaredType,
    ) -> Result<FieldKind, SchemaDerivationError> {
        match ty {
            DeclaredType::Scalar(scalar) => Ok(FieldKind::Scalar(*scalar)),
            DeclaredType::Named(name) => ScalarType::from_type_name(name)
                .map(FieldKind::Scalar)
                .ok_or_else(|| SchemaDerivationError::UnsupportedType {
                    record: record.to_string(),
                    field: field.to_string(),
                    type_name: name.clone(),
                }),
            DeclaredType::Record(nested) => Ok(FieldKind::Record(self.derive_record(*nested)?)),
            DeclaredType::Array(element) => match element.as_ref() {
                DeclaredType::Optional(_) => Err(SchemaDerivationError::NullableElement {
                    record: record.to_string(),
                    field: field.to_string(),
                }),
                element => Ok(FieldKind::array(self.resolve(record, field, element)?)),
            },
            // Optionality is only meaningful for the field as a whole.
            DeclaredType::Optional(_) => Err(SchemaDerivationError::UnsupportedType {
                record: record.to_string(),
                field: field.to_string(),
                type_name: ty.to_string(),
            }),
        }
    }
}
