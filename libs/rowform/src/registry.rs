use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::RegistryConfig;
use crate::declare::{RecordRef, RowRecord};
use crate::derive::SchemaDeriver;
use crate::error::SchemaDerivationError;
use crate::schema::SchemaRef;

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::new);

/// Cache of derived schemas, keyed by record type.
///
/// Lookups take a read lock; derivation runs with no lock held, so deriving
/// one type never blocks lookups or derivations of other types. Two threads
/// racing on the same type may both derive it; the first insert wins and
/// both get the same `SchemaRef`.
#[derive(Debug)]
pub struct SchemaRegistry {
    config: RegistryConfig,
    schemas: RwLock<HashMap<TypeId, SchemaRef>>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::with_config(RegistryConfig::default())
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            schemas: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide registry used by [`RowRecord::schema`].
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Schema of `T`, derived on first use.
    pub fn schema_for<T: RowRecord>(&self) -> Result<SchemaRef, SchemaDerivationError> {
        if let Some(schema) = self.get(TypeId::of::<T>()) {
            tracing::trace!(record = T::NAME, "schema cache hit");
            return Ok(schema);
        }
        SchemaDeriver::new(self).derive_record(RecordRef::of::<T>())
    }

    pub fn get(&self, type_id: TypeId) -> Option<SchemaRef> {
        self.read().get(&type_id).cloned()
    }

    pub fn contains<T: RowRecord>(&self) -> bool {
        self.read().contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Inserts unless another thread got there first; returns the schema
    /// that ended up in the cache.
    pub(crate) fn insert(&self, type_id: TypeId, schema: SchemaRef) -> SchemaRef {
        self.write().entry(type_id).or_insert(schema).clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<TypeId, SchemaRef>> {
        match self.schemas.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("schema registry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, SchemaRef>> {
        match self.schemas.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("schema registry write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}
