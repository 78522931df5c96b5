//! Client-side schema cache. Describe calls are frequent and schemas are
//! immutable once created, so the client keeps a process-local copy keyed by
//! collection name and drops it whenever a mutation could invalidate it.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::schema::CollectionSchema;

/// Storage seam for cached collection schemas.
pub trait SchemaCache: Send + Sync {
    fn get(&self, collection: &str) -> Option<CollectionSchema>;
    fn put(&self, schema: CollectionSchema);
    fn invalidate(&self, collection: &str);
    fn clear(&self);
}

/// In-memory cache shared across clones of a client.
#[derive(Debug, Default)]
pub struct MemorySchemaCache {
    entries: RwLock<HashMap<String, CollectionSchema>>,
}

impl MemorySchemaCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaCache for MemorySchemaCache {
    fn get(&self, collection: &str) -> Option<CollectionSchema> {
        match self.entries.read() {
            Ok(entries) => entries.get(collection).cloned(),
            Err(_) => None,
        }
    }

    fn put(&self, schema: CollectionSchema) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(schema.name.clone(), schema);
        }
    }

    fn invalidate(&self, collection: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(collection);
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

/// Cache that stores nothing; every describe goes to the server.
#[derive(Debug, Default)]
pub struct NoopSchemaCache;

impl SchemaCache for NoopSchemaCache {
    fn get(&self, _collection: &str) -> Option<CollectionSchema> {
        None
    }

    fn put(&self, _schema: CollectionSchema) {}

    fn invalidate(&self, _collection: &str) {}

    fn clear(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DataType, FieldSchema};

    fn schema(name: &str) -> CollectionSchema {
        CollectionSchema::new(name)
            .with_field(FieldSchema::new("id", DataType::Int64).primary_key())
    }

    #[test]
    fn test_put_get_invalidate() {
        let cache = MemorySchemaCache::new();
        assert!(cache.get("a").is_none());

        cache.put(schema("a"));
        assert_eq!(cache.get("a").unwrap().name, "a");

        cache.invalidate("a");
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_clear_drops_all_entries() {
        let cache = MemorySchemaCache::new();
        cache.put(schema("a"));
        cache.put(schema("b"));
        cache.clear();
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_noop_cache_never_stores() {
        let cache = NoopSchemaCache;
        cache.put(schema("a"));
        assert!(cache.get("a").is_none());
    }
}
