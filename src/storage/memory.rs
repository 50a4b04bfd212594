//! In-memory store for firestore-perf
//!
//! This module provides an in-process implementation of the document
//! store. Queries are evaluated with the same semantics the emulator
//! applies, which makes it suitable for dry runs and tests.

use std::collections::{BTreeMap, HashMap};
use crate::core::document::{CollectionRef, Document};
use crate::core::errors::Result;
use crate::core::query::QuerySpec;
use crate::core::store::{DocumentIter, DocumentStore};
use crate::core::value::Value;
use crate::generator::new_identifier;

/// An in-memory document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Project the store pretends to belong to
    project_id: String,
    /// Documents by collection path, in insertion order
    collections: HashMap<String, Vec<Document>>,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new(project_id: &str) -> Self {
        MemoryStore {
            project_id: project_id.to_string(),
            collections: HashMap::new(),
        }
    }

    /// Count the documents in a collection
    pub fn count(&self, collection: &CollectionRef) -> usize {
        self.collections.get(collection.path())
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Drop every document, like the emulator reset endpoint does
    pub fn clear(&mut self) {
        self.collections.clear();
    }
}

impl DocumentStore for MemoryStore {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn add(&mut self, collection: &CollectionRef, fields: BTreeMap<String, Value>) -> Result<Document> {
        let name = format!("{}/{}", collection.full_path(), new_identifier());
        let doc = Document::new(name, fields);

        self.collections.entry(collection.path().to_string())
            .or_default()
            .push(doc.clone());

        Ok(doc)
    }

    fn run_query<'a>(&'a self, collection: &CollectionRef, spec: &QuerySpec) -> Result<DocumentIter<'a>> {
        let docs = self.collections.get(collection.path())
            .map(|docs| spec.apply(docs))
            .unwrap_or_default();

        Ok(Box::new(docs.into_iter().map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::Direction;

    fn fields(tenant: i64, ts: i64) -> BTreeMap<String, Value> {
        let mut fields = BTreeMap::new();
        fields.insert("TenantID".to_string(), Value::Integer(tenant));
        fields.insert("timestamp".to_string(), Value::Integer(ts));
        fields
    }

    #[test]
    fn test_add_and_count() {
        let mut store = MemoryStore::new("demo");
        let col = store.collection("perftesting").unwrap();

        let doc = store.add(&col, fields(1, 100)).unwrap();
        assert!(doc.name.starts_with("projects/demo/databases/(default)/documents/perftesting/"));
        assert_eq!(store.count(&col), 1);

        store.clear();
        assert_eq!(store.count(&col), 0);
    }

    #[test]
    fn test_collections_are_isolated() {
        let mut store = MemoryStore::new("demo");
        let a = store.collection("a").unwrap();
        let b = store.collection("tenants/t1/b").unwrap();

        store.add(&a, fields(1, 1)).unwrap();
        store.add(&b, fields(1, 2)).unwrap();
        store.add(&b, fields(2, 3)).unwrap();

        let count = store.run_query(&b, &QuerySpec::new()).unwrap().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_query_unknown_collection() {
        let store = MemoryStore::new("demo");
        let col = store.collection("nothing").unwrap();
        assert_eq!(store.run_query(&col, &QuerySpec::new()).unwrap().count(), 0);
    }

    #[test]
    fn test_query_semantics() {
        let mut store = MemoryStore::new("demo");
        let col = store.collection("perftesting").unwrap();
        for i in 0..10 {
            store.add(&col, fields(i % 2, i)).unwrap();
        }

        let spec = QuerySpec::new()
            .where_eq("TenantID", 1)
            .order_by("timestamp", Direction::Descending)
            .limit(3);
        let results: Vec<Document> = store.run_query(&col, &spec).unwrap()
            .collect::<Result<_>>()
            .unwrap();

        let timestamps: Vec<i64> = results.iter()
            .filter_map(|d| d.get("timestamp").and_then(Value::as_integer))
            .collect();
        assert_eq!(timestamps, vec![9, 7, 5]);
    }
}
