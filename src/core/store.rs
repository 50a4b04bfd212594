use std::collections::BTreeMap;

use crate::core::document::{CollectionRef, Document};
use crate::core::errors::Result;
use crate::core::query::QuerySpec;
use crate::core::value::Value;

/// Stream of query results. Each item may fail independently.
pub type DocumentIter<'a> = Box<dyn Iterator<Item = Result<Document>> + 'a>;

/// Trait defining the document store operations the harness relies on
pub trait DocumentStore {
    /// Project this store is bound to
    fn project_id(&self) -> &str;

    /// Get a handle on a collection
    fn collection(&self, path: &str) -> Result<CollectionRef> {
        CollectionRef::new(self.project_id(), path)
    }

    /// Add a document with a store-assigned id
    fn add(&mut self, collection: &CollectionRef, fields: BTreeMap<String, Value>) -> Result<Document>;

    /// Run a query and return its results
    fn run_query<'a>(&'a self, collection: &CollectionRef, spec: &QuerySpec) -> Result<DocumentIter<'a>>;
}
