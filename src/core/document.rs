//! Documents and collection references

use std::collections::BTreeMap;
use std::fmt;
use serde_json::Map;
use super::errors::{PerfError, Result};
use super::value::{fields_to_rest, Value};

/// A stored document: its name and its fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Full resource name (or generated id for in-process stores)
    pub name: String,
    /// Field values by name
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    /// Create a new document
    pub fn new(name: impl Into<String>, fields: BTreeMap<String, Value>) -> Self {
        Document {
            name: name.into(),
            fields,
        }
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Keep only the given fields
    pub fn project(&self, fields: &[String]) -> Document {
        let fields = self.fields.iter()
            .filter(|(name, _)| fields.contains(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Document::new(self.name.clone(), fields)
    }

    /// Encode the document fields as a REST request body
    pub fn to_rest(&self) -> serde_json::Value {
        let mut body = Map::new();
        body.insert("fields".to_string(), fields_to_rest(&self.fields));
        serde_json::Value::Object(body)
    }

    /// Decode a REST `Document` resource
    pub fn from_rest(json: &serde_json::Value) -> Result<Document> {
        let name = json.get("name")
            .and_then(|n| n.as_str())
            .unwrap_or_default()
            .to_string();

        let mut fields = BTreeMap::new();
        if let Some(raw) = json.get("fields") {
            let raw = raw.as_object()
                .ok_or_else(|| PerfError::Data(format!("Document {} has malformed fields", name)))?;
            for (field, value) in raw {
                fields.insert(field.clone(), Value::from_rest(value)?);
            }
        }

        Ok(Document { name, fields })
    }
}

/// Reference to a collection inside a project's default database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRef {
    project_id: String,
    path: String,
}

impl CollectionRef {
    /// Create a reference to the collection at `path`.
    ///
    /// A collection path alternates collection and document ids, so it must
    /// have an odd number of non-empty segments (`Events`, or
    /// `EventContextTenants/smoke-tenant/Events`).
    pub fn new(project_id: &str, path: &str) -> Result<Self> {
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();

        if trimmed.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(PerfError::Configuration(format!("Invalid collection path: {:?}", path)));
        }
        if segments.len() % 2 == 0 {
            return Err(PerfError::Configuration(format!(
                "Collection path {} points at a document, not a collection",
                path
            )));
        }

        Ok(CollectionRef {
            project_id: project_id.to_string(),
            path: trimmed.to_string(),
        })
    }

    /// Project owning the collection
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Path relative to the database root
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The collection id (last path segment)
    pub fn id(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Path of the parent document, if this is a subcollection
    pub fn parent(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(parent, _)| parent)
    }

    /// Full resource path of the collection
    pub fn full_path(&self) -> String {
        format!("projects/{}/databases/(default)/documents/{}", self.project_id, self.path)
    }
}

impl fmt::Display for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_collection() {
        let col = CollectionRef::new("demo", "perftesting").unwrap();
        assert_eq!(col.id(), "perftesting");
        assert_eq!(col.parent(), None);
        assert_eq!(col.full_path(), "projects/demo/databases/(default)/documents/perftesting");
    }

    #[test]
    fn test_subcollection() {
        let col = CollectionRef::new("demo", "EventContextTenants/smoke-tenant/Events").unwrap();
        assert_eq!(col.id(), "Events");
        assert_eq!(col.parent(), Some("EventContextTenants/smoke-tenant"));
    }

    #[test]
    fn test_invalid_paths() {
        assert!(matches!(CollectionRef::new("demo", ""), Err(PerfError::Configuration(_))));
        assert!(matches!(CollectionRef::new("demo", "a//b"), Err(PerfError::Configuration(_))));
        assert!(matches!(CollectionRef::new("demo", "tenants/t1"), Err(PerfError::Configuration(_))));
    }

    #[test]
    fn test_document_rest() {
        let mut fields = BTreeMap::new();
        fields.insert("TenantID".to_string(), Value::Integer(3));
        fields.insert("_id".to_string(), Value::from("ABC"));
        let doc = Document::new("", fields);

        let body = doc.to_rest();
        assert_eq!(body["fields"]["TenantID"], json!({ "integerValue": "3" }));
        assert_eq!(body["fields"]["_id"], json!({ "stringValue": "ABC" }));

        let decoded = Document::from_rest(&json!({
            "name": "projects/demo/databases/(default)/documents/perftesting/x1",
            "fields": body["fields"].clone(),
        })).unwrap();
        assert_eq!(decoded.get("TenantID"), Some(&Value::Integer(3)));
        assert!(decoded.name.ends_with("/x1"));
    }

    #[test]
    fn test_project() {
        let mut fields = BTreeMap::new();
        fields.insert("a".to_string(), Value::Integer(1));
        fields.insert("b".to_string(), Value::Integer(2));
        let doc = Document::new("d", fields);

        let projected = doc.project(&["b".to_string(), "missing".to_string()]);
        assert_eq!(projected.fields.len(), 1);
        assert_eq!(projected.get("b"), Some(&Value::Integer(2)));
    }
}
