//! Firestore REST client
//!
//! `EmulatorStore` talks to the Firestore emulator (or, without an emulator
//! host, to the public endpoint) over its REST API. Calls are async under
//! the hood and driven to completion on a private current-thread runtime,
//! so every store operation blocks the caller.

use std::collections::BTreeMap;
use log::debug;
use reqwest::Client as HttpClient;
use tokio::runtime::Runtime;
use crate::core::document::{CollectionRef, Document};
use crate::core::errors::{PerfError, Result};
use crate::core::query::QuerySpec;
use crate::core::store::{DocumentIter, DocumentStore};
use crate::core::value::Value;

/// Endpoint used when no emulator host is configured
pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com";

/// Document store backed by the Firestore REST API
pub struct EmulatorStore {
    /// Project the client is bound to
    project_id: String,
    /// Scheme and authority of the endpoint
    base_url: String,
    /// HTTP client
    http_client: HttpClient,
    /// Runtime driving the async HTTP calls
    runtime: Runtime,
}

impl EmulatorStore {
    /// Build a client for `project_id`.
    ///
    /// With an emulator host every call goes to `http://{host}`, otherwise
    /// to the public endpoint. Nothing is sent over the network here.
    pub fn connect(project_id: &str, emulator_host: Option<&str>) -> Result<Self> {
        let base_url = match emulator_host.filter(|host| !host.is_empty()) {
            Some(host) => format!("http://{}", host),
            None => DEFAULT_ENDPOINT.to_string(),
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| PerfError::Transport(format!("Failed to create Tokio runtime: {}", e)))?;

        let http_client = HttpClient::builder().build()?;

        debug!("Firestore client for project {} targets {}", project_id, base_url);

        Ok(EmulatorStore {
            project_id: project_id.to_string(),
            base_url,
            http_client,
            runtime,
        })
    }

    /// Endpoint this client targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn documents_root(&self) -> String {
        format!("{}/v1/projects/{}/databases/(default)/documents", self.base_url, self.project_id)
    }

    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let response = self.runtime.block_on(async {
            self.http_client.post(url)
                .json(body)
                .send()
                .await?
                .error_for_status()?
                .json::<serde_json::Value>()
                .await
        })?;
        Ok(response)
    }
}

impl DocumentStore for EmulatorStore {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn add(&mut self, collection: &CollectionRef, fields: BTreeMap<String, Value>) -> Result<Document> {
        let url = format!("{}/{}", self.documents_root(), collection.path());
        let body = Document::new("", fields).to_rest();

        let response = self.post_json(&url, &body)?;
        Document::from_rest(&response)
    }

    fn run_query<'a>(&'a self, collection: &CollectionRef, spec: &QuerySpec) -> Result<DocumentIter<'a>> {
        // Queries run against the parent of the collection
        let url = match collection.parent() {
            Some(parent) => format!("{}/{}:runQuery", self.documents_root(), parent),
            None => format!("{}:runQuery", self.documents_root()),
        };
        let body = spec.to_structured_query(collection);

        let response = self.post_json(&url, &body)?;
        let entries = match response {
            serde_json::Value::Array(entries) => entries,
            other => {
                return Err(PerfError::Data(format!("Unexpected runQuery response: {}", other)));
            }
        };

        // Entries without a document only carry progress information
        Ok(Box::new(entries.into_iter().filter_map(|entry| {
            entry.get("document").map(Document::from_rest)
        })))
    }
}

impl Drop for EmulatorStore {
    fn drop(&mut self) {
        debug!("Closing Firestore client for project {}", self.project_id);
    }
}
