//! Emulator reset
//!
//! The Firestore emulator exposes an administrative endpoint that wipes
//! every document of a project. The public service has no such endpoint,
//! so a reset is only attempted when an emulator host is configured.

use log::{debug, info};
use reqwest::Client as HttpClient;
use tokio::runtime::Runtime;
use crate::core::errors::{PerfError, Result};

/// Environment variable naming the emulator host (`host:port`)
pub const EMULATOR_HOST_ENV: &str = "FIRESTORE_EMULATOR_HOST";

/// Minimal HTTP surface needed by the reset client
pub trait HttpTransport {
    /// Send a DELETE request without a body. The response is not inspected.
    fn delete(&self, url: &str) -> Result<()>;
}

/// `HttpTransport` backed by reqwest
pub struct ReqwestTransport {
    http_client: HttpClient,
    runtime: Runtime,
}

impl ReqwestTransport {
    /// Create a new transport with its own runtime
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| PerfError::Transport(format!("Failed to create Tokio runtime: {}", e)))?;

        Ok(ReqwestTransport {
            http_client: HttpClient::new(),
            runtime,
        })
    }
}

impl HttpTransport for ReqwestTransport {
    fn delete(&self, url: &str) -> Result<()> {
        let response = self.runtime.block_on(async {
            self.http_client.delete(url).send().await
        })?;
        debug!("DELETE {} answered {}", url, response.status());
        Ok(())
    }
}

/// Client for the emulator reset endpoint
pub struct EmulatorResetClient {
    /// Emulator host, if configured
    host: Option<String>,
    /// Transport used to reach the emulator
    transport: Box<dyn HttpTransport>,
}

impl EmulatorResetClient {
    /// Create a reset client for `host` using the given transport
    pub fn new(host: Option<String>, transport: Box<dyn HttpTransport>) -> Self {
        EmulatorResetClient { host, transport }
    }

    /// Configured emulator host
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().filter(|host| !host.is_empty())
    }

    /// URL of the reset endpoint for `project_id`
    pub fn reset_url(host: &str, project_id: &str) -> String {
        format!(
            "http://{}/emulator/v1/projects/{}/databases/(default)/documents",
            host, project_id
        )
    }

    /// Delete every document of the project's default database.
    ///
    /// Fails with a configuration error, without any network call, when no
    /// emulator host is set. The HTTP status of the reset is not checked.
    pub fn reset(&self, project_id: &str) -> Result<()> {
        info!("Reset emulator: {}", self.host().unwrap_or_default());

        let host = self.host()
            .ok_or_else(|| PerfError::Configuration(format!("{} is not set", EMULATOR_HOST_ENV)))?;

        self.transport.delete(&Self::reset_url(host, project_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use warp::Filter;

    /// Records every URL it is asked to delete
    #[derive(Clone, Default)]
    struct RecordingTransport {
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl HttpTransport for RecordingTransport {
        fn delete(&self, url: &str) -> Result<()> {
            self.calls.lock().unwrap().push(url.to_string());
            if self.fail {
                return Err(PerfError::Transport("connection refused".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_unset_host_makes_no_call() {
        let transport = RecordingTransport::default();
        let client = EmulatorResetClient::new(None, Box::new(transport.clone()));

        let result = client.reset("demo");
        match result {
            Err(PerfError::Configuration(msg)) => assert_eq!(msg, "FIRESTORE_EMULATOR_HOST is not set"),
            other => panic!("expected configuration error, got {:?}", other),
        }
        assert!(transport.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_host_counts_as_unset() {
        let transport = RecordingTransport::default();
        let client = EmulatorResetClient::new(Some(String::new()), Box::new(transport.clone()));

        assert!(matches!(client.reset("demo"), Err(PerfError::Configuration(_))));
        assert!(transport.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reset_url() {
        let transport = RecordingTransport::default();
        let client = EmulatorResetClient::new(Some("localhost:8080".to_string()), Box::new(transport.clone()));

        client.reset("zing-dev-adjunct").unwrap();
        assert_eq!(
            *transport.calls.lock().unwrap(),
            vec!["http://localhost:8080/emulator/v1/projects/zing-dev-adjunct/databases/(default)/documents".to_string()]
        );
    }

    #[test]
    fn test_transport_error_is_surfaced() {
        let transport = RecordingTransport { fail: true, ..Default::default() };
        let client = EmulatorResetClient::new(Some("localhost:8080".to_string()), Box::new(transport.clone()));

        assert!(matches!(client.reset("demo"), Err(PerfError::Transport(_))));
        assert_eq!(transport.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_reqwest_transport_sends_delete() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);

        // Answer with an error status: the reset must not care
        let route = warp::delete()
            .and(warp::path::full())
            .map(move |path: warp::path::FullPath| {
                recorder.lock().unwrap().push(path.as_str().to_string());
                warp::reply::with_status("", warp::http::StatusCode::INTERNAL_SERVER_ERROR)
            });

        let server = Runtime::new().unwrap();
        let (addr, serve) = {
            let _guard = server.enter();
            warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0))
        };
        server.spawn(serve);

        let client = EmulatorResetClient::new(
            Some(addr.to_string()),
            Box::new(ReqwestTransport::new().unwrap()),
        );
        client.reset("demo").unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["/emulator/v1/projects/demo/databases/(default)/documents".to_string()]
        );
    }

    #[test]
    fn test_reqwest_transport_unreachable_host() {
        let client = EmulatorResetClient::new(
            Some("127.0.0.1:1".to_string()),
            Box::new(ReqwestTransport::new().unwrap()),
        );
        assert!(matches!(client.reset("demo"), Err(PerfError::Transport(_))));
    }
}
