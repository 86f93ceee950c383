//! Test helpers for integration tests
//!
//! Provides a test server bound to a local port, request helpers for form
//! and multipart bodies, and envelope assertions.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::Result;
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use storial_api::{create_app, create_app_state};
use storial_common::AppConfig;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// The `{code, message, data}` body every JSON response carries
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    cover_dir: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with a scratch cover directory
    pub async fn start() -> Result<Self> {
        let cover_dir = tempfile::tempdir()?;
        let config = test_config(&cover_dir)?;

        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            cover_dir,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Names of the cover files currently stored, sorted
    pub fn cover_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.cover_dir.path())
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Full URL of an `/api/v1` path
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url(), path)
    }

    /// Make a GET request outside `/api/v1`
    pub async fn get_root(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request without a token
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.api_url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.get(self.api_url(path)), Some(token)).await
    }

    /// Make a POST request with a urlencoded form body
    pub async fn post_form(
        &self,
        path: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
    ) -> Result<Response> {
        send(self.client.post(self.api_url(path)).form(fields), token).await
    }

    /// Make a PATCH request with a urlencoded form body
    pub async fn patch_form(
        &self,
        path: &str,
        token: &str,
        fields: &[(&str, &str)],
    ) -> Result<Response> {
        send(self.client.patch(self.api_url(path)).form(fields), Some(token)).await
    }

    /// Make a POST request with a multipart body
    pub async fn post_multipart(
        &self,
        path: &str,
        token: &str,
        form: multipart::Form,
    ) -> Result<Response> {
        send(self.client.post(self.api_url(path)).multipart(form), Some(token)).await
    }

    /// Make a PUT request with a multipart body
    pub async fn put_multipart(
        &self,
        path: &str,
        token: &str,
        form: multipart::Form,
    ) -> Result<Response> {
        send(self.client.put(self.api_url(path)).multipart(form), Some(token)).await
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.delete(self.api_url(path)), Some(token)).await
    }
}

async fn send(request: RequestBuilder, token: Option<&str>) -> Result<Response> {
    let request = match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    };
    Ok(request.send().await?)
}

/// Build a multipart form from text fields
pub fn multipart_form(fields: &[(&str, &str)]) -> multipart::Form {
    fields
        .iter()
        .fold(multipart::Form::new(), |form, (name, value)| {
            form.text((*name).to_string(), (*value).to_string())
        })
}

/// Attach a cover image part to a multipart form
pub fn with_cover(form: multipart::Form, file_name: &str, bytes: &[u8]) -> Result<multipart::Form> {
    let part = multipart::Part::bytes(bytes.to_vec())
        .file_name(file_name.to_string())
        .mime_str("image/png")?;
    Ok(form.part("cover", part))
}

/// Create a test configuration from the environment
///
/// Covers are written to `cover_dir` and the port setting is ignored since
/// the test server binds its own.
pub fn test_config(cover_dir: &TempDir) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let cover_dir = cover_dir.path().to_string_lossy().into_owned();
    let config = AppConfig::from_lookup(|key| match key {
        "COVER_DIR" => Some(cover_dir.clone()),
        "API_PORT" => Some(std::env::var(key).unwrap_or_else(|_| "0".to_string())),
        // Every test runs its own server, keep each pool small
        "DATABASE_MAX_CONNECTIONS" => Some("5".to_string()),
        "DATABASE_MIN_CONNECTIONS" => Some("0".to_string()),
        _ => std::env::var(key).ok(),
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    for var in ["DATABASE_URL", "JWT_SECRET"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }

    true
}

/// Assert response status and parse the envelope's data
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let envelope: Envelope<T> = assert_envelope(response, expected_status).await?;
    Ok(envelope.data)
}

/// Assert response status and parse the whole envelope
pub async fn assert_envelope<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<Envelope<T>> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected_status {
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(serde_json::from_str(&body)?)
}

/// Assert an error response and return its message
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let envelope: Envelope<serde_json::Value> = assert_envelope(response, expected_status).await?;
    anyhow::ensure!(
        envelope.code == expected_status.as_u16(),
        "Envelope code {} does not match status {}",
        envelope.code,
        expected_status
    );
    Ok(envelope.message)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
