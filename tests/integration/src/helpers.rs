//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, signing callers in, and
//! making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use directory_api::{create_app, create_app_state, AppState};
use directory_common::{AppConfig, DatabaseConfig};
use directory_core::entities::UserProfile;
use directory_service::SessionService;
use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::unique_suffix;

/// Signing key shared by every test server
pub const TEST_JWT_SECRET: &str = "integration-test-secret-key-long-enough";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    state: AppState,
    owner_open_id: String,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server without storage
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a server backed by the database in `DATABASE_URL`
    pub async fn start_with_database() -> Result<Self> {
        dotenvy::dotenv().ok();
        let url = std::env::var("DATABASE_URL")?;

        let mut config = test_config();
        config.database = Some(DatabaseConfig {
            url,
            max_connections: 5,
            min_connections: 1,
            run_migrations: true,
        });

        let server = Self::start_with_config(config).await?;
        if !server.state.service_context().storage().is_available() {
            anyhow::bail!("DATABASE_URL is set but the database is unreachable");
        }
        Ok(server)
    }

    /// Start a test server with custom config
    ///
    /// The owner identity is replaced with a per-server one so
    /// [`TestServer::admin_token`] always signs in an admin.
    pub async fn start_with_config(mut config: AppConfig) -> Result<Self> {
        let owner_open_id = format!("it-owner-{}-{}", std::process::id(), unique_suffix());
        config.app.owner_open_id = Some(owner_open_id.clone());

        let state = create_app_state(config).await;
        let app = create_app(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            state,
            owner_open_id,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Sign in an identity through the session service and return its token
    pub async fn sign_in(&self, open_id: &str) -> Result<String> {
        let service = SessionService::new(self.state.service_context());
        let session = service.sign_in(UserProfile::new(open_id)).await?;
        Ok(session.token)
    }

    /// Token for the configured owner, who is always admin
    pub async fn admin_token(&self) -> Result<String> {
        self.sign_in(&self.owner_open_id).await
    }

    /// Token for a fresh non-admin user
    pub async fn user_token(&self) -> Result<String> {
        let open_id = format!("it-user-{}-{}", std::process::id(), unique_suffix());
        self.sign_in(&open_id).await
    }

    /// A correctly signed token for an identity that was never stored
    pub fn unregistered_token(&self) -> Result<String> {
        let session = self
            .state
            .service_context()
            .jwt_service()
            .issue_session("it-nobody", None)?;
        Ok(session.token)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with a raw JSON body that may not parse
    pub async fn post_raw(&self, path: &str, token: Option<&str>, body: &str) -> Result<Response> {
        let mut request = self
            .client
            .post(self.url(path))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.to_string());
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }
}

/// Create a test configuration without storage
pub fn test_config() -> AppConfig {
    AppConfig::for_testing(TEST_JWT_SECRET)
}

/// Helper to check if a database is available for storage-backed tests
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
