/*!
 * Client entry point and the transport seam.
 *
 * `GengoClient` owns a `Transport` and hands out borrowed method groups,
 * one per API area:
 * - `account()`: balance, stats, preferred translators
 * - `service()`: languages, language pairs, quotes
 * - `jobs()`: submission, recent jobs, lookups by id or group
 * - `job()`: a single job's lifecycle, comments, revisions
 * - `order()`: orders
 * - `glossary()`: glossaries
 */

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{ClientMode, Config};
use crate::endpoints::{AccountApi, GlossaryApi, JobApi, JobsApi, OrderApi, ServiceApi};
use crate::errors::GengoError;
use crate::jobs::FileUpload;
use crate::protocol::{Credentials, QueryParams};

pub mod http;
pub mod mock;

pub use http::{HttpOptions, HttpTransport};
pub use mock::{MockTransport, RecordedCall};

/// The HTTP operations the client needs
///
/// Implementations return the raw response body; unpacking the envelope is
/// left to the caller. Paths are relative to the implementation's base URL.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// GET with query parameters; auth parameters are added by the transport
    async fn get(
        &self,
        path: &str,
        params: QueryParams,
        authenticated: bool,
    ) -> Result<String, GengoError>;

    /// Authenticated form POST
    async fn post_form(&self, path: &str, fields: QueryParams) -> Result<String, GengoError>;

    /// Authenticated POST of a JSON payload, with optional file parts
    async fn post_json(
        &self,
        path: &str,
        payload: Value,
        files: &[FileUpload],
    ) -> Result<String, GengoError>;

    /// Authenticated PUT of a JSON payload
    async fn put(&self, path: &str, payload: Value) -> Result<String, GengoError>;

    /// Authenticated DELETE
    async fn delete(&self, path: &str) -> Result<String, GengoError>;

    /// GET returning the raw body bytes
    async fn get_bytes(&self, path: &str, authenticated: bool) -> Result<Vec<u8>, GengoError>;
}

/// Reject paths that would escape the base URL
pub fn check_path(path: &str) -> Result<(), GengoError> {
    if path.trim().is_empty() {
        return Err(GengoError::validation("Request path not provided"));
    }

    if path.starts_with('/') || url::Url::parse(path).is_ok() {
        return Err(GengoError::validation(format!(
            "Request path must be relative: {}",
            path
        )));
    }

    Ok(())
}

/// Gengo API client
#[derive(Debug, Clone)]
pub struct GengoClient {
    transport: Arc<dyn Transport>,
}

impl GengoClient {
    /// Client for the production environment
    pub fn new(private_key: &str, public_key: &str) -> Result<Self, GengoError> {
        Self::with_mode(private_key, public_key, ClientMode::Production)
    }

    /// Client for the given environment
    pub fn with_mode(
        private_key: &str,
        public_key: &str,
        mode: ClientMode,
    ) -> Result<Self, GengoError> {
        Self::with_base_url(private_key, public_key, mode.base_url())
    }

    /// Client for a custom base URL; the URL must be absolute
    pub fn with_base_url(
        private_key: &str,
        public_key: &str,
        base_url: &str,
    ) -> Result<Self, GengoError> {
        let credentials = Credentials::new(public_key, private_key)?;
        let transport = HttpTransport::new(credentials, base_url)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Client configured from a `Config`
    pub fn from_config(config: &Config) -> Result<Self, GengoError> {
        let credentials = Credentials::new(&config.public_key, &config.private_key)?;
        let options = HttpOptions {
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
        };
        let transport = HttpTransport::with_options(credentials, &config.endpoint(), options)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn account(&self) -> AccountApi<'_> {
        AccountApi::new(self.transport())
    }

    pub fn service(&self) -> ServiceApi<'_> {
        ServiceApi::new(self.transport())
    }

    pub fn jobs(&self) -> JobsApi<'_> {
        JobsApi::new(self.transport())
    }

    pub fn job(&self) -> JobApi<'_> {
        JobApi::new(self.transport())
    }

    pub fn order(&self) -> OrderApi<'_> {
        OrderApi::new(self.transport())
    }

    pub fn glossary(&self) -> GlossaryApi<'_> {
        GlossaryApi::new(self.transport())
    }
}
