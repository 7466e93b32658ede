use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode, header};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::client::{Transport, check_path};
use crate::errors::GengoError;
use crate::jobs::FileUpload;
use crate::protocol::query::encode_query;
use crate::protocol::{Credentials, QueryParams};

/// Connection settings for `HttpTransport`
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("gengo-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// reqwest-backed transport
#[derive(Debug)]
pub struct HttpTransport {
    /// HTTP client for API requests
    client: Client,
    /// Key pair used to sign requests
    credentials: Credentials,
    /// Base URL, always ending in `/`
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport with default options
    pub fn new(credentials: Credentials, base_url: &str) -> Result<Self, GengoError> {
        Self::with_options(credentials, base_url, HttpOptions::default())
    }

    /// Create a transport; `base_url` must be absolute
    pub fn with_options(
        credentials: Credentials,
        base_url: &str,
        options: HttpOptions,
    ) -> Result<Self, GengoError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| {
            GengoError::validation(format!("Base URL must be absolute ({}): {}", e, base_url))
        })?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            credentials,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the base URL and append the encoded query
    fn build_url(&self, path: &str, params: Option<&QueryParams>) -> Result<String, GengoError> {
        check_path(path)?;
        let url = self.base_url.join(path)?;
        Ok(format!("{}{}", url, encode_query(params)))
    }

    fn signed(&self, mut params: QueryParams, authenticated: bool) -> QueryParams {
        self.credentials.apply(&mut params, authenticated);
        params
    }

    /// Body text of a response; the envelope carries service errors
    async fn read_text(method: &str, path: &str, response: Response) -> Result<String, GengoError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("{} {} returned HTTP {}", method, path, status);
        }

        check_body(status, body)
    }
}

/// Pass a body through unless a non-success status came without an envelope
///
/// A failed call with an empty or non-JSON body (a proxy error page, say)
/// becomes `GengoError::Http` so the status is not lost.
fn check_body(status: StatusCode, body: String) -> Result<String, GengoError> {
    if status.is_success() || serde_json::from_str::<Value>(&body).is_ok() {
        return Ok(body);
    }

    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("empty response body")
            .to_string()
    } else {
        body.trim().chars().take(200).collect()
    };

    Err(GengoError::Http {
        status_code: status.as_u16(),
        message,
    })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        params: QueryParams,
        authenticated: bool,
    ) -> Result<String, GengoError> {
        let params = self.signed(params, authenticated);
        let url = self.build_url(path, Some(&params))?;
        debug!("GET {}", path);

        let response = self.client.get(url).send().await?;
        Self::read_text("GET", path, response).await
    }

    async fn post_form(&self, path: &str, fields: QueryParams) -> Result<String, GengoError> {
        let fields = self.signed(fields, true);
        let url = self.build_url(path, None)?;
        debug!("POST {} ({} form fields)", path, fields.len());

        let pairs: Vec<(&str, &str)> = fields.iter().collect();
        let response = self.client.post(url).form(&pairs).send().await?;
        Self::read_text("POST", path, response).await
    }

    async fn post_json(
        &self,
        path: &str,
        payload: Value,
        files: &[FileUpload],
    ) -> Result<String, GengoError> {
        let auth = self.signed(QueryParams::new(), true);
        let url = self.build_url(path, None)?;
        debug!("POST {} ({} files)", path, files.len());

        let mut form = Form::new();
        for (key, value) in auth.iter() {
            form = form.text(key.to_string(), value.to_string());
        }
        form = form.text("data", payload.to_string());

        for upload in files {
            let part = Part::bytes(upload.content().to_vec()).file_name(upload.file_name().to_string());
            form = form.part(upload.file_key().to_string(), part);
        }

        let response = self.client.post(url).multipart(form).send().await?;
        Self::read_text("POST", path, response).await
    }

    async fn put(&self, path: &str, payload: Value) -> Result<String, GengoError> {
        let fields = self.signed(QueryParams::new().with("data", payload.to_string()), true);
        let url = self.build_url(path, None)?;
        debug!("PUT {}", path);

        let pairs: Vec<(&str, &str)> = fields.iter().collect();
        let response = self.client.put(url).form(&pairs).send().await?;
        Self::read_text("PUT", path, response).await
    }

    async fn delete(&self, path: &str) -> Result<String, GengoError> {
        let params = self.signed(QueryParams::new(), true);
        let url = self.build_url(path, Some(&params))?;
        debug!("DELETE {}", path);

        let response = self.client.delete(url).send().await?;
        Self::read_text("DELETE", path, response).await
    }

    async fn get_bytes(&self, path: &str, authenticated: bool) -> Result<Vec<u8>, GengoError> {
        let params = self.signed(QueryParams::new(), authenticated);
        let url = self.build_url(path, Some(&params))?;
        debug!("GET {} (binary)", path);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("GET {} returned HTTP {}", path, status);
            let message = response.text().await.unwrap_or_default();
            return Err(GengoError::Http {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
