//! HTTP client and remote store API for Shelf.
//!
//! Provides a small builder API over `reqwest` with automatic JSON handling,
//! the [`StoreApi`] seam the storefront talks to, and the storefront flows
//! (sign in, load a catalog page, load the user's cart) built on top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_data::{ApiConfig, DummyJsonApi, StoreApi};
//! use shelf_commerce::search::CatalogQuery;
//!
//! let api = DummyJsonApi::new(ApiConfig::default());
//! let page = api.products(&CatalogQuery::default()).await?;
//! println!("{} of {} products", page.products.len(), page.total);
//! ```

mod api;
mod dummyjson;
mod error;
mod request;
mod response;
mod storefront;

pub use api::{ApiConfig, LoginGrant, StoreApi, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use dummyjson::DummyJsonApi;
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use storefront::{load_cart, load_more, load_storefront, sign_in, StorefrontPage};

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// HTTP client for making outbound requests.
///
/// This is a lightweight wrapper around a `reqwest::Client` that provides a
/// base URL, default headers and a per-request timeout.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Duration,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            http: self.http.clone(),
            timeout: self.timeout,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    timeout: Duration,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append query-string parameters.
    pub fn query<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in params {
            self.builder = self.builder.query(key, value);
        }
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// The request as built so far.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and read the whole response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.builder.full_url()?;
        let method = self.builder.method();
        debug!(method = method.as_str(), url = %url, "sending request");

        let started = Instant::now();
        let mut request = self
            .http
            .request(method.into(), url.clone())
            .timeout(self.timeout);
        for (key, value) in &self.builder.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = self.builder.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(method = method.as_str(), url = %url, error = %e, "request failed");
            FetchError::from(e)
        })?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(
            method = method.as_str(),
            url = %url,
            status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );

        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApiConfig, DummyJsonApi, FetchClient, FetchError, LoginGrant, Method, Response, StoreApi,
    };
}
