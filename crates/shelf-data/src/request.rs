//! HTTP request builder.

use crate::FetchError;
use reqwest::Url;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query-string parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The target URL with the query string applied.
    pub fn full_url(&self) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url, e)))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_with_query() {
        let req = RequestBuilder::new(Method::Get, "https://dummyjson.com/products")
            .query("limit", "12")
            .query("skip", "24");
        assert_eq!(
            req.full_url().unwrap().as_str(),
            "https://dummyjson.com/products?limit=12&skip=24"
        );
    }

    #[test]
    fn test_full_url_encodes_search_text() {
        let req = RequestBuilder::new(Method::Get, "https://dummyjson.com/products/search")
            .query("q", "phone case&more");
        assert_eq!(
            req.full_url().unwrap().query(),
            Some("q=phone+case%26more")
        );
    }

    #[test]
    fn test_full_url_without_query() {
        let req = RequestBuilder::new(Method::Get, "https://dummyjson.com/products/categories");
        assert_eq!(req.full_url().unwrap().query(), None);
    }

    #[test]
    fn test_invalid_url() {
        let req = RequestBuilder::new(Method::Get, "/products");
        assert!(matches!(req.full_url(), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, "https://dummyjson.com/auth/login")
            .json(&serde_json::json!({"username": "emilys"}))
            .unwrap();
        assert_eq!(req.headers.get("Content-Type").map(String::as_str), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some(br#"{"username":"emilys"}"#.as_slice()));
    }

    #[test]
    fn test_bearer_auth() {
        let req = RequestBuilder::new(Method::Get, "https://dummyjson.com/auth/me").bearer_auth("abc");
        assert_eq!(req.headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
    }
}
