//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// Error body returned by the store API (`{"message": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// An HTTP response, fully read.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// The server's error message: the `message` field of a JSON error body,
    /// else the raw body text.
    pub fn error_message(&self) -> String {
        if let Ok(ErrorBody { message }) = serde_json::from_slice::<ErrorBody>(&self.body) {
            return message;
        }
        match self.text() {
            Ok(text) if !text.trim().is_empty() => text,
            _ => "Unknown error".to_string(),
        }
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::HttpError {
                status: self.status,
                message: self.error_message(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_status_classes() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(299, b"").is_success());
        assert!(!make_response(300, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_response_json() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Data {
            total: u64,
        }

        let resp = make_response(200, br#"{"total": 194}"#);
        let data: Data = resp.json().unwrap();
        assert_eq!(data, Data { total: 194 });
        assert!(make_response(200, b"not json").json::<Data>().is_err());
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_error_for_status_uses_message_field() {
        let resp = make_response(400, br#"{"message": "Invalid credentials"}"#);
        match resp.error_for_status() {
            Err(FetchError::HttpError { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_error_for_status_plain_body() {
        let err = make_response(502, b"Bad Gateway").error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err = make_response(500, b"").error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Unknown error");
    }

    #[test]
    fn test_error_for_status_success() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());
    }
}
