//! Loading captured requests from disk.
//!
//! Three formats are accepted, picked by file extension:
//!
//! | Extension | Format |
//! |-----------|--------|
//! | `.json` | [`CapturedRequest`] as JSON |
//! | `.yaml`, `.yml` | [`CapturedRequest`] as YAML |
//! | anything else | raw HTTP/1.x request text |
//!
//! ```json
//! {
//!   "method": "POST",
//!   "url": "/api/login",
//!   "headers": [
//!     { "name": "Host", "value": "example.com" },
//!     { "name": "Content-Type", "value": "application/json" }
//!   ],
//!   "body": "{\"user\":\"admin\"}"
//! }
//! ```

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::baseline::RequestBaseline;
use crate::error::{ReplayError, ReplayResult};
use crate::headers::{Header, HeaderList, HOST};

/// On-disk form of a captured request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedRequest {
    pub method: String,

    /// Path and query, e.g. `/search?q=1`.
    pub url: String,

    /// Explicit host; falls back to the Host header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default)]
    pub headers: Vec<Header>,

    /// Body as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Body as standard Base64, for binary payloads. Wins over `body`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_base64: Option<String>,
}

impl CapturedRequest {
    /// Load a capture, choosing the parser from the file extension.
    pub fn from_path(path: &Path) -> ReplayResult<Self> {
        let bytes = std::fs::read(path)?;
        let source_name = path.display().to_string();
        debug!(path = %source_name, len = bytes.len(), "loading capture");

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Self::from_json(&bytes, &source_name),
            Some("yaml") | Some("yml") => Self::from_yaml(&bytes, &source_name),
            _ => Self::from_raw(&bytes, &source_name),
        }
    }

    pub fn from_json(bytes: &[u8], source_name: &str) -> ReplayResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| capture_error(source_name, e))
    }

    pub fn from_yaml(bytes: &[u8], source_name: &str) -> ReplayResult<Self> {
        serde_yaml::from_slice(bytes).map_err(|e| capture_error(source_name, e))
    }

    /// Parse a raw request: request line, header lines up to the first blank
    /// line (CRLF or LF), then the body verbatim.
    ///
    /// An absolute-form target (`https://host/path`) supplies the host.
    pub fn from_raw(bytes: &[u8], source_name: &str) -> ReplayResult<Self> {
        let (head, body) = split_head(bytes);
        let head = std::str::from_utf8(head).map_err(|e| capture_error(source_name, e))?;
        let mut lines = head.lines();

        let request_line = lines
            .next()
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| capture_error(source_name, "missing request line"))?;
        let mut parts = request_line.split_whitespace();
        let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
            return Err(capture_error(
                source_name,
                format!("malformed request line {:?}", request_line),
            ));
        };

        let mut headers = Vec::new();
        for line in lines {
            let Some((name, value)) = line.split_once(':') else {
                return Err(capture_error(
                    source_name,
                    format!("malformed header line {:?}", line),
                ));
            };
            headers.push(Header {
                name: name.trim().to_string(),
                value: value.trim().to_string(),
            });
        }

        let (host, url) = match url::Url::parse(target) {
            Ok(absolute) if absolute.has_host() => {
                let mut path = absolute.path().to_string();
                if let Some(query) = absolute.query() {
                    path.push('?');
                    path.push_str(query);
                }
                (Some(authority(&absolute)), path)
            }
            _ => (None, target.to_string()),
        };

        Ok(Self {
            method: method.to_string(),
            url,
            host,
            headers,
            body: None,
            body_base64: (!body.is_empty())
                .then(|| base64::engine::general_purpose::STANDARD.encode(body)),
        })
    }

    /// Resolve host and body, collapsing headers into the ordered mapping.
    pub fn into_baseline(self) -> ReplayResult<RequestBaseline> {
        let host = match self.host {
            Some(host) => host,
            None => self
                .headers
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case(HOST))
                .map(|h| h.value.clone())
                .ok_or(ReplayError::MissingHost)?,
        };

        let body = match (self.body_base64, self.body) {
            (Some(encoded), _) => base64::engine::general_purpose::STANDARD
                .decode(encoded.trim())
                .map_err(|e| capture_error("body_base64", e))?,
            (None, Some(text)) => text.into_bytes(),
            (None, None) => Vec::new(),
        };

        let headers: HeaderList = self
            .headers
            .into_iter()
            .map(|h| (h.name, h.value))
            .collect();

        Ok(RequestBaseline {
            host,
            url_path: self.url,
            method: self.method,
            headers,
            body,
        })
    }
}

/// Load and resolve a capture file in one step.
pub fn load_baseline(path: &Path) -> ReplayResult<RequestBaseline> {
    CapturedRequest::from_path(path)?.into_baseline()
}

fn split_head(bytes: &[u8]) -> (&[u8], &[u8]) {
    let crlf = find(bytes, b"\r\n\r\n").map(|i| (i, i + 4));
    let lf = find(bytes, b"\n\n").map(|i| (i, i + 2));
    let split = match (crlf, lf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    };
    match split {
        Some((head_end, body_start)) => (&bytes[..head_end], &bytes[body_start..]),
        None => (bytes, &[]),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn authority(url: &url::Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

fn capture_error(source_name: &str, err: impl std::fmt::Display) -> ReplayError {
    ReplayError::Capture {
        source_name: source_name.to_string(),
        message: err.to_string(),
    }
}
