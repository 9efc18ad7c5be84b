//! Sends one effective request and buffers the full response.
//!
//! No timeout, no retries, and the client's default redirect policy: a
//! redirecting server makes the exchange more than one request on the wire.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use tracing::{debug, info};

use crate::effective::EffectiveRequest;
use crate::error::{ReplayError, ReplayResult};
use crate::headers::{Header, HeaderList};
use crate::render::decode_latin1;

/// Fully buffered response. Holds no connection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResponse {
    pub status: u16,
    /// Reason phrase as sent by the server, else the canonical one for the
    /// status, else "Unknown".
    pub reason: String,
    /// Headers as received. Repeated names stay separate entries.
    pub headers: Vec<Header>,
    pub body: Vec<u8>,
}

/// HTTP backend for replaying requests.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
}

impl Dispatcher {
    pub fn new() -> ReplayResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ReplayError::Transport {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Issue exactly one request. Any HTTP status is a successful exchange;
    /// only transport failures and unencodable requests are errors.
    pub async fn send(&self, request: EffectiveRequest) -> ReplayResult<ReplayResponse> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            ReplayError::InvalidMethod {
                method: request.method.clone(),
            }
        })?;
        let url = Url::parse(&request.url).map_err(|e| ReplayError::InvalidUrl {
            url: request.url.clone(),
            reason: e.to_string(),
        })?;
        let headers = to_header_map(&request.headers)?;

        debug!(method = %method, url = %url, "dispatching request");

        let mut builder = self.client.request(method, url).headers(headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let reason = reason_phrase(&response);
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| Header {
                name: name.to_string(),
                value: decode_latin1(value.as_bytes()),
            })
            .collect();

        // Consumes the response; the connection goes back to the pool (or is
        // closed) before the caller prints anything.
        let body = response.bytes().await?.to_vec();

        info!(status = status.as_u16(), body_len = body.len(), "response received");

        Ok(ReplayResponse {
            status: status.as_u16(),
            reason,
            headers,
            body,
        })
    }
}

// hyper only records the phrase when it differs from the canonical one.
// An empty phrase counts as missing.
fn reason_phrase(response: &reqwest::Response) -> String {
    let phrase = response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .filter(|phrase| !phrase.as_bytes().is_empty());
    match phrase {
        Some(phrase) => decode_latin1(phrase.as_bytes()),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string(),
    }
}

fn to_header_map(headers: &HeaderList) -> ReplayResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for header in headers {
        let name = HeaderName::from_bytes(header.name.as_bytes()).map_err(|e| {
            ReplayError::InvalidHeader {
                name: header.name.clone(),
                reason: e.to_string(),
            }
        })?;
        let value = HeaderValue::from_bytes(header.value.as_bytes()).map_err(|e| {
            ReplayError::InvalidHeader {
                name: header.name.clone(),
                reason: e.to_string(),
            }
        })?;
        map.append(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_map_keeps_values() {
        let headers: HeaderList = [("Accept", "*/*"), ("X-Token", "a:b")].into_iter().collect();
        let map = to_header_map(&headers).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("x-token").unwrap(), "a:b");
    }

    #[test]
    fn test_header_map_rejects_unencodable_name() {
        let headers: HeaderList = [("bad header", "header")].into_iter().collect();
        let err = to_header_map(&headers).unwrap_err();

        assert!(matches!(err, ReplayError::InvalidHeader { ref name, .. } if name == "bad header"));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_invalid_method_is_rejected_before_sending() {
        let dispatcher = Dispatcher::new().unwrap();
        let request = EffectiveRequest {
            method: "GE T".to_string(),
            url: "http://127.0.0.1:9/".to_string(),
            headers: HeaderList::new(),
            body: Vec::new(),
        };

        let err = dispatcher.send(request).await.unwrap_err();
        assert!(matches!(err, ReplayError::InvalidMethod { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_sending() {
        let dispatcher = Dispatcher::new().unwrap();
        let request = EffectiveRequest {
            method: "GET".to_string(),
            url: "not a url".to_string(),
            headers: HeaderList::new(),
            body: Vec::new(),
        };

        let err = dispatcher.send(request).await.unwrap_err();
        assert!(matches!(err, ReplayError::InvalidUrl { .. }));
    }
}
