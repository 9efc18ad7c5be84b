//! The captured request a replay starts from.

use crate::headers::HeaderList;

/// Values fixed when the replay program is generated. Never mutated at
/// runtime; overrides produce an [`crate::EffectiveRequest`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBaseline {
    pub host: String,
    pub url_path: String,
    /// Method as captured, case preserved.
    pub method: String,
    pub headers: HeaderList,
    pub body: Vec<u8>,
}

impl RequestBaseline {
    pub fn new(
        host: impl Into<String>,
        url_path: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            url_path: url_path.into(),
            method: method.into(),
            headers: HeaderList::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Target URL. Captures are always replayed over https.
    pub fn url(&self) -> String {
        format!("https://{}{}", self.host, self.url_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_host_and_path() {
        let baseline = RequestBaseline::new("example.com", "/api?q=1", "GET");
        assert_eq!(baseline.url(), "https://example.com/api?q=1");
    }

    #[test]
    fn test_builder_keeps_header_order() {
        let baseline = RequestBaseline::new("example.com", "/", "post")
            .with_header("Host", "example.com")
            .with_header("Accept", "*/*")
            .with_body("x=1");

        let names: Vec<_> = baseline.headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Host", "Accept"]);
        assert_eq!(baseline.method, "post");
        assert_eq!(baseline.body, b"x=1");
    }
}
