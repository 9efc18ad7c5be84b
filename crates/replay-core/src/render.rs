//! Raw, wire-like text for requests and responses.
//!
//! Output is meant for humans, not for byte-exact replay: bodies are decoded
//! one byte per character (Latin-1), which never fails on binary data.

use std::io::{self, Write};

use crate::dispatch::ReplayResponse;
use crate::effective::EffectiveRequest;
use crate::headers::HOST;

/// Decode bytes as Latin-1. Every byte maps to exactly one char.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Request line with the uppercased method, headers minus `Host`, blank
/// line, then the body (if any) followed by a newline.
pub fn write_request<W: Write>(out: &mut W, request: &EffectiveRequest) -> io::Result<()> {
    write!(
        out,
        "{} {} HTTP/1.1\r\n",
        request.method.to_uppercase(),
        request.url
    )?;
    for header in request
        .headers
        .iter()
        .filter(|h| !h.name.eq_ignore_ascii_case(HOST))
    {
        write!(out, "{}: {}\r\n", header.name, header.value)?;
    }
    out.write_all(b"\r\n")?;

    if !request.body.is_empty() {
        writeln!(out, "{}", decode_latin1(&request.body))?;
    }
    Ok(())
}

/// Status line, every received header in order, blank line, body.
pub fn write_response<W: Write>(out: &mut W, response: &ReplayResponse) -> io::Result<()> {
    write!(out, "HTTP/1.1 {} {}\r\n", response.status, response.reason)?;
    for header in &response.headers {
        write!(out, "{}: {}\r\n", header.name, header.value)?;
    }
    out.write_all(b"\r\n")?;
    writeln!(out, "{}", decode_latin1(&response.body))
}

pub fn write_summary<W: Write>(out: &mut W, response: &ReplayResponse) -> io::Result<()> {
    writeln!(out, "Status: {} {}", response.status, response.reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::RequestBaseline;
    use crate::effective::Overrides;
    use crate::headers::Header;

    fn render_request(request: &EffectiveRequest) -> String {
        let mut out = Vec::new();
        write_request(&mut out, request).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_request_with_added_header_and_no_body() {
        let baseline = RequestBaseline::new("example.com", "/api", "GET")
            .with_header("Host", "example.com")
            .with_header("Accept", "*/*");
        let overrides = Overrides {
            headers: vec!["X-Test: 1".to_string()],
            ..Default::default()
        };
        let request = EffectiveRequest::build(&baseline, &overrides);

        assert_eq!(
            render_request(&request),
            "GET https://example.com/api HTTP/1.1\r\nAccept: */*\r\nX-Test: 1\r\n\r\n"
        );
    }

    #[test]
    fn test_request_suppresses_host_in_any_case() {
        let request = EffectiveRequest {
            method: "post".to_string(),
            url: "https://example.com/".to_string(),
            headers: [("HOST", "a"), ("host", "b"), ("X-Host", "c")]
                .into_iter()
                .collect(),
            body: b"a=1".to_vec(),
        };

        assert_eq!(
            render_request(&request),
            "POST https://example.com/ HTTP/1.1\r\nX-Host: c\r\n\r\na=1\n"
        );
    }

    #[test]
    fn test_response_decodes_binary_body_per_byte() {
        let response = ReplayResponse {
            status: 404,
            reason: "Not Found".to_string(),
            headers: vec![Header {
                name: "Content-Type".to_string(),
                value: "application/octet-stream".to_string(),
            }],
            body: vec![0x68, 0xff, 0x00],
        };
        let mut out = Vec::new();
        write_response(&mut out, &response).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "HTTP/1.1 404 Not Found\r\nContent-Type: application/octet-stream\r\n\r\nh\u{ff}\u{0}\n"
        );
    }

    #[test]
    fn test_summary_line() {
        let response = ReplayResponse {
            status: 200,
            reason: "OK".to_string(),
            headers: Vec::new(),
            body: b"ignored".to_vec(),
        };
        let mut out = Vec::new();
        write_summary(&mut out, &response).unwrap();

        assert_eq!(out, b"Status: 200 OK\n");
    }

    #[test]
    fn test_decode_latin1_maps_every_byte() {
        let all: Vec<u8> = (0..=255).collect();
        let decoded = decode_latin1(&all);
        assert_eq!(decoded.chars().count(), 256);
        assert_eq!(decoded.chars().last(), Some('\u{ff}'));
    }
}
