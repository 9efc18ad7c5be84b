//! Turns a baseline plus runtime overrides into the request that is sent.
//!
//! The passes run in a fixed order, each taking the header list by value:
//!
//! 1. [`apply_additions`]: `-H` arguments, literal-name overwrite.
//! 2. [`apply_removals`]: `-r` names, case-insensitive; reports whether a
//!    `Content-Length` was dropped.
//! 3. [`apply_body_override`]: `-b` replaces the body, strips any remaining
//!    `Content-Length`, and re-adds a recomputed one only if a
//!    `Content-Length` was dropped here or in step 2.

use tracing::debug;

use crate::baseline::RequestBaseline;
use crate::headers::{parse_header_arg, HeaderList, CONTENT_LENGTH};

/// Runtime overrides, one field per script flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub method: Option<String>,
    pub url: Option<String>,
    /// Raw `-H` arguments in flag order.
    pub headers: Vec<String>,
    pub remove_headers: Vec<String>,
    pub body: Option<String>,
}

/// The request actually dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRequest {
    pub method: String,
    pub url: String,
    pub headers: HeaderList,
    pub body: Vec<u8>,
}

/// Headers after the removal pass, plus what it dropped.
#[derive(Debug)]
pub struct Removed {
    pub headers: HeaderList,
    pub dropped_content_length: bool,
}

impl EffectiveRequest {
    pub fn build(baseline: &RequestBaseline, overrides: &Overrides) -> Self {
        let headers = apply_additions(baseline.headers.clone(), &overrides.headers);
        let removed = apply_removals(headers, &overrides.remove_headers);
        let (headers, body) =
            apply_body_override(removed, baseline.body.clone(), overrides.body.as_deref());

        let request = Self {
            method: overrides
                .method
                .clone()
                .unwrap_or_else(|| baseline.method.clone()),
            url: overrides.url.clone().unwrap_or_else(|| baseline.url()),
            headers,
            body,
        };
        debug!(
            method = %request.method,
            url = %request.url,
            headers = request.headers.len(),
            body_len = request.body.len(),
            "built effective request"
        );
        request
    }
}

pub fn apply_additions(mut headers: HeaderList, args: &[String]) -> HeaderList {
    for arg in args {
        let (name, value) = parse_header_arg(arg);
        headers.insert(name, value);
    }
    headers
}

pub fn apply_removals(mut headers: HeaderList, names: &[String]) -> Removed {
    let mut dropped_content_length = false;
    for name in names {
        let dropped = headers.remove_ignore_case(name);
        if dropped > 0 && name.eq_ignore_ascii_case(CONTENT_LENGTH) {
            dropped_content_length = true;
        }
    }
    Removed {
        headers,
        dropped_content_length,
    }
}

pub fn apply_body_override(
    removed: Removed,
    body: Vec<u8>,
    replacement: Option<&str>,
) -> (HeaderList, Vec<u8>) {
    let Removed {
        mut headers,
        dropped_content_length,
    } = removed;

    let Some(replacement) = replacement else {
        return (headers, body);
    };

    let body = replacement.as_bytes().to_vec();
    let stripped = headers.remove_ignore_case(CONTENT_LENGTH) > 0;
    if dropped_content_length || stripped {
        headers.insert(CONTENT_LENGTH, body.len().to_string());
    }
    (headers, body)
}
