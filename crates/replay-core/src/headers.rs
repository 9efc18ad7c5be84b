//! Ordered header mapping used by baselines and effective requests.
//!
//! Names are stored verbatim. `insert` matches names literally (so `X-A` and
//! `x-a` are distinct entries) while lookup and removal helpers ending in
//! `_ignore_case` compare ASCII case-insensitively.

use serde::{Deserialize, Serialize};

pub const CONTENT_LENGTH: &str = "Content-Length";
pub const HOST: &str = "host";

/// A single header as captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Ordered name → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderList {
    entries: Vec<Header>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the value of an entry with the same literal name in place,
    /// or append a new entry.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|h| h.name == name) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Header { name, value }),
        }
    }

    /// Drop every entry whose name equals `name` ignoring ASCII case.
    /// Returns how many entries were dropped.
    pub fn remove_ignore_case(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|h| !h.name.eq_ignore_ascii_case(name));
        before - self.entries.len()
    }

    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.entries.iter().any(|h| h.name.eq_ignore_ascii_case(name))
    }

    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderList {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut list = HeaderList::new();
        for (name, value) in iter {
            list.insert(name, value);
        }
        list
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Split a `-H` argument into name and value.
///
/// The name is everything before the first `:` (the whole argument when
/// there is no colon) and the value is everything after the first space
/// (empty when there is no space). `"X-A:1"` therefore yields an empty
/// value, and `"Auth: a:b"` keeps `a:b` intact.
pub fn parse_header_arg(arg: &str) -> (&str, &str) {
    let name = arg.split_once(':').map_or(arg, |(name, _)| name);
    let value = arg.split_once(' ').map_or("", |(_, value)| value);
    (name, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_literal_name_in_place() {
        let mut headers: HeaderList = [("Host", "a"), ("Accept", "*/*")].into_iter().collect();
        headers.insert("Host", "b");

        let names: Vec<_> = headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Host", "Accept"]);
        assert_eq!(headers.get_ignore_case("host"), Some("b"));
    }

    #[test]
    fn test_insert_keeps_case_different_names_apart() {
        let mut headers = HeaderList::new();
        headers.insert("X-Token", "1");
        headers.insert("x-token", "2");

        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_remove_ignore_case_drops_every_match() {
        let mut headers = HeaderList::new();
        headers.insert("Cookie", "a=1");
        headers.insert("cookie", "b=2");
        headers.insert("Accept", "*/*");

        assert_eq!(headers.remove_ignore_case("COOKIE"), 2);
        assert!(!headers.contains_ignore_case("cookie"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_parse_header_arg() {
        assert_eq!(parse_header_arg("X-Test: 1"), ("X-Test", "1"));
        assert_eq!(parse_header_arg("X-Test:1"), ("X-Test", ""));
        assert_eq!(
            parse_header_arg("Authorization: Bearer a:b:c"),
            ("Authorization", "Bearer a:b:c")
        );
        assert_eq!(parse_header_arg("X-Spaces: a  b"), ("X-Spaces", "a  b"));
        assert_eq!(parse_header_arg("NoColon"), ("NoColon", ""));
        // No colon but a space: the whole argument becomes the name.
        assert_eq!(parse_header_arg("bad header"), ("bad header", "header"));
    }
}
