//! Path pattern matching
//!
//! Patterns are `/`-separated segments; a `{name}` segment captures the
//! corresponding path segment. A trailing slash on either side is ignored.
//! Path segments are percent-decoded before comparison, so `/movies/a%20b`
//! addresses id `a b`. Decoding happens after splitting: `%2F` stays inside
//! its segment.

use percent_encoding::percent_decode_str;

/// Parameters captured from `{name}` segments, in pattern order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Match `path` against `pattern`, returning captured parameters on success
pub fn match_pattern(pattern: &str, path: &str) -> Option<PathParams> {
    let mut pattern_segments = segments(pattern);
    let mut path_segments = segments(path);
    let mut params = Vec::new();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(PathParams(params)),
            (Some(expected), Some(raw)) => {
                let actual = percent_decode_str(raw).decode_utf8_lossy();
                if let Some(name) = capture_name(expected) {
                    if actual.is_empty() {
                        return None;
                    }
                    params.push((name.to_string(), actual.into_owned()));
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

fn segments(path: &str) -> std::str::Split<'_, char> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    trimmed.split('/')
}

fn capture_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
