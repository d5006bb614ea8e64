//! Path patterns (`/point-of-sale/info/:id`) and the parameters they capture.

use serde::Serialize;

use posdash_core::{ConfigError, ConfigResult};

/// A single captured path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// Parameters captured by a route match, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(Vec<Param>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value registered under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|p| (p.key.as_str(), p.value.as_str()))
    }

    fn push(&mut self, key: &str, value: &str) {
        self.0.push(Param {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// How specific a segment is; static beats parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum SegmentRank {
    Param,
    Static,
}

/// A parsed route path.
///
/// Paths are absolute and `/`-separated. A segment starting with `:` captures
/// whatever is in that position. Trailing slashes are insignificant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(path: &str) -> ConfigResult<Self> {
        if !path.starts_with('/') {
            return Err(ConfigError::invalid_pattern(path, "must start with '/'"));
        }

        let trimmed = path.trim_end_matches('/');
        let mut segments = Vec::new();
        let mut param_names: Vec<&str> = Vec::new();

        for part in trimmed.split('/').skip(1) {
            if part.is_empty() {
                return Err(ConfigError::invalid_pattern(path, "empty segment"));
            }
            match part.strip_prefix(':') {
                Some(name) => {
                    if name.is_empty()
                        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        return Err(ConfigError::invalid_pattern(
                            path,
                            format!("invalid parameter name '{name}'"),
                        ));
                    }
                    if param_names.contains(&name) {
                        return Err(ConfigError::invalid_pattern(
                            path,
                            format!("duplicate parameter '{name}'"),
                        ));
                    }
                    param_names.push(name);
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(part.to_string())),
            }
        }

        Ok(Self {
            raw: if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() },
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The pattern with parameter names erased.
    ///
    /// Two patterns with the same canonical form match exactly the same paths.
    pub fn canonical(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Static(s) => out.push_str(s),
                Segment::Param(_) => out.push(':'),
            }
        }
        out
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    pub(crate) fn rank(&self) -> Vec<SegmentRank> {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Static(_) => SegmentRank::Static,
                Segment::Param(_) => SegmentRank::Param,
            })
            .collect()
    }

    /// Match already-split path segments.
    pub(crate) fn match_segments(&self, parts: &[&str]) -> Option<Params> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(s) if s == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => params.push(name, part),
            }
        }
        Some(params)
    }

    pub fn matches(&self, path: &str) -> Option<Params> {
        self.match_segments(&split_path(path))
    }
}

impl core::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a concrete URL path into segments.
///
/// Query string and fragment are dropped; empty segments (doubled or trailing
/// slashes) are ignored.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty()).collect()
}
