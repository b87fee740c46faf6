//! Route pattern compilation and matching.
//!
//! Patterns are compiled once, when the route table is built, into a list of
//! [`Segment`]s plus an optional catch-all tail. Matching and shadow
//! detection both work on the compiled form, so resolution never re-parses
//! pattern strings.
//!
//! # Syntax
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `/about` | exactly `/about` |
//! | `/users/:id` | `/users/7`, captures `id = "7"` |
//! | `/files/*` | `/files`, `/files/a`, `/files/a/b` |
//! | `/files/*rest` | as above, captures `rest = "a/b"` |
//! | `/:pathMatch(.*)*` | any path, captures `pathMatch` |
//!
//! A catch-all tail matches **zero or more** remaining segments, so `/*`
//! also matches `/`.
//!
//! # Path normalization
//!
//! Paths and patterns go through [`normalize_path`] first:
//!
//! 1. Empty paths become `"/"`
//! 2. A leading slash is ensured
//! 3. Trailing slashes are removed (except for root)
//! 4. Repeated slashes collapse to one

use crate::error::PatternError;
use crate::params::{decode_path_segment, encode_uri_component, RouteParams};
use std::borrow::Cow;
use std::fmt;

/// Normalize a path for consistent comparison.
///
/// Returns `Cow::Borrowed` when the path is already normalized.
///
/// # Examples
///
/// ```
/// use route_table::normalize_path;
///
/// assert_eq!(normalize_path("/dashboard"), "/dashboard");
/// assert_eq!(normalize_path("dashboard/"), "/dashboard");
/// assert_eq!(normalize_path("//a//b"), "/a/b");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path == "/" {
        return Cow::Borrowed(path);
    }

    let already_normalized =
        path.starts_with('/') && !path.ends_with('/') && !path.contains("//");
    if already_normalized {
        return Cow::Borrowed(path);
    }

    let joined = split_path(path).collect::<Vec<_>>().join("/");
    Cow::Owned(format!("/{joined}"))
}

/// Split a path into its non-empty segments.
///
/// ```
/// use route_table::pattern::split_path;
///
/// assert_eq!(split_path("/users/123/").collect::<Vec<_>>(), ["users", "123"]);
/// assert_eq!(split_path("/").count(), 0);
/// ```
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// One fixed-position segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly
    Static(String),
    /// Matches any single segment and captures it under this name
    Param(String),
}

impl Segment {
    /// Whether every path segment this one matches is also matched by `self`.
    fn covers(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Param(_), _) => true,
            (Segment::Static(a), Segment::Static(b)) => a == b,
            (Segment::Static(_), Segment::Param(_)) => false,
        }
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
    catch_all: Option<CatchAll>,
}

/// Trailing catch-all; `name` is `None` for an anonymous `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CatchAll {
    name: Option<String>,
}

impl RoutePattern {
    /// Compile a pattern string.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_table::RoutePattern;
    ///
    /// let pattern = RoutePattern::parse("/users/:id").unwrap();
    /// let params = pattern.match_path("/users/42").unwrap();
    /// assert_eq!(params.get("id"), Some("42"));
    ///
    /// assert!(RoutePattern::parse("/*/edit").is_err());
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if let Some(ch) = pattern.chars().find(|c| matches!(c, '?' | '#')) {
            return Err(PatternError::IllegalChar {
                pattern: pattern.to_string(),
                ch,
            });
        }

        let raw: Vec<&str> = split_path(pattern).collect();
        let mut segments = Vec::with_capacity(raw.len());
        let mut catch_all = None;

        for (i, seg) in raw.iter().enumerate() {
            let is_last = i + 1 == raw.len();

            if let Some(tail) = parse_catch_all(pattern, seg)? {
                if !is_last {
                    return Err(PatternError::CatchAllNotLast {
                        pattern: pattern.to_string(),
                    });
                }
                if let Some(name) = &tail.name {
                    check_unique(pattern, &segments, name)?;
                }
                catch_all = Some(tail);
                continue;
            }

            if let Some(name) = seg.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::EmptyParamName {
                        pattern: pattern.to_string(),
                    });
                }
                if name.contains('(') {
                    return Err(PatternError::UnsupportedSyntax {
                        pattern: pattern.to_string(),
                        segment: (*seg).to_string(),
                    });
                }
                check_unique(pattern, &segments, name)?;
                segments.push(Segment::Param(name.to_string()));
            } else if seg.contains('*') {
                return Err(PatternError::IllegalChar {
                    pattern: pattern.to_string(),
                    ch: '*',
                });
            } else {
                segments.push(Segment::Static((*seg).to_string()));
            }
        }

        Ok(Self {
            source: normalize_path(pattern).into_owned(),
            segments,
            catch_all,
        })
    }

    /// The normalized pattern string.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Fixed-position segments, excluding any catch-all tail.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the pattern is all static segments with no catch-all.
    pub fn is_literal(&self) -> bool {
        self.catch_all.is_none()
            && self
                .segments
                .iter()
                .all(|s| matches!(s, Segment::Static(_)))
    }

    /// True when the pattern ends in a catch-all tail.
    pub fn is_catch_all(&self) -> bool {
        self.catch_all.is_some()
    }

    /// True when the pattern matches every possible path.
    pub fn matches_everything(&self) -> bool {
        self.catch_all.is_some() && self.segments.is_empty()
    }

    /// Match a path, returning captured parameters on success.
    ///
    /// The path is split on `/` and empty segments are ignored, so callers
    /// may pass paths that are not fully normalized. Static segments compare
    /// against the raw path; captured values are percent-decoded, segment by
    /// segment, so `%2F` inside a parameter never splits it.
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        let path_segments: Vec<&str> = split_path(path).collect();
        if !self.accepts_length(path_segments.len()) {
            return None;
        }

        let mut params = RouteParams::new();
        for (pattern_seg, path_seg) in self.segments.iter().zip(&path_segments) {
            match pattern_seg {
                Segment::Static(literal) => {
                    if literal != path_seg {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.as_str(), decode_path_segment(path_seg));
                }
            }
        }

        if let Some(CatchAll { name: Some(name) }) = &self.catch_all {
            let tail: Vec<String> = path_segments[self.segments.len()..]
                .iter()
                .map(|seg| decode_path_segment(seg))
                .collect();
            params.insert(name.as_str(), tail.join("/"));
        }

        Some(params)
    }

    /// Whether a path with `len` segments can match, judging by shape alone.
    fn accepts_length(&self, len: usize) -> bool {
        if self.catch_all.is_some() {
            len >= self.segments.len()
        } else {
            len == self.segments.len()
        }
    }

    /// Whether every path matched by `other` is also matched by `self`.
    ///
    /// This is the single-pattern check. A route can also be hidden by
    /// several earlier routes together; see
    /// [`is_covered_by`](Self::is_covered_by).
    ///
    /// ```
    /// use route_table::RoutePattern;
    ///
    /// let any = RoutePattern::parse("/*").unwrap();
    /// let about = RoutePattern::parse("/about").unwrap();
    /// assert!(any.covers(&about));
    /// assert!(!about.covers(&any));
    /// ```
    pub fn covers(&self, other: &RoutePattern) -> bool {
        let prefix_covered = |len: usize| {
            self.segments[..len]
                .iter()
                .zip(&other.segments[..len])
                .all(|(mine, theirs)| mine.covers(theirs))
        };

        match (&self.catch_all, &other.catch_all) {
            // Exact-length pattern can only cover another exact-length one.
            (None, None) => {
                self.segments.len() == other.segments.len() && prefix_covered(self.segments.len())
            }
            (None, Some(_)) => false,
            // Every path `other` matches has at least `other.segments.len()`
            // segments, so the tail only needs our prefix to fit inside it.
            (Some(_), _) => {
                self.segments.len() <= other.segments.len() && prefix_covered(self.segments.len())
            }
        }
    }

    /// Whether every path matched by `self` is matched by at least one of
    /// `earlier`.
    ///
    /// Paths are grouped by segment count. For one count, each position
    /// either is a literal of `self` or takes any value; the only values
    /// that can change which of `earlier` match are the literals they use
    /// at that position, plus one value none of them uses. Trying every
    /// combination of those decides coverage exactly. Counts past the
    /// longest fixed prefix involved all behave alike, so one count past it
    /// stands for the rest.
    ///
    /// ```
    /// use route_table::RoutePattern;
    ///
    /// let root = RoutePattern::parse("/").unwrap();
    /// let sections = RoutePattern::parse("/:section/*").unwrap();
    /// let any = RoutePattern::parse("/*").unwrap();
    ///
    /// assert!(!root.covers(&any));
    /// assert!(!sections.covers(&any));
    /// assert!(any.is_covered_by(&[&root, &sections]));
    /// assert!(!any.is_covered_by(&[&sections]));
    /// ```
    pub fn is_covered_by(&self, earlier: &[&RoutePattern]) -> bool {
        if earlier.iter().any(|pattern| pattern.covers(self)) {
            return true;
        }

        let fixed = self.segments.len();
        let longest = earlier
            .iter()
            .map(|pattern| pattern.segments.len())
            .max()
            .unwrap_or(0);
        let last = if self.catch_all.is_some() {
            fixed.max(longest + 1)
        } else {
            fixed
        };

        (fixed..=last).all(|len| self.covered_at_length(len, earlier))
    }

    fn covered_at_length(&self, len: usize, earlier: &[&RoutePattern]) -> bool {
        let rivals: Vec<&RoutePattern> = earlier
            .iter()
            .copied()
            .filter(|pattern| pattern.accepts_length(len))
            .collect();
        if rivals.is_empty() {
            return false;
        }

        let choices: Vec<Vec<String>> = (0..len)
            .map(|position| match self.segments.get(position) {
                Some(Segment::Static(literal)) => vec![literal.clone()],
                _ => sample_values(&rivals, position),
            })
            .collect();

        // Odometer over one value per position.
        let mut picks = vec![0_usize; len];
        loop {
            let path: Vec<&str> = picks
                .iter()
                .zip(&choices)
                .map(|(&pick, values)| values[pick].as_str())
                .collect();
            let path = format!("/{}", path.join("/"));
            if !rivals.iter().any(|pattern| pattern.match_path(&path).is_some()) {
                return false;
            }

            let mut position = 0;
            loop {
                if position == len {
                    return true;
                }
                picks[position] += 1;
                if picks[position] < choices[position].len() {
                    break;
                }
                picks[position] = 0;
                position += 1;
            }
        }
    }

    /// Build a concrete path by substituting parameters.
    ///
    /// Values are percent-encoded, so they always stay inside their own
    /// segment. A named catch-all value is split on `/` and each piece is
    /// encoded; a missing one produces zero tail segments. A `:param` that
    /// is missing or empty is an error carrying the parameter name.
    pub fn to_path<'a>(&'a self, params: &RouteParams) -> Result<String, &'a str> {
        let mut parts: Vec<String> = Vec::with_capacity(self.segments.len() + 1);

        for segment in &self.segments {
            match segment {
                Segment::Static(literal) => parts.push(literal.clone()),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|value| !value.is_empty())
                        .ok_or(name.as_str())?;
                    parts.push(encode_uri_component(value));
                }
            }
        }

        if let Some(CatchAll { name: Some(name) }) = &self.catch_all {
            if let Some(tail) = params.get(name) {
                parts.extend(split_path(tail).map(encode_uri_component));
            }
        }

        Ok(format!("/{}", parts.join("/")))
    }
}

/// Literals `rivals` use at `position`, plus one value none of them uses.
fn sample_values(rivals: &[&RoutePattern], position: usize) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for pattern in rivals {
        if let Some(Segment::Static(literal)) = pattern.segments.get(position) {
            if !values.contains(literal) {
                values.push(literal.clone());
            }
        }
    }

    let fresh = (0_usize..)
        .map(|n| format!("~{n}"))
        .find(|candidate| !values.contains(candidate));
    values.extend(fresh);
    values
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Recognize catch-all segments: `*`, `*name` and `:name(.*)*`.
///
/// Returns `Ok(None)` for any other segment.
fn parse_catch_all(pattern: &str, seg: &str) -> Result<Option<CatchAll>, PatternError> {
    if let Some(name) = seg.strip_prefix('*') {
        if name.contains('*') {
            return Err(PatternError::IllegalChar {
                pattern: pattern.to_string(),
                ch: '*',
            });
        }
        let name = (!name.is_empty()).then(|| name.to_string());
        return Ok(Some(CatchAll { name }));
    }

    if let Some(name) = seg
        .strip_prefix(':')
        .and_then(|rest| rest.strip_suffix("(.*)*"))
    {
        if name.is_empty() {
            return Err(PatternError::EmptyParamName {
                pattern: pattern.to_string(),
            });
        }
        return Ok(Some(CatchAll {
            name: Some(name.to_string()),
        }));
    }

    Ok(None)
}

fn check_unique(pattern: &str, segments: &[Segment], name: &str) -> Result<(), PatternError> {
    let taken = segments
        .iter()
        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
    if taken {
        return Err(PatternError::DuplicateParam {
            pattern: pattern.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> RoutePattern {
        RoutePattern::parse(s).unwrap()
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
        assert_eq!(normalize_path("users/:id/"), "/users/:id");
        assert!(matches!(normalize_path("/about"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_parse_segments() {
        let pattern = p("/users/:id");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Static("users".to_string()),
                Segment::Param("id".to_string())
            ]
        );
        assert!(!pattern.is_literal());
        assert!(!pattern.is_catch_all());
        assert!(p("/about").is_literal());
    }

    #[test]
    fn test_parse_catch_all_forms() {
        assert!(p("/*").matches_everything());
        assert!(p("/:pathMatch(.*)*").matches_everything());
        assert!(p("/x/*rest").is_catch_all());
        assert!(!p("/x/*").matches_everything());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            RoutePattern::parse("/users/:"),
            Err(PatternError::EmptyParamName { .. })
        ));
        assert!(matches!(
            RoutePattern::parse("/:id/x/:id"),
            Err(PatternError::DuplicateParam { .. })
        ));
        assert!(matches!(
            RoutePattern::parse("/*/edit"),
            Err(PatternError::CatchAllNotLast { .. })
        ));
        assert!(matches!(
            RoutePattern::parse("/a?b=1"),
            Err(PatternError::IllegalChar { ch: '?', .. })
        ));
        assert!(matches!(
            RoutePattern::parse("/fi*le"),
            Err(PatternError::IllegalChar { ch: '*', .. })
        ));
        assert!(matches!(
            RoutePattern::parse("/:id(\\d+)"),
            Err(PatternError::UnsupportedSyntax { .. })
        ));
    }

    #[test]
    fn test_match_literal() {
        assert!(p("/about").match_path("/about").is_some());
        assert!(p("/about").match_path("/about/team").is_none());
        assert!(p("/").match_path("/").is_some());
        assert!(p("/").match_path("/about").is_none());
    }

    #[test]
    fn test_match_catch_all_captures_tail() {
        let params = p("/:pathMatch(.*)*").match_path("/a/b/c").unwrap();
        assert_eq!(params.get("pathMatch"), Some("a/b/c"));

        let params = p("/files/*rest").match_path("/files").unwrap();
        assert_eq!(params.get("rest"), Some(""));

        assert!(p("/x/*").match_path("/y/z").is_none());
        assert!(p("/*").match_path("/").is_some());
    }

    #[test]
    fn test_covers() {
        assert!(p("/*").covers(&p("/*")));
        assert!(p("/*").covers(&p("/x/*")));
        assert!(!p("/x/*").covers(&p("/*")));
        assert!(p("/x/*").covers(&p("/x/y/*")));
        assert!(!p("/x/y/*").covers(&p("/x/*")));
        assert!(p("/users/:id").covers(&p("/users/me")));
        assert!(!p("/users/me").covers(&p("/users/:id")));
        assert!(!p("/about").covers(&p("/about/*")));
        assert!(p("/about").covers(&p("/about")));
        assert!(!p("/about").covers(&p("/contact")));
    }

    #[test]
    fn test_covered_by_several_routes() {
        let root = p("/");
        let sections = p("/:section/*");
        assert!(p("/*").is_covered_by(&[&root, &sections]));
        assert!(!p("/*").is_covered_by(&[&sections]));
        assert!(!p("/*").is_covered_by(&[&root]));
        assert!(!p("/*").is_covered_by(&[]));

        let me = p("/users/me");
        let others = p("/users/:id");
        assert!(p("/users/:id").is_covered_by(&[&me, &others]));

        // Two literals never cover a parameter.
        let a = p("/a");
        let b = p("/b");
        assert!(!p("/:x").is_covered_by(&[&a, &b]));
    }

    #[test]
    fn test_covered_by_split_on_segment_count() {
        let empty = p("/files");
        let one = p("/files/:name");
        let deeper = p("/files/:dir/:name/*");
        let tail = p("/files/*");
        assert!(tail.is_covered_by(&[&empty, &one, &deeper]));
        assert!(!tail.is_covered_by(&[&empty, &deeper]));
        assert!(!tail.is_covered_by(&[&one, &deeper]));
    }

    #[test]
    fn test_match_decodes_captured_values() {
        let params = p("/users/:id").match_path("/users/a%2Fb").unwrap();
        assert_eq!(params.get("id"), Some("a/b"));

        let params = p("/tags/:tag").match_path("/tags/c++").unwrap();
        assert_eq!(params.get("tag"), Some("c++"));

        let params = p("/files/*rest").match_path("/files/my%20docs/a.txt").unwrap();
        assert_eq!(params.get("rest"), Some("my docs/a.txt"));
    }

    #[test]
    fn test_to_path_encodes_values() {
        let params = RouteParams::new().with("id", "a/b c");
        assert_eq!(p("/users/:id").to_path(&params), Ok("/users/a%2Fb%20c".to_string()));

        let empty = RouteParams::new().with("id", "");
        assert_eq!(p("/users/:id").to_path(&empty), Err("id"));
    }

    #[test]
    fn test_to_path() {
        let params = RouteParams::new().with("id", "7").with("rest", "a/b");
        assert_eq!(p("/users/:id").to_path(&params), Ok("/users/7".to_string()));
        assert_eq!(p("/files/*rest").to_path(&params), Ok("/files/a/b".to_string()));
        assert_eq!(p("/").to_path(&params), Ok("/".to_string()));
        assert_eq!(p("/teams/:team").to_path(&params), Err("team"));
    }
}
