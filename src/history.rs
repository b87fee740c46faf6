//! Navigation history and location parsing.
//!
//! The resolver expects clean paths: no base prefix, no query string, no
//! fragment. [`History`] is where those are peeled off. It keeps a
//! back/forward stack of [`Location`]s and knows the application's base
//! path (what a web history calls `BASE_URL`), so a browser URL such as
//! `/app/about?tab=team` becomes the location `/about` with query
//! `tab=team`.

use crate::error::NavigationError;
use crate::params::QueryParams;
use crate::pattern::normalize_path;
use crate::trace_log;
use std::fmt;

/// A parsed application location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Normalized path handed to the resolver
    pub path: String,
    /// Parsed query string
    pub query: QueryParams,
    /// Fragment without the leading `#`
    pub fragment: Option<String>,
}

impl Location {
    /// Split an application URL into path, query and fragment.
    ///
    /// ```
    /// use route_table::Location;
    ///
    /// let location = Location::parse("/users/7/?tab=posts#top");
    /// assert_eq!(location.path, "/users/7");
    /// assert_eq!(location.query.get("tab"), Some("posts"));
    /// assert_eq!(location.fragment.as_deref(), Some("top"));
    /// ```
    pub fn parse(url: &str) -> Self {
        let (rest, fragment) = match url.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (url, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, QueryParams::from_query_string(query)),
            None => (rest, QueryParams::new()),
        };

        Self {
            path: normalize_path(path).into_owned(),
            query,
            fragment,
        }
    }

    /// The root location `/`.
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: QueryParams::new(),
            fragment: None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query.to_query_string())?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

/// Back/forward stack of locations under a base path.
#[derive(Debug, Clone)]
pub struct History {
    base: String,
    entries: Vec<Location>,
    current: usize,
}

impl History {
    /// Create a history rooted at `base` (e.g. `"/"` or `"/app/"`), starting
    /// at `/`.
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_path(base).into_owned(),
            entries: vec![Location::root()],
            current: 0,
        }
    }

    /// The normalized base path.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Translate a browser URL into an application location by stripping
    /// the base path.
    ///
    /// ```
    /// use route_table::History;
    ///
    /// let history = History::new("/app/");
    /// assert_eq!(history.location_from_url("/app/about?x=1").unwrap().path, "/about");
    /// assert_eq!(history.location_from_url("/app").unwrap().path, "/");
    /// assert!(history.location_from_url("/apple").is_err());
    /// ```
    pub fn location_from_url(&self, url: &str) -> Result<Location, NavigationError> {
        if self.base == "/" {
            return Ok(Location::parse(url));
        }

        let outside = || NavigationError::OutsideBase {
            url: url.to_string(),
            base: self.base.clone(),
        };

        let rest = url.strip_prefix(self.base.as_str()).ok_or_else(outside)?;
        // The base must end on a segment boundary: `/app` owns `/app/x` but
        // not `/apple`.
        match rest.chars().next() {
            None | Some('/' | '?' | '#') => Ok(Location::parse(rest)),
            Some(_) => Err(outside()),
        }
    }

    /// Browser URL for an application location.
    pub fn href(&self, location: &Location) -> String {
        if self.base == "/" {
            location.to_string()
        } else if location.path == "/" {
            format!("{}/{}", self.base, &location.to_string()[1..])
        } else {
            format!("{}{}", self.base, location)
        }
    }

    /// Push a new location, discarding any forward entries.
    pub fn push(&mut self, url: &str) -> &Location {
        let location = Location::parse(url);
        trace_log!("History push: {}", location);
        self.entries.truncate(self.current + 1);
        self.entries.push(location);
        self.current = self.entries.len() - 1;
        &self.entries[self.current]
    }

    /// Replace the current location in place.
    pub fn replace(&mut self, url: &str) -> &Location {
        let location = Location::parse(url);
        trace_log!("History replace: {}", location);
        self.entries[self.current] = location;
        &self.entries[self.current]
    }

    /// Step back one entry.
    pub fn back(&mut self) -> Option<&Location> {
        if self.can_go_back() {
            self.current -= 1;
            Some(&self.entries[self.current])
        } else {
            None
        }
    }

    /// Step forward one entry.
    pub fn forward(&mut self) -> Option<&Location> {
        if self.can_go_forward() {
            self.current += 1;
            Some(&self.entries[self.current])
        } else {
            None
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.current]
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    /// Number of entries, including forward ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a history starts with the root location.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}
