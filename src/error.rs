//! Error and outcome types.
//!
//! Resolution itself never fails: a path that matches nothing yields
//! [`Resolution::NotFound`](crate::Resolution::NotFound). The types here
//! cover everything around it:
//!
//! - [`PatternError`]: a route pattern string is malformed.
//! - [`RouteError`]: a route table cannot be built, or a reverse lookup
//!   failed.
//! - [`LoadError`]: a component factory reported a failure.
//! - [`NavigationError`]: a navigation could not produce a component.
//! - [`NavigationResult`]: the outcome of [`Navigator::navigate`](crate::Navigator::navigate).
//!
//! # Examples
//!
//! ```
//! use route_table::NavigationResult;
//!
//! let result = NavigationResult::Fallback { path: "/missing".into() };
//! assert!(result.is_fallback());
//! assert_eq!(result.path(), Some("/missing"));
//! ```

use std::fmt;

// ============================================================================
// Pattern errors
// ============================================================================

/// A route pattern string that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// `:` with nothing after it, e.g. `/users/:`
    EmptyParamName { pattern: String },

    /// The same parameter name appears twice, e.g. `/:id/:id`
    DuplicateParam { pattern: String, name: String },

    /// A catch-all segment is followed by more segments, e.g. `/*/edit`
    CatchAllNotLast { pattern: String },

    /// A character that cannot appear in a pattern (`?`, `#`, stray `*`)
    IllegalChar { pattern: String, ch: char },

    /// Regex-style parameter syntax other than the `(.*)*` catch-all
    UnsupportedSyntax { pattern: String, segment: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EmptyParamName { pattern } => {
                write!(f, "Empty parameter name in pattern '{}'", pattern)
            }
            PatternError::DuplicateParam { pattern, name } => {
                write!(f, "Parameter ':{}' appears twice in pattern '{}'", name, pattern)
            }
            PatternError::CatchAllNotLast { pattern } => {
                write!(f, "Catch-all must be the last segment in pattern '{}'", pattern)
            }
            PatternError::IllegalChar { pattern, ch } => {
                write!(f, "Illegal character '{}' in pattern '{}'", ch, pattern)
            }
            PatternError::UnsupportedSyntax { pattern, segment } => {
                write!(
                    f,
                    "Unsupported segment '{}' in pattern '{}' (only '(.*)*' is recognized)",
                    segment, pattern
                )
            }
        }
    }
}

impl std::error::Error for PatternError {}

// ============================================================================
// Route table errors
// ============================================================================

/// Errors raised while building a [`RouteTable`](crate::RouteTable) or
/// while generating a path from a named route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A pattern failed to compile
    Pattern(PatternError),

    /// Two routes share the same name
    DuplicateName { name: String },

    /// A route can never be selected because earlier routes already match
    /// every path it would match
    Unreachable {
        pattern: String,
        index: usize,
        shadowed_by: String,
        shadowed_by_index: usize,
    },

    /// The builder was finished without any routes
    EmptyTable,

    /// No route carries the requested name
    UnknownName { name: String },

    /// A parameter needed to build a path was not supplied
    MissingParam { route: String, param: String },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Pattern(err) => write!(f, "Invalid route pattern: {}", err),
            RouteError::DuplicateName { name } => {
                write!(f, "Route name '{}' is registered more than once", name)
            }
            RouteError::Unreachable {
                pattern,
                index,
                shadowed_by,
                shadowed_by_index,
            } => write!(
                f,
                "Route #{} '{}' is unreachable: every path it matches is taken by route #{} '{}' or earlier",
                index, pattern, shadowed_by_index, shadowed_by
            ),
            RouteError::EmptyTable => write!(f, "Route table has no routes"),
            RouteError::UnknownName { name } => write!(f, "No route named '{}'", name),
            RouteError::MissingParam { route, param } => {
                write!(f, "Route '{}' requires parameter '{}'", route, param)
            }
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatternError> for RouteError {
    fn from(err: PatternError) -> Self {
        RouteError::Pattern(err)
    }
}

// ============================================================================
// Component loading
// ============================================================================

/// Failure reported by a component factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    component: String,
    message: String,
}

impl LoadError {
    /// Create a load error for the component with the given id.
    pub fn new(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Id of the component that failed to load.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Human-readable failure description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to load component '{}': {}",
            self.component, self.message
        )
    }
}

impl std::error::Error for LoadError {}

// ============================================================================
// Navigation
// ============================================================================

/// Reasons a navigation could not produce a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No route matched and no fallback component is configured
    NotFound { path: String },

    /// A browser URL does not live under the history's base path
    OutsideBase { url: String, base: String },

    /// The matched component failed to load
    Load(LoadError),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::NotFound { path } => write!(f, "Route not found: {}", path),
            NavigationError::OutsideBase { url, base } => {
                write!(f, "URL '{}' is outside base path '{}'", url, base)
            }
            NavigationError::Load(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for NavigationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavigationError::Load(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LoadError> for NavigationError {
    fn from(err: LoadError) -> Self {
        NavigationError::Load(err)
    }
}

/// Outcome of a navigation through a [`Navigator`](crate::Navigator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// A route matched the path
    Matched {
        path: String,
        pattern: String,
        name: Option<String>,
    },
    /// Nothing matched; the navigator's fallback component takes over
    Fallback { path: String },
    /// Nothing matched and there is no fallback
    NotFound { path: String },
    /// The navigation was rejected before resolution
    Error(NavigationError),
}

impl NavigationResult {
    /// Check if a route matched
    pub fn is_matched(&self) -> bool {
        matches!(self, NavigationResult::Matched { .. })
    }

    /// Check if the fallback component was selected
    pub fn is_fallback(&self) -> bool {
        matches!(self, NavigationResult::Fallback { .. })
    }

    /// Check if nothing could be shown
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationResult::NotFound { .. })
    }

    /// Check if there was an error
    pub fn is_error(&self) -> bool {
        matches!(self, NavigationResult::Error(_))
    }

    /// The resolved path, if navigation got as far as resolution
    pub fn path(&self) -> Option<&str> {
        match self {
            NavigationResult::Matched { path, .. }
            | NavigationResult::Fallback { path }
            | NavigationResult::NotFound { path } => Some(path),
            NavigationResult::Error(_) => None,
        }
    }

    /// Name of the matched route, if it has one
    pub fn route_name(&self) -> Option<&str> {
        match self {
            NavigationResult::Matched { name, .. } => name.as_deref(),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
