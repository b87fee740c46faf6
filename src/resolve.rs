//! First-match route resolution.
//!
//! # Algorithm
//!
//! 1. Normalize the requested path (`"about/"` → `"/about"`)
//! 2. Walk the table in declaration order
//! 3. Return the first route whose pattern matches, with its captured params
//! 4. If nothing matches, return [`Resolution::NotFound`]
//!
//! Resolution is a pure function of `(table, path)`: it never loads a
//! component, never mutates the table and never fails. Declaration order
//! alone breaks ties, so with
//!
//! ```text
//! [0] /          home
//! [1] /about     about
//! [2] /x/*       wildcard A
//! [3] /*         wildcard B
//! ```
//!
//! `/x/y` resolves to `[2]` even though `[3]` also matches, and a second `/*`
//! declared after `[3]` would never be selected.

use crate::params::RouteParams;
use crate::pattern::normalize_path;
use crate::route::RouteDefinition;
use crate::table::RouteTable;
use crate::trace_log;
use std::fmt;

/// A route selected for a path.
pub struct RouteMatch<'a, V> {
    /// Declaration index of the route in its table
    pub index: usize,
    /// The matched definition
    pub route: &'a RouteDefinition<V>,
    /// Parameters captured by the pattern
    pub params: RouteParams,
}

impl<V> Clone for RouteMatch<'_, V> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            route: self.route,
            params: self.params.clone(),
        }
    }
}

impl<V> fmt::Debug for RouteMatch<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("index", &self.index)
            .field("route", self.route)
            .field("params", &self.params)
            .finish()
    }
}

/// Outcome of resolving a path.
pub enum Resolution<'a, V> {
    /// A route matched
    Matched(RouteMatch<'a, V>),
    /// No route matched
    NotFound,
}

impl<'a, V> Resolution<'a, V> {
    /// Check if a route matched
    pub fn is_matched(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }

    /// Check if nothing matched
    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }

    /// The matched route, if any
    pub fn route(&self) -> Option<&'a RouteDefinition<V>> {
        match self {
            Resolution::Matched(m) => Some(m.route),
            Resolution::NotFound => None,
        }
    }

    /// Declaration index of the matched route, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            Resolution::Matched(m) => Some(m.index),
            Resolution::NotFound => None,
        }
    }

    /// Convert into the inner match
    pub fn into_match(self) -> Option<RouteMatch<'a, V>> {
        match self {
            Resolution::Matched(m) => Some(m),
            Resolution::NotFound => None,
        }
    }
}

impl<V> Clone for Resolution<'_, V> {
    fn clone(&self) -> Self {
        match self {
            Resolution::Matched(m) => Resolution::Matched(m.clone()),
            Resolution::NotFound => Resolution::NotFound,
        }
    }
}

impl<V> fmt::Debug for Resolution<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Matched(m) => f.debug_tuple("Matched").field(m).finish(),
            Resolution::NotFound => f.write_str("NotFound"),
        }
    }
}

/// Resolve `path` against `table`.
///
/// # Examples
///
/// ```
/// use route_table::{resolve, ComponentRef, RouteTable};
///
/// let table = RouteTable::builder()
///     .route("/", ComponentRef::ready("HomeView", "home"))
///     .route("/*", ComponentRef::ready("NotFoundView", "not found"))
///     .build()
///     .unwrap();
///
/// let hit = resolve(&table, "/");
/// assert_eq!(hit.route().unwrap().component().id(), "HomeView");
///
/// let miss = resolve(&table, "/nope");
/// assert_eq!(miss.route().unwrap().component().id(), "NotFoundView");
/// ```
pub fn resolve<'a, V>(table: &'a RouteTable<V>, path: &str) -> Resolution<'a, V> {
    let normalized = normalize_path(path);
    let resolution = resolve_in(table.routes(), &normalized);

    match &resolution {
        Resolution::Matched(m) => {
            trace_log!(
                "Resolved '{}' → route #{} '{}'",
                normalized,
                m.index,
                m.route.pattern()
            );
        }
        Resolution::NotFound => {
            trace_log!("Resolved '{}' → not found", normalized);
        }
    }

    resolution
}

/// First-match scan over a slice of definitions.
pub(crate) fn resolve_in<'a, V>(routes: &'a [RouteDefinition<V>], path: &str) -> Resolution<'a, V> {
    routes
        .iter()
        .enumerate()
        .find_map(|(index, route)| {
            route.pattern().match_path(path).map(|params| RouteMatch {
                index,
                route,
                params,
            })
        })
        .map_or(Resolution::NotFound, Resolution::Matched)
}

/// Re-run the match for one known route, used when the index came from a
/// cache.
pub(crate) fn match_at<'a, V>(
    routes: &'a [RouteDefinition<V>],
    index: usize,
    path: &str,
) -> Resolution<'a, V> {
    routes
        .get(index)
        .and_then(|route| {
            route.pattern().match_path(path).map(|params| RouteMatch {
                index,
                route,
                params,
            })
        })
        .map_or(Resolution::NotFound, Resolution::Matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentRef;

    fn def(pattern: &str, id: &'static str) -> RouteDefinition<()> {
        RouteDefinition::new(pattern, ComponentRef::ready(id, ())).unwrap()
    }

    #[test]
    fn test_resolve_in_first_match_wins() {
        let routes = vec![def("/x/*", "a"), def("/*", "b"), def("/*", "c")];

        let resolution = resolve_in(&routes, "/x/y");
        assert_eq!(resolution.index(), Some(0));

        let resolution = resolve_in(&routes, "/q");
        assert_eq!(resolution.index(), Some(1));
    }

    #[test]
    fn test_resolve_in_empty_slice() {
        let routes: Vec<RouteDefinition<()>> = Vec::new();
        assert!(resolve_in(&routes, "/").is_not_found());
    }

    #[test]
    fn test_match_at_rechecks_pattern() {
        let routes = vec![def("/users/:id", "user")];
        let resolution = match_at(&routes, 0, "/users/9");
        assert_eq!(
            resolution.into_match().unwrap().params.get("id"),
            Some("9")
        );
        assert!(match_at(&routes, 0, "/teams/9").is_not_found());
        assert!(match_at(&routes, 5, "/users/9").is_not_found());
    }
}
