//! Immutable route tables and their validating builder.
//!
//! A [`RouteTable`] is built once, at startup, and never mutated. The
//! [`RouteTableBuilder`] is the only way to create one; while building it
//! checks every route against the routes declared before it:
//!
//! - a pattern that fails to compile is a [`RouteError::Pattern`]
//! - a name used twice is a [`RouteError::DuplicateName`]
//! - a route whose every path is already matched by earlier routes, alone
//!   or together, is *shadowed* and handled according to the
//!   [`ShadowPolicy`]
//!
//! ```
//! use route_table::{ComponentRef, RouteError, RouteTable};
//!
//! let result = RouteTable::builder()
//!     .route("/", ComponentRef::ready("HomeView", ()))
//!     .route("/*", ComponentRef::ready("NotFoundView", ()))
//!     .route("/*", ComponentRef::ready("NotFoundView", ()))
//!     .build();
//!
//! assert!(matches!(result, Err(RouteError::Unreachable { index: 2, .. })));
//! ```

use crate::component::ComponentRef;
use crate::error::RouteError;
use crate::params::RouteParams;
use crate::pattern::RoutePattern;
use crate::resolve::{resolve, Resolution};
use crate::route::RouteDefinition;
use crate::{debug_log, warn_log};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// What the builder does with a route that can never be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowPolicy {
    /// Fail [`RouteTableBuilder::build`] with [`RouteError::Unreachable`]
    #[default]
    Reject,
    /// Keep the route, log a warning and record a [`ShadowedRoute`]
    Warn,
}

/// A route kept under [`ShadowPolicy::Warn`] that resolution will never
/// select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedRoute {
    /// Declaration index of the dead route
    pub index: usize,
    /// Its pattern
    pub pattern: String,
    /// Index of the earlier route that completes its coverage
    pub shadowed_by: usize,
    /// Pattern of that earlier route
    pub shadowed_by_pattern: String,
}

/// An ordered, immutable list of routes.
///
/// Order is significant: [`resolve`](Self::resolve) returns the first
/// route whose pattern matches.
pub struct RouteTable<V> {
    id: u64,
    routes: Vec<RouteDefinition<V>>,
    names: HashMap<String, usize>,
    shadowed: Vec<ShadowedRoute>,
}

impl<V> RouteTable<V> {
    /// Start building a table.
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder::new()
    }

    /// Resolve a path; see [`resolve`](crate::resolve()).
    pub fn resolve(&self, path: &str) -> Resolution<'_, V> {
        resolve(self, path)
    }

    /// All routes in declaration order.
    pub fn routes(&self) -> &[RouteDefinition<V>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always `false` for a built table; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&RouteDefinition<V>> {
        self.names.get(name).map(|&index| &self.routes[index])
    }

    /// Build a path for a named route.
    ///
    /// ```
    /// use route_table::{ComponentRef, RouteParams, RouteTable};
    ///
    /// let table = RouteTable::builder()
    ///     .named("user", "/users/:id", ComponentRef::ready("UserView", ()))
    ///     .build()
    ///     .unwrap();
    ///
    /// let params = RouteParams::new().with("id", "42");
    /// assert_eq!(table.url_for("user", &params).unwrap(), "/users/42");
    /// ```
    pub fn url_for(&self, name: &str, params: &RouteParams) -> Result<String, RouteError> {
        let route = self.get(name).ok_or_else(|| RouteError::UnknownName {
            name: name.to_string(),
        })?;

        route
            .pattern()
            .to_path(params)
            .map_err(|param| RouteError::MissingParam {
                route: name.to_string(),
                param: param.to_string(),
            })
    }

    /// Routes kept despite being unreachable (only under
    /// [`ShadowPolicy::Warn`]).
    pub fn shadowed(&self) -> &[ShadowedRoute] {
        &self.shadowed
    }

    /// Whether some route matches every possible path, so resolution can
    /// never return [`Resolution::NotFound`].
    pub fn has_catch_all(&self) -> bool {
        self.routes
            .iter()
            .any(|route| route.pattern().matches_everything())
    }

    /// Process-unique identity of this table, used to detect a cache being
    /// shared between tables.
    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl<V> fmt::Debug for RouteTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .field("shadowed", &self.shadowed)
            .finish()
    }
}

/// Builder for [`RouteTable`].
///
/// Chained calls record the first error and ignore the rest;
/// [`build`](Self::build) reports it.
pub struct RouteTableBuilder<V> {
    routes: Vec<RouteDefinition<V>>,
    policy: ShadowPolicy,
    error: Option<RouteError>,
}

impl<V> RouteTableBuilder<V> {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            policy: ShadowPolicy::default(),
            error: None,
        }
    }

    /// Choose how unreachable routes are handled. Applies to all routes,
    /// including those added before this call.
    pub fn shadow_policy(mut self, policy: ShadowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add an unnamed route.
    pub fn route(self, pattern: &str, component: ComponentRef<V>) -> Self {
        let definition = RouteDefinition::new(pattern, component);
        self.push(definition.map_err(RouteError::from))
    }

    /// Add a named route.
    pub fn named(
        self,
        name: impl Into<String>,
        pattern: &str,
        component: ComponentRef<V>,
    ) -> Self {
        let definition = RouteDefinition::new(pattern, component).map(|d| d.with_name(name));
        self.push(definition.map_err(RouteError::from))
    }

    /// Add a prepared definition.
    pub fn define(self, definition: RouteDefinition<V>) -> Self {
        self.push(Ok(definition))
    }

    fn push(mut self, definition: Result<RouteDefinition<V>, RouteError>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match definition {
            Ok(definition) => self.routes.push(definition),
            Err(err) => self.error = Some(err),
        }
        self
    }

    /// Validate the routes and freeze them into a table.
    pub fn build(self) -> Result<RouteTable<V>, RouteError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.routes.is_empty() {
            return Err(RouteError::EmptyTable);
        }

        let mut names = HashMap::new();
        let mut shadowed = Vec::new();

        for (index, route) in self.routes.iter().enumerate() {
            if let Some(name) = route.name() {
                if names.insert(name.to_string(), index).is_some() {
                    return Err(RouteError::DuplicateName {
                        name: name.to_string(),
                    });
                }
            }

            let covering = covering_route(&self.routes[..index], route);

            if let Some(earlier) = covering {
                let dead = ShadowedRoute {
                    index,
                    pattern: route.pattern().to_string(),
                    shadowed_by: earlier,
                    shadowed_by_pattern: self.routes[earlier].pattern().to_string(),
                };

                match self.policy {
                    ShadowPolicy::Reject => {
                        return Err(RouteError::Unreachable {
                            pattern: dead.pattern,
                            index: dead.index,
                            shadowed_by: dead.shadowed_by_pattern,
                            shadowed_by_index: dead.shadowed_by,
                        });
                    }
                    ShadowPolicy::Warn => {
                        warn_log!(
                            "Route #{} '{}' is unreachable: every path it matches is taken by route #{} '{}' or earlier",
                            dead.index,
                            dead.pattern,
                            dead.shadowed_by,
                            dead.shadowed_by_pattern
                        );
                        shadowed.push(dead);
                    }
                }
            }
        }

        debug_log!(
            "Built route table with {} routes ({} shadowed)",
            self.routes.len(),
            shadowed.len()
        );

        Ok(RouteTable {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            routes: self.routes,
            names,
            shadowed,
        })
    }
}

/// Index of the earlier route that makes `route` unreachable: the first
/// one that, together with everything declared before it, matches every
/// path `route` matches.
fn covering_route<V>(earlier: &[RouteDefinition<V>], route: &RouteDefinition<V>) -> Option<usize> {
    let patterns: Vec<&RoutePattern> = earlier.iter().map(RouteDefinition::pattern).collect();
    if !route.pattern().is_covered_by(&patterns) {
        return None;
    }
    (0..patterns.len()).find(|&last| route.pattern().is_covered_by(&patterns[..=last]))
}

impl<V> Default for RouteTableBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
