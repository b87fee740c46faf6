//! Route definitions: a pattern, an optional name and a component.

use crate::component::ComponentRef;
use crate::error::PatternError;
use crate::pattern::RoutePattern;
use std::fmt;

/// One entry of a [`RouteTable`](crate::RouteTable).
///
/// # Example
///
/// ```
/// use route_table::{ComponentRef, RouteDefinition};
///
/// let about = RouteDefinition::new("/about", ComponentRef::ready("AboutView", ()))
///     .unwrap()
///     .with_name("about");
///
/// assert_eq!(about.pattern().as_str(), "/about");
/// assert_eq!(about.name(), Some("about"));
/// assert_eq!(about.component().id(), "AboutView");
/// ```
pub struct RouteDefinition<V> {
    pattern: RoutePattern,
    name: Option<String>,
    component: ComponentRef<V>,
}

impl<V> RouteDefinition<V> {
    /// Compile `pattern` and pair it with a component.
    pub fn new(pattern: &str, component: ComponentRef<V>) -> Result<Self, PatternError> {
        Ok(Self::from_pattern(RoutePattern::parse(pattern)?, component))
    }

    /// Build from an already compiled pattern.
    pub fn from_pattern(pattern: RoutePattern, component: ComponentRef<V>) -> Self {
        Self {
            pattern,
            name: None,
            component,
        }
    }

    /// Attach a name used for lookups and reverse routing.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn component(&self) -> &ComponentRef<V> {
        &self.component
    }
}

impl<V> Clone for RouteDefinition<V> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            name: self.name.clone(),
            component: self.component.clone(),
        }
    }
}

impl<V> fmt::Debug for RouteDefinition<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("pattern", &self.pattern.as_str())
            .field("name", &self.name)
            .field("component", &self.component.id())
            .finish()
    }
}
