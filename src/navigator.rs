//! Navigation glue between history, resolution and component loading.
//!
//! A [`Navigator`] owns a shared [`RouteTable`], a [`History`] and an
//! optional fallback component. Each navigation:
//!
//! 1. parses the target into a [`Location`] and records it in history
//! 2. resolves the location's path against the table
//! 3. reports the outcome as a [`NavigationResult`]
//!
//! Loading the component is a separate, asynchronous step
//! ([`load_current`](Navigator::load_current)), so resolution stays cheap
//! and synchronous.
//!
//! # Example
//!
//! ```
//! use route_table::{ComponentRef, History, Navigator, RouteTable};
//! use std::sync::Arc;
//!
//! let table = RouteTable::builder()
//!     .named("home", "/", ComponentRef::ready("HomeView", "home"))
//!     .build()
//!     .unwrap();
//!
//! let mut navigator = Navigator::new(Arc::new(table), History::default())
//!     .with_fallback(ComponentRef::ready("NotFoundView", "404"));
//!
//! assert!(navigator.navigate("/missing").is_fallback());
//! assert_eq!(pollster::block_on(navigator.load_current()).unwrap(), "404");
//! ```

#[cfg(feature = "cache")]
use crate::cache::RouteCache;
use crate::component::ComponentRef;
use crate::error::{NavigationError, NavigationResult};
use crate::history::{History, Location};
use crate::resolve::Resolution;
use crate::table::RouteTable;
use crate::{debug_log, error_log, info_log, warn_log};
use std::sync::Arc;

/// Drives navigation over one route table.
pub struct Navigator<V> {
    table: Arc<RouteTable<V>>,
    history: History,
    fallback: Option<ComponentRef<V>>,
    #[cfg(feature = "cache")]
    cache: RouteCache,
}

impl<V> Navigator<V> {
    pub fn new(table: Arc<RouteTable<V>>, history: History) -> Self {
        info_log!(
            "Navigator ready: {} routes under base '{}'",
            table.len(),
            history.base()
        );
        if !table.has_catch_all() {
            debug_log!("Route table has no catch-all route; unmatched paths use the fallback");
        }
        Self {
            table,
            history,
            fallback: None,
            #[cfg(feature = "cache")]
            cache: RouteCache::new(),
        }
    }

    /// Component shown when no route matches.
    pub fn with_fallback(mut self, fallback: ComponentRef<V>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn table(&self) -> &Arc<RouteTable<V>> {
        &self.table
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The current location.
    pub fn current(&self) -> &Location {
        self.history.current()
    }

    /// Navigate to an application path (may carry a query and fragment).
    pub fn navigate(&mut self, url: &str) -> NavigationResult {
        debug_log!("Navigating to: {}", url);
        let path = self.history.push(url).path.clone();
        self.outcome(path)
    }

    /// Like [`navigate`](Self::navigate) but replaces the current entry.
    pub fn redirect(&mut self, url: &str) -> NavigationResult {
        debug_log!("Redirecting to: {}", url);
        let path = self.history.replace(url).path.clone();
        self.outcome(path)
    }

    /// Navigate to a browser URL, stripping the history's base path first.
    pub fn open_url(&mut self, url: &str) -> NavigationResult {
        match self.history.location_from_url(url) {
            Ok(location) => self.navigate(&location.to_string()),
            Err(err) => {
                warn_log!("Rejected navigation: {}", err);
                NavigationResult::Error(err)
            }
        }
    }

    /// Go back one history entry, if possible.
    pub fn back(&mut self) -> Option<NavigationResult> {
        let path = self.history.back()?.path.clone();
        Some(self.outcome(path))
    }

    /// Go forward one history entry, if possible.
    pub fn forward(&mut self) -> Option<NavigationResult> {
        let path = self.history.forward()?.path.clone();
        Some(self.outcome(path))
    }

    /// Resolve the current location.
    pub fn resolve_current(&mut self) -> Resolution<'_, V> {
        let path = self.history.current().path.as_str();
        #[cfg(feature = "cache")]
        {
            self.cache.resolve(&self.table, path)
        }
        #[cfg(not(feature = "cache"))]
        {
            self.table.resolve(path)
        }
    }

    /// Component for the current location: the matched route's, else the
    /// fallback.
    pub fn current_component(&mut self) -> Option<ComponentRef<V>> {
        let matched = self
            .resolve_current()
            .route()
            .map(|route| route.component().clone());
        matched.or_else(|| self.fallback.clone())
    }

    /// Load the component for the current location.
    pub async fn load_current(&mut self) -> Result<V, NavigationError> {
        let Some(component) = self.current_component() else {
            return Err(NavigationError::NotFound {
                path: self.history.current().path.clone(),
            });
        };

        component.load().await.map_err(|err| {
            error_log!("{}", err);
            NavigationError::from(err)
        })
    }

    fn outcome(&mut self, path: String) -> NavigationResult {
        let matched = self.resolve_current().route().map(|route| {
            (
                route.pattern().to_string(),
                route.name().map(str::to_string),
            )
        });

        match matched {
            Some((pattern, name)) => NavigationResult::Matched {
                path,
                pattern,
                name,
            },
            None if self.fallback.is_some() => NavigationResult::Fallback { path },
            None => NavigationResult::NotFound { path },
        }
    }
}
