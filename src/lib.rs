//! Ordered client-side route tables with first-match resolution.
//!
//! A [`RouteTable`] maps URL paths to lazily loaded views. Routes are
//! checked in declaration order and the first match wins, with catch-all
//! patterns acting as fallbacks for anything not matched earlier.
//!
//! ```
//! use route_table::{ComponentRef, RouteTable};
//!
//! let table = RouteTable::builder()
//!     .named("home", "/", ComponentRef::ready("HomeView", "home"))
//!     .named("about", "/about", ComponentRef::ready("AboutView", "about"))
//!     .named("not-found", "/:pathMatch(.*)*", ComponentRef::ready("NotFoundView", "404"))
//!     .build()
//!     .unwrap();
//!
//! let resolution = table.resolve("/no/such/page");
//! let matched = resolution.into_match().unwrap();
//! assert_eq!(matched.route.name(), Some("not-found"));
//! assert_eq!(matched.params.get("pathMatch"), Some("no/such/page"));
//! ```
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`pattern`] | pattern syntax, matching, shadow detection |
//! | [`table`] | validated table construction |
//! | [`resolve`](mod@resolve) | first-match resolution |
//! | [`component`] | lazy component references |
//! | [`cache`] | LRU resolution cache (feature `cache`) |
//! | [`history`] | base paths, query strings, back/forward |
//! | [`navigator`] | history + resolution + loading |
//!
//! # Feature flags
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `log` | yes | log through the `log` crate |
//! | `tracing` | no | log through the `tracing` crate |
//! | `cache` | yes | [`Navigator`] memoizes resolutions with an LRU cache |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod logging;

#[cfg(feature = "cache")]
#[cfg_attr(docsrs, doc(cfg(feature = "cache")))]
pub mod cache;
pub mod component;
pub mod error;
pub mod history;
pub mod navigator;
pub mod params;
pub mod pattern;
pub mod resolve;
pub mod route;
pub mod table;

pub use component::{ComponentRef, LoadFuture};
pub use error::{LoadError, NavigationError, NavigationResult, PatternError, RouteError};
pub use history::{History, Location};
pub use navigator::Navigator;
pub use params::{QueryParams, RouteParams};
pub use pattern::{normalize_path, RoutePattern};
pub use resolve::{resolve, Resolution, RouteMatch};
pub use route::RouteDefinition;
pub use table::{RouteTable, RouteTableBuilder, ShadowPolicy, ShadowedRoute};
