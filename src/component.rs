//! Lazily loadable component references.
//!
//! Each route points at a [`ComponentRef`]: an identifier plus an
//! asynchronous factory. Resolution only hands the reference out; the
//! factory runs when the caller awaits [`ComponentRef::load`], after a
//! successful match. The crate does not depend on an async runtime, so any
//! executor can drive the returned future.
//!
//! # Example
//!
//! ```
//! use route_table::{ComponentRef, LoadError};
//!
//! let about: ComponentRef<&'static str> =
//!     ComponentRef::lazy("AboutView", || async { Ok::<_, LoadError>("about page") });
//!
//! let view = pollster::block_on(about.load()).unwrap();
//! assert_eq!(view, "about page");
//! ```

use crate::error::LoadError;
use crate::trace_log;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by a component factory.
pub type LoadFuture<V> = Pin<Box<dyn Future<Output = Result<V, LoadError>> + Send + 'static>>;

type Loader<V> = Arc<dyn Fn() -> LoadFuture<V> + Send + Sync>;

/// Opaque handle to a loadable view of type `V`.
///
/// Cloning is cheap; clones share the same factory.
pub struct ComponentRef<V> {
    id: Arc<str>,
    loader: Loader<V>,
}

impl<V: 'static> ComponentRef<V> {
    /// Reference a component produced by an async factory.
    ///
    /// The factory is called once per [`load`](Self::load).
    pub fn lazy<F, Fut>(id: impl Into<Arc<str>>, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, LoadError>> + Send + 'static,
    {
        Self {
            id: id.into(),
            loader: Arc::new(move || Box::pin(factory()) as LoadFuture<V>),
        }
    }

    /// Reference a component that is already available.
    pub fn ready(id: impl Into<Arc<str>>, value: V) -> Self
    where
        V: Clone + Send + Sync,
    {
        Self::lazy(id, move || {
            let value = value.clone();
            async move { Ok(value) }
        })
    }

    /// Reference a component whose factory always fails.
    ///
    /// Handy as a placeholder while a view is not yet implemented.
    pub fn unavailable(id: impl Into<Arc<str>>, reason: impl Into<String>) -> Self {
        let id: Arc<str> = id.into();
        let reason = reason.into();
        let err_id = Arc::clone(&id);
        Self {
            id,
            loader: Arc::new(move || {
                let err = LoadError::new(&*err_id, reason.as_str());
                Box::pin(async move { Err::<V, LoadError>(err) }) as LoadFuture<V>
            }),
        }
    }
}

impl<V> ComponentRef<V> {
    /// Component identifier, e.g. the view module name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Start loading the component.
    pub fn load(&self) -> LoadFuture<V> {
        trace_log!("Loading component '{}'", self.id);
        (self.loader)()
    }
}

impl<V> Clone for ComponentRef<V> {
    fn clone(&self) -> Self {
        Self {
            id: Arc::clone(&self.id),
            loader: Arc::clone(&self.loader),
        }
    }
}

impl<V> fmt::Debug for ComponentRef<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRef").field("id", &self.id).finish()
    }
}
