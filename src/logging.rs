//! Logging macros.
//!
//! The crate never picks a logger; it emits through whichever backend
//! feature is enabled and stays silent when neither is:
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Enable at most one of the two.
//!
//! What is logged where:
//!
//! - `trace_log!`: every resolution, cache hit/miss, history push.
//! - `debug_log!`: table construction, navigation requests, cache clears.
//! - `info_log!`: navigator start-up.
//! - `warn_log!`: shadowed routes kept under `ShadowPolicy::Warn`,
//!   rejected URLs.
//! - `error_log!`: component loads that failed.
//!
//! ```ignore
//! use route_table::{trace_log, warn_log};
//!
//! trace_log!("Resolved '{}' → route #{}", path, index);
//! warn_log!("Route #{} '{}' is unreachable", index, pattern);
//! ```

/// Emit a **trace**-level message through the enabled backend.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Emit a **debug**-level message through the enabled backend.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// Emit an **info**-level message through the enabled backend.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Emit a **warn**-level message through the enabled backend.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// Emit an **error**-level message through the enabled backend.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}
