//! Navigator end-to-end: history, base paths, fallback and lazy loading.

mod common;

use common::*;
use route_table::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn app_navigator() -> Navigator<View> {
    Navigator::new(Arc::new(app_table()), History::new("/app/"))
}

#[test]
fn test_browser_url_to_component() {
    let mut nav = app_navigator();

    let result = nav.open_url("/app/transcribe?lang=en#top");
    assert_eq!(result.route_name(), Some("transcribe"));
    assert_eq!(nav.current().query.get("lang"), Some("en"));
    assert_eq!(nav.current().fragment.as_deref(), Some("top"));
    assert_eq!(nav.history().href(nav.current()), "/app/transcribe?lang=en#top");

    let view = pollster::block_on(nav.load_current()).unwrap();
    assert_eq!(view, "TranscribeView");
}

#[test]
fn test_unknown_path_uses_catch_all_route_not_fallback() {
    let mut nav = app_navigator().with_fallback(view("UnusedFallback"));

    let result = nav.navigate("/does/not/exist");
    assert!(result.is_matched());
    assert_eq!(result.route_name(), Some("NotFound"));
    assert_eq!(pollster::block_on(nav.load_current()), Ok("NotFoundView"));
}

#[test]
fn test_fallback_used_when_table_has_no_catch_all() {
    let table = RouteTable::builder()
        .route("/", view("home"))
        .build()
        .unwrap();
    let mut nav = Navigator::new(Arc::new(table), History::default())
        .with_fallback(view("Fallback"));

    assert_eq!(
        nav.navigate("/elsewhere"),
        NavigationResult::Fallback {
            path: "/elsewhere".to_string()
        }
    );
    assert_eq!(pollster::block_on(nav.load_current()), Ok("Fallback"));
}

#[test]
fn test_history_walk_re_resolves() {
    let mut nav = app_navigator();
    nav.navigate("/about");
    nav.navigate("/therapist");

    assert_eq!(nav.back().and_then(|r| r.route_name().map(str::to_string)).as_deref(), Some("about"));
    assert_eq!(nav.back().and_then(|r| r.route_name().map(str::to_string)).as_deref(), Some("home"));
    assert!(nav.back().is_none());
}

#[test]
fn test_only_matched_component_is_loaded() {
    let home_loads = Arc::new(AtomicUsize::new(0));
    let about_loads = Arc::new(AtomicUsize::new(0));

    let counted = |id: &'static str, counter: &Arc<AtomicUsize>| {
        let counter = Arc::clone(counter);
        ComponentRef::lazy(id, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok(id) }
        })
    };

    let table = RouteTable::builder()
        .route("/", counted("home", &home_loads))
        .route("/about", counted("about", &about_loads))
        .build()
        .unwrap();
    let mut nav = Navigator::new(Arc::new(table), History::default());

    nav.navigate("/about");
    nav.navigate("/");
    nav.navigate("/about");
    assert_eq!(home_loads.load(Ordering::SeqCst), 0);
    assert_eq!(about_loads.load(Ordering::SeqCst), 0);

    assert_eq!(pollster::block_on(nav.load_current()), Ok("about"));
    assert_eq!(home_loads.load(Ordering::SeqCst), 0);
    assert_eq!(about_loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_deferred_load_on_runtime() {
    let table = RouteTable::builder()
        .route(
            "/slow",
            ComponentRef::lazy("SlowView", || async {
                tokio::task::yield_now().await;
                Ok::<_, LoadError>("slow")
            }),
        )
        .build()
        .unwrap();
    let mut nav = Navigator::new(Arc::new(table), History::default());

    nav.navigate("/slow");
    assert_eq!(nav.load_current().await, Ok("slow"));
}

#[test]
fn test_outside_base_is_an_error() {
    let mut nav = app_navigator();
    let result = nav.open_url("/admin");
    assert!(result.is_error());
    assert_eq!(
        result,
        NavigationResult::Error(NavigationError::OutsideBase {
            url: "/admin".to_string(),
            base: "/app".to_string(),
        })
    );
    assert_eq!(nav.current().path, "/");
}
