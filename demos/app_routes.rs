//! The web front-end's route table, resolved from the command line.
//!
//! Run with logging to watch resolution and shadowed-route warnings:
//!
//! ```text
//! RUST_LOG=route_table=trace cargo run --example app_routes -- /therapist /nope /app/about
//! ```

use route_table::{
    ComponentRef, History, LoadError, NavigationResult, Navigator, RouteTable, ShadowPolicy,
};
use std::sync::Arc;

/// Stand-in for a rendered page.
#[derive(Debug, Clone)]
struct Page {
    title: &'static str,
}

/// Deferred import of a view module.
fn import(module: &'static str, title: &'static str) -> ComponentRef<Page> {
    ComponentRef::lazy(module, move || async move { Ok::<_, LoadError>(Page { title }) })
}

fn build_table() -> Result<RouteTable<Page>, route_table::RouteError> {
    RouteTable::builder()
        .named("home", "/", import("AvatarView", "Avatar"))
        .named("about", "/about", import("AboutView", "About"))
        .named("therapist", "/therapist", import("TherapistView", "Therapist"))
        .named(
            "therapistDashboard",
            "/therapist-dashboard",
            import("TherapistDashboardView", "Therapist dashboard"),
        )
        .named("transcribe", "/transcribe", import("TranscribeView", "Transcribe"))
        .named(
            "mentalHealthScreen",
            "/mentalHealthScreen",
            import("MentalHealthScreenView", "Mental health screen"),
        )
        .named("NotFound", "/:pathMatch(.*)*", import("NotFoundView", "Not found"))
        .build()
}

fn main() {
    env_logger::init();

    let table = match build_table() {
        Ok(table) => table,
        Err(err) => {
            eprintln!("invalid route table: {err}");
            std::process::exit(1);
        }
    };

    // A second catch-all after the first is dead configuration; show what
    // the builder reports for it.
    let duplicate = RouteTable::builder()
        .route("/:pathMatch(.*)*", import("NotFoundView", "Not found"))
        .route("/*", import("LegacyNotFoundView", "Legacy"))
        .build();
    if let Err(err) = duplicate {
        println!("rejected: {err}");
    }
    let warned = RouteTable::builder()
        .shadow_policy(ShadowPolicy::Warn)
        .route("/:pathMatch(.*)*", import("NotFoundView", "Not found"))
        .route("/*", import("LegacyNotFoundView", "Legacy"))
        .build();
    if let Ok(table) = warned {
        for dead in table.shadowed() {
            println!(
                "kept but unreachable: #{} '{}' (covered by #{} '{}')",
                dead.index, dead.pattern, dead.shadowed_by, dead.shadowed_by_pattern
            );
        }
    }

    let mut navigator = Navigator::new(Arc::new(table), History::new("/app/"));

    let targets: Vec<String> = std::env::args().skip(1).collect();
    let targets = if targets.is_empty() {
        vec!["/".into(), "/therapist".into(), "/no/such/page".into()]
    } else {
        targets
    };

    for target in &targets {
        let result = if target == "/app" || target.starts_with("/app/") {
            navigator.open_url(target)
        } else {
            navigator.navigate(target)
        };

        match &result {
            NavigationResult::Matched { path, pattern, name } => {
                println!("{path} → {pattern} ({})", name.as_deref().unwrap_or("unnamed"));
            }
            NavigationResult::Fallback { path } | NavigationResult::NotFound { path } => {
                println!("{path} → no route");
            }
            NavigationResult::Error(err) => {
                println!("{target} → {err}");
                continue;
            }
        }

        match pollster::block_on(navigator.load_current()) {
            Ok(page) => println!("  rendered '{}'", page.title),
            Err(err) => println!("  {err}"),
        }
    }
}
