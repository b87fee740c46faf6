//! Test fixtures shared by the integration tests.

#![allow(dead_code)]

use route_table::*;

/// View type used across tests: the component id it was loaded from.
pub type View = &'static str;

/// Component that loads to its own id.
pub fn view(id: &'static str) -> ComponentRef<View> {
    ComponentRef::ready(id, id)
}

/// The four-route table from the resolver's reference scenarios.
pub fn scenario_table() -> RouteTable<View> {
    RouteTable::builder()
        .named("home", "/", view("home"))
        .named("about", "/about", view("about"))
        .route("/x/*", view("wildcardA"))
        .route("/*", view("wildcardB"))
        .build()
        .expect("scenario table is valid")
}

/// The application's route table, as configured for the web front-end.
pub fn app_table() -> RouteTable<View> {
    RouteTable::builder()
        .named("home", "/", view("AvatarView"))
        .named("about", "/about", view("AboutView"))
        .named("therapist", "/therapist", view("TherapistView"))
        .named(
            "therapistDashboard",
            "/therapist-dashboard",
            view("TherapistDashboardView"),
        )
        .named("transcribe", "/transcribe", view("TranscribeView"))
        .named(
            "mentalHealthScreen",
            "/mentalHealthScreen",
            view("MentalHealthScreenView"),
        )
        .named("NotFound", "/:pathMatch(.*)*", view("NotFoundView"))
        .build()
        .expect("app table is valid")
}

/// Component id selected for `path`, or `None` on not-found.
pub fn resolved_id(table: &RouteTable<View>, path: &str) -> Option<String> {
    table
        .resolve(path)
        .route()
        .map(|route| route.component().id().to_string())
}

/// Assert that `path` resolves to the component with `expected` id.
pub fn assert_resolves_to(table: &RouteTable<View>, path: &str, expected: &str) {
    assert_eq!(
        resolved_id(table, path).as_deref(),
        Some(expected),
        "path '{}' resolved to the wrong component",
        path
    );
}
