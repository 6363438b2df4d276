use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    controller::{
        root::hello,
        student::{create_student, get_all_students, get_student},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hello))
        .route("/api/v1/students", get(get_all_students).post(create_student))
        .route("/api/v1/students/", get(get_all_students).post(create_student))
        .route("/api/v1/students/{id}", get(get_student))
}

/// Full application: routes, permissive CORS and request tracing.
pub fn app(state: AppState) -> Router {
    router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
