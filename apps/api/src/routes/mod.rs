pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::catalog::handlers as catalog;
use crate::state::AppState;
use crate::students::handlers as students;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route("/api/v1/stats", get(catalog::handle_stats))
        .route("/api/v1/skills", get(catalog::handle_list_skills))
        .route("/api/v1/roles", get(catalog::handle_list_roles))
        .route("/api/v1/roles/:role_id/skills", get(catalog::handle_role_skills))
        // Student API
        .route("/api/v1/students", post(students::handle_create_student))
        .route("/api/v1/students/:student_id", get(students::handle_get_student))
        .route(
            "/api/v1/students/:student_id/skills",
            get(students::handle_get_skills).put(students::handle_replace_skills),
        )
        // Analysis API
        .route(
            "/api/v1/students/:student_id/analyses",
            get(students::handle_history).post(analysis::handle_analyze),
        )
        .route(
            "/api/v1/students/:student_id/roadmap",
            get(analysis::handle_roadmap),
        )
        .with_state(state)
}
