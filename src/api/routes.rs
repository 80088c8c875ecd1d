use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{exam, questions, solve, SharedState};

/// Assembles the application router: question-bank reads, the AI solve
/// proxy and the scoring endpoints, with CORS open the way the mobile
/// client expects.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/questions/{exam_type}", get(questions::exam_pool))
        .route(
            "/api/questions/{exam_type}/{subject}",
            get(questions::subject_pool),
        )
        .route("/api/ai/solve", post(solve::solve_problem))
        .route("/api/exam/result", post(exam::submit_result))
        .route("/api/exam/calculate-score", post(exam::calculate_score))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "StudyMate Backend çalışıyor",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
