use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::models::SolveRequest;

use super::{ApiError, SharedState};

/// `POST /api/ai/solve` — proxies one captured problem to the vision model
/// and returns the structured (or degraded) solution.
pub async fn solve_problem(
    State(state): State<SharedState>,
    Json(request): Json<SolveRequest>,
) -> Result<Json<Value>, ApiError> {
    info!("AI çözümü isteniyor...");
    let solution = state.solver.solve(&request).await?;
    info!("AI çözümü başarıyla tamamlandı");

    Ok(Json(json!({
        "success": true,
        "data": solution,
    })))
}
