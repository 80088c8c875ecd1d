use std::collections::BTreeMap;

use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::models::{ExamSession, ExamType};
use crate::scoring::{self, SubjectTally};

use super::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultRequest {
    pub exam_session: Option<ExamSession>,
}

/// `POST /api/exam/result` — acknowledgement only. The client already
/// persisted the session locally; the backend keeps nothing.
pub async fn submit_result(
    Json(request): Json<SubmitResultRequest>,
) -> Result<Json<Value>, ApiError> {
    let session = request
        .exam_session
        .ok_or_else(|| ApiError::BadRequest("Sınav oturumu verisi gerekli".to_string()))?;

    info!(
        "sınav sonucu alındı: {} ({}, {} cevap)",
        session.id,
        session.exam_type,
        session.results.len()
    );

    Ok(Json(json!({
        "success": true,
        "message": "Sınav sonucu başarıyla kaydedildi",
        "sessionId": session.id,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateScoreRequest {
    pub exam_type: String,
    pub subjects: BTreeMap<String, SubjectTally>,
}

/// `POST /api/exam/calculate-score` — recomputes net/score for a client
/// that only has raw per-subject counts. Goes through the same scoring
/// module and subject catalog as the in-process engine, so both sides
/// always agree to the cent.
pub async fn calculate_score(
    Json(request): Json<CalculateScoreRequest>,
) -> Result<Json<Value>, ApiError> {
    let exam_type = ExamType::parse(&request.exam_type).ok_or_else(|| {
        ApiError::BadRequest(format!("Geçersiz sınav türü: {}", request.exam_type))
    })?;

    let breakdown = scoring::score_from_tallies(exam_type, &request.subjects)
        .ok_or_else(|| ApiError::BadRequest("Bilinmeyen ders adı".to_string()))?;

    info!("puanlama hesaplaması tamamlandı ({})", exam_type);

    Ok(Json(json!({
        "success": true,
        "data": breakdown,
    })))
}
