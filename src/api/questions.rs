use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::bank;
use crate::models::{BankData, BankResponse, ExamType};

use super::{ApiError, SharedState};

fn parse_exam_type(raw: &str) -> Result<ExamType, ApiError> {
    ExamType::parse(raw)
        .ok_or_else(|| ApiError::BadRequest(format!("Geçersiz sınav türü: {}", raw)))
}

/// `GET /api/questions/{exam_type}` — the whole CSV pool, shuffled.
pub async fn exam_pool(
    State(state): State<SharedState>,
    Path(exam_type): Path<String>,
) -> Result<Json<BankResponse>, ApiError> {
    let exam_type = parse_exam_type(&exam_type)?;

    let mut questions =
        bank::load_csv_pool(&state.config.data_dir, exam_type).map_err(|_| {
            ApiError::NotFound(format!(
                "{} soru havuzu bulunamadı veya boş. Lütfen dosyanın mevcut olduğundan emin olun.",
                exam_type
            ))
        })?;

    if questions.is_empty() {
        return Err(ApiError::NotFound(format!(
            "{} soru havuzu bulunamadı veya boş. Lütfen dosyanın mevcut olduğundan emin olun.",
            exam_type
        )));
    }

    bank::shuffle_questions_default(&mut questions);
    info!("{} havuzundan {} soru gönderildi", exam_type, questions.len());

    Ok(Json(BankResponse {
        success: true,
        data: Some(BankData {
            exam_type: exam_type.name().to_string(),
            subject: None,
            total_questions: questions.len(),
            questions,
        }),
        error: None,
    }))
}

/// `GET /api/questions/{exam_type}/{subject}` — one subject's structured
/// JSON set, shuffled; 404 when the subject has no such file.
pub async fn subject_pool(
    State(state): State<SharedState>,
    Path((exam_type, subject)): Path<(String, String)>,
) -> Result<Json<BankResponse>, ApiError> {
    let exam_type = parse_exam_type(&exam_type)?;

    let loaded = bank::load_subject_file(&state.config.data_dir, exam_type, &subject)
        .map_err(ApiError::from)?;

    let mut questions = match loaded {
        Some(questions) if !questions.is_empty() => questions,
        _ => {
            return Err(ApiError::NotFound(format!(
                "{} {} soru havuzu bulunamadı veya boş.",
                exam_type, subject
            )))
        }
    };

    bank::shuffle_questions_default(&mut questions);
    info!(
        "{} {} JSON kaynağından {} soru gönderildi",
        exam_type,
        subject,
        questions.len()
    );

    Ok(Json(BankResponse {
        success: true,
        data: Some(BankData {
            exam_type: exam_type.name().to_string(),
            subject: Some(subject),
            total_questions: questions.len(),
            questions,
        }),
        error: None,
    }))
}
