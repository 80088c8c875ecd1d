use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::subject::ExamType;

/// Outcome of one answered question. Created exactly once per answer and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub question_id: String,
    pub selected_answer: usize,
    pub is_correct: bool,
    /// Whole seconds between the question being shown and answered.
    pub time_spent: u64,
    pub subject: String,
}

/// Per-subject score line, derived at finish time only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectResult {
    pub correct: u32,
    pub total: u32,
    /// correct - 0.25 * wrong, floored at 0, rounded to 2 decimals.
    pub net: f64,
    /// net * subject weight, rounded to 2 decimals.
    pub score: f64,
}

impl SubjectResult {
    pub fn zero() -> Self {
        SubjectResult {
            correct: 0,
            total: 0,
            net: 0.0,
            score: 0.0,
        }
    }
}

/// One timed multi-subject exam run, from start to finalization.
///
/// The serialized shape matches the local history entries under the
/// `examSessions` storage key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSession {
    pub id: String,
    pub exam_type: ExamType,
    /// Unix millis.
    pub start_time: i64,
    /// Unix millis; set once at finalization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Total allotted time in seconds (fixed per exam type).
    pub total_time: u64,
    pub results: Vec<QuizResult>,
    pub subjects: BTreeMap<String, SubjectResult>,
    pub total_score: f64,
    pub total_net: f64,
}

impl ExamSession {
    pub fn new(exam_type: ExamType, start_time: i64) -> Self {
        ExamSession {
            id: start_time.to_string(),
            exam_type,
            start_time,
            end_time: None,
            total_time: exam_type.total_time_secs(),
            results: Vec::new(),
            subjects: BTreeMap::new(),
            total_score: 0.0,
            total_net: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_shape() {
        let session = ExamSession::new(ExamType::Tyt, 1_700_000_000_000);
        assert_eq!(session.id, "1700000000000");
        assert_eq!(session.total_time, 9900);
        assert!(session.results.is_empty());
        assert!(!session.is_finished());
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let session = ExamSession::new(ExamType::Ayt, 1);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["examType"], "AYT");
        assert_eq!(json["totalTime"], 10800);
        assert!(json.get("endTime").is_none());
        assert!(json["results"].as_array().unwrap().is_empty());
    }
}
