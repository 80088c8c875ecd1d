use serde::{Deserialize, Serialize};

/// Question difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lenient parse used when reading flat files; unknown values fall back
    /// to `Medium` the same way the bank files treat a missing column.
    pub fn parse_or_medium(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "kolay" => Difficulty::Easy,
            "hard" | "zor" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

/// A single multiple-choice question, normalized from whichever source it
/// came from (CSV pool or per-subject JSON file).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question: String,
    /// 2..=5 non-empty answer options.
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: usize,
    pub explanation: String,
    pub subject: String,
    pub difficulty: Difficulty,
    pub year: i32,
}

impl Question {
    /// Validates the structural invariant: at least two non-empty options and
    /// the correct-answer index within bounds. Questions that fail this are
    /// dropped at load time, never served.
    pub fn is_valid(&self) -> bool {
        self.options.len() >= 2
            && self.options.len() <= 5
            && self.options.iter().all(|o| !o.trim().is_empty())
            && self.correct_answer < self.options.len()
    }
}

/// Response envelope for the question-bank endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BankData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankData {
    pub exam_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub total_questions: usize,
    pub questions: Vec<Question>,
}
