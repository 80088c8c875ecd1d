use serde::{Deserialize, Serialize};

/// One step of a worked solution as returned by the vision model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionStep {
    pub step: u32,
    pub description: String,
    #[serde(default)]
    pub equation: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub reasoning: String,
}

/// Structured step-by-step solution for a photographed problem.
///
/// This is the JSON object shape the solve prompt asks the model for; a
/// malformed model reply is absorbed into a degraded instance of the same
/// shape instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSolution {
    pub problem: String,
    pub problem_type: String,
    pub solution: String,
    pub steps: Vec<SolutionStep>,
    pub explanation: String,
    #[serde(default)]
    pub formula: String,
    pub final_answer: String,
    #[serde(default)]
    pub verification: String,
    #[serde(default)]
    pub common_mistakes: Vec<String>,
    #[serde(default)]
    pub similar_problems: Vec<String>,
    pub confidence: f64,
}

/// Input for one solve attempt. Stored as-is in the capture cache so an
/// explicit retry can resend the exact same payload without re-capturing
/// the image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SolveRequest {
    /// A request is sendable when it carries an image or a non-blank
    /// free-text question.
    pub fn has_input(&self) -> bool {
        let has_image = self
            .image_base64
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());
        let has_text = self.question.as_deref().is_some_and(|s| !s.trim().is_empty());
        has_image || has_text
    }
}
