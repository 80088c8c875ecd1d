//! AI solve service.
//!
//! Packages one captured problem (photo and/or free text) into a single
//! vision-completion request and unwraps the structured step-by-step answer.
//!
//! ## Stack
//! - `async-openai` against any OpenAI-compatible endpoint
//! - fixed Turkish prompt asking for a specific JSON object
//! - a reply that fails to parse degrades into a usable solution instead of
//!   an error; only transport-level failures surface as errors

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageDetail, ImageUrl,
    },
    Client,
};
use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, SolveError};
use crate::models::{ProblemSolution, SolutionStep, SolveRequest};

/// AI solve service.
///
/// One outstanding request per solve attempt; queuing and resubmission
/// guards are the caller's job, the service itself is stateless.
pub struct SolveService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl SolveService {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    /// Solves one captured problem.
    ///
    /// Sends exactly one request. Errors are limited to missing input
    /// (caught locally, no network call) and transport failures; a
    /// malformed model reply still produces a `ProblemSolution`.
    pub async fn solve(&self, request: &SolveRequest) -> AppResult<ProblemSolution> {
        if !request.has_input() {
            return Err(AppError::Solve(SolveError::MissingInput));
        }

        let subject = request.subject.as_deref().unwrap_or("Genel");
        let prompt = build_solve_prompt(request);
        debug!("AI çözümü isteniyor (model: {}, ders: {})", self.model_name, subject);

        let mut content_parts: Vec<ChatCompletionRequestUserMessageContentPart> = Vec::new();
        content_parts.push(ChatCompletionRequestUserMessageContentPart::Text(
            ChatCompletionRequestMessageContentPartText { text: prompt },
        ));
        if let Some(image) = request.image_base64.as_deref().filter(|s| !s.trim().is_empty()) {
            content_parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(
                ChatCompletionRequestMessageContentPartImage {
                    image_url: ImageUrl {
                        url: format!("data:image/jpeg;base64,{}", image),
                        detail: Some(ImageDetail::Auto),
                    },
                },
            ));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
            .build()
            .map_err(|e| AppError::solve_failed(&self.model_name, e))?;

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(0.3)
            .max_tokens(2000u32)
            .build()
            .map_err(|e| AppError::solve_failed(&self.model_name, e))?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            warn!("AI isteği başarısız: {}", e);
            AppError::solve_failed(&self.model_name, e)
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AppError::Solve(SolveError::EmptyResponse {
                    model: self.model_name.clone(),
                })
            })?;

        debug!("AI yanıtı alındı ({} karakter)", content.len());
        Ok(parse_solution(&content, subject))
    }
}

/// Fixed Turkish prompt asking for the structured JSON object; the optional
/// free-text question is appended when present.
fn build_solve_prompt(request: &SolveRequest) -> String {
    let subject = request.subject.as_deref().unwrap_or("Genel");
    let difficulty = request.difficulty.as_deref().unwrap_or("orta");

    let mut prompt = format!(
        r#"Bu bir {subject} sorusudur. {difficulty} seviyesinde.
Lütfen bu soruyu Türkçe olarak çözün ve aşağıdaki formatta yanıtlayın:

{{
  "problem": "Soru metni",
  "problemType": "Soru tipi",
  "solution": "Genel çözüm açıklaması",
  "steps": [
    {{
      "step": 1,
      "description": "Adım açıklaması",
      "equation": "Matematiksel ifade (varsa)",
      "result": "Ara sonuç",
      "reasoning": "Mantık açıklaması"
    }}
  ],
  "explanation": "Detaylı açıklama",
  "formula": "Kullanılan formül (varsa)",
  "finalAnswer": "Final cevap",
  "verification": "Doğrulama",
  "commonMistakes": ["Yaygın hata 1", "Yaygın hata 2"],
  "similarProblems": ["Benzer problem 1", "Benzer problem 2"],
  "confidence": 0.95
}}"#
    );

    if let Some(question) = request.question.as_deref().filter(|q| !q.trim().is_empty()) {
        prompt.push_str("\n\nSoru metni: ");
        prompt.push_str(question.trim());
    }
    prompt
}

/// Parses the model reply into a [`ProblemSolution`].
///
/// Tries the raw body, then a fenced ```json block, then the outermost
/// brace span. Anything else becomes the degraded fallback so the user
/// always gets a solution screen.
fn parse_solution(raw: &str, subject: &str) -> ProblemSolution {
    let trimmed = raw.trim();

    if let Ok(solution) = serde_json::from_str::<ProblemSolution>(trimmed) {
        return solution;
    }

    let fence = Regex::new(r"(?s)```(?:json)?\s*(\{.*\})\s*```").expect("static regex");
    if let Some(captures) = fence.captures(trimmed) {
        if let Ok(solution) = serde_json::from_str::<ProblemSolution>(&captures[1]) {
            return solution;
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(solution) = serde_json::from_str::<ProblemSolution>(&trimmed[start..=end]) {
                return solution;
            }
        }
    }

    warn!("AI yanıtı beklenen JSON biçiminde değil, ham metinle devam ediliyor");
    degraded_solution(raw, subject)
}

/// Fallback shape when the model ignored the JSON instructions: the raw
/// text is surfaced as the solution with a single placeholder step and a
/// lowered confidence.
fn degraded_solution(raw: &str, subject: &str) -> ProblemSolution {
    ProblemSolution {
        problem: "Soru analiz edildi".to_string(),
        problem_type: subject.to_string(),
        solution: raw.to_string(),
        steps: vec![SolutionStep {
            step: 1,
            description: "AI çözümü".to_string(),
            equation: String::new(),
            result: String::new(),
            reasoning: raw.to_string(),
        }],
        explanation: raw.to_string(),
        formula: String::new(),
        final_answer: "AI tarafından çözüldü".to_string(),
        verification: "AI doğrulaması".to_string(),
        common_mistakes: vec!["AI analizi".to_string()],
        similar_problems: vec!["AI önerisi".to_string()],
        confidence: 0.8,
    }
}
