//! Per-subject structured JSON files.
//!
//! Richer question sets scoped to a single subject, e.g.
//! `ayt_matematik.json`. When such a file exists for a subject it overrides
//! the CSV pool for that subject entirely. Shape:
//!
//! ```json
//! { "questions": [ { "number": 1, "question": "...",
//!   "choices": { "A": "...", "B": "...", "C": "...", "D": "...", "E": "..." },
//!   "answer": "B" } ] }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, BankError};
use crate::models::subject::subject_slug;
use crate::models::{Difficulty, ExamType, Question};

#[derive(Debug, Deserialize)]
struct SubjectFile {
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    choices: Choices,
    answer: String,
}

#[derive(Debug, Default, Deserialize)]
struct Choices {
    #[serde(default, rename = "A")]
    a: String,
    #[serde(default, rename = "B")]
    b: String,
    #[serde(default, rename = "C")]
    c: String,
    #[serde(default, rename = "D")]
    d: String,
    #[serde(default, rename = "E")]
    e: String,
}

/// File name for a subject's structured source, e.g.
/// (`AYT`, `"Matematik"`) -> `ayt_matematik.json`.
pub fn subject_file_path(data_dir: &str, exam_type: ExamType, subject: &str) -> PathBuf {
    Path::new(data_dir).join(format!(
        "{}_{}.json",
        exam_type.name().to_lowercase(),
        subject_slug(subject)
    ))
}

fn convert(index: usize, raw: RawQuestion, subject: &str) -> Option<Question> {
    let options: Vec<String> = [
        raw.choices.a,
        raw.choices.b,
        raw.choices.c,
        raw.choices.d,
        raw.choices.e,
    ]
    .into_iter()
    .map(|o| o.trim().to_string())
    .filter(|o| !o.is_empty())
    .collect();

    let answer = raw.answer.trim().to_uppercase();
    // answer is a letter: A=0, B=1, ...
    let correct_answer = match answer.as_bytes() {
        [letter] if (b'A'..=b'E').contains(letter) => (letter - b'A') as usize,
        _ => return None,
    };

    let question = Question {
        id: format!("json_{}", index + 1),
        question: raw.question,
        options,
        correct_answer,
        explanation: format!("Doğru cevap: {}", answer),
        subject: subject.to_string(),
        difficulty: Difficulty::Medium,
        year: 2024,
    };
    question.is_valid().then_some(question)
}

/// Parses a structured subject file body into normalized questions.
pub fn parse_subject_file(body: &str, subject: &str) -> AppResult<Vec<Question>> {
    let file: SubjectFile = serde_json::from_str(body)?;
    let mut questions = Vec::new();
    for (index, raw) in file.questions.into_iter().enumerate() {
        match convert(index, raw, subject) {
            Some(question) => questions.push(question),
            None => warn!("geçersiz JSON sorusu atlandı ({} #{})", subject, index + 1),
        }
    }
    Ok(questions)
}

/// Loads a subject's structured file if present. `Ok(None)` means the
/// subject simply has no structured source, which is the common case.
pub fn load_subject_file(
    data_dir: &str,
    exam_type: ExamType,
    subject: &str,
) -> AppResult<Option<Vec<Question>>> {
    let path = subject_file_path(data_dir, exam_type, subject);
    if !path.exists() {
        return Ok(None);
    }
    debug!("JSON soru dosyası okunuyor: {}", path.display());

    let body = std::fs::read_to_string(&path).map_err(|e| {
        AppError::Bank(BankError::FileUnreadable {
            path: path.display().to_string(),
            source: Box::new(e),
        })
    })?;

    parse_subject_file(&body, subject).map(Some)
}
