//! CSV question pool.
//!
//! One file per exam type (`TYT_questions.csv`, `AYT_questions.csv`) holding
//! all subjects' questions in a single unordered pool. Columns:
//! `id,question,A,B,C,D,E,answer,explanation,subject,difficulty,year` with
//! `answer` as a 1-based option number. Rows that break the question
//! invariant are dropped with a warning instead of poisoning the pool.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, BankError};
use crate::models::{Difficulty, ExamType, Question};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    question: String,
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
    #[serde(default)]
    answer: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    year: String,
}

impl CsvRow {
    fn into_question(self) -> Option<Question> {
        let options: Vec<String> = [self.a, self.b, self.c, self.d, self.e]
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        // answer column is 1-based
        let correct_answer = self.answer.trim().parse::<usize>().ok()?.checked_sub(1)?;

        let question = Question {
            id: self.id,
            question: self.question,
            options,
            correct_answer,
            explanation: self.explanation,
            subject: self.subject,
            difficulty: Difficulty::parse_or_medium(&self.difficulty),
            year: self.year.trim().parse().unwrap_or(2024),
        };
        question.is_valid().then_some(question)
    }
}

/// Parses the CSV pool from any reader. Malformed rows are skipped, not
/// fatal.
pub fn parse_csv_pool(reader: impl Read) -> AppResult<Vec<Question>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut questions = Vec::new();
    for (index, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        match record {
            Ok(row) => {
                let id = row.id.clone();
                match row.into_question() {
                    Some(question) => questions.push(question),
                    None => warn!("geçersiz soru satırı atlandı (satır {}, id: {})", index + 2, id),
                }
            }
            Err(e) => warn!("CSV satırı çözümlenemedi (satır {}): {}", index + 2, e),
        }
    }
    Ok(questions)
}

/// Loads the exam type's whole CSV pool from `data_dir`.
pub fn load_csv_pool(data_dir: &str, exam_type: ExamType) -> AppResult<Vec<Question>> {
    let path = Path::new(data_dir).join(format!("{}_questions.csv", exam_type.name()));
    debug!("CSV soru havuzu okunuyor: {}", path.display());

    let file = std::fs::File::open(&path).map_err(|e| {
        AppError::Bank(BankError::FileUnreadable {
            path: path.display().to_string(),
            source: Box::new(e),
        })
    })?;

    parse_csv_pool(file)
}
