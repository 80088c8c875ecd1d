//! YKS net/score arithmetic.
//!
//! Single source of truth for the negative-marking formula. The in-process
//! exam engine and the `/api/exam/calculate-score` endpoint both go through
//! this module and the catalog in [`crate::models::subject`], so the two
//! sides cannot drift apart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::subject::ExamType;
use crate::models::{QuizResult, SubjectResult};

/// Round half-up to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score one subject: `net = max(0, correct - 0.25 * wrong)`,
/// `score = net * weight`, both rounded to 2 decimals.
pub fn subject_result(correct: u32, total: u32, weight: f64) -> SubjectResult {
    let wrong = total.saturating_sub(correct);
    let net = (correct as f64 - 0.25 * wrong as f64).max(0.0);
    SubjectResult {
        correct,
        total,
        net: round2(net),
        score: round2(net * weight),
    }
}

/// AYT track sums derived from subject scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaScores {
    pub sayisal: f64,
    pub sozel: f64,
    pub esit_agirlik: f64,
}

/// Full score breakdown for one exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub total_net: f64,
    pub total_score: f64,
    pub subjects: BTreeMap<String, SubjectResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_scores: Option<AreaScores>,
    pub exam_type: ExamType,
}

/// Raw per-subject tallies, for callers that only track counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubjectTally {
    pub correct: u32,
    pub total: u32,
}

/// Compute the breakdown from per-subject counts. Subjects the caller did
/// not report are present with all-zero results, never omitted.
///
/// Returns `None` for a subject name outside the exam's catalog.
pub fn score_from_tallies(
    exam_type: ExamType,
    tallies: &BTreeMap<String, SubjectTally>,
) -> Option<ScoreBreakdown> {
    for name in tallies.keys() {
        exam_type.subject_spec(name)?;
    }

    let mut subjects = BTreeMap::new();
    let mut total_net = 0.0;
    let mut total_score = 0.0;

    for name in exam_type.subjects() {
        let spec = exam_type
            .subject_spec(name)
            .expect("catalog subject must have a spec");
        let result = match tallies.get(*name) {
            Some(tally) => subject_result(tally.correct, tally.total, spec.weight),
            None => SubjectResult::zero(),
        };
        total_net += result.net;
        total_score += result.score;
        subjects.insert(name.to_string(), result);
    }

    let area_scores = match exam_type {
        ExamType::Ayt => Some(ayt_area_scores(&subjects)),
        ExamType::Tyt => None,
    };

    Some(ScoreBreakdown {
        total_net: round2(total_net),
        total_score: round2(total_score),
        subjects,
        area_scores,
        exam_type,
    })
}

/// Compute the breakdown by grouping answered-question results by subject.
pub fn score_results(exam_type: ExamType, results: &[QuizResult]) -> ScoreBreakdown {
    let mut tallies: BTreeMap<String, SubjectTally> = BTreeMap::new();
    for result in results {
        let tally = tallies
            .entry(result.subject.clone())
            .or_insert(SubjectTally {
                correct: 0,
                total: 0,
            });
        tally.total += 1;
        if result.is_correct {
            tally.correct += 1;
        }
    }
    // Results only ever carry catalog subject names, so this cannot fail.
    tallies.retain(|name, _| exam_type.subject_spec(name).is_some());
    score_from_tallies(exam_type, &tallies).expect("tallies filtered to catalog subjects")
}

fn ayt_area_scores(subjects: &BTreeMap<String, SubjectResult>) -> AreaScores {
    let score_of = |name: &str| subjects.get(name).map(|s| s.score).unwrap_or(0.0);
    let matematik = score_of("Matematik");
    let fen = score_of("Fen Bilimleri");
    let edebiyat = score_of("Türk Dili ve Edebiyatı-Sosyal Bilimler I");
    let sosyal = score_of("Sosyal Bilimler II");
    AreaScores {
        sayisal: round2(matematik + fen),
        sozel: round2(edebiyat + sosyal),
        esit_agirlik: round2(matematik + edebiyat),
    }
}
