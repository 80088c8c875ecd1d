//! Statistics aggregation.
//!
//! Pure reductions over the locally persisted history: tasks, focus runs
//! and finished exam sessions in, display-ready summaries out. Empty
//! history is the normal new-user state and produces a zeroed summary,
//! never an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{ExamSession, ExamType, FocusSessionRecord, Todo};

/// Subject bucket for tasks with no course attached.
const GENERAL_BUCKET: &str = "Genel";

/// Per-subject study line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectBreakdown {
    pub subject: String,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub focus_minutes: u32,
    pub sessions: u32,
    pub hours_studied: f64,
    /// Task completion ratio as a percentage — a proxy, not a grade.
    pub avg_score: f64,
}

/// Exam-history roll-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamStatistics {
    pub total_exams: u32,
    pub avg_score: f64,
    pub best_score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    /// correct / attempted over every session, in [0, 1]
    pub accuracy: f64,
    pub exam_types: ExamTypeCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamTypeCounts {
    #[serde(rename = "TYT")]
    pub tyt: u32,
    #[serde(rename = "AYT")]
    pub ayt: u32,
}

/// Everything the statistics screen shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySummary {
    pub study_data: Vec<SubjectBreakdown>,
    pub total_hours: f64,
    pub total_sessions: u32,
    pub avg_score: f64,
    pub completed_todos: u32,
    pub total_todos: u32,
    pub active_courses: u32,
    pub exams: ExamStatistics,
}

/// One bar of the weekly focus chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFocus {
    pub day: &'static str,
    pub hours: f64,
}

#[derive(Default)]
struct SubjectAccumulator {
    completed_tasks: u32,
    total_tasks: u32,
    focus_minutes: u32,
    sessions: u32,
}

/// Folds the three history lists into one summary.
pub fn summarize(
    todos: &[Todo],
    focus_sessions: &[FocusSessionRecord],
    exam_sessions: &[ExamSession],
) -> StudySummary {
    let mut by_subject: BTreeMap<String, SubjectAccumulator> = BTreeMap::new();

    for todo in todos {
        let subject = todo
            .course_related
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(GENERAL_BUCKET);
        let entry = by_subject.entry(subject.to_string()).or_default();
        entry.total_tasks += 1;
        if todo.completed {
            entry.completed_tasks += 1;
        }
    }

    for session in focus_sessions {
        if !session.completed {
            continue;
        }
        let subject = session
            .subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(GENERAL_BUCKET);
        let entry = by_subject.entry(subject.to_string()).or_default();
        entry.focus_minutes += session.duration;
        entry.sessions += 1;
    }

    let study_data: Vec<SubjectBreakdown> = by_subject
        .into_iter()
        .map(|(subject, acc)| SubjectBreakdown {
            subject,
            completed_tasks: acc.completed_tasks,
            total_tasks: acc.total_tasks,
            focus_minutes: acc.focus_minutes,
            sessions: acc.sessions,
            hours_studied: acc.focus_minutes as f64 / 60.0,
            avg_score: if acc.total_tasks > 0 {
                acc.completed_tasks as f64 / acc.total_tasks as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    let total_hours = study_data.iter().map(|s| s.hours_studied).sum();
    let total_sessions = study_data.iter().map(|s| s.sessions).sum();
    let avg_score = if study_data.is_empty() {
        0.0
    } else {
        study_data.iter().map(|s| s.avg_score).sum::<f64>() / study_data.len() as f64
    };

    StudySummary {
        total_hours,
        total_sessions,
        avg_score,
        completed_todos: todos.iter().filter(|t| t.completed).count() as u32,
        total_todos: todos.len() as u32,
        active_courses: study_data.len() as u32,
        exams: summarize_exams(exam_sessions),
        study_data,
    }
}

fn summarize_exams(exam_sessions: &[ExamSession]) -> ExamStatistics {
    if exam_sessions.is_empty() {
        return ExamStatistics::default();
    }

    let total_exams = exam_sessions.len() as u32;
    let total_score: f64 = exam_sessions.iter().map(|s| s.total_score).sum();
    let best_score = exam_sessions
        .iter()
        .map(|s| s.total_score)
        .fold(f64::MIN, f64::max);

    let total_questions: u32 = exam_sessions.iter().map(|s| s.results.len() as u32).sum();
    let correct_answers: u32 = exam_sessions
        .iter()
        .map(|s| s.results.iter().filter(|r| r.is_correct).count() as u32)
        .sum();

    let mut exam_types = ExamTypeCounts::default();
    for session in exam_sessions {
        match session.exam_type {
            ExamType::Tyt => exam_types.tyt += 1,
            ExamType::Ayt => exam_types.ayt += 1,
        }
    }

    ExamStatistics {
        total_exams,
        avg_score: total_score / total_exams as f64,
        best_score,
        total_questions,
        correct_answers,
        accuracy: if total_questions > 0 {
            correct_answers as f64 / total_questions as f64
        } else {
            0.0
        },
        exam_types,
    }
}

/// Completed focus hours per day for the week starting at `monday`.
pub fn weekly_focus_hours(
    focus_sessions: &[FocusSessionRecord],
    monday: NaiveDate,
) -> Vec<DailyFocus> {
    const DAY_LABELS: [&str; 7] = ["Pzt", "Sal", "Çar", "Per", "Cum", "Cmt", "Paz"];

    DAY_LABELS
        .iter()
        .enumerate()
        .map(|(offset, day)| {
            let date = monday + Duration::days(offset as i64);
            let minutes: u32 = focus_sessions
                .iter()
                .filter(|s| s.completed && session_date(s) == Some(date))
                .map(|s| s.duration)
                .sum();
            DailyFocus {
                day,
                hours: minutes as f64 / 60.0,
            }
        })
        .collect()
}

fn session_date(session: &FocusSessionRecord) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(session.start_time).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, QuizResult};

    fn todo(subject: Option<&str>, completed: bool) -> Todo {
        Todo {
            id: "t".to_string(),
            title: "görev".to_string(),
            description: String::new(),
            completed,
            course_related: subject.map(String::from),
            priority: Priority::Medium,
            created_at: 0,
        }
    }

    fn focus(subject: Option<&str>, minutes: u32, completed: bool) -> FocusSessionRecord {
        FocusSessionRecord {
            id: "f".to_string(),
            subject: subject.map(String::from),
            duration: minutes,
            start_time: 1_700_000_000_000,
            end_time: Some(1_700_000_000_000 + minutes as i64 * 60_000),
            completed,
        }
    }

    fn exam(exam_type: ExamType, score: f64, correct: u32, total: u32) -> ExamSession {
        let mut session = ExamSession::new(exam_type, 0);
        session.total_score = score;
        for i in 0..total {
            session.results.push(QuizResult {
                question_id: format!("q{}", i),
                selected_answer: 0,
                is_correct: i < correct,
                time_spent: 30,
                subject: "Türkçe".to_string(),
            });
        }
        session
    }

    #[test]
    fn test_empty_history_is_a_zeroed_summary() {
        let summary = summarize(&[], &[], &[]);
        assert_eq!(summary, StudySummary::default());
        assert_eq!(summary.avg_score, 0.0);
        assert_eq!(summary.exams.accuracy, 0.0);
    }

    #[test]
    fn test_subject_grouping_with_general_fallback() {
        let todos = vec![
            todo(Some("Matematik"), true),
            todo(Some("Matematik"), false),
            todo(None, true),
            todo(Some("  "), false),
        ];
        let focus_sessions = vec![
            focus(Some("Matematik"), 50, true),
            focus(Some("Matematik"), 25, true),
            focus(None, 60, true),
            focus(Some("Fizik"), 90, false), // incomplete, ignored
        ];

        let summary = summarize(&todos, &focus_sessions, &[]);
        assert_eq!(summary.active_courses, 2); // Matematik + Genel
        assert_eq!(summary.total_todos, 4);
        assert_eq!(summary.completed_todos, 2);
        assert_eq!(summary.total_sessions, 3);
        assert!((summary.total_hours - 2.25).abs() < 1e-9);

        let matematik = summary
            .study_data
            .iter()
            .find(|s| s.subject == "Matematik")
            .unwrap();
        assert_eq!(matematik.total_tasks, 2);
        assert_eq!(matematik.focus_minutes, 75);
        assert_eq!(matematik.avg_score, 50.0);

        let general = summary
            .study_data
            .iter()
            .find(|s| s.subject == "Genel")
            .unwrap();
        assert_eq!(general.total_tasks, 2);
        assert_eq!(general.sessions, 1);
    }

    #[test]
    fn test_exam_statistics() {
        let sessions = vec![
            exam(ExamType::Tyt, 80.0, 15, 20),
            exam(ExamType::Tyt, 100.0, 18, 20),
            exam(ExamType::Ayt, 60.0, 7, 10),
        ];
        let summary = summarize(&[], &[], &sessions);
        let exams = summary.exams;

        assert_eq!(exams.total_exams, 3);
        assert_eq!(exams.avg_score, 80.0);
        assert_eq!(exams.best_score, 100.0);
        assert_eq!(exams.total_questions, 50);
        assert_eq!(exams.correct_answers, 40);
        assert!((exams.accuracy - 0.8).abs() < 1e-9);
        assert_eq!(exams.exam_types.tyt, 2);
        assert_eq!(exams.exam_types.ayt, 1);
    }

    #[test]
    fn test_weekly_focus_hours() {
        // 2023-11-13 is a Monday; the sample session above starts on
        // 2023-11-14 (Tuesday) 22:13 UTC.
        let monday = NaiveDate::from_ymd_opt(2023, 11, 13).unwrap();
        let sessions = vec![
            focus(Some("Matematik"), 90, true),
            focus(None, 30, true),
            focus(None, 120, false), // incomplete, ignored
        ];

        let weekly = weekly_focus_hours(&sessions, monday);
        assert_eq!(weekly.len(), 7);
        assert_eq!(weekly[0].hours, 0.0);
        assert_eq!(weekly[1].day, "Sal");
        assert!((weekly[1].hours - 2.0).abs() < 1e-9);
        assert!(weekly[2..].iter().all(|d| d.hours == 0.0));
    }
}
