//! Exam session flow.
//!
//! Owns the timed, multi-subject exam lifecycle: one question shown at a
//! time, per-question answer capture with latency, free subject navigation,
//! a one-second countdown driven by an external scheduler, and scoring at
//! finish time.
//!
//! State machine: `NotStarted → InProgress → Completed`. There is no paused
//! state; the focus timer is a separate, simpler flow and never touches an
//! exam session.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{info, warn};

use crate::error::EngineError;
use crate::models::{ExamSession, ExamType, Question, QuizResult};
use crate::scoring;
use crate::storage::HistoryLog;

/// Exam lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamState {
    NotStarted,
    InProgress,
    Completed,
}

/// What a successful `advance()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Next question within the same subject
    NextQuestion,
    /// First question of the next subject in exam order
    NextSubject,
    /// All subjects exhausted; the session is now complete
    Finished,
}

/// Outcome of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Seconds remaining
    Running(u64),
    /// The countdown hit zero and the session was force-finished
    Expired,
}

/// The exam session engine.
///
/// Single-owner, single-session: all mutation goes through `&mut self`, and
/// the recurring `tick()` is expected to be driven by one external
/// scheduler. Out-of-order calls are rejected with [`EngineError`], never
/// silently ignored.
#[derive(Debug)]
pub struct ExamEngine {
    exam_type: ExamType,
    pools: HashMap<String, Vec<Question>>,
    session: ExamSession,
    state: ExamState,
    /// Index into `exam_type.subjects()`.
    current_subject: usize,
    question_index: usize,
    remaining_secs: u64,
    answered_current: bool,
    question_shown_at: Instant,
    persisted: bool,
}

impl ExamEngine {
    /// Creates a not-yet-started session over loaded subject pools.
    ///
    /// Fails with [`EngineError::EmptyBank`] when every pool is empty — the
    /// loader signals unreachable sources earlier, this guards the "reachable
    /// but nothing usable" case.
    pub fn new(
        exam_type: ExamType,
        pools: HashMap<String, Vec<Question>>,
    ) -> Result<Self, EngineError> {
        if pools.values().all(|pool| pool.is_empty()) {
            return Err(EngineError::EmptyBank);
        }

        Ok(Self {
            exam_type,
            pools,
            session: ExamSession::new(exam_type, 0),
            state: ExamState::NotStarted,
            current_subject: 0,
            question_index: 0,
            remaining_secs: exam_type.total_time_secs(),
            answered_current: false,
            question_shown_at: Instant::now(),
            persisted: false,
        })
    }

    /// Starts the exam: stamps the start time and shows the first question
    /// of the first subject (in fixed exam order) that has any questions.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state != ExamState::NotStarted {
            return Err(EngineError::NotInProgress);
        }

        self.session = ExamSession::new(self.exam_type, chrono::Utc::now().timestamp_millis());
        self.current_subject = self
            .first_nonempty_subject(0)
            .expect("constructor guarantees a non-empty pool");
        self.question_index = 0;
        self.remaining_secs = self.exam_type.total_time_secs();
        self.answered_current = false;
        self.question_shown_at = Instant::now();
        self.state = ExamState::InProgress;

        info!(
            "{} sınavı başladı (süre: {} sn, ders: {})",
            self.exam_type,
            self.remaining_secs,
            self.current_subject_name()
        );
        Ok(())
    }

    /// Records the answer for the currently displayed question.
    ///
    /// The caller passes the explicitly selected option; `None` is the
    /// nothing-selected sentinel and is rejected — the UI must block
    /// advancement instead of sending it.
    pub fn answer(&mut self, selected: Option<usize>) -> Result<(), EngineError> {
        if self.state != ExamState::InProgress {
            return Err(EngineError::NotInProgress);
        }
        if self.answered_current {
            return Err(EngineError::AlreadyAnswered);
        }
        let subject = self.current_subject_name().to_string();
        let question = self.current_question().ok_or(EngineError::NoQuestion)?;
        let selected = selected.ok_or(EngineError::NoSelection)?;
        if selected >= question.options.len() {
            return Err(EngineError::OptionOutOfRange {
                index: selected,
                options: question.options.len(),
            });
        }

        let result = QuizResult {
            question_id: question.id.clone(),
            selected_answer: selected,
            is_correct: selected == question.correct_answer,
            time_spent: self.question_shown_at.elapsed().as_secs(),
            subject,
        };
        self.session.results.push(result);
        self.answered_current = true;
        self.question_shown_at = Instant::now();
        Ok(())
    }

    /// Moves past the (already answered) current question: next question in
    /// the subject, else the next subject with questions, else finish.
    pub fn advance(&mut self) -> Result<Advance, EngineError> {
        if self.state != ExamState::InProgress {
            return Err(EngineError::NotInProgress);
        }
        if !self.answered_current {
            return Err(EngineError::NotAnswered);
        }

        self.answered_current = false;
        self.question_shown_at = Instant::now();

        let pool_len = self.current_pool().len();
        if self.question_index + 1 < pool_len {
            self.question_index += 1;
            return Ok(Advance::NextQuestion);
        }

        match self.first_nonempty_subject(self.current_subject + 1) {
            Some(next) => {
                self.current_subject = next;
                self.question_index = 0;
                info!("sonraki derse geçildi: {}", self.current_subject_name());
                Ok(Advance::NextSubject)
            }
            None => {
                self.finish();
                Ok(Advance::Finished)
            }
        }
    }

    /// Jumps to another subject without any answered-question precondition.
    /// Recorded results stay untouched; the question index resets to 0.
    pub fn switch_subject(&mut self, subject: &str) -> Result<(), EngineError> {
        if self.state != ExamState::InProgress {
            return Err(EngineError::NotInProgress);
        }
        let position = self
            .exam_type
            .subjects()
            .iter()
            .position(|name| *name == subject)
            .ok_or_else(|| EngineError::UnknownSubject(subject.to_string()))?;

        self.current_subject = position;
        self.question_index = 0;
        self.answered_current = false;
        self.question_shown_at = Instant::now();
        Ok(())
    }

    /// One second of countdown. Driven by an external scheduler; ticking a
    /// completed session is a no-op, so a late timer callback is harmless.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != ExamState::InProgress {
            return TickOutcome::Expired;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            info!("süre doldu, sınav otomatik bitiriliyor");
            self.finish();
            return TickOutcome::Expired;
        }
        TickOutcome::Running(self.remaining_secs)
    }

    /// Finalizes the session: stamps the end time, computes per-subject
    /// results over the full catalog (zero-filled where unanswered) and the
    /// rounded totals. Idempotent — a second call changes nothing.
    pub fn finish(&mut self) -> &ExamSession {
        if self.state == ExamState::Completed {
            return &self.session;
        }

        let breakdown = scoring::score_results(self.exam_type, &self.session.results);
        self.session.end_time = Some(chrono::Utc::now().timestamp_millis());
        self.session.subjects = breakdown.subjects;
        self.session.total_net = breakdown.total_net;
        self.session.total_score = breakdown.total_score;
        self.state = ExamState::Completed;

        info!(
            "sınav tamamlandı: {} cevap, toplam net {:.2}, toplam puan {:.2}",
            self.session.results.len(),
            self.session.total_net,
            self.session.total_score
        );
        &self.session
    }

    /// Finishes (if needed) and appends the session to the local history.
    ///
    /// A failed write is logged and the computed result still stands — the
    /// user sees their score even when the history write was lost.
    pub fn finish_and_record(&mut self, history: &HistoryLog) -> &ExamSession {
        self.finish();
        if !self.persisted {
            match history.append_exam_session(&self.session) {
                Ok(()) => self.persisted = true,
                Err(e) => warn!("sınav geçmişe yazılamadı: {}", e),
            }
        }
        &self.session
    }

    // ========== Accessors ==========

    pub fn state(&self) -> ExamState {
        self.state
    }

    pub fn session(&self) -> &ExamSession {
        &self.session
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn current_subject_name(&self) -> &'static str {
        self.exam_type.subjects()[self.current_subject]
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_pool().get(self.question_index)
    }

    /// Zero-based position within the current subject, for progress display.
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    fn current_pool(&self) -> &[Question] {
        let name = self.exam_type.subjects()[self.current_subject];
        self.pools.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn first_nonempty_subject(&self, from: usize) -> Option<usize> {
        self.exam_type.subjects()[from..]
            .iter()
            .position(|name| self.pools.get(*name).is_some_and(|pool| !pool.is_empty()))
            .map(|offset| from + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn question(id: &str, subject: &str, correct: usize) -> Question {
        Question {
            id: id.to_string(),
            question: format!("soru {}", id),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct,
            explanation: String::new(),
            subject: subject.to_string(),
            difficulty: Difficulty::Medium,
            year: 2024,
        }
    }

    fn tyt_pools() -> HashMap<String, Vec<Question>> {
        let mut pools = HashMap::new();
        pools.insert(
            "Türkçe".to_string(),
            vec![question("t1", "Türkçe", 0), question("t2", "Türkçe", 1)],
        );
        pools.insert(
            "Temel Matematik Testi".to_string(),
            vec![question("m1", "Temel Matematik Testi", 2)],
        );
        pools
    }

    fn started_engine() -> ExamEngine {
        let mut engine = ExamEngine::new(ExamType::Tyt, tyt_pools()).unwrap();
        engine.start().unwrap();
        engine
    }

    #[test]
    fn test_empty_bank_rejected() {
        let mut pools = HashMap::new();
        pools.insert("Türkçe".to_string(), Vec::new());
        assert_eq!(
            ExamEngine::new(ExamType::Tyt, pools).unwrap_err(),
            EngineError::EmptyBank
        );
    }

    #[test]
    fn test_start_shows_first_subject() {
        let engine = started_engine();
        assert_eq!(engine.state(), ExamState::InProgress);
        assert_eq!(engine.current_subject_name(), "Türkçe");
        assert_eq!(engine.current_question().unwrap().id, "t1");
        assert_eq!(engine.remaining_secs(), 9900);
    }

    #[test]
    fn test_answer_requires_selection() {
        let mut engine = started_engine();
        assert_eq!(engine.answer(None).unwrap_err(), EngineError::NoSelection);
        assert_eq!(
            engine.answer(Some(9)).unwrap_err(),
            EngineError::OptionOutOfRange { index: 9, options: 4 }
        );
        engine.answer(Some(0)).unwrap();
        assert_eq!(
            engine.answer(Some(0)).unwrap_err(),
            EngineError::AlreadyAnswered
        );
    }

    #[test]
    fn test_advance_requires_answer() {
        let mut engine = started_engine();
        assert_eq!(engine.advance().unwrap_err(), EngineError::NotAnswered);
    }

    #[test]
    fn test_full_walkthrough_with_subject_skip() {
        // Türkçe has 2 questions, the two empty/missing subjects are skipped,
        // Temel Matematik has 1, then the session self-finishes.
        let mut engine = started_engine();

        engine.answer(Some(0)).unwrap(); // correct
        assert_eq!(engine.advance().unwrap(), Advance::NextQuestion);

        engine.answer(Some(0)).unwrap(); // wrong (correct is 1)
        assert_eq!(engine.advance().unwrap(), Advance::NextSubject);
        assert_eq!(engine.current_subject_name(), "Temel Matematik Testi");

        engine.answer(Some(2)).unwrap(); // correct
        assert_eq!(engine.advance().unwrap(), Advance::Finished);
        assert_eq!(engine.state(), ExamState::Completed);

        let session = engine.session();
        assert_eq!(session.results.len(), 3);
        // Türkçe: 1 correct 1 wrong -> net 0.75, score 0.99
        assert_eq!(session.subjects["Türkçe"].net, 0.75);
        assert_eq!(session.subjects["Türkçe"].score, 0.99);
        // all four subjects present, unanswered ones zero-filled
        assert_eq!(session.subjects.len(), 4);
        assert_eq!(session.subjects["Fen Bilimleri Testi"].total, 0);
    }

    #[test]
    fn test_switch_subject_keeps_results() {
        let mut engine = started_engine();
        engine.answer(Some(0)).unwrap();
        engine.advance().unwrap();

        engine.switch_subject("Temel Matematik Testi").unwrap();
        assert_eq!(engine.current_question().unwrap().id, "m1");
        assert_eq!(engine.session().results.len(), 1);

        // switching back restarts the subject at question 0
        engine.switch_subject("Türkçe").unwrap();
        assert_eq!(engine.current_question().unwrap().id, "t1");

        assert_eq!(
            engine.switch_subject("Kimya").unwrap_err(),
            EngineError::UnknownSubject("Kimya".to_string())
        );
    }

    #[test]
    fn test_timer_forces_completion() {
        let mut engine = started_engine();
        for _ in 0..9899 {
            assert!(matches!(engine.tick(), TickOutcome::Running(_)));
        }
        assert_eq!(engine.tick(), TickOutcome::Expired);
        assert_eq!(engine.state(), ExamState::Completed);

        // zero answers: every subject result is all-zero
        let session = engine.session();
        assert!(session.results.is_empty());
        assert!(session.subjects.values().all(|s| s.total == 0 && s.score == 0.0));
        assert_eq!(session.total_score, 0.0);

        // further ticks are harmless
        assert_eq!(engine.tick(), TickOutcome::Expired);
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut engine = started_engine();
        engine.answer(Some(0)).unwrap();

        let first = engine.finish().clone();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = engine.finish().clone();

        assert_eq!(first.end_time, second.end_time);
        assert_eq!(first.total_score, second.total_score);
        assert_eq!(first.results.len(), second.results.len());
    }

    #[test]
    fn test_completed_session_rejects_answers() {
        let mut engine = started_engine();
        engine.finish();
        assert_eq!(engine.answer(Some(0)).unwrap_err(), EngineError::NotInProgress);
        assert_eq!(engine.advance().unwrap_err(), EngineError::NotInProgress);
        assert_eq!(
            engine.switch_subject("Türkçe").unwrap_err(),
            EngineError::NotInProgress
        );
    }

    #[test]
    fn test_completeness_invariant() {
        let mut engine = started_engine();
        engine.answer(Some(1)).unwrap();
        engine.advance().unwrap();
        engine.answer(Some(3)).unwrap();
        engine.finish();

        let session = engine.session();
        let subject_total: u32 = session.subjects.values().map(|s| s.total).sum();
        assert_eq!(subject_total as usize, session.results.len());
    }
}
