//! Stateful flows: the exam session engine and the focus timer.

pub mod exam_session;
pub mod focus_timer;

pub use exam_session::{Advance, ExamEngine, ExamState, TickOutcome};
pub use focus_timer::{FocusState, FocusTimer};
