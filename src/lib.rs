//! # StudyMate
//!
//! Core of a student productivity app: practice-exam engine, question-bank
//! loading, AI problem solving and study statistics, plus the minimal HTTP
//! backend feeding it.
//!
//! ## Architecture
//!
//! Layered, with each layer only reaching downward:
//!
//! ### ① Models
//! - `models/` - domain types: questions, the subject catalog, exam
//!   sessions, solutions, planner and GPA records
//!
//! ### ② Sources & storage
//! - `bank/` - CSV pool and per-subject JSON files, normalized into one
//!   question shape
//! - `storage/` - key-value seam, append-only history log, solve cache
//!
//! ### ③ Capabilities
//! - `clients/BankLoader` - fetches and composes per-subject pools
//! - `services/SolveService` - one-shot vision-model solve with a degraded
//!   fallback
//! - `services/stats_service` - pure history roll-ups
//! - `scoring` - the shared net/score formula
//!
//! ### ④ Flows & surface
//! - `workflow/ExamEngine` - the timed exam state machine
//! - `workflow/FocusTimer` - the sibling countdown
//! - `api/` - axum handlers over the same capabilities

pub mod api;
pub mod bank;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod scoring;
pub mod services;
pub mod storage;
pub mod workflow;

// Re-export common types
pub use clients::{BankLoader, SubjectPools};
pub use config::Config;
pub use error::{AppError, AppResult, EngineError};
pub use models::{ExamSession, ExamType, ProblemSolution, Question, SolveRequest};
pub use services::SolveService;
pub use storage::{FileStore, HistoryLog, KeyValueStore, MemoryStore, SolveCache};
pub use workflow::{ExamEngine, ExamState, FocusTimer};
