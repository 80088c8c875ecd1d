//! Domain types shared across the loader, engine, solver and aggregator.

pub mod gpa;
pub mod planner;
pub mod question;
pub mod session;
pub mod solution;
pub mod subject;

pub use planner::{FocusSessionRecord, Priority, Todo, TodoPatch};
pub use question::{BankData, BankResponse, Difficulty, Question};
pub use session::{ExamSession, QuizResult, SubjectResult};
pub use solution::{ProblemSolution, SolutionStep, SolveRequest};
pub use subject::{ExamType, SubjectSpec};
