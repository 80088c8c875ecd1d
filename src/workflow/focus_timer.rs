//! Focus timer flow.
//!
//! A plain countdown with pause/resume, much simpler than the exam engine
//! and fully independent of it. Driven by the same external one-second
//! scheduler. A completed run emits a [`FocusSessionRecord`] for the
//! statistics aggregator.

use crate::models::FocusSessionRecord;

/// Focus timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Idle,
    Active,
    Paused,
}

/// Countdown focus timer.
pub struct FocusTimer {
    state: FocusState,
    planned_minutes: u32,
    remaining_secs: u64,
    subject: Option<String>,
    started_at: i64,
}

impl FocusTimer {
    pub fn new(planned_minutes: u32) -> Self {
        Self {
            state: FocusState::Idle,
            planned_minutes,
            remaining_secs: planned_minutes as u64 * 60,
            subject: None,
            started_at: 0,
        }
    }

    /// Starts (or restarts) the countdown from the full planned duration.
    pub fn start(&mut self, subject: Option<String>) {
        self.state = FocusState::Active;
        self.remaining_secs = self.planned_minutes as u64 * 60;
        self.subject = subject;
        self.started_at = chrono::Utc::now().timestamp_millis();
    }

    pub fn pause(&mut self) {
        if self.state == FocusState::Active {
            self.state = FocusState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == FocusState::Paused {
            self.state = FocusState::Active;
        }
    }

    /// Abandons the run without emitting a record.
    pub fn reset(&mut self) {
        self.state = FocusState::Idle;
        self.remaining_secs = self.planned_minutes as u64 * 60;
        self.subject = None;
    }

    /// One second of countdown. Returns the completed-session record when
    /// the timer hits zero; paused and idle timers do not tick down.
    pub fn tick(&mut self) -> Option<FocusSessionRecord> {
        if self.state != FocusState::Active {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        let record = FocusSessionRecord {
            id: self.started_at.to_string(),
            subject: self.subject.take(),
            duration: self.planned_minutes,
            start_time: self.started_at,
            end_time: Some(chrono::Utc::now().timestamp_millis()),
            completed: true,
        };
        self.state = FocusState::Idle;
        self.remaining_secs = self.planned_minutes as u64 * 60;
        Some(record)
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }
}
