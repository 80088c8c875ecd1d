//! Local history log and the solve-capture cache.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::error::{AppError, AppResult, StorageError};
use crate::models::{ExamSession, FocusSessionRecord, SolveRequest, Todo};

use super::KeyValueStore;

const EXAM_SESSIONS_KEY: &str = "examSessions";
const TODOS_KEY: &str = "todos";
const FOCUS_SESSIONS_KEY: &str = "focusSessions";
const LAST_SOLUTION_KEY: &str = "lastSolution";

/// Append-only history over the key-value store.
///
/// Appends take a lock around the read-modify-write of the list so two
/// writers on real threads cannot drop each other's entries. Readers load
/// the full list; a missing key reads as an empty history, which is the
/// normal new-user state.
pub struct HistoryLog {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl HistoryLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Appends a finalized exam session to the history list.
    pub fn append_exam_session(&self, session: &ExamSession) -> AppResult<()> {
        let _guard = self.write_lock.lock().unwrap();
        let mut sessions = self.read_list::<ExamSession>(EXAM_SESSIONS_KEY)?;
        sessions.push(session.clone());
        let serialized = serde_json::to_string(&sessions)?;
        self.store.set(EXAM_SESSIONS_KEY, &serialized)
    }

    pub fn exam_sessions(&self) -> AppResult<Vec<ExamSession>> {
        self.read_list(EXAM_SESSIONS_KEY)
    }

    pub fn todos(&self) -> AppResult<Vec<Todo>> {
        self.read_list(TODOS_KEY)
    }

    pub fn focus_sessions(&self) -> AppResult<Vec<FocusSessionRecord>> {
        self.read_list(FOCUS_SESSIONS_KEY)
    }

    /// Appends a completed focus run.
    pub fn append_focus_session(&self, record: &FocusSessionRecord) -> AppResult<()> {
        let _guard = self.write_lock.lock().unwrap();
        let mut records = self.read_list::<FocusSessionRecord>(FOCUS_SESSIONS_KEY)?;
        records.push(record.clone());
        let serialized = serde_json::to_string(&records)?;
        self.store.set(FOCUS_SESSIONS_KEY, &serialized)
    }

    fn read_list<T: serde::de::DeserializeOwned>(&self, key: &str) -> AppResult<Vec<T>> {
        match self.store.get(key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::Storage(StorageError::Corrupted {
                    key: key.to_string(),
                    source: Box::new(e),
                })
            }),
        }
    }
}

/// One-entry cache for the last solve capture.
///
/// Each new capture overwrites the previous one; an explicit retry rereads
/// the slot so the user never has to re-photograph the problem. This is a
/// keyed storage slot, not an ambient global.
pub struct SolveCache {
    store: Arc<dyn KeyValueStore>,
}

impl SolveCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stores a new capture, replacing whatever was there.
    pub fn store_capture(&self, request: &SolveRequest) -> AppResult<()> {
        let serialized = serde_json::to_string(request)?;
        self.store.set(LAST_SOLUTION_KEY, &serialized)
    }

    /// The most recent capture, if any.
    pub fn last_capture(&self) -> AppResult<Option<SolveRequest>> {
        match self.store.get(LAST_SOLUTION_KEY)? {
            None => Ok(None),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(request) => Ok(Some(request)),
                Err(e) => {
                    // a corrupt capture is not worth an error screen; drop it
                    warn!("önbellekteki çözüm isteği çözümlenemedi: {}", e);
                    self.store.remove(LAST_SOLUTION_KEY)?;
                    Ok(None)
                }
            },
        }
    }

    pub fn clear(&self) -> AppResult<()> {
        self.store.remove(LAST_SOLUTION_KEY)
    }
}
