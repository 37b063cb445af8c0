use std::fmt;

use time::OffsetDateTime;

use crate::engine::TimerSnapshot;
use crate::laps::{self, Lap, LapLog};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a session name")]
    EmptyName,
    #[error("A session with this name already exists")]
    DuplicateName { name: String },
    #[error("Pause the stopwatch with some time on it before saving")]
    NotReady,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named, immutable record of a finished run.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    name: String,
    total_ms: u64,
    laps: Vec<Lap>,
    created_at: OffsetDateTime,
}

impl Session {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn best_interval_ms(&self) -> Option<u64> {
        if self.laps.len() < 2 {
            return None;
        }
        laps::intervals(&self.laps).min()
    }

    pub fn worst_interval_ms(&self) -> Option<u64> {
        if self.laps.len() < 2 {
            return None;
        }
        laps::intervals(&self.laps).max()
    }
}

/// Laps of the current run plus the saved session history.
///
/// Sessions are kept most-recent-first and live only as long as the store.
#[derive(Debug, Default)]
pub struct SessionStore {
    laps: LapLog,
    sessions: Vec<Session>,
    next_id: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lap(&mut self, timer: TimerSnapshot) -> Option<Lap> {
        let lap = self.laps.record(timer)?;
        log::debug!("lap {} at {} ms", lap.number, lap.absolute_ms);
        Some(lap)
    }

    pub fn clear_laps(&mut self) {
        self.laps.clear();
    }

    pub fn laps(&self) -> &[Lap] {
        self.laps.laps()
    }

    /// Snapshots `elapsed_ms` and `laps` into a new session at the front of
    /// the history.
    ///
    /// The name is trimmed and must not match an existing session name,
    /// ignoring case.
    pub fn save_session(
        &mut self,
        name: &str,
        elapsed_ms: u64,
        laps: &[Lap],
    ) -> Result<SessionId, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.name_exists(name) {
            return Err(ValidationError::DuplicateName {
                name: name.to_string(),
            });
        }

        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.sessions.insert(
            0,
            Session {
                id,
                name: name.to_string(),
                total_ms: elapsed_ms,
                laps: laps.to_vec(),
                created_at: OffsetDateTime::now_utc(),
            },
        );
        log::info!("saved session {} \"{}\" ({} ms, {} laps)", id, name, elapsed_ms, laps.len());
        Ok(id)
    }

    /// Saves the current lap sequence with the given elapsed time.
    pub fn save_current(&mut self, name: &str, elapsed_ms: u64) -> Result<SessionId, ValidationError> {
        let laps = self.laps.laps().to_vec();
        self.save_session(name, elapsed_ms, &laps)
    }

    pub fn delete_session(&mut self, id: SessionId) {
        let before = self.sessions.len();
        self.sessions.retain(|session| session.id != id);
        if self.sessions.len() < before {
            log::info!("deleted session {}", id);
        }
    }

    pub fn name_exists(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.sessions
            .iter()
            .any(|session| session.name.to_lowercase() == wanted)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id == id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
