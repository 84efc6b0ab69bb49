use super::{HistoryEntry, Urgency};
use crate::{
    Error, Result,
    analysis::{Analysis, SymptomRequest},
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Most recent successful analysis, kept so a later save can record it.
#[derive(Debug, Clone)]
struct LastAnalysis {
    request: SymptomRequest,
    generated_text: String,
}

#[derive(Debug)]
struct Session {
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
    last_analysis: Option<LastAnalysis>,
    history: Vec<HistoryEntry>,
}

impl Session {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            last_active: now,
            last_analysis: None,
            history: Vec::new(),
        }
    }

    fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

/// In-memory session contexts. A session's history lives exactly as long as
/// the session and is never written anywhere else.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Session>>> {
        self.sessions
            .lock()
            .map_err(|e| Error::internal(format!("Mutex lock failed: {e}")))
    }

    pub fn create(&self) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.lock()?.insert(id, Session::new());
        info!("Opened session {}", id);
        Ok(id)
    }

    pub fn contains(&self, session_id: Uuid) -> Result<bool> {
        Ok(self.lock()?.contains_key(&session_id))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn created_at(&self, session_id: Uuid) -> Result<DateTime<Utc>> {
        let sessions = self.lock()?;
        let session = sessions.get(&session_id).ok_or_else(|| not_found(session_id))?;
        Ok(session.created_at)
    }

    /// Records what the user is now looking at. `None` means the latest
    /// submission failed, so there is nothing to save until the next success.
    pub fn record_outcome(
        &self,
        session_id: Uuid,
        request: &SymptomRequest,
        analysis: Option<&Analysis>,
    ) -> Result<()> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| not_found(session_id))?;

        session.touch();
        session.last_analysis = analysis.map(|analysis| LastAnalysis {
            request: request.clone(),
            generated_text: analysis.generated_text.clone(),
        });
        debug!(
            "Recorded {} outcome for session {}",
            if analysis.is_some() { "successful" } else { "failed" },
            session_id
        );
        Ok(())
    }

    /// Appends the current analysis with the given urgency. Every call adds a
    /// new entry.
    pub fn save(&self, session_id: Uuid, urgency: Urgency) -> Result<HistoryEntry> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| not_found(session_id))?;
        session.touch();

        let current = session.last_analysis.as_ref().ok_or_else(|| {
            Error::validation("Nothing to save yet: analyze your pet's symptoms first.")
        })?;

        let entry = HistoryEntry::new(
            current.request.species,
            current.request.symptom_text.clone(),
            urgency,
            current.generated_text.clone(),
        );
        session.history.push(entry.clone());

        info!(
            "Saved history entry #{} for session {}",
            session.history.len(),
            session_id
        );
        Ok(entry)
    }

    pub fn history(&self, session_id: Uuid) -> Result<Vec<HistoryEntry>> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| not_found(session_id))?;
        session.touch();
        Ok(session.history.clone())
    }

    /// Drops every session idle for at least `max_idle`. Returns how many
    /// were removed.
    pub fn expire_idle(&self, max_idle: Duration) -> Result<usize> {
        let max_idle = chrono::Duration::from_std(max_idle)
            .map_err(|e| Error::internal(format!("Idle timeout out of range: {e}")))?;
        let cutoff = Utc::now() - max_idle;

        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_active > cutoff);
        let expired = before - sessions.len();

        if expired > 0 {
            info!("Expired {} idle sessions", expired);
        }
        Ok(expired)
    }

    /// Ends the session, dropping its history.
    pub fn end(&self, session_id: Uuid) -> Result<()> {
        let removed = self.lock()?.remove(&session_id);
        match removed {
            Some(session) => {
                info!(
                    "Closed session {} ({} history entries discarded)",
                    session_id,
                    session.history.len()
                );
                Ok(())
            }
            None => Err(not_found(session_id)),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(session_id: Uuid) -> Error {
    Error::SessionNotFound {
        session_id: session_id.to_string(),
    }
}
