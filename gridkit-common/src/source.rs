//! `DataSource` seam between the pipelines and the upstream API
//!
//! Every lookup returns a plain list: transport failures and empty bodies are
//! already folded into "no rows" by the implementation, so callers treat an
//! empty list as "no match" and move on.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::{Driver, LapRecord, Meeting, MeetingKey, PositionSample, Session, SessionKey};

/// Filters accepted by the `sessions` endpoint
///
/// `session_name` and `session_type` are distinct upstream filters and are
/// kept separate here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionQuery {
    pub year: Option<i32>,
    pub session_name: Option<String>,
    pub session_type: Option<String>,
    pub meeting_key: Option<MeetingKey>,
}

impl SessionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn session_name(mut self, name: &str) -> Self {
        self.session_name = Some(name.to_string());
        self
    }

    pub fn session_type(mut self, kind: &str) -> Self {
        self.session_type = Some(kind.to_string());
        self
    }

    pub fn meeting_key(mut self, key: MeetingKey) -> Self {
        self.meeting_key = Some(key);
        self
    }

    /// Query string pairs in API parameter order
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(name) = &self.session_name {
            params.push(("session_name", name.clone()));
        }
        if let Some(kind) = &self.session_type {
            params.push(("session_type", kind.clone()));
        }
        if let Some(key) = self.meeting_key {
            params.push(("meeting_key", key.to_string()));
        }
        params
    }

    /// True when `session` satisfies every filter set on this query
    pub fn matches(&self, session: &Session) -> bool {
        let year_ok = self.year.map_or(true, |y| {
            session.year == Some(y)
                || session
                    .date_start
                    .as_deref()
                    .map_or(false, |d| d.starts_with(&y.to_string()))
        });
        let name_ok = self
            .session_name
            .as_ref()
            .map_or(true, |n| session.session_name.as_ref() == Some(n));
        let type_ok = self
            .session_type
            .as_ref()
            .map_or(true, |t| session.session_type.as_ref() == Some(t));
        let meeting_ok = self
            .meeting_key
            .map_or(true, |k| session.meeting_key == Some(k));
        year_ok && name_ok && type_ok && meeting_ok
    }
}

/// Read-only access to the classification data
#[async_trait]
pub trait DataSource: Send + Sync {
    /// `GET /sessions`
    async fn sessions(&self, query: &SessionQuery) -> Vec<Session>;

    /// `GET /meetings?date=...`
    async fn meetings(&self, date: &str) -> Vec<Meeting>;

    /// `GET /drivers?session_key=...`
    async fn drivers(&self, session_key: SessionKey) -> Vec<Driver>;

    /// `GET /laps?session_key=...`
    async fn laps(&self, session_key: SessionKey) -> Vec<LapRecord>;

    /// `GET /position?session_key=...`
    async fn positions(&self, session_key: SessionKey) -> Vec<PositionSample>;
}

/// In-memory `DataSource` used by tests and offline runs
///
/// Sessions are filtered with [`SessionQuery::matches`]; meetings are keyed by
/// the exact `date` parameter the caller sends. Every call is recorded.
#[derive(Debug, Default)]
pub struct MemorySource {
    sessions: Vec<Session>,
    meetings: HashMap<String, Vec<Meeting>>,
    drivers: HashMap<SessionKey, Vec<Driver>>,
    laps: HashMap<SessionKey, Vec<LapRecord>>,
    positions: HashMap<SessionKey, Vec<PositionSample>>,
    calls: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.sessions.push(session);
        self
    }

    pub fn with_meetings(mut self, date: &str, meetings: Vec<Meeting>) -> Self {
        self.meetings.insert(date.to_string(), meetings);
        self
    }

    pub fn with_drivers(mut self, session_key: SessionKey, drivers: Vec<Driver>) -> Self {
        self.drivers.insert(session_key, drivers);
        self
    }

    pub fn with_laps(mut self, session_key: SessionKey, laps: Vec<LapRecord>) -> Self {
        self.laps.insert(session_key, laps);
        self
    }

    pub fn with_positions(mut self, session_key: SessionKey, samples: Vec<PositionSample>) -> Self {
        self.positions.insert(session_key, samples);
        self
    }

    /// Endpoint calls seen so far, e.g. `sessions?meeting_key=1229&session_type=Race`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn sessions(&self, query: &SessionQuery) -> Vec<Session> {
        let params: Vec<String> = query
            .to_params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        self.record(format!("sessions?{}", params.join("&")));

        self.sessions
            .iter()
            .filter(|s| query.matches(s))
            .cloned()
            .collect()
    }

    async fn meetings(&self, date: &str) -> Vec<Meeting> {
        self.record(format!("meetings?date={date}"));
        self.meetings.get(date).cloned().unwrap_or_default()
    }

    async fn drivers(&self, session_key: SessionKey) -> Vec<Driver> {
        self.record(format!("drivers?session_key={session_key}"));
        self.drivers.get(&session_key).cloned().unwrap_or_default()
    }

    async fn laps(&self, session_key: SessionKey) -> Vec<LapRecord> {
        self.record(format!("laps?session_key={session_key}"));
        self.laps.get(&session_key).cloned().unwrap_or_default()
    }

    async fn positions(&self, session_key: SessionKey) -> Vec<PositionSample> {
        self.record(format!("position?session_key={session_key}"));
        self.positions.get(&session_key).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(key: SessionKey, meeting: MeetingKey, name: &str, start: &str) -> Session {
        Session {
            session_key: Some(key),
            meeting_key: Some(meeting),
            session_name: Some(name.to_string()),
            session_type: Some(name.to_string()),
            date_start: Some(start.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_query_params_order() {
        let query = SessionQuery::new()
            .meeting_key(1229)
            .session_type("Race")
            .year(2024);
        assert_eq!(
            query.to_params(),
            vec![
                ("year", "2024".to_string()),
                ("session_type", "Race".to_string()),
                ("meeting_key", "1229".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_matches_year_from_date_start() {
        let s = session(1, 10, "Qualifying", "2024-03-01T16:00:00+00:00");
        assert!(SessionQuery::new().year(2024).matches(&s));
        assert!(!SessionQuery::new().year(2023).matches(&s));
    }

    #[tokio::test]
    async fn test_memory_source_filters_and_records() {
        let source = MemorySource::new()
            .with_session(session(1, 10, "Qualifying", "2024-03-01T16:00:00+00:00"))
            .with_session(session(2, 10, "Race", "2024-03-02T15:00:00+00:00"));

        let found = source
            .sessions(&SessionQuery::new().meeting_key(10).session_type("Race"))
            .await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].session_key, Some(2));

        assert!(source.drivers(99).await.is_empty());
        assert_eq!(
            source.calls(),
            vec![
                "sessions?session_type=Race&meeting_key=10".to_string(),
                "drivers?session_key=99".to_string(),
            ]
        );
    }
}
