//! Session resolution cascade
//!
//! Turns a user hint into a `session_key`. Hints are exclusive: the strongest
//! one present decides the strategy, and a failed strategy never falls back
//! to a weaker hint.
//!
//! | Hint      | Strategy                                                        |
//! |-----------|-----------------------------------------------------------------|
//! | session   | used verbatim                                                   |
//! | meeting   | first session of the target type in that meeting                |
//! | date      | session starting that day, else meeting on that date, then as above |
//! | none      | newest session of the year, else meeting near now, then as above |
//!
//! Empty lookups are "no match" at their step; only an exhausted cascade is
//! reported as `NoSessionFound`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use tracing::{info, warn};

use crate::model::{MeetingKey, SessionKey, SessionType};
use crate::source::{DataSource, SessionQuery};
use crate::time::format_date;
use crate::{Error, Result};

/// How far ahead to look for a meeting when none is running now
const MEETING_LOOKAHEAD_DAYS: i64 = 14;

/// What the caller told us about the session they want
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionHint {
    Session(SessionKey),
    Meeting(MeetingKey),
    Date(NaiveDate),
    Latest,
}

impl SessionHint {
    /// Apply flag precedence: session > meeting > date > latest
    pub fn from_flags(
        session: Option<SessionKey>,
        meeting: Option<MeetingKey>,
        date: Option<NaiveDate>,
    ) -> Self {
        match (session, meeting, date) {
            (Some(key), _, _) => SessionHint::Session(key),
            (None, Some(key), _) => SessionHint::Meeting(key),
            (None, None, Some(date)) => SessionHint::Date(date),
            (None, None, None) => SessionHint::Latest,
        }
    }
}

/// Resolves hints against a `DataSource` for one target session type
pub struct SessionResolver<'a> {
    source: &'a dyn DataSource,
    target: SessionType,
    now: DateTime<Utc>,
}

impl<'a> SessionResolver<'a> {
    pub fn new(source: &'a dyn DataSource, target: SessionType) -> Self {
        Self {
            source,
            target,
            now: crate::time::now(),
        }
    }

    /// Pin "now" (UTC) for date checks and auto-detection
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub async fn resolve(&self, hint: &SessionHint) -> Result<SessionKey> {
        let resolved = match *hint {
            SessionHint::Session(key) => {
                info!("Using provided session_key: {}", key);
                Some(key)
            }
            SessionHint::Meeting(meeting) => {
                info!(
                    "Attempting to resolve {} session_key for meeting_key: {}",
                    self.target, meeting
                );
                self.session_in_meeting(meeting).await
            }
            SessionHint::Date(date) => {
                info!(
                    "Attempting to find meeting for date: {} and resolve {} session_key",
                    date, self.target
                );
                match self.meeting_for_date(date).await? {
                    Some(meeting) => self.session_in_meeting(meeting).await,
                    None => None,
                }
            }
            SessionHint::Latest => {
                info!("No session, meeting, or date provided. Auto-detecting latest {} session", self.target);
                self.latest_session().await
            }
        };

        resolved.ok_or_else(|| {
            let detail = match hint {
                SessionHint::Latest => format!(
                    "could not automatically determine the latest {} session",
                    self.target
                ),
                _ => format!(
                    "could not determine a {} session from {:?}",
                    self.target, hint
                ),
            };
            Error::NoSessionFound(detail)
        })
    }

    /// First session of the target type inside a meeting
    pub async fn session_in_meeting(&self, meeting: MeetingKey) -> Option<SessionKey> {
        let query = SessionQuery::new()
            .meeting_key(meeting)
            .session_type(self.target.as_str());
        let found = self
            .source
            .sessions(&query)
            .await
            .iter()
            .find_map(|s| s.session_key);

        if found.is_none() {
            warn!(
                "No '{}' session found for meeting_key {}",
                self.target, meeting
            );
        }
        found
    }

    /// Meeting key for a calendar date
    ///
    /// Fails with `FutureDate` when the date is after today (UTC).
    pub async fn meeting_for_date(&self, date: NaiveDate) -> Result<Option<MeetingKey>> {
        if date > self.now.date_naive() {
            warn!("Date {} is in the future. No {} data available yet", date, self.target);
            return Err(Error::FutureDate(date));
        }

        let day = format_date(date);
        let query = SessionQuery::new()
            .year(date.year())
            .session_name(self.target.as_str());
        let starting_that_day = self.source.sessions(&query).await.into_iter().find(|s| {
            s.date_start
                .as_deref()
                .map_or(false, |start| start.starts_with(&day))
        });
        if let Some(session) = starting_that_day {
            if let Some(meeting) = session.meeting_key {
                info!(
                    "Found session {:?} for meeting {} starting on {:?}",
                    session.session_key, meeting, session.date_start
                );
                return Ok(Some(meeting));
            }
        }

        info!(
            "No {} session found starting on {}. Trying meetings?date={} as fallback",
            self.target, day, day
        );
        let meeting = self
            .source
            .meetings(&day)
            .await
            .iter()
            .find_map(|m| m.meeting_key);
        if meeting.is_none() {
            warn!("No meeting or {} session found for date {}", self.target, day);
        }
        Ok(meeting)
    }

    /// Newest session of the target type this year, else a meeting near now
    pub async fn latest_session(&self) -> Option<SessionKey> {
        let year = self.now.year();
        let query = SessionQuery::new()
            .year(year)
            .session_name(self.target.as_str());
        let sessions = self.source.sessions(&query).await;

        let newest = sessions
            .iter()
            .filter_map(|s| match (s.meeting_key, s.session_key) {
                (Some(meeting), Some(key)) => Some(((meeting, key), s)),
                _ => None,
            })
            .max_by_key(|(rank, _)| *rank);

        if let Some(((meeting, key), session)) = newest {
            info!(
                session_key = key,
                meeting_key = meeting,
                "Found latest {} session: {} at {}",
                self.target,
                session.session_name.as_deref().unwrap_or("N/A"),
                session.location.as_deref().unwrap_or("N/A")
            );
            return Some(key);
        }

        info!(
            "No {} sessions found for year {}. Trying meetings around the current date",
            self.target, year
        );
        let meeting = self.meeting_near_now().await?;
        self.session_in_meeting(meeting).await
    }

    async fn meeting_near_now(&self) -> Option<MeetingKey> {
        let mut meetings = self.source.meetings(&self.now.to_rfc3339()).await;
        if meetings.is_empty() {
            let ahead = self.now + Duration::days(MEETING_LOOKAHEAD_DAYS);
            info!("No meetings found, trying {}", ahead.to_rfc3339());
            meetings = self.source.meetings(&ahead.to_rfc3339()).await;
        }

        let found = meetings
            .iter()
            .find_map(|m| m.meeting_key.map(|key| (key, m.meeting_name.as_deref())));
        match found {
            Some((key, name)) => {
                info!("Found meeting {} with key {}", name.unwrap_or("N/A"), key);
                Some(key)
            }
            None => {
                warn!("No upcoming meetings found via meetings endpoint");
                None
            }
        }
    }
}
