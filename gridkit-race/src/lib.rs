//! gridkit-race library - race classification
//!
//! Final race order from the last position sample of each driver, joined with
//! the session roster, plus the text table the CLI prints.

pub mod classify;
pub mod table;

pub use classify::{build_race, classify, final_positions};
pub use table::format_table;

use chrono::NaiveDate;
use gridkit_common::{MeetingKey, SessionHint, SessionKey};

/// Session used when no flag is given
pub const DEFAULT_SESSION_KEY: SessionKey = 9987;

/// Flag precedence as for qualifying, but no flags means the default session
/// rather than auto-detection
pub fn race_hint(
    session: Option<SessionKey>,
    meeting: Option<MeetingKey>,
    date: Option<NaiveDate>,
) -> SessionHint {
    match SessionHint::from_flags(session, meeting, date) {
        SessionHint::Latest => SessionHint::Session(DEFAULT_SESSION_KEY),
        hint => hint,
    }
}
