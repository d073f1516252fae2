//! Qualifying classification builder
//!
//! Ranks every roster driver by their single best lap. Drivers without a
//! valid lap stay in the classification, ranked last in roster order with a
//! `null` best lap.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use gridkit_common::lap_time::LapTime;
use gridkit_common::model::LapRecord;
use gridkit_common::{ClassificationRow, DataSource, Driver, DriverNumber, Error, Result, SessionKey};

/// Which lap field carries the duration for this session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingField {
    LapDuration,
    LapTime,
}

impl TimingField {
    fn value<'a>(&self, lap: &'a LapRecord) -> Option<&'a LapTime> {
        match self {
            TimingField::LapDuration => lap.lap_duration.as_ref(),
            TimingField::LapTime => lap.lap_time.as_ref(),
        }
    }
}

/// Fetch roster and laps for a session and classify them
pub async fn build_qualifying(
    source: &dyn DataSource,
    session_key: SessionKey,
) -> Result<Vec<ClassificationRow>> {
    let drivers = source.drivers(session_key).await;
    if drivers.is_empty() {
        warn!("No drivers found for session {} from drivers endpoint", session_key);
        return Err(Error::NoDrivers(session_key));
    }

    let laps = source.laps(session_key).await;
    info!(
        session_key,
        drivers = drivers.len(),
        laps = laps.len(),
        "Building qualifying classification"
    );

    classify(&drivers, &laps)
}

/// Prefer `lap_duration`; use `lap_time` only when `lap_duration` is never set
pub fn select_timing_field(laps: &[LapRecord]) -> Option<TimingField> {
    [TimingField::LapDuration, TimingField::LapTime]
        .into_iter()
        .find(|field| laps.iter().any(|lap| field.value(lap).is_some()))
}

/// Fastest normalized lap per driver; drivers with no valid lap are absent
pub fn best_laps(laps: &[LapRecord], field: TimingField) -> Result<HashMap<DriverNumber, f64>> {
    let mut best: HashMap<DriverNumber, f64> = HashMap::new();

    for lap in laps {
        let (Some(driver), Some(raw)) = (lap.driver_number, field.value(lap)) else {
            continue;
        };
        let secs = raw.to_seconds()?;
        best.entry(driver)
            .and_modify(|current| {
                if secs < *current {
                    *current = secs;
                }
            })
            .or_insert(secs);
    }

    Ok(best)
}

/// Outer-join roster with best laps, sort (nulls last), number 1..N
pub fn classify(drivers: &[Driver], laps: &[LapRecord]) -> Result<Vec<ClassificationRow>> {
    let best = match select_timing_field(laps) {
        Some(field) => best_laps(laps, field)?,
        None => {
            info!("No lap timing data in session, every driver is unclassified");
            HashMap::new()
        }
    };

    let mut seen = HashSet::new();
    let mut entries: Vec<(&Driver, Option<f64>)> = drivers
        .iter()
        .filter(|d| seen.insert(d.driver_number))
        .map(|d| (d, best.get(&d.driver_number).copied()))
        .collect();

    // Stable: equal times and untimed drivers keep roster order
    entries.sort_by(|(_, a), (_, b)| compare_best_lap(*a, *b));

    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(i, (driver, lap))| ClassificationRow::for_driver(i as u32 + 1, driver, lap))
        .collect())
}

fn compare_best_lap(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
