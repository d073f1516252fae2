//! Race classification from the position stream
//!
//! The last sample per driver is their classified position. Values are taken
//! verbatim: gaps and duplicates in the stream show up in the result.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::info;

use gridkit_common::model::PositionSample;
use gridkit_common::time::parse_timestamp;
use gridkit_common::{ClassificationRow, DataSource, Driver, DriverNumber, Error, Result, SessionKey};

/// Fetch positions and roster for a race session and classify them
///
/// An empty position stream is fatal.
pub async fn build_race(source: &dyn DataSource, session_key: SessionKey) -> Result<Vec<ClassificationRow>> {
    let samples = source.positions(session_key).await;
    if samples.is_empty() {
        return Err(Error::NoPositionData(session_key));
    }

    let finals = final_positions(samples);
    let drivers = source.drivers(session_key).await;
    info!(
        session_key,
        classified = finals.len(),
        roster = drivers.len(),
        "Building race classification"
    );

    Ok(classify(&finals, &drivers))
}

/// Last sample per driver, in chronological order of those samples
pub fn final_positions(mut samples: Vec<PositionSample>) -> Vec<PositionSample> {
    samples.sort_by_cached_key(chronological_key);

    let mut last_index: HashMap<DriverNumber, usize> = HashMap::new();
    for (i, sample) in samples.iter().enumerate() {
        last_index.insert(sample.driver_number, i);
    }

    let mut keep: Vec<usize> = last_index.into_values().collect();
    keep.sort_unstable();
    keep.into_iter().map(|i| samples[i].clone()).collect()
}

/// Inner-join final positions with the roster, ordered by position
///
/// Drivers with no sample are left out; samples for drivers missing from the
/// roster are dropped too.
pub fn classify(finals: &[PositionSample], drivers: &[Driver]) -> Vec<ClassificationRow> {
    let mut roster: HashMap<DriverNumber, &Driver> = HashMap::new();
    for driver in drivers {
        roster.entry(driver.driver_number).or_insert(driver);
    }

    let mut rows: Vec<ClassificationRow> = finals
        .iter()
        .filter_map(|sample| {
            roster
                .get(&sample.driver_number)
                .map(|driver| ClassificationRow::for_driver(sample.position, driver, None))
        })
        .collect();

    // Stable: tied positions keep the order of their final samples
    rows.sort_by_key(|row| row.position);
    rows
}

/// Sort key: unparseable stamps first, by raw text; then by instant
///
/// Samples at the same instant compare equal and keep their stream order.
fn chronological_key(sample: &PositionSample) -> (Option<DateTime<Utc>>, String) {
    match parse_timestamp(&sample.date) {
        Some(instant) => (Some(instant), String::new()),
        None => (None, sample.date.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(driver: DriverNumber, position: u32, date: &str) -> PositionSample {
        PositionSample {
            driver_number: driver,
            position,
            date: date.to_string(),
        }
    }

    fn roster() -> Vec<Driver> {
        vec![
            Driver::new(1, "Max Verstappen", "Red Bull Racing"),
            Driver::new(16, "Charles Leclerc", "Ferrari"),
            Driver::new(55, "Carlos Sainz", "Ferrari"),
            Driver::new(44, "Lewis Hamilton", "Mercedes"),
        ]
    }

    #[test]
    fn test_last_sample_wins() {
        let samples = vec![
            sample(16, 1, "2024-03-02T16:30:00+00:00"),
            sample(16, 3, "2024-03-02T15:05:00+00:00"),
            sample(1, 2, "2024-03-02T15:05:00+00:00"),
            sample(1, 1, "2024-03-02T15:40:00+00:00"),
        ];
        let finals = final_positions(samples);
        let by_driver: HashMap<DriverNumber, u32> =
            finals.iter().map(|s| (s.driver_number, s.position)).collect();
        assert_eq!(by_driver[&16], 1);
        assert_eq!(by_driver[&1], 1);
        assert_eq!(finals.len(), 2);
    }

    #[test]
    fn test_earlier_position_three_then_one() {
        let samples = vec![
            sample(55, 3, "2024-03-02T15:00:00.100000+00:00"),
            sample(55, 1, "2024-03-02T16:31:12.900000+00:00"),
        ];
        let finals = final_positions(samples);
        assert_eq!(finals, vec![sample(55, 1, "2024-03-02T16:31:12.900000+00:00")]);
    }

    #[test]
    fn test_mixed_offsets_sorted_by_instant() {
        // 17:00+02:00 is earlier than 15:30Z
        let samples = vec![
            sample(44, 4, "2024-03-02T15:30:00+00:00"),
            sample(44, 6, "2024-03-02T17:00:00+02:00"),
        ];
        assert_eq!(final_positions(samples)[0].position, 4);
    }

    #[test]
    fn test_unparseable_stamps_order_before_parsed() {
        let samples = vec![
            sample(44, 6, "2024-03-02T17:00:00+02:00"),
            sample(44, 9, "2024-03-02 16:00"),
            sample(44, 4, "2024-03-02T15:30:00+00:00"),
            sample(44, 8, "2024-03-02 15:00"),
        ];
        let mut keys: Vec<_> = samples.iter().map(chronological_key).collect();
        keys.sort();
        assert_eq!(keys[0].1, "2024-03-02 15:00");
        assert_eq!(keys[1].1, "2024-03-02 16:00");

        // Every rotation of the input gives the same answer
        for shift in 0..samples.len() {
            let mut rotated = samples.clone();
            rotated.rotate_left(shift);
            assert_eq!(final_positions(rotated)[0].position, 4);
        }
    }

    #[test]
    fn test_same_instant_keeps_stream_order() {
        let samples = vec![
            sample(16, 5, "2024-03-02T16:30:00Z"),
            sample(16, 2, "2024-03-02T16:30:00+00:00"),
        ];
        assert_eq!(final_positions(samples)[0].position, 2);
    }

    #[test]
    fn test_inner_join_drops_drivers_without_samples() {
        let finals = vec![
            sample(16, 2, "2024-03-02T16:30:00+00:00"),
            sample(1, 1, "2024-03-02T16:30:01+00:00"),
            sample(99, 3, "2024-03-02T16:30:02+00:00"),
        ];
        let rows = classify(&finals, &roster());
        let order: Vec<DriverNumber> = rows.iter().map(|r| r.driver_number).collect();
        assert_eq!(order, vec![1, 16]);
        assert!(rows.iter().all(|r| r.best_lap.is_none()));
    }

    #[test]
    fn test_positions_are_verbatim() {
        let finals = vec![
            sample(44, 7, "2024-03-02T16:30:00+00:00"),
            sample(55, 2, "2024-03-02T16:30:01+00:00"),
            sample(1, 2, "2024-03-02T16:30:02+00:00"),
        ];
        let rows = classify(&finals, &roster());
        let positions: Vec<(u32, DriverNumber)> =
            rows.iter().map(|r| (r.position, r.driver_number)).collect();
        assert_eq!(positions, vec![(2, 55), (2, 1), (7, 44)]);
    }
}
