//! Hunt cadence tracking used to spot suspiciously regular (scripted) hunting.
//!
//! Every confirmed hunt appends the seconds since the user's previous hunt. Every
//! [`CADENCE_CHECK_EVERY`]th hunt the last [`CADENCE_SAMPLE`] deltas are compared pairwise;
//! if more than [`CADENCE_FLAG_ABOVE`] consecutive pairs differ by at most
//! [`CADENCE_TOLERANCE`], the report is flagged as suspicious.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::cadence::HuntCadenceRepository,
    error::AppError,
    model::cadence::{
        CadenceReport, CADENCE_CHECK_EVERY, CADENCE_SAMPLE, CADENCE_TOLERANCE,
    },
};

/// Stored history is capped; only the tail is ever inspected.
const MAX_STORED_DELTAS: usize = 50;

/// Compares the last deltas pairwise.
pub fn analyze(user_id: u64, deltas: &[f64]) -> CadenceReport {
    let start = deltas.len().saturating_sub(CADENCE_SAMPLE);
    let sample = &deltas[start..];

    let mut percent_deltas = Vec::new();
    let mut within_tolerance = 0;

    if let Some((first, rest)) = sample.split_first() {
        let mut previous = *first;
        for &value in rest {
            let percent = if previous == 0.0 {
                if value == 0.0 { 0.0 } else { 1.0 }
            } else {
                (value - previous) / previous
            };

            if percent.abs() <= CADENCE_TOLERANCE {
                within_tolerance += 1;
            }
            percent_deltas.push((percent * 1000.0).round() / 1000.0);
            previous = value;
        }
    }

    CadenceReport {
        user_id,
        percent_deltas,
        within_tolerance,
    }
}

pub struct CadenceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CadenceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a confirmed hunt at `at`.
    ///
    /// # Returns
    /// - `Ok(Some(CadenceReport))` - This hunt triggered a check
    /// - `Ok(None)` - First hunt seen, or not a check hunt
    pub async fn record_hunt(
        &self,
        user_id: u64,
        at: DateTime<Utc>,
    ) -> Result<Option<CadenceReport>, AppError> {
        let repo = HuntCadenceRepository::new(self.db);

        let Some(mut cadence) = repo.get(user_id).await? else {
            repo.save(user_id, &[], at, 0).await?;
            return Ok(None);
        };

        let delta = (at - cadence.last_hunt_at).num_milliseconds() as f64 / 1000.0;
        cadence.deltas.push((delta * 100.0).round() / 100.0);
        if cadence.deltas.len() > MAX_STORED_DELTAS {
            let excess = cadence.deltas.len() - MAX_STORED_DELTAS;
            cadence.deltas.drain(..excess);
        }
        cadence.hunt_count += 1;

        let report = (cadence.hunt_count % CADENCE_CHECK_EVERY == 0)
            .then(|| analyze(user_id, &cadence.deltas));

        repo.save(user_id, &cadence.deltas, at, cadence.hunt_count)
            .await?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use test_utils::builder::TestBuilder;

    /// Tests a perfectly regular history.
    ///
    /// Expected: all nine pairs within tolerance, flagged
    #[test]
    fn flags_regular_intervals() {
        let deltas = vec![60.0; 10];

        let report = analyze(1, &deltas);

        assert_eq!(report.percent_deltas.len(), 9);
        assert_eq!(report.within_tolerance, 9);
        assert!(report.is_suspicious());
    }

    /// Tests a human-looking history.
    ///
    /// Expected: not flagged
    #[test]
    fn irregular_intervals_pass() {
        let deltas = [61.0, 75.0, 62.0, 90.0, 64.0, 120.0, 61.5, 70.0, 95.0, 60.2];

        let report = analyze(1, &deltas);

        assert!(!report.is_suspicious());
    }

    /// Tests that only the tail of a long history is inspected.
    ///
    /// Expected: nine comparisons regardless of history length
    #[test]
    fn inspects_last_sample_only() {
        let mut deltas = vec![5.0, 500.0, 5.0, 500.0];
        deltas.extend(std::iter::repeat(60.0).take(10));

        let report = analyze(1, &deltas);

        assert_eq!(report.percent_deltas.len(), 9);
        assert!(report.is_suspicious());
    }

    /// Tests the check cadence through the store.
    ///
    /// Verifies that the first hunt only seeds the history and that the tenth recorded
    /// delta produces a report.
    ///
    /// Expected: reports only on the tenth interval
    #[tokio::test]
    async fn reports_every_tenth_hunt() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::HuntCadence)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = CadenceService::new(db);
        let start = Utc::now();

        assert!(service.record_hunt(3, start).await?.is_none());
        for i in 1..10 {
            let at = start + TimeDelta::seconds(61 * i);
            assert!(service.record_hunt(3, at).await?.is_none());
        }

        let report = service
            .record_hunt(3, start + TimeDelta::seconds(610))
            .await?
            .unwrap();

        assert!(report.is_suspicious());

        Ok(())
    }
}
