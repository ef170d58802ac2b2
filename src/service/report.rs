//! Read-only activity summaries.
//!
//! Summaries scan every stored bucket for a subject and split the counts into an
//! all-time total and a recent window. A bucket is in the window when its hour started
//! no more than `window_hours` whole hours before `now`. Nothing here writes, so calling
//! a summary twice without intervening activity yields the same result.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::{activity::ActivityBucketRepository, item_drop::ItemDropRepository},
    error::AppError,
    model::{
        action::TrackedAction,
        activity::{clamp_window, sorted_desc, ActivitySummary, ClassSummary, DropSummary, Subject},
    },
};

fn in_window(hour: DateTime<Utc>, now: DateTime<Utc>, window_hours: i64) -> bool {
    (now - hour).num_hours() <= window_hours
}

#[derive(Default)]
struct ClassTotals {
    all_time: BTreeMap<String, i64>,
    recent: BTreeMap<String, i64>,
}

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Summarises a subject's tracked actions per class.
    ///
    /// # Arguments
    /// - `subject` - Guild member to summarise
    /// - `window_hours` - Recent window, clamped to 1..=48
    /// - `now` - Reference time for the window
    ///
    /// # Returns
    /// - `Ok(ActivitySummary)` - Classes with at least one recorded action
    /// - `Err(AppError)` - Database error or malformed stored record
    pub async fn summarize(
        &self,
        subject: Subject,
        window_hours: i64,
        now: DateTime<Utc>,
    ) -> Result<ActivitySummary, AppError> {
        let window_hours = clamp_window(window_hours);
        let records = ActivityBucketRepository::new(self.db).get_all(subject).await?;

        let mut totals: BTreeMap<_, ClassTotals> = BTreeMap::new();
        for record in records {
            let recent = in_window(record.hour, now, window_hours);

            for (code, count) in record.counts {
                let Some(action) = TrackedAction::from_code(code) else {
                    tracing::debug!("Skipping unknown action code {} for {:?}", code, subject);
                    continue;
                };
                if count <= 0 {
                    continue;
                }

                let class = totals.entry(action.class()).or_default();
                *class.all_time.entry(action.label().to_string()).or_insert(0) += count;
                if recent {
                    *class.recent.entry(action.label().to_string()).or_insert(0) += count;
                }
            }
        }

        Ok(ActivitySummary {
            window_hours,
            classes: totals
                .into_iter()
                .map(|(class, totals)| {
                    (
                        class,
                        ClassSummary {
                            all_time: sorted_desc(totals.all_time),
                            recent: sorted_desc(totals.recent),
                        },
                    )
                })
                .collect(),
        })
    }

    /// Summarises a subject's scraped item drops.
    pub async fn summarize_drops(
        &self,
        subject: Subject,
        window_hours: i64,
        now: DateTime<Utc>,
    ) -> Result<DropSummary, AppError> {
        let window_hours = clamp_window(window_hours);
        let rows = ItemDropRepository::new(self.db).get_all(subject).await?;

        let mut all_time = BTreeMap::new();
        let mut recent = BTreeMap::new();
        for row in rows {
            if in_window(row.hour, now, window_hours) {
                *recent.entry(row.item.clone()).or_insert(0) += row.count;
            }
            *all_time.entry(row.item).or_insert(0) += row.count;
        }

        Ok(DropSummary {
            window_hours,
            all_time: sorted_desc(all_time),
            recent: sorted_desc(recent),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::action::ActionClass;
    use chrono::{TimeDelta, TimeZone};
    use test_utils::{builder::TestBuilder, factory::activity_bucket::ActivityBucketFactory};

    /// Tests the all-time and window split.
    ///
    /// Verifies that a bucket 30 hours old counts toward all-time but not a 12 hour
    /// window, and that joint and individual codes land in separate classes.
    ///
    /// Expected: individual hunt 5 all-time, 2 recent; joint class separate
    #[tokio::test]
    async fn splits_all_time_and_window() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::ActivityBucket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let now = Utc.with_ymd_and_hms(2026, 3, 4, 12, 30, 0).unwrap();
        ActivityBucketFactory::new(db)
            .subject(1, 2)
            .hour(Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap())
            .counts(r#"{"10": 2, "1": 1}"#)
            .build()
            .await?;
        ActivityBucketFactory::new(db)
            .subject(1, 2)
            .hour(Utc.with_ymd_and_hms(2026, 3, 3, 6, 0, 0).unwrap())
            .counts(r#"{"10": 3}"#)
            .build()
            .await?;

        let summary = ReportService::new(db)
            .summarize(Subject::new(1, 2), 12, now)
            .await?;

        let individual = summary.class(ActionClass::Individual).unwrap();
        assert_eq!(individual.all_time, vec![("hunt".to_string(), 5)]);
        assert_eq!(individual.recent, vec![("hunt".to_string(), 2)]);
        assert_eq!(
            summary.class(ActionClass::Joint).unwrap().all_time,
            vec![("hunt together".to_string(), 1)]
        );
        assert!(summary.class(ActionClass::Epic).is_none());

        Ok(())
    }

    /// Tests the window boundary.
    ///
    /// Expected: a bucket exactly `window` hours old is included, one more is not
    #[tokio::test]
    async fn window_edge_is_inclusive() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::ActivityBucket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let now = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        ActivityBucketFactory::new(db)
            .subject(1, 2)
            .hour(now - TimeDelta::hours(1))
            .counts(r#"{"12": 1}"#)
            .build()
            .await?;
        ActivityBucketFactory::new(db)
            .subject(1, 2)
            .hour(now - TimeDelta::hours(2))
            .counts(r#"{"12": 4}"#)
            .build()
            .await?;

        let summary = ReportService::new(db)
            .summarize(Subject::new(1, 2), 0, now)
            .await?;

        assert_eq!(summary.window_hours, 1);
        let individual = summary.class(ActionClass::Individual).unwrap();
        assert_eq!(individual.recent, vec![("hunt h".to_string(), 1)]);
        assert_eq!(individual.all_time, vec![("hunt h".to_string(), 5)]);

        Ok(())
    }

    /// Tests that summaries are pure reads.
    ///
    /// Expected: two calls return identical summaries
    #[tokio::test]
    async fn summarize_is_idempotent() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::ActivityBucket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        ActivityBucketFactory::new(db)
            .subject(1, 2)
            .counts(r#"{"10": 2, "101": 1, "999": 4}"#)
            .build()
            .await?;

        let service = ReportService::new(db);
        let now = Utc::now();
        let first = service.summarize(Subject::new(1, 2), 1000, now).await?;
        let second = service.summarize(Subject::new(1, 2), 1000, now).await?;

        assert_eq!(first, second);
        assert_eq!(first.window_hours, 48);
        assert_eq!(first.classes.len(), 2);

        Ok(())
    }
}
