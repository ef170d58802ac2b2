use super::*;

/// Tests the first increment of a fresh bucket.
///
/// Verifies that incrementing a code for a subject with no bucket creates the bucket
/// with a count of one.
///
/// Expected: Ok(1) and a stored record with {code: 1}
#[tokio::test]
async fn creates_bucket_on_first_increment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ActivityBucket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActivityBucketRepository::new(db);
    let subject = Subject::new(10, 20);
    let at = Utc.with_ymd_and_hms(2026, 3, 2, 14, 25, 0).unwrap();

    let count = repo.increment(subject, at, 10).await?;

    assert_eq!(count, 1);
    let record = repo.get(subject, at).await?.unwrap();
    assert_eq!(record.hour, Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap());
    assert_eq!(record.counts, BTreeMap::from([(10u16, 1i64)]));

    Ok(())
}

/// Tests increments within the same hour.
///
/// Verifies that two actions a few minutes apart land in one bucket and that other
/// codes in the bucket are untouched.
///
/// Expected: single bucket with {10: 2, 1: 1}
#[tokio::test]
async fn accumulates_within_same_hour() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ActivityBucket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActivityBucketRepository::new(db);
    let subject = Subject::new(10, 20);
    let at = Utc.with_ymd_and_hms(2026, 3, 2, 14, 5, 0).unwrap();

    repo.increment(subject, at, 10).await?;
    repo.increment(subject, at + TimeDelta::minutes(30), 1).await?;
    let count = repo.increment(subject, at + TimeDelta::minutes(50), 10).await?;

    assert_eq!(count, 2);
    let all = repo.get_all(subject).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].counts, BTreeMap::from([(1u16, 1i64), (10, 2)]));

    Ok(())
}

/// Tests that subjects are isolated.
///
/// Verifies that the same user in two guilds gets two independent buckets.
///
/// Expected: each subject sees only its own count
#[tokio::test]
async fn keeps_guilds_separate() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ActivityBucket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActivityBucketRepository::new(db);
    let at = Utc::now();

    repo.increment(Subject::new(1, 20), at, 10).await?;
    repo.increment(Subject::new(1, 20), at, 10).await?;
    repo.increment(Subject::new(2, 20), at, 10).await?;

    let first = repo.get(Subject::new(1, 20), at).await?.unwrap();
    let second = repo.get(Subject::new(2, 20), at).await?.unwrap();
    assert_eq!(first.counts.get(&10), Some(&2));
    assert_eq!(second.counts.get(&10), Some(&1));

    Ok(())
}
