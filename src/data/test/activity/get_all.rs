use super::*;

/// Tests ordering of stored buckets.
///
/// Verifies that buckets come back oldest hour first regardless of insert order.
///
/// Expected: hours ascending
#[tokio::test]
async fn returns_buckets_oldest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ActivityBucket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActivityBucketRepository::new(db);
    let subject = Subject::new(5, 6);

    ActivityBucketFactory::new(db)
        .subject(5, 6)
        .hours_ago(1)
        .counts(r#"{"10": 1}"#)
        .build()
        .await?;
    ActivityBucketFactory::new(db)
        .subject(5, 6)
        .hours_ago(5)
        .counts(r#"{"10": 2}"#)
        .build()
        .await?;

    let all = repo.get_all(subject).await?;

    assert_eq!(all.len(), 2);
    assert!(all[0].hour < all[1].hour);
    assert_eq!(all[0].counts.get(&10), Some(&2));

    Ok(())
}

/// Tests reading a subject with no activity.
///
/// Expected: Ok(empty)
#[tokio::test]
async fn returns_empty_for_unknown_subject() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ActivityBucket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let all = ActivityBucketRepository::new(db)
        .get_all(Subject::new(1, 1))
        .await?;

    assert!(all.is_empty());

    Ok(())
}

/// Tests that malformed stored JSON is surfaced as an error.
///
/// Verifies that a bucket whose counts column is not a code map fails to parse
/// instead of being silently treated as empty.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn rejects_malformed_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ActivityBucket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ActivityBucketFactory::new(db)
        .subject(7, 8)
        .counts("not json")
        .build()
        .await?;

    let result = ActivityBucketRepository::new(db)
        .get_all(Subject::new(7, 8))
        .await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
