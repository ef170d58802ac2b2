use super::*;

/// Tests deleting a subject's buckets.
///
/// Verifies that only the target subject's rows are removed.
///
/// Expected: Ok(2), other subject untouched
#[tokio::test]
async fn deletes_only_target_subject() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ActivityBucket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActivityBucketRepository::new(db);
    let target = Subject::new(1, 2);
    let other = Subject::new(1, 3);
    let now = Utc::now();

    repo.increment(target, now, 10).await?;
    repo.increment(target, now - TimeDelta::hours(2), 10).await?;
    repo.increment(other, now, 10).await?;

    let removed = repo.delete_all(target).await?;

    assert_eq!(removed, 2);
    assert!(repo.get_all(target).await?.is_empty());
    assert_eq!(repo.get_all(other).await?.len(), 1);

    Ok(())
}
