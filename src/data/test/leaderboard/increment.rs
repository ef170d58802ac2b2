use super::*;

/// Tests creating an entry through its first increment.
///
/// Expected: Ok(1) and score Some(1)
#[tokio::test]
async fn creates_entry_at_zero_then_increments() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LeaderboardRepository::new(db);
    let subject = Subject::new(1, 2);

    let score = repo.increment(Board::HuntTotal, subject, 1).await?;

    assert_eq!(score, 1);
    assert_eq!(repo.score(Board::HuntTotal, subject).await?, Some(1));
    assert_eq!(repo.score(Board::HuntWeekly, subject).await?, None);

    Ok(())
}

/// Tests that boards are independent.
///
/// Verifies that incrementing one board for a subject leaves the others alone.
///
/// Expected: HuntWeekly 3, EpicWeekly 1
#[tokio::test]
async fn boards_are_independent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LeaderboardRepository::new(db);
    let subject = Subject::new(1, 2);

    for _ in 0..3 {
        repo.increment(Board::HuntWeekly, subject, 1).await?;
    }
    repo.increment(Board::EpicWeekly, subject, 1).await?;

    assert_eq!(repo.score(Board::HuntWeekly, subject).await?, Some(3));
    assert_eq!(repo.score(Board::EpicWeekly, subject).await?, Some(1));

    Ok(())
}
