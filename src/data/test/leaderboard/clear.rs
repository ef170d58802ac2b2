use super::*;

/// Tests clearing a weekly board.
///
/// Verifies that only the cleared board loses its entries.
///
/// Expected: HuntWeekly empty, HuntTotal intact
#[tokio::test]
async fn clears_only_target_board() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_score(db, "hunt_weekly", 1, 10, 10).await?;
    create_score(db, "hunt_weekly", 1, 11, 20).await?;
    create_score(db, "hunt_total", 1, 10, 10).await?;

    let repo = LeaderboardRepository::new(db);
    let removed = repo.clear(Board::HuntWeekly).await?;

    assert_eq!(removed, 2);
    assert!(repo.top(Board::HuntWeekly, 10).await?.is_empty());
    assert_eq!(repo.top(Board::HuntTotal, 10).await?.len(), 1);

    Ok(())
}

/// Tests removing a subject from every board.
///
/// Expected: subject gone from both boards, other subject intact
#[tokio::test]
async fn removes_subject_everywhere() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_score(db, "hunt_total", 1, 10, 10).await?;
    create_score(db, "epic_weekly", 1, 10, 2).await?;
    create_score(db, "hunt_total", 1, 11, 3).await?;

    let repo = LeaderboardRepository::new(db);
    let removed = repo.remove_subject(Subject::new(1, 10)).await?;

    assert_eq!(removed, 2);
    assert_eq!(repo.score(Board::HuntTotal, Subject::new(1, 10)).await?, None);
    assert_eq!(repo.score(Board::HuntTotal, Subject::new(1, 11)).await?, Some(3));

    Ok(())
}
