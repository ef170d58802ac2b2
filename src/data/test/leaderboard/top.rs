use super::*;

/// Tests reading the top of a board.
///
/// Verifies ordering, the limit and that other boards are excluded.
///
/// Expected: two entries, 30 then 20
#[tokio::test]
async fn returns_limited_descending_entries() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_score(db, "hunt_weekly", 1, 10, 10).await?;
    create_score(db, "hunt_weekly", 1, 11, 30).await?;
    create_score(db, "hunt_weekly", 1, 12, 20).await?;
    create_score(db, "hunt_total", 1, 13, 999).await?;

    let top = LeaderboardRepository::new(db)
        .top(Board::HuntWeekly, 2)
        .await?;

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].subject, Subject::new(1, 11));
    assert_eq!(top[0].score, 30);
    assert_eq!(top[1].score, 20);

    Ok(())
}
