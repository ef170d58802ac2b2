use super::*;

/// Tests rank by descending score.
///
/// Expected: highest score is rank 1
#[tokio::test]
async fn ranks_highest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_score(db, "hunt_total", 1, 10, 5).await?;
    create_score(db, "hunt_total", 1, 11, 50).await?;
    create_score(db, "hunt_total", 1, 12, 20).await?;

    let repo = LeaderboardRepository::new(db);

    assert_eq!(repo.rank(Board::HuntTotal, Subject::new(1, 11)).await?, Some(1));
    assert_eq!(repo.rank(Board::HuntTotal, Subject::new(1, 12)).await?, Some(2));
    assert_eq!(repo.rank(Board::HuntTotal, Subject::new(1, 10)).await?, Some(3));

    Ok(())
}

/// Tests tie breaking.
///
/// Verifies that equal scores are ranked by insertion order.
///
/// Expected: earlier entry ranks ahead
#[tokio::test]
async fn ties_rank_by_insertion() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_score(db, "epic_total", 1, 20, 7).await?;
    create_score(db, "epic_total", 1, 21, 7).await?;

    let repo = LeaderboardRepository::new(db);

    assert_eq!(repo.rank(Board::EpicTotal, Subject::new(1, 20)).await?, Some(1));
    assert_eq!(repo.rank(Board::EpicTotal, Subject::new(1, 21)).await?, Some(2));

    Ok(())
}

/// Tests ranking a subject absent from the board.
///
/// Expected: Ok(None)
#[tokio::test]
async fn absent_subject_has_no_rank() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_score(db, "hunt_total", 1, 10, 5).await?;

    let rank = LeaderboardRepository::new(db)
        .rank(Board::HuntTotal, Subject::new(1, 99))
        .await?;

    assert_eq!(rank, None);

    Ok(())
}
