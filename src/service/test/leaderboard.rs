use test_utils::{builder::TestBuilder, factory::leaderboard_score::create_score};

use super::*;
use crate::{
    data::leaderboard::LeaderboardRepository,
    model::{leaderboard::Board, milestone::Milestone},
    service::leaderboard::{LeaderboardCache, LeaderboardService},
};

fn milestones() -> Vec<Milestone> {
    vec![
        Milestone {
            threshold: 500,
            role_id: 111,
        },
        Milestone {
            threshold: 1000,
            role_id: 222,
        },
    ]
}

/// Tests the hourly refresh.
///
/// Verifies ordering, name resolution, and that unresolvable members are skipped.
///
/// Expected: two named entries on HuntTotal, best first
#[tokio::test]
async fn refresh_resolves_and_skips() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_score(db, "hunt_total", GUILD, 1, 10).await?;
    create_score(db, "hunt_total", GUILD, 2, 30).await?;
    create_score(db, "hunt_total", GUILD, 3, 20).await?;

    let directory = FakeDirectory {
        names: HashMap::from([(1, "Ann".to_string()), (2, "Bob".to_string())]),
        ..Default::default()
    };
    let cache = LeaderboardCache::new();

    LeaderboardService::new(db).refresh(&cache, &directory).await?;

    let top = cache.get(Board::HuntTotal).await;
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].display_name, "Bob");
    assert_eq!(top[0].score, 30);
    assert_eq!(top[1].display_name, "Ann");
    assert!(cache.get(Board::EpicTotal).await.is_empty());

    Ok(())
}

/// Tests the weekly snapshot.
///
/// Verifies that milestone counts come from the home guild's role holders, so a member
/// of another tracked guild with a qualifying weekly score is not counted.
///
/// Expected: top three of each weekly board, counts 2 and 1
#[tokio::test]
async fn snapshot_captures_week() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (user, score) in [(1, 1200), (2, 600), (3, 100), (4, 50)] {
        create_score(db, "hunt_weekly", GUILD, user, score).await?;
    }
    create_score(db, "hunt_weekly", GUILD + 1, 9, 900).await?;
    create_score(db, "epic_weekly", GUILD, 5, 4).await?;

    let directory = FakeDirectory {
        holders: HashMap::from([(111, vec![1, 2]), (222, vec![1])]),
        ..Default::default()
    };

    let snapshot = LeaderboardService::new(db)
        .snapshot_week(&milestones(), &directory, Some(GUILD))
        .await?;

    assert_eq!(snapshot.hunt_top.len(), 3);
    assert_eq!(snapshot.hunt_top[0].score, 1200);
    assert_eq!(snapshot.epic_top.len(), 1);
    assert_eq!(
        snapshot.milestone_counts,
        vec![(milestones()[0], 2), (milestones()[1], 1)]
    );
    assert!(directory.revoked().is_empty());

    Ok(())
}

/// Tests the weekly snapshot without a home guild.
///
/// Expected: boards captured, no milestone counts
#[tokio::test]
async fn snapshot_without_home_guild_has_no_counts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_score(db, "hunt_weekly", GUILD, 1, 700).await?;

    let directory = FakeDirectory {
        holders: HashMap::from([(111, vec![1])]),
        ..Default::default()
    };

    let snapshot = LeaderboardService::new(db)
        .snapshot_week(&milestones(), &directory, None)
        .await?;

    assert_eq!(snapshot.hunt_top.len(), 1);
    assert!(snapshot.milestone_counts.is_empty());

    Ok(())
}

/// Tests the weekly reset.
///
/// Verifies that weekly boards are emptied, totals survive, the cache reflects the
/// reset and every milestone holder loses the role even when one revocation fails.
///
/// Expected: weekly boards empty, three revocations, one failure
#[tokio::test]
async fn reset_clears_weekly_and_revokes_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardScore)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_score(db, "hunt_weekly", GUILD, 1, 1200).await?;
    create_score(db, "epic_weekly", GUILD, 1, 3).await?;
    create_score(db, "hunt_total", GUILD, 1, 5000).await?;

    let directory = FakeDirectory {
        names: HashMap::from([(1, "Ann".to_string())]),
        holders: HashMap::from([(111, vec![1, 2, 3]), (222, vec![1])]),
        failing_revocations: HashSet::from([3]),
        ..Default::default()
    };
    let cache = LeaderboardCache::new();
    let service = LeaderboardService::new(db);
    service.refresh(&cache, &directory).await?;
    assert_eq!(cache.get(Board::HuntWeekly).await.len(), 1);

    let report = service
        .reset_week(&cache, &directory, &milestones(), Some(GUILD))
        .await?;

    let repo = LeaderboardRepository::new(db);
    assert!(repo.top(Board::HuntWeekly, 10).await?.is_empty());
    assert!(repo.top(Board::EpicWeekly, 10).await?.is_empty());
    assert_eq!(repo.top(Board::HuntTotal, 10).await?.len(), 1);
    assert!(cache.get(Board::HuntWeekly).await.is_empty());
    assert!(cache.get(Board::EpicWeekly).await.is_empty());
    assert_eq!(cache.get(Board::HuntTotal).await.len(), 1);

    assert_eq!(report.revoked, 3);
    assert_eq!(report.failed, 1);
    assert_eq!(directory.revoked(), vec![(1, 111), (2, 111), (1, 222)]);

    Ok(())
}
