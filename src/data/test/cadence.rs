use chrono::Utc;
use test_utils::builder::TestBuilder;

use crate::{data::cadence::HuntCadenceRepository, error::AppError};

/// Tests saving and reloading a cadence history.
///
/// Verifies the JSON delta list survives the round trip and a second save replaces it.
///
/// Expected: latest deltas and hunt count returned
#[tokio::test]
async fn saves_and_replaces_history() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::HuntCadence)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = HuntCadenceRepository::new(db);
    let now = Utc::now();

    assert!(repo.get(9).await?.is_none());

    repo.save(9, &[61.0, 60.5], now, 3).await?;
    repo.save(9, &[61.0, 60.5, 62.25], now, 4).await?;

    let cadence = repo.get(9).await?.unwrap();
    assert_eq!(cadence.deltas, vec![61.0, 60.5, 62.25]);
    assert_eq!(cadence.hunt_count, 4);

    Ok(())
}
