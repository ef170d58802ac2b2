use test_utils::{builder::TestBuilder, factory::shop_item::create_shop_item_named};

use super::*;
use crate::{
    model::economy::CreateShopItemParam,
    service::economy::{PointsService, ShopService},
};

/// Tests a successful purchase.
///
/// Expected: price deducted, one unit in inventory
#[tokio::test]
async fn buy_deducts_points_and_adds_item() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_economy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_shop_item_named(db, "golden carrot", 4).await?;
    PointsService::new(db).award(1, 10).await?;

    let purchase = ShopService::new(db).buy(1, "Golden Carrot").await?;

    assert_eq!(purchase.remaining_points, 6);
    assert_eq!(purchase.quantity_owned, 1);
    let inventory = ShopService::new(db).inventory(1).await?;
    assert_eq!(inventory[0].item_name, "golden carrot");

    Ok(())
}

/// Tests buying without enough points.
///
/// Verifies the purchase is rejected before any mutation.
///
/// Expected: BadRequest, balance and inventory unchanged
#[tokio::test]
async fn buy_rejects_insufficient_points() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_economy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_shop_item_named(db, "sword", 50).await?;
    PointsService::new(db).award(1, 10).await?;

    let result = ShopService::new(db).buy(1, "sword").await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(PointsService::new(db).balance(1).await?.points, 10);
    assert!(ShopService::new(db).inventory(1).await?.is_empty());

    Ok(())
}

/// Tests buying an unknown item.
///
/// Expected: NotFound
#[tokio::test]
async fn buy_unknown_item_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_economy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ShopService::new(db).buy(1, "nothing").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests catalog validation.
///
/// Expected: BadRequest for zero price and duplicate names
#[tokio::test]
async fn add_item_validates_input() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_economy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let shop = ShopService::new(db);
    shop.add_item(CreateShopItemParam {
        name: "Bow".to_string(),
        price: 3,
    })
    .await?;

    let free = shop
        .add_item(CreateShopItemParam {
            name: "arrow".to_string(),
            price: 0,
        })
        .await;
    let duplicate = shop
        .add_item(CreateShopItemParam {
            name: "bow".to_string(),
            price: 9,
        })
        .await;

    assert!(matches!(free, Err(AppError::BadRequest(_))));
    assert!(matches!(duplicate, Err(AppError::BadRequest(_))));
    assert!(matches!(
        shop.remove_item("arrow").await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests that points cannot go negative.
///
/// Expected: BadRequest and balance unchanged
#[tokio::test]
async fn points_never_go_negative() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PointsBalance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let points = PointsService::new(db);
    points.award(1, 3).await?;

    let result = points.award(1, -5).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(points.balance(1).await?.points, 3);

    Ok(())
}
