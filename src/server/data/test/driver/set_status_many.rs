use super::*;

/// Tests the bulk status update and bulk delete.
///
/// Expected: Ok with two drivers suspended, then one deleted
#[tokio::test]
async fn updates_and_deletes_selected_drivers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_driver(db).await?;
    let second = factory::create_driver(db).await?;
    let untouched = factory::create_driver(db).await?;

    let repo = DriverRepository::new(db);

    let affected = repo
        .set_status_many(&[first.id, second.id, 999], DriverStatus::Suspended)
        .await?;
    assert_eq!(affected, 2);
    assert_eq!(
        repo.find_by_id(first.id).await?.unwrap().status,
        DriverStatus::Suspended
    );
    assert_eq!(
        repo.find_by_id(untouched.id).await?.unwrap().status,
        DriverStatus::Active
    );

    assert_eq!(repo.delete_many(&[second.id]).await?, 1);
    assert!(repo.find_by_id(second.id).await?.is_none());
    assert_eq!(repo.set_status_many(&[], DriverStatus::Active).await?, 0);

    Ok(())
}
