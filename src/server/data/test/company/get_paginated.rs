use super::*;

/// Tests the active filter and the name search.
///
/// Expected: Ok with one inactive company and one search hit
#[tokio::test]
async fn filters_by_active_and_search() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::company::CompanyFactory::new(db)
        .name("Blue Logistics")
        .build()
        .await?;
    factory::company::CompanyFactory::new(db)
        .name("Red Freight")
        .active(false)
        .build()
        .await?;

    let repo = CompanyRepository::new(db);
    let inactive = repo
        .get_paginated(
            &CompanyFilter {
                is_active: Some(false),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    let search = repo
        .get_paginated(
            &CompanyFilter {
                search: Some("Blue".to_string()),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;

    assert_eq!(inactive.total, 1);
    assert_eq!(inactive.items[0].name, "Red Freight");
    assert_eq!(search.total, 1);
    assert_eq!(search.items[0].name, "Blue Logistics");

    Ok(())
}
