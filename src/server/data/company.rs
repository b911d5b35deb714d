//! Company data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    company::{Company, CompanyFilter, CompanyParams},
    page::Paginated,
};

pub struct CompanyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompanyRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an active company.
    ///
    /// # Returns
    /// - `Ok(Company)` - The created company
    /// - `Err(DbErr)` - Insert failed (e.g. duplicate email)
    pub async fn create(&self, params: CompanyParams) -> Result<Company, DbErr> {
        let now = Utc::now();
        let company = entity::company::ActiveModel {
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            phone: ActiveValue::Set(params.phone),
            address: ActiveValue::Set(params.address),
            contact_person: ActiveValue::Set(params.contact_person),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Company::from_entity(company))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Company>, DbErr> {
        let company = entity::prelude::Company::find_by_id(id).one(self.db).await?;

        Ok(company.map(Company::from_entity))
    }

    pub async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Company::find().filter(entity::company::Column::Email.eq(email));
        if let Some(id) = exclude_id {
            query = query.filter(entity::company::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets a page of companies ordered by name.
    ///
    /// # Arguments
    /// - `filter` - Optional name/email/contact substring and active flag
    /// - `page` - Zero-based page number
    /// - `per_page` - Number of companies per page
    pub async fn get_paginated(
        &self,
        filter: &CompanyFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Company>, DbErr> {
        let mut query =
            entity::prelude::Company::find().order_by_asc(entity::company::Column::Name);
        if let Some(search) = filter.search.as_deref() {
            query = query.filter(
                Condition::any()
                    .add(entity::company::Column::Name.contains(search))
                    .add(entity::company::Column::Email.contains(search))
                    .add(entity::company::Column::ContactPerson.contains(search)),
            );
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(entity::company::Column::IsActive.eq(is_active));
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let companies = paginator.fetch_page(page).await?;

        Ok(Paginated::new(
            companies.into_iter().map(Company::from_entity).collect(),
            total,
            page,
            per_page,
        ))
    }

    /// Gets every company ordered by id, used for CSV export.
    pub async fn get_all(&self) -> Result<Vec<Company>, DbErr> {
        let companies = entity::prelude::Company::find()
            .order_by_asc(entity::company::Column::Id)
            .all(self.db)
            .await?;

        Ok(companies.into_iter().map(Company::from_entity).collect())
    }

    pub async fn update(&self, id: i32, params: CompanyParams) -> Result<Option<Company>, DbErr> {
        let Some(company) = entity::prelude::Company::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::company::ActiveModel = company.into();
        active.name = ActiveValue::Set(params.name);
        active.email = ActiveValue::Set(params.email);
        active.phone = ActiveValue::Set(params.phone);
        active.address = ActiveValue::Set(params.address);
        active.contact_person = ActiveValue::Set(params.contact_person);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Company::from_entity(active.update(self.db).await?)))
    }

    pub async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<Company>, DbErr> {
        let Some(company) = entity::prelude::Company::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::company::ActiveModel = company.into();
        active.is_active = ActiveValue::Set(is_active);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Company::from_entity(active.update(self.db).await?)))
    }

    /// Deletes a company. Its requests and their matches go with it by cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Company::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
