use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "driver_match")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub driver_id: i32,
    pub company_request_id: i32,
    pub status: String,
    pub auto_matched: bool,
    pub matched_by: Option<i32>,
    pub responded_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::driver::Entity",
        from = "Column::DriverId",
        to = "super::driver::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Driver,
    #[sea_orm(
        belongs_to = "super::company_request::Entity",
        from = "Column::CompanyRequestId",
        to = "super::company_request::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CompanyRequest,
}

impl Related<super::driver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Driver.def()
    }
}

impl Related<super::company_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
