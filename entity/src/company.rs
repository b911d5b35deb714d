use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::company_request::Entity")]
    CompanyRequest,
}

impl Related<super::company_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
