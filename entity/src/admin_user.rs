use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::admin_user_role::Entity")]
    AdminUserRole,
}

impl Related<super::admin_user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminUserRole.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::admin_user_role::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::admin_user_role::Relation::AdminUser.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
