use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "driver")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone: String,
    pub password_hash: Option<String>,
    pub status: String,
    pub verification_status: String,
    pub kyc_step: i32,
    pub date_of_birth: Option<Date>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub national_id_number: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<Date>,
    pub vehicle_type: Option<String>,
    pub vehicle_plate: Option<String>,
    pub kyc_submitted_at: Option<DateTimeUtc>,
    pub rejection_reason: Option<String>,
    pub verified_at: Option<DateTimeUtc>,
    pub verified_by: Option<i32>,
    pub phone_verified_at: Option<DateTimeUtc>,
    pub email_verified_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::driver_document::Entity")]
    DriverDocument,
    #[sea_orm(has_many = "super::driver_match::Entity")]
    DriverMatch,
    #[sea_orm(has_many = "super::driver_verification_log::Entity")]
    DriverVerificationLog,
}

impl Related<super::driver_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverDocument.def()
    }
}

impl Related<super::driver_match::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverMatch.def()
    }
}

impl Related<super::driver_verification_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverVerificationLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
