use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    model::status::DocumentType,
    server::{
        error::AppError,
        model::driver::{DriverDocument, NewDocumentParams},
    },
};

pub struct DriverDocumentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DriverDocumentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a document row for a file already written to disk.
    pub async fn create(&self, params: NewDocumentParams) -> Result<DriverDocument, AppError> {
        let document = entity::driver_document::ActiveModel {
            driver_id: ActiveValue::Set(params.driver_id),
            document_type: ActiveValue::Set(params.document_type.as_str().to_string()),
            file_path: ActiveValue::Set(params.file_path),
            original_name: ActiveValue::Set(params.original_name),
            ocr_text: ActiveValue::Set(params.ocr_text),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        DriverDocument::from_entity(document)
    }

    /// Gets a driver's documents, oldest first.
    pub async fn get_by_driver(&self, driver_id: i32) -> Result<Vec<DriverDocument>, AppError> {
        entity::prelude::DriverDocument::find()
            .filter(entity::driver_document::Column::DriverId.eq(driver_id))
            .order_by_asc(entity::driver_document::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(DriverDocument::from_entity)
            .collect()
    }

    /// Deletes existing documents of the given types, used before a resubmission.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Stored file paths of the removed rows
    pub async fn delete_by_driver_and_types(
        &self,
        driver_id: i32,
        types: &[DocumentType],
    ) -> Result<Vec<String>, AppError> {
        let type_values: Vec<&str> = types.iter().map(DocumentType::as_str).collect();
        let condition = Condition::all()
            .add(entity::driver_document::Column::DriverId.eq(driver_id))
            .add(entity::driver_document::Column::DocumentType.is_in(type_values));

        let paths = entity::prelude::DriverDocument::find()
            .filter(condition.clone())
            .all(self.db)
            .await?
            .into_iter()
            .map(|d| d.file_path)
            .collect();

        entity::prelude::DriverDocument::delete_many()
            .filter(condition)
            .exec(self.db)
            .await?;

        Ok(paths)
    }
}
