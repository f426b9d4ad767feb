use std::marker::PhantomData;

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::InternalError;
use crate::resources::Resource;

/// Generic table access for a [`Resource`]
pub struct RecordStore<R: Resource> {
    _resource: PhantomData<R>,
}

impl<R: Resource> RecordStore<R> {
    pub fn new() -> Self {
        Self {
            _resource: PhantomData,
        }
    }

    /// All rows, newest first
    pub async fn list(&self, conn: &impl ConnectionTrait) -> Result<Vec<R::Model>, InternalError> {
        R::Entity::find()
            .order_by_desc(R::created_column())
            .all(conn)
            .await
            .map_err(|e| InternalError::database(&format!("list_{}", R::ENTITY_NAME), e))
    }

    pub async fn find(
        &self,
        conn: &impl ConnectionTrait,
        id: &str,
    ) -> Result<Option<R::Model>, InternalError> {
        R::Entity::find()
            .filter(R::id_column().eq(id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database(&format!("find_{}", R::ENTITY_NAME), e))
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        record: R::ActiveModel,
    ) -> Result<R::Model, InternalError> {
        record
            .insert(conn)
            .await
            .map_err(|e| InternalError::database(&format!("insert_{}", R::ENTITY_NAME), e))
    }

    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        record: R::ActiveModel,
    ) -> Result<R::Model, InternalError> {
        record
            .update(conn)
            .await
            .map_err(|e| InternalError::database(&format!("update_{}", R::ENTITY_NAME), e))
    }

    /// Returns false when no row had this id
    pub async fn delete(&self, conn: &impl ConnectionTrait, id: &str) -> Result<bool, InternalError> {
        let result = R::Entity::delete_many()
            .filter(R::id_column().eq(id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database(&format!("delete_{}", R::ENTITY_NAME), e))?;

        Ok(result.rows_affected > 0)
    }
}

impl<R: Resource> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}
