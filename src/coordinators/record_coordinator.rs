use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection};

use crate::AppData;
use crate::errors::InternalError;
use crate::resources::Resource;
use crate::stores::RecordStore;
use crate::types::internal::context::RequestContext;

/// Pass-through CRUD for a table-backed resource
pub struct RecordCoordinator<R: Resource> {
    db: DatabaseConnection,
    store: RecordStore<R>,
}

impl<R: Resource> RecordCoordinator<R> {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            store: RecordStore::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<R::Model>, InternalError> {
        self.store.list(&self.db).await
    }

    pub async fn get(&self, id: &str) -> Result<R::Model, InternalError> {
        self.store
            .find(&self.db, id)
            .await?
            .ok_or_else(|| InternalError::not_found(R::ENTITY_NAME, id))
    }

    pub async fn create(&self, ctx: &RequestContext, request: R::Request) -> Result<R::Model, InternalError> {
        let record = R::create(request, Utc::now())?;
        let model = self.store.insert(&self.db, record).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            "{} created",
            R::ENTITY_NAME
        );

        Ok(model)
    }

    /// Full update (PUT)
    pub async fn replace(
        &self,
        ctx: &RequestContext,
        id: &str,
        request: R::Request,
    ) -> Result<R::Model, InternalError> {
        let existing = self.get(id).await?;
        let record = R::replace(existing.clone(), request)?;
        self.save(ctx, id, existing, record).await
    }

    /// Partial update (PATCH)
    pub async fn patch(&self, ctx: &RequestContext, id: &str, patch: R::Patch) -> Result<R::Model, InternalError> {
        let existing = self.get(id).await?;
        let record = R::patch(existing.clone(), patch)?;
        self.save(ctx, id, existing, record).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), InternalError> {
        if !self.store.delete(&self.db, id).await? {
            return Err(InternalError::not_found(R::ENTITY_NAME, id));
        }

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            "{} {} deleted",
            R::ENTITY_NAME,
            id
        );

        Ok(())
    }

    async fn save(
        &self,
        ctx: &RequestContext,
        id: &str,
        existing: R::Model,
        record: R::ActiveModel,
    ) -> Result<R::Model, InternalError> {
        if !record.is_changed() {
            return Ok(existing);
        }

        let model = self.store.update(&self.db, record).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            "{} {} updated",
            R::ENTITY_NAME,
            id
        );

        Ok(model)
    }
}
