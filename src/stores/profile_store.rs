use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::profile;
use crate::types::internal::profile_role::ROLE_HOSPITAL_ADMIN;

/// Data access for the profile directory
pub struct ProfileStore;

impl ProfileStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_profile(
        &self,
        conn: &impl ConnectionTrait,
        profile: profile::ActiveModel,
    ) -> Result<profile::Model, InternalError> {
        profile
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("insert_profile", e))
    }

    pub async fn find_by_user_id(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
    ) -> Result<Option<profile::Model>, InternalError> {
        profile::Entity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_profile_by_user_id", e))
    }

    /// hospital_admin profiles linked to a hospital
    pub async fn find_hospital_admins(
        &self,
        conn: &impl ConnectionTrait,
        hospital_id: &str,
    ) -> Result<Vec<profile::Model>, InternalError> {
        profile::Entity::find()
            .filter(profile::Column::HospitalId.eq(hospital_id))
            .filter(profile::Column::Role.eq(ROLE_HOSPITAL_ADMIN))
            .order_by_asc(profile::Column::CreatedAt)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_hospital_admins", e))
    }

    pub async fn set_email(
        &self,
        conn: &impl ConnectionTrait,
        profile_id: &str,
        email: &str,
    ) -> Result<(), InternalError> {
        profile::ActiveModel {
            id: Set(profile_id.to_owned()),
            email: Set(Some(email.to_owned())),
            ..Default::default()
        }
        .update(conn)
        .await
        .map_err(|e| InternalError::database("update_profile_email", e))?;

        Ok(())
    }

    pub async fn count_by_role(
        &self,
        conn: &impl ConnectionTrait,
        role: &str,
    ) -> Result<u64, InternalError> {
        profile::Entity::find()
            .filter(profile::Column::Role.eq(role))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_profiles_by_role", e))
    }

    pub async fn count_excluding_role(
        &self,
        conn: &impl ConnectionTrait,
        role: &str,
    ) -> Result<u64, InternalError> {
        profile::Entity::find()
            .filter(profile::Column::Role.ne(role))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_profiles_excluding_role", e))
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}
