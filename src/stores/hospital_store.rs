use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::hospital;

/// Fields needed to create a hospital
pub struct NewHospital {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: i64,
}

/// Data access for the hospital registry
pub struct HospitalStore;

impl HospitalStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_hospital(
        &self,
        conn: &impl ConnectionTrait,
        new_hospital: NewHospital,
    ) -> Result<hospital::Model, InternalError> {
        hospital::ActiveModel {
            id: Set(new_hospital.id),
            name: Set(new_hospital.name),
            address: Set(new_hospital.address),
            contact_email: Set(new_hospital.contact_email),
            contact_phone: Set(new_hospital.contact_phone),
            active: Set(true),
            created_at: Set(new_hospital.created_at),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_hospital", e))
    }

    pub async fn find_hospital(
        &self,
        conn: &impl ConnectionTrait,
        hospital_id: &str,
    ) -> Result<Option<hospital::Model>, InternalError> {
        hospital::Entity::find_by_id(hospital_id.to_owned())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_hospital", e))
    }

    /// All hospitals, newest first
    pub async fn list_hospitals(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<hospital::Model>, InternalError> {
        hospital::Entity::find()
            .order_by_desc(hospital::Column::CreatedAt)
            .order_by_desc(hospital::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_hospitals", e))
    }

    pub async fn update_hospital(
        &self,
        conn: &impl ConnectionTrait,
        hospital: hospital::ActiveModel,
    ) -> Result<hospital::Model, InternalError> {
        hospital
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_hospital", e))
    }

    pub async fn count_hospitals(&self, conn: &impl ConnectionTrait) -> Result<u64, InternalError> {
        hospital::Entity::find()
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_hospitals", e))
    }
}

impl Default for HospitalStore {
    fn default() -> Self {
        Self::new()
    }
}
