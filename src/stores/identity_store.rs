use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
    sea_query::Expr,
};

use crate::errors::InternalError;
use crate::types::db::user;

/// Fields needed to create a login identity
pub struct NewIdentity {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

/// Data access for login identities (`users` table)
///
/// The username of every identity created here is its email address.
pub struct IdentityStore;

impl IdentityStore {
    pub fn new() -> Self {
        Self
    }

    /// Check whether a username is already taken
    pub async fn username_in_use(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
    ) -> Result<bool, InternalError> {
        let count = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("username_in_use", e))?;

        Ok(count > 0)
    }

    pub async fn create_identity(
        &self,
        conn: &impl ConnectionTrait,
        identity: NewIdentity,
    ) -> Result<user::Model, InternalError> {
        user::ActiveModel {
            id: Set(identity.id),
            username: Set(identity.email.clone()),
            email: Set(identity.email),
            password_hash: Set(identity.password_hash),
            is_staff: Set(false),
            is_superuser: Set(false),
            created_at: Set(identity.created_at),
            updated_at: Set(identity.created_at),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_identity", e))
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find_by_id(user_id.to_owned())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_identity_by_id", e))
    }

    pub async fn find_by_username(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_identity_by_username", e))
    }

    /// Oldest identity carrying this email address, if any
    pub async fn find_by_email(
        &self,
        conn: &impl ConnectionTrait,
        email: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .order_by_asc(user::Column::CreatedAt)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_identity_by_email", e))
    }

    /// Point an identity's login at a new email (username and email together)
    pub async fn update_login_email(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
        email: &str,
        now: i64,
    ) -> Result<(), InternalError> {
        user::ActiveModel {
            id: Set(user_id.to_owned()),
            username: Set(email.to_owned()),
            email: Set(email.to_owned()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(conn)
        .await
        .map_err(|e| InternalError::database("update_identity_email", e))?;

        Ok(())
    }

    /// Replace the password hash only while it still equals `current_hash`
    ///
    /// Returns false when the stored hash no longer matches.
    pub async fn replace_password_hash(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
        current_hash: &str,
        new_hash: String,
        now: i64,
    ) -> Result<bool, InternalError> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(new_hash))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(user_id))
            .filter(user::Column::PasswordHash.eq(current_hash))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("replace_password_hash", e))?;

        Ok(result.rows_affected == 1)
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}
