use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::types::db::refresh_token;

/// Persistence for issued refresh tokens
///
/// Only HMAC digests are stored; the plaintext token never touches the database.
pub struct AuthenticationStore {}

impl AuthenticationStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn save_refresh_token_for_user(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
        token_hash: &str,
        created_at: i64,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        let new_token = refresh_token::ActiveModel {
            token_hash: Set(token_hash.to_owned()),
            user_id: Set(user_id.to_owned()),
            expires_at: Set(expires_at),
            created_at: Set(created_at),
        };

        new_token
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("insert_refresh_token", e))?;

        Ok(())
    }

    /// Owner of an unexpired refresh token, if the digest is known
    pub async fn find_valid_refresh_token(
        &self,
        conn: &impl ConnectionTrait,
        token_hash: &str,
        now: i64,
    ) -> Result<Option<String>, InternalError> {
        let token = refresh_token::Entity::find_by_id(token_hash.to_owned())
            .filter(refresh_token::Column::ExpiresAt.gt(now))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_refresh_token", e))?;

        Ok(token.map(|t| t.user_id))
    }

    /// Drop every refresh token issued to a user; returns how many were removed
    pub async fn revoke_all_for_user(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
    ) -> Result<u64, InternalError> {
        let result = refresh_token::Entity::delete_many()
            .filter(refresh_token::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("revoke_refresh_tokens", e))?;

        Ok(result.rows_affected)
    }
}

impl Default for AuthenticationStore {
    fn default() -> Self {
        Self::new()
    }
}
