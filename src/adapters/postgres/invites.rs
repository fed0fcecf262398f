//! PostgreSQL implementation of InviteRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, RoomId};
use crate::domain::room::{InviteCode, RoomInvite};
use crate::ports::InviteRepository;

use super::{db_error, get};

#[derive(Clone)]
pub struct PostgresInviteRepository {
    pool: PgPool,
}

impl PostgresInviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteRepository for PostgresInviteRepository {
    async fn insert(&self, invite: &RoomInvite) -> Result<(), DomainError> {
        let result = sqlx::query("INSERT INTO room_invites (code, room_id) VALUES ($1, $2)")
            .bind(invite.code.as_str())
            .bind(invite.room_id.as_uuid())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                DomainError::conflict(format!("Invite code collision: {}", invite.code)),
            ),
            Err(e) => Err(db_error("insert invite", e)),
        }
    }

    async fn take(&self, code: &InviteCode) -> Result<Option<RoomInvite>, DomainError> {
        let row = sqlx::query("DELETE FROM room_invites WHERE code = $1 RETURNING room_id")
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("take invite", e))?;

        match row {
            Some(row) => {
                let room_id: uuid::Uuid = get(&row, "room_id")?;
                Ok(Some(RoomInvite {
                    code: code.clone(),
                    room_id: RoomId::from_uuid(room_id),
                }))
            }
            None => Ok(None),
        }
    }
}
