//! PostgreSQL implementation of LinkRequestRepository.
//!
//! Every state transition is a single conditional statement, so the row
//! itself serialises concurrent confirm, cancel and complete calls.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, LinkToken, Timestamp};
use crate::domain::linkage::{LinkRequest, LinkState, TelegramIdentity};
use crate::ports::LinkRequestRepository;

use super::{db_error, get};

#[derive(Clone)]
pub struct PostgresLinkRequestRepository {
    pool: PgPool,
}

impl PostgresLinkRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRequestRepository for PostgresLinkRequestRepository {
    async fn insert(&self, request: &LinkRequest) -> Result<(), DomainError> {
        let identity = request.identity();
        sqlx::query(
            r#"
            INSERT INTO telegram_link_requests (
                token, confirmed, telegram_user_id, telegram_chat_id, created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(request.token().as_uuid())
        .bind(request.is_confirmed())
        .bind(identity.map(|i| i.user_id))
        .bind(identity.map(|i| i.chat_id))
        .bind(request.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert link request", e))?;

        Ok(())
    }

    async fn find(&self, token: &LinkToken) -> Result<Option<LinkRequest>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT token, confirmed, telegram_user_id, telegram_chat_id, created_at
            FROM telegram_link_requests
            WHERE token = $1
            "#,
        )
        .bind(token.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch link request", e))?;

        row.map(row_to_link_request).transpose()
    }

    async fn confirm(
        &self,
        token: &LinkToken,
        identity: TelegramIdentity,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE telegram_link_requests
            SET confirmed = TRUE, telegram_user_id = $2, telegram_chat_id = $3
            WHERE token = $1
            "#,
        )
        .bind(token.as_uuid())
        .bind(identity.user_id)
        .bind(identity.chat_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("confirm link request", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn cancel_confirmed(
        &self,
        token: &LinkToken,
    ) -> Result<Option<TelegramIdentity>, DomainError> {
        // The CTE captures the identity before the update clears it
        let row = sqlx::query(
            r#"
            WITH previous AS (
                SELECT token, telegram_user_id, telegram_chat_id
                FROM telegram_link_requests
                WHERE token = $1 AND confirmed
                FOR UPDATE
            )
            UPDATE telegram_link_requests r
            SET confirmed = FALSE, telegram_user_id = NULL, telegram_chat_id = NULL
            FROM previous
            WHERE r.token = previous.token
            RETURNING previous.telegram_user_id, previous.telegram_chat_id
            "#,
        )
        .bind(token.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("cancel link request", e))?;

        match row {
            Some(row) => {
                let user_id: i64 = get(&row, "telegram_user_id")?;
                let chat_id: i64 = get(&row, "telegram_chat_id")?;
                Ok(Some(TelegramIdentity::new(user_id, chat_id)))
            }
            None => Ok(None),
        }
    }

    async fn consume_confirmed(
        &self,
        token: &LinkToken,
    ) -> Result<Option<LinkRequest>, DomainError> {
        let row = sqlx::query(
            r#"
            DELETE FROM telegram_link_requests
            WHERE token = $1 AND confirmed
            RETURNING token, confirmed, telegram_user_id, telegram_chat_id, created_at
            "#,
        )
        .bind(token.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("consume link request", e))?;

        row.map(row_to_link_request).transpose()
    }

    async fn delete_created_before(&self, cutoff: Timestamp) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM telegram_link_requests WHERE created_at < $1")
            .bind(cutoff.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("purge link requests", e))?;

        Ok(result.rows_affected())
    }
}

fn row_to_link_request(row: sqlx::postgres::PgRow) -> Result<LinkRequest, DomainError> {
    let token: uuid::Uuid = get(&row, "token")?;
    let confirmed: bool = get(&row, "confirmed")?;
    let user_id: Option<i64> = get(&row, "telegram_user_id")?;
    let chat_id: Option<i64> = get(&row, "telegram_chat_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;

    let state = match (confirmed, user_id, chat_id) {
        (true, Some(user_id), Some(chat_id)) => {
            LinkState::Confirmed(TelegramIdentity::new(user_id, chat_id))
        }
        (true, _, _) => {
            return Err(DomainError::database(format!(
                "confirmed link request {token} has no telegram identity"
            )))
        }
        (false, _, _) => LinkState::Requested,
    };

    Ok(LinkRequest::reconstitute(
        LinkToken::from_uuid(token),
        state,
        Timestamp::from_datetime(created_at),
    ))
}
