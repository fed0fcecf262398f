//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, Login};
use crate::domain::linkage::TelegramIdentity;
use crate::domain::user::{Credential, User};
use crate::ports::UserRepository;

use super::{db_error, get};

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT login, password_hash, salt, telegram_user_id, telegram_chat_id
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch user", e))?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (login, password_hash, salt, telegram_user_id, telegram_chat_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.login.as_str())
        .bind(user.credential.hash())
        .bind(user.credential.salt())
        .bind(user.telegram.user_id)
        .bind(user.telegram.chat_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                DomainError::conflict(format!("Login already taken: {}", user.login)),
            ),
            Err(e) => Err(db_error("insert user", e)),
        }
    }

    async fn delete(&self, login: &Login) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE login = $1")
            .bind(login.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete user", e))?;
        Ok(())
    }
}

fn row_to_user(row: sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let login: String = get(&row, "login")?;
    let hash: String = get(&row, "password_hash")?;
    let salt: String = get(&row, "salt")?;
    let user_id: i64 = get(&row, "telegram_user_id")?;
    let chat_id: i64 = get(&row, "telegram_chat_id")?;

    let login = Login::new(login)
        .map_err(|e| DomainError::database(format!("stored login is invalid: {e}")))?;

    Ok(User {
        login,
        credential: Credential::from_parts(hash, salt),
        telegram: TelegramIdentity::new(user_id, chat_id),
    })
}
