//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresLinkRequestRepository` - Telegram link handshake rows
//! - `PostgresUserRepository` - Registered users, login is the primary key
//! - `PostgresRoomRepository` - Rooms, members and shop list items
//! - `PostgresInviteRepository` - Single-use room invites

mod invites;
mod link_requests;
mod rooms;
mod users;

pub use invites::PostgresInviteRepository;
pub use link_requests::PostgresLinkRequestRepository;
pub use rooms::PostgresRoomRepository;
pub use users::PostgresUserRepository;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::DomainError;

fn db_error(action: &str, err: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to {action}: {err}"))
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::database(format!("Failed to get {column}: {e}")))
}
