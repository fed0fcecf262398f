//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Login};
use crate::domain::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, DomainError>;

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the login is already registered
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, user: &User) -> Result<(), DomainError>;

    /// Remove a user. Missing logins are not an error.
    ///
    /// Used to undo a registration whose later steps failed.
    async fn delete(&self, login: &Login) -> Result<(), DomainError>;
}
