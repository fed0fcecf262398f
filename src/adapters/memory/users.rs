//! In-memory user store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Login};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Login, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(login).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.login) {
            return Err(DomainError::conflict(user.login.as_str()));
        }
        users.insert(user.login.clone(), user.clone());
        Ok(())
    }

    async fn delete(&self, login: &Login) -> Result<(), DomainError> {
        self.users.write().await.remove(login);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::linkage::TelegramIdentity;

    #[tokio::test]
    async fn duplicate_login_is_a_conflict() {
        let repo = InMemoryUserRepository::new();
        let user = User::register(Login::new("alice").unwrap(), "pw", TelegramIdentity::new(1, 1));
        repo.insert(&user).await.unwrap();

        let err = repo.insert(&user).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn deleted_login_can_register_again() {
        let repo = InMemoryUserRepository::new();
        let login = Login::new("alice").unwrap();
        let user = User::register(login.clone(), "pw", TelegramIdentity::new(1, 1));
        repo.insert(&user).await.unwrap();

        repo.delete(&login).await.unwrap();
        repo.delete(&login).await.unwrap();

        assert!(repo.find_by_login(&login).await.unwrap().is_none());
        repo.insert(&user).await.unwrap();
    }
}
