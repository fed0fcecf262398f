//! CompleteRegistrationHandler - turns a confirmed linkage into an account.

use std::sync::Arc;

use crate::domain::foundation::{LinkToken, Login};
use crate::domain::linkage::{LinkRequest, LinkageError};
use crate::domain::room::Room;
use crate::domain::user::User;
use crate::ports::{LinkRequestRepository, RoomRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CompleteRegistrationCommand {
    pub login: String,
    pub password: String,
    /// Token as the client sent it; parsed here so a malformed token is
    /// reported like an unknown one.
    pub telegram_token: String,
}

#[derive(Debug, Clone)]
pub struct CompleteRegistrationResult {
    pub user: User,
    pub room: Room,
}

pub struct CompleteRegistrationHandler {
    link_requests: Arc<dyn LinkRequestRepository>,
    users: Arc<dyn UserRepository>,
    rooms: Arc<dyn RoomRepository>,
}

impl CompleteRegistrationHandler {
    pub fn new(
        link_requests: Arc<dyn LinkRequestRepository>,
        users: Arc<dyn UserRepository>,
        rooms: Arc<dyn RoomRepository>,
    ) -> Self {
        Self {
            link_requests,
            users,
            rooms,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteRegistrationCommand,
    ) -> Result<CompleteRegistrationResult, LinkageError> {
        // 1. Validate input
        let login = Login::new(cmd.login)?;

        // 2. Friendly pre-check; the store still enforces uniqueness below
        if self.users.find_by_login(&login).await?.is_some() {
            return Err(LinkageError::LoginTaken(login.to_string()));
        }

        // 3. Inspect the link request
        let token: LinkToken = cmd
            .telegram_token
            .parse()
            .map_err(|_| LinkageError::InvalidRegistrationToken)?;
        let request = self
            .link_requests
            .find(&token)
            .await?
            .ok_or(LinkageError::InvalidRegistrationToken)?;
        if !request.is_confirmed() {
            return Err(LinkageError::ConfirmationMissing);
        }

        // 4. Consume it; losing a race with cancel lands here
        let consumed = self
            .link_requests
            .consume_confirmed(&token)
            .await?
            .ok_or(LinkageError::ConfirmationMissing)?;
        let identity = consumed
            .identity()
            .ok_or(LinkageError::ConfirmationMissing)?;

        // 5. Create the user
        let user = User::register(login.clone(), &cmd.password, identity);
        if let Err(err) = self.users.insert(&user).await {
            self.restore_request(&consumed).await;
            return Err(err.into());
        }

        // 6. Provision the first room; on failure undo steps 4 and 5
        let room = Room::personal(login);
        if let Err(err) = self.rooms.insert(&room).await {
            if let Err(undo_err) = self.users.delete(&user.login).await {
                tracing::error!(login = %user.login, error = %undo_err, "failed to undo user insert");
            }
            self.restore_request(&consumed).await;
            return Err(err.into());
        }

        tracing::info!(login = %user.login, room_id = %room.id(), "user registered");
        Ok(CompleteRegistrationResult { user, room })
    }

    /// Puts a consumed request back so the same token can be retried.
    async fn restore_request(&self, consumed: &LinkRequest) {
        if let Err(err) = self.link_requests.insert(consumed).await {
            tracing::error!(token = %consumed.token(), error = %err, "failed to restore link request");
        }
    }
}
