//! LoginHandler - password login with a Telegram heads-up.

use std::sync::Arc;

use crate::domain::foundation::Login;
use crate::domain::user::AuthFlowError;
use crate::ports::{BotMessenger, OutgoingMessage, SessionIssuer, UserRepository};

pub const LOGIN_NOTICE_TEXT: &str = "Some user logged into your account";

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub login: Login,
    pub session_token: String,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    issuer: Arc<dyn SessionIssuer>,
    bot: Arc<dyn BotMessenger>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        issuer: Arc<dyn SessionIssuer>,
        bot: Arc<dyn BotMessenger>,
    ) -> Self {
        Self { users, issuer, bot }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AuthFlowError> {
        let login = Login::new(cmd.login)?;
        let user = self
            .users
            .find_by_login(&login)
            .await?
            .ok_or(AuthFlowError::UserNotFound)?;

        if !user.credential.verify(&cmd.password) {
            tracing::info!(login = %login, "login rejected: wrong password");
            return Err(AuthFlowError::WrongPassword);
        }

        let session_token = self.issuer.issue(&login)?;

        // Notify in the background; a bot outage must not block the login
        let bot = Arc::clone(&self.bot);
        let chat_id = user.telegram.chat_id;
        tokio::spawn(async move {
            if let Err(err) = bot
                .send(OutgoingMessage::text(chat_id, LOGIN_NOTICE_TEXT))
                .await
            {
                tracing::warn!(chat_id, error = %err, "login notification not delivered");
            }
        });

        tracing::info!(login = %login, "user logged in");
        Ok(LoginResult {
            login,
            session_token,
        })
    }
}
