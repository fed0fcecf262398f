//! Shared harness: the full router over in-memory adapters.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use money_manage::adapters::auth::{JwtSessions, JwtSettings};
use money_manage::adapters::events::LinkageHub;
use money_manage::adapters::http::{app_router, AppState, CookieSettings};
use money_manage::adapters::memory::{
    InMemoryLinkRequestRepository, InMemoryRoomRepository, InMemoryUserRepository,
    RecordingBotMessenger,
};
use money_manage::adapters::telegram::{BotCommandDispatcher, Update};
use money_manage::application::handlers::linkage::{CancelLinkHandler, ConfirmLinkHandler};

pub const JWT_SECRET: &[u8] = b"integration-test-secret-0123456789";

pub struct TestApp {
    pub router: Router,
    pub link_requests: Arc<InMemoryLinkRequestRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub rooms: Arc<InMemoryRoomRepository>,
    pub bot: Arc<RecordingBotMessenger>,
    pub hub: LinkageHub,
    pub dispatcher: BotCommandDispatcher,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let link_requests = Arc::new(InMemoryLinkRequestRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let bot = Arc::new(RecordingBotMessenger::new());
        let hub = LinkageHub::new(8);
        let sessions = Arc::new(JwtSessions::new(
            JWT_SECRET,
            JwtSettings {
                issuer: "money-manage".to_string(),
                audience: "money-manage-web".to_string(),
                ttl_secs: 3600,
            },
        ));

        let state = AppState {
            link_requests: link_requests.clone(),
            users: users.clone(),
            rooms: rooms.clone(),
            invites: rooms.clone(),
            bot: bot.clone(),
            hub: hub.clone(),
            session_validator: sessions.clone(),
            session_issuer: sessions,
            cookie: CookieSettings {
                secure: false,
                max_age_secs: 3600,
            },
        };

        let publisher = Arc::new(hub.clone());
        let dispatcher = BotCommandDispatcher::new(
            ConfirmLinkHandler::new(link_requests.clone(), publisher.clone(), bot.clone()),
            CancelLinkHandler::new(link_requests.clone(), publisher, bot.clone()),
            bot.clone(),
        );

        Self {
            router: app_router(state),
            link_requests,
            users,
            rooms,
            bot,
            hub,
            dispatcher,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = session {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.dispatch(request).await
    }

    pub async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Serves the router on an ephemeral local port for real socket clients.
    pub async fn serve(&self) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    pub async fn begin_link(&self) -> String {
        let response = self
            .send(Method::POST, "/api/auth/telegram-token", None, None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["token"].as_str().unwrap().to_string()
    }

    /// Simulates the Telegram user sending `/start <token>` to the bot.
    pub async fn bot_start(&self, token: &str, telegram_user_id: i64, chat_id: i64) {
        let update: Update = serde_json::from_value(json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "from": {"id": telegram_user_id, "username": format!("tg{telegram_user_id}")},
                "chat": {"id": chat_id},
                "text": format!("/start {token}")
            }
        }))
        .unwrap();
        self.dispatcher.dispatch(update).await;
    }

    /// Simulates pressing the Cancel button under the confirmation message.
    pub async fn bot_cancel(&self, token: &str) {
        let update: Update = serde_json::from_value(json!({
            "update_id": 2,
            "callback_query": {"id": "cb", "from": {"id": 1}, "data": token}
        }))
        .unwrap();
        self.dispatcher.dispatch(update).await;
    }

    pub async fn register(&self, login: &str, password: &str, token: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/api/auth/register",
            Some(json!({"login": login, "password": password, "telegramToken": token})),
            None,
        )
        .await
    }

    pub async fn login(&self, login: &str, password: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/api/auth/login",
            Some(json!({"login": login, "password": password})),
            None,
        )
        .await
    }

    /// Runs the whole handshake and returns a session token.
    pub async fn signed_up(&self, login: &str, telegram_user_id: i64) -> String {
        let token = self.begin_link().await;
        self.bot_start(&token, telegram_user_id, telegram_user_id * 10)
            .await;
        let registered = self.register(login, "password", &token).await;
        assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);

        let logged_in = self.login(login, "password").await;
        assert_eq!(logged_in.status, StatusCode::OK);
        logged_in.body["token"].as_str().unwrap().to_string()
    }
}
