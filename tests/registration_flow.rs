//! End-to-end tests for the Telegram linkage handshake, registration and
//! sessions, driven through the HTTP router and the bot dispatcher.

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};

use common::TestApp;
use money_manage::application::handlers::auth::LOGIN_NOTICE_TEXT;
use money_manage::application::handlers::linkage::{CANCELLED_TEXT, CONFIRMED_TEXT};
use money_manage::domain::foundation::{LinkToken, Login};
use money_manage::domain::linkage::LinkageEvent;
use money_manage::ports::UserRepository;

async fn wait_for_sent(app: &TestApp, count: usize) {
    for _ in 0..200 {
        if app.bot.sent().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn full_handshake_registers_user_with_personal_room() {
    let app = TestApp::new();
    let token = app.begin_link().await;
    let mut subscription = app.hub.subscribe(token.parse::<LinkToken>().unwrap());

    app.bot_start(&token, 42, 420).await;

    let event = subscription.recv().await.unwrap();
    assert!(matches!(
        event,
        LinkageEvent::Confirmed { ref display_name, .. } if display_name.as_deref() == Some("tg42")
    ));
    let confirmation = &app.bot.sent()[0];
    assert_eq!(confirmation.text, CONFIRMED_TEXT);
    assert_eq!(confirmation.chat_id, 420);

    let response = app.register("alice", "s3cret", &token).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["login"], "alice");
    let room_id = response.body["roomId"].as_str().unwrap().to_string();

    let login = app.login("alice", "s3cret").await;
    assert_eq!(login.status, StatusCode::OK);
    let session = login.body["token"].as_str().unwrap();

    let rooms = app.send(Method::GET, "/api/rooms", None, Some(session)).await;
    assert_eq!(rooms.status, StatusCode::OK);
    let rooms = rooms.body.as_array().unwrap().clone();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["id"], room_id.as_str());
    assert_eq!(rooms[0]["name"], "alice's room");
    assert_eq!(rooms[0]["isOwner"], true);
}

#[tokio::test]
async fn register_with_unconfirmed_token_is_expectation_failed() {
    let app = TestApp::new();
    let token = app.begin_link().await;

    let response = app.register("alice", "pw", &token).await;

    assert_eq!(response.status, StatusCode::EXPECTATION_FAILED);
    let stored = app
        .users
        .find_by_login(&Login::new("alice").unwrap())
        .await
        .unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn register_with_unknown_token_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .register("alice", "pw", &LinkToken::generate().to_string())
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_with_invalid_login_is_bad_request() {
    let app = TestApp::new();
    let token = app.begin_link().await;
    app.bot_start(&token, 1, 10).await;

    let response = app.register("a!", "pw", &token).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    // The confirmed request is still usable
    let retry = app.register("alice", "pw", &token).await;
    assert_eq!(retry.status, StatusCode::CREATED);
}

#[tokio::test]
async fn taken_login_is_conflict_and_token_survives() {
    let app = TestApp::new();
    app.signed_up("alice", 1).await;

    let token = app.begin_link().await;
    app.bot_start(&token, 2, 20).await;
    let response = app.register("alice", "pw", &token).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["code"], "CONFLICT");
    let retry = app.register("bob", "pw", &token).await;
    assert_eq!(retry.status, StatusCode::CREATED);
}

#[tokio::test]
async fn token_is_single_use() {
    let app = TestApp::new();
    let token = app.begin_link().await;
    app.bot_start(&token, 1, 10).await;
    assert_eq!(
        app.register("alice", "pw", &token).await.status,
        StatusCode::CREATED
    );

    let second = app.register("bob", "pw", &token).await;

    assert_eq!(second.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cancelled_confirmation_blocks_registration_until_reconfirmed() {
    let app = TestApp::new();
    let token = app.begin_link().await;
    let mut subscription = app.hub.subscribe(token.parse::<LinkToken>().unwrap());

    app.bot_start(&token, 7, 70).await;
    app.bot_cancel(&token).await;

    assert!(matches!(
        subscription.recv().await,
        Some(LinkageEvent::Confirmed { .. })
    ));
    assert!(matches!(
        subscription.recv().await,
        Some(LinkageEvent::Cancelled { .. })
    ));
    assert_eq!(app.bot.sent().last().unwrap().text, CANCELLED_TEXT);
    assert_eq!(
        app.register("alice", "pw", &token).await.status,
        StatusCode::EXPECTATION_FAILED
    );

    app.bot_start(&token, 7, 70).await;
    assert_eq!(
        app.register("alice", "pw", &token).await.status,
        StatusCode::CREATED
    );
}

#[tokio::test]
async fn login_sets_cookie_and_notifies_telegram() {
    let app = TestApp::new();
    app.signed_up("alice", 5).await;
    let before = app.bot.sent().len();

    let response = app.login("alice", "password").await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response
        .headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("AUTH_TOKEN="));
    assert!(cookie.contains("HttpOnly"));

    wait_for_sent(&app, before + 1).await;
    let notice = app.bot.sent().last().unwrap().clone();
    assert_eq!(notice.text, LOGIN_NOTICE_TEXT);
    assert_eq!(notice.chat_id, 50);

    let token = cookie
        .trim_start_matches("AUTH_TOKEN=")
        .split(';')
        .next()
        .unwrap()
        .to_string();
    let me = app
        .dispatch(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, format!("AUTH_TOKEN={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["login"], "alice");
}

#[tokio::test]
async fn wrong_password_is_unauthorized_and_unknown_user_is_bad_request() {
    let app = TestApp::new();
    app.signed_up("alice", 5).await;

    assert_eq!(
        app.login("alice", "nope").await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.login("nobody", "password").await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn me_requires_a_session() {
    let app = TestApp::new();

    let anonymous = app.send(Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forged = app
        .send(Method::GET, "/api/auth/me", None, Some("forged.token.value"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stale_cookie_does_not_block_public_endpoints() {
    let app = TestApp::new();

    let response = app
        .dispatch(
            Request::builder()
                .method(Method::POST)
                .uri("/api/auth/telegram-token")
                .header(header::COOKIE, "AUTH_TOKEN=expired.or.garbage")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_expires_cookie() {
    let app = TestApp::new();

    let response = app.send(Method::POST, "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    let cookie = response.headers.get(header::SET_COOKIE).unwrap();
    assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn linkage_socket_rejects_malformed_token() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::GET,
            "/api/auth/telegram-linkage?token=not-a-token",
            None,
            None,
        )
        .await;

    // Without upgrade headers the extractor rejects first; either way no socket opens
    assert!(response.status.is_client_error());
    assert_eq!(app.hub.watched_tokens(), 0);
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let response = app
        .dispatch(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
