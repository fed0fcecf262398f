//! End-to-end tests for rooms, invites and shop list items over HTTP.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::TestApp;
use money_manage::domain::foundation::RoomId;

struct Users {
    app: TestApp,
    alice: String,
    bob: String,
}

async fn two_users() -> Users {
    let app = TestApp::new();
    let alice = app.signed_up("alice", 1).await;
    let bob = app.signed_up("bob", 2).await;
    Users { app, alice, bob }
}

async fn create_room(app: &TestApp, session: &str, name: &str) -> String {
    let response = app
        .send(
            Method::POST,
            "/api/rooms",
            Some(json!({ "name": name })),
            Some(session),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["id"].as_str().unwrap().to_string()
}

async fn invite(app: &TestApp, session: &str, room_id: &str) -> String {
    let response = app
        .send(
            Method::POST,
            &format!("/api/rooms/{room_id}/invites"),
            None,
            Some(session),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["code"].as_str().unwrap().to_string()
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn room_endpoints_require_a_session() {
    let app = TestApp::new();
    let response = app.send(Method::GET, "/api/rooms", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_room_validates_name_and_uniqueness() {
    let Users { app, alice, .. } = two_users().await;

    create_room(&app, &alice, "Groceries").await;

    let duplicate = app
        .send(
            Method::POST,
            "/api/rooms",
            Some(json!({"name": "Groceries"})),
            Some(&alice),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let short = app
        .send(
            Method::POST,
            "/api/rooms",
            Some(json!({"name": "abc"})),
            Some(&alice),
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invite_lets_another_user_join_once() {
    let Users { app, alice, bob } = two_users().await;
    let room_id = create_room(&app, &alice, "Flat share").await;
    let code = invite(&app, &alice, &room_id).await;
    assert_eq!(code.len(), 8);

    let redeemed = app
        .send(
            Method::POST,
            &format!("/api/invites/{code}/redeem"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(redeemed.status, StatusCode::OK);
    assert_eq!(redeemed.body["roomId"], room_id.as_str());

    let bob_rooms = app.send(Method::GET, "/api/rooms", None, Some(&bob)).await;
    let shared = bob_rooms
        .body
        .as_array()
        .unwrap()
        .iter()
        .find(|room| room["id"] == room_id.as_str())
        .cloned()
        .unwrap();
    assert_eq!(shared["isOwner"], false);
    assert_eq!(shared["owner"], "alice");

    let reused = app
        .send(
            Method::POST,
            &format!("/api/invites/{code}/redeem"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(reused.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_owner_issues_invites_and_removes_members() {
    let Users { app, alice, bob } = two_users().await;
    let room_id = create_room(&app, &alice, "Flat share").await;
    let code = invite(&app, &alice, &room_id).await;
    app.send(
        Method::POST,
        &format!("/api/invites/{code}/redeem"),
        None,
        Some(&bob),
    )
    .await;

    let by_member = app
        .send(
            Method::POST,
            &format!("/api/rooms/{room_id}/invites"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(by_member.status, StatusCode::UNAUTHORIZED);

    let remove_owner = app
        .send(
            Method::DELETE,
            &format!("/api/rooms/{room_id}/users/alice"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(remove_owner.status, StatusCode::BAD_REQUEST);

    let remove_bob = app
        .send(
            Method::DELETE,
            &format!("/api/rooms/{room_id}/users/bob"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(remove_bob.status, StatusCode::NO_CONTENT);

    let items = app
        .send(
            Method::GET,
            &format!("/api/rooms/{room_id}/items"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(items.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_leaving_deletes_room_and_member_leaving_does_not() {
    let Users { app, alice, bob } = two_users().await;
    let room_id = create_room(&app, &alice, "Flat share").await;
    let code = invite(&app, &alice, &room_id).await;
    app.send(
        Method::POST,
        &format!("/api/invites/{code}/redeem"),
        None,
        Some(&bob),
    )
    .await;

    let bob_leaves = app
        .send(
            Method::POST,
            &format!("/api/rooms/{room_id}/leave"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(bob_leaves.status, StatusCode::NO_CONTENT);
    let remaining = app
        .send(Method::GET, "/api/rooms", None, Some(&alice))
        .await;
    assert!(remaining
        .body
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"] == room_id.as_str()));

    let pending = invite(&app, &alice, &room_id).await;
    let alice_leaves = app
        .send(
            Method::POST,
            &format!("/api/rooms/{room_id}/leave"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(alice_leaves.status, StatusCode::NO_CONTENT);
    assert_eq!(app.rooms.invite_count().await, 0);

    let stale = app
        .send(
            Method::POST,
            &format!("/api/invites/{pending}/redeem"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(stale.status, StatusCode::NOT_FOUND);

    let gone = app
        .send(
            Method::POST,
            &format!("/api/rooms/{room_id}/leave"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shop_list_items_round_trip_with_filters_and_order() {
    let Users { app, alice, .. } = two_users().await;
    let room_id = create_room(&app, &alice, "Groceries").await;
    let items_uri = format!("/api/rooms/{room_id}/items");

    let mut ids = Vec::new();
    for body in [
        json!({"name": "milk", "price": 1.5, "checked": false}),
        json!({"name": "bread", "price": 2.0, "checked": true}),
        json!({"name": "apples", "price": 3.0, "emoji": "🍎",
               "tags": [{"hexColor": "#ff0000", "label": "fruit"}]}),
    ] {
        let added = app
            .send(Method::POST, &items_uri, Some(body), Some(&alice))
            .await;
        assert_eq!(added.status, StatusCode::CREATED);
        ids.push(added.body["uuid"].as_str().unwrap().to_string());
    }

    let all = app.send(Method::GET, &items_uri, None, Some(&alice)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(names(&all.body), vec!["apples", "milk", "bread"]);
    assert_eq!(all.body[0]["tags"][0]["hexColor"], "#ff0000");

    let cheap = app
        .send(
            Method::GET,
            &format!("{items_uri}?query=price:1..2;"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(names(&cheap.body), vec!["milk", "bread"]);

    let bare = app
        .send(
            Method::GET,
            &format!("{items_uri}?query=%5Eb"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(names(&bare.body), vec!["bread"]);

    let edited = app
        .send(
            Method::PATCH,
            &format!("{items_uri}/{}", ids[0]),
            Some(json!({"checked": true})),
            Some(&alice),
        )
        .await;
    assert_eq!(edited.status, StatusCode::NO_CONTENT);

    let checked = app
        .send(
            Method::GET,
            &format!("{items_uri}?query=checked:true;"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(names(&checked.body), vec!["bread", "milk"]);

    let removed = app
        .send(
            Method::DELETE,
            &format!("{items_uri}/{}", ids[1]),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let after = app.send(Method::GET, &items_uri, None, Some(&alice)).await;
    assert_eq!(names(&after.body), vec!["apples", "milk"]);
}

#[tokio::test]
async fn item_routes_report_bad_ids_and_missing_rooms() {
    let Users { app, alice, .. } = two_users().await;

    let bad_id = app
        .send(Method::GET, "/api/rooms/not-a-uuid/items", None, Some(&alice))
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);

    let missing = app
        .send(
            Method::GET,
            &format!("/api/rooms/{}/items", RoomId::new()),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["code"], "NOT_FOUND");
}
