//! Conversation and Participant API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{body_json, TestApp};

async fn create_conversation(app: &TestApp, token: &str, name: &str) -> String {
    let body = format!(r#"{{"name":"{}"}}"#, name);
    let response = app.post_json_auth("/api/conversation", &body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Creating a conversation makes the creator owner and first participant
#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn create_conversation_adds_creator_as_participant() {
    let app = TestApp::new().await;
    let owner = app.register_and_login().await;

    let id = create_conversation(&app, &owner.token, "standup").await;

    // The creator can immediately see the conversation
    let response = app
        .get_auth(&format!("/api/conversation/{}", id), &owner.token)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // And can post into it, which requires membership
    let response = app
        .post_json_auth(
            &format!("/api/conversation/{}/message", id),
            r#"{"text":"hello"}"#,
            &owner.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Listing returns only conversations the caller participates in
#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn listing_is_scoped_to_membership() {
    let app = TestApp::new().await;
    let owner = app.register_and_login().await;
    let outsider = app.register_and_login().await;

    let id = create_conversation(&app, &owner.token, "private-room").await;

    let response = app.get_auth("/api/conversation", &outsider.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let ids: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    assert!(!ids.contains(&id));
}

/// A conversation outside the caller's scope is indistinguishable from
/// a nonexistent one
#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn foreign_conversation_reads_as_not_found() {
    let app = TestApp::new().await;
    let owner = app.register_and_login().await;
    let outsider = app.register_and_login().await;

    let id = create_conversation(&app, &owner.token, "hidden").await;

    let response = app
        .get_auth(&format!("/api/conversation/{}", id), &outsider.token)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get_auth("/api/conversation/1", &outsider.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Only the owner may add participants
#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn only_owner_manages_participants() {
    let app = TestApp::new().await;
    let owner = app.register_and_login().await;
    let member = app.register_and_login().await;
    let third = app.register_and_login().await;

    let id = create_conversation(&app, &owner.token, "team").await;
    let uri = format!("/api/conversation/{}/participant", id);

    // Owner adds the member
    let response = app
        .post_json_auth(
            &uri,
            &format!(r#"{{"user_id":"{}"}}"#, member.id),
            &owner.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The member is now a participant but not the owner, so they may
    // not add anyone
    let response = app
        .post_json_auth(
            &uri,
            &format!(r#"{{"user_id":"{}"}}"#, third.id),
            &member.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An outsider is equally forbidden
    let response = app
        .post_json_auth(
            &uri,
            &format!(r#"{{"user_id":"{}"}}"#, third.id),
            &third.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Adding an unknown user is not found, a malformed id is a bad request
#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn add_participant_validates_target() {
    let app = TestApp::new().await;
    let owner = app.register_and_login().await;

    let id = create_conversation(&app, &owner.token, "targets").await;
    let uri = format!("/api/conversation/{}/participant", id);

    let response = app
        .post_json_auth(&uri, r#"{"user_id":"999999999999"}"#, &owner.token)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post_json_auth(&uri, r#"{"user_id":"bogus"}"#, &owner.token)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Adding the same participant twice is a conflict
#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn duplicate_participant_conflicts() {
    let app = TestApp::new().await;
    let owner = app.register_and_login().await;
    let member = app.register_and_login().await;

    let id = create_conversation(&app, &owner.token, "dupes").await;
    let uri = format!("/api/conversation/{}/participant", id);
    let body = format!(r#"{{"user_id":"{}"}}"#, member.id);

    let first = app.post_json_auth(&uri, &body, &owner.token).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.post_json_auth(&uri, &body, &owner.token).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

/// Removing a non-participant is not found; a removed participant loses
/// access
#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn remove_participant_revokes_access() {
    let app = TestApp::new().await;
    let owner = app.register_and_login().await;
    let member = app.register_and_login().await;

    let id = create_conversation(&app, &owner.token, "revocable").await;
    let uri = format!("/api/conversation/{}/participant", id);
    let body = format!(r#"{{"user_id":"{}"}}"#, member.id);

    // Removing before adding is not found
    let response = app.delete_json_auth(&uri, &body, &owner.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.post_json_auth(&uri, &body, &owner.token).await;
    let response = app.delete_json_auth(&uri, &body, &owner.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The removed member can no longer read the conversation
    let response = app
        .get_auth(&format!("/api/conversation/{}", id), &member.token)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Ownership and membership are independent: an owner who removed their
/// own membership still manages participants but cannot send
#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn owner_without_membership_manages_but_cannot_send() {
    let app = TestApp::new().await;
    let owner = app.register_and_login().await;
    let member = app.register_and_login().await;

    let id = create_conversation(&app, &owner.token, "absentee").await;
    let participant_uri = format!("/api/conversation/{}/participant", id);

    // The owner removes their own membership
    let response = app
        .delete_json_auth(
            &participant_uri,
            &format!(r#"{{"user_id":"{}"}}"#, owner.id),
            &owner.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Management rights remain: adding and removing still work
    let body = format!(r#"{{"user_id":"{}"}}"#, member.id);
    let response = app.post_json_auth(&participant_uri, &body, &owner.token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Sending requires membership, which the owner no longer holds
    let response = app
        .post_json_auth(
            &format!("/api/conversation/{}/message", id),
            r#"{"text":"ghost"}"#,
            &owner.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .delete_json_auth(&participant_uri, &body, &owner.token)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// Conversations have no update or destroy operations
#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn conversations_are_immutable() {
    let app = TestApp::new().await;
    let owner = app.register_and_login().await;

    let id = create_conversation(&app, &owner.token, "forever").await;

    let response = app
        .put_json_auth(
            &format!("/api/conversation/{}", id),
            r#"{"name":"renamed"}"#,
            &owner.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
