use booklist::domain::ApiError;
use booklist::domain::accounts::{Credentials, NewAccount, Verification};
use booklist::domain::ids::UserId;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{NoAuthHeader, client, envelope};

fn account_json(verified: bool) -> serde_json::Value {
    json!({
        "id": "user-1",
        "email": "reader@example.com",
        "name": "Reader",
        "verified": verified
    })
}

#[tokio::test]
async fn signup_posts_account_and_reads_enveloped_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(NoAuthHeader)
        .and(body_json(json!({
            "email": "reader@example.com",
            "password": "correct horse",
            "name": "Reader"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(201, &account_json(false))))
        .expect(1)
        .mount(&server)
        .await;

    let payload = NewAccount {
        email: " Reader@Example.com ".to_string(),
        password: "correct horse".to_string(),
        name: Some("Reader".to_string()),
    }
    .normalize();
    let account = client(&server, None)
        .accounts()
        .signup(&payload)
        .await
        .unwrap();

    assert_eq!(account.id, UserId::new("user-1"));
    assert!(!account.verified);
}

#[tokio::test]
async fn signup_conflict_keeps_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "error": "An account with that email already exists" })),
        )
        .mount(&server)
        .await;

    let payload = NewAccount {
        email: "reader@example.com".to_string(),
        password: "correct horse".to_string(),
        name: None,
    };
    let err = client(&server, None)
        .accounts()
        .signup(&payload)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Conflict("An account with that email already exists".to_string())
    );
}

#[tokio::test]
async fn verify_posts_code_and_returns_verified_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .and(body_json(json!({ "email": "reader@example.com", "code": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_json(true)))
        .expect(1)
        .mount(&server)
        .await;

    let payload = Verification {
        email: "reader@example.com".to_string(),
        code: "123456".to_string(),
    };
    let account = client(&server, None)
        .accounts()
        .verify(&payload)
        .await
        .unwrap();
    assert!(account.verified);
}

#[tokio::test]
async fn failed_verification_without_details_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 400,
            "body": ""
        })))
        .mount(&server)
        .await;

    let payload = Verification {
        email: "reader@example.com".to_string(),
        code: "000000".to_string(),
    };
    let err = client(&server, None)
        .accounts()
        .verify(&payload)
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::BadRequest("Failed to verify account".to_string()));
}

#[tokio::test]
async fn login_returns_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "reader@example.com", "password": "correct horse" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(200, &json!({ "token": "abc", "userId": "user-1" }))),
        )
        .mount(&server)
        .await;

    let credentials = Credentials {
        email: "reader@example.com".to_string(),
        password: "correct horse".to_string(),
    };
    let session = client(&server, None)
        .accounts()
        .login(&credentials)
        .await
        .unwrap();
    assert_eq!(session.token, "abc");
    assert_eq!(session.user_id, UserId::new("user-1"));
}
