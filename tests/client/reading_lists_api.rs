use booklist::domain::ApiError;
use booklist::domain::ids::{BookId, ListId};
use booklist::domain::reading_lists::{NewReadingList, UpdateReadingList};
use booklist::infrastructure::client::CatalogClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{TOKEN, client, envelope, list_json};

#[tokio::test]
async fn list_accepts_direct_and_enveloped_payloads() {
    let server = MockServer::start().await;
    let lists = json!([list_json("l1", "Classics", &["b1"])]);
    Mock::given(method("GET"))
        .and(path("/api/reading-lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(200, &lists)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reading-lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lists.clone()))
        .mount(&server)
        .await;

    let client = client(&server, Some(TOKEN));
    let wrapped = client.reading_lists().list().await.unwrap();
    let direct = client.reading_lists().list().await.unwrap();

    assert_eq!(wrapped, direct);
    assert_eq!(wrapped[0].book_ids, vec![BookId::new("b1")]);
}

#[tokio::test]
async fn create_sends_bearer_token_and_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reading-lists"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(body_json(json!({ "name": "Summer Reading 2024", "bookIds": [] })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(list_json("l9", "Summer Reading 2024", &[])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let payload = NewReadingList::new("Summer Reading 2024", None);
    let created = client(&server, Some(TOKEN))
        .reading_lists()
        .create(&payload)
        .await
        .unwrap();
    assert_eq!(created.id, ListId::new("l9"));
    assert!(created.book_ids.is_empty());
}

#[tokio::test]
async fn enveloped_conflict_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/reading-lists/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            409,
            &json!({ "error": "List was changed by another session" }),
        )))
        .mount(&server)
        .await;

    let err = client(&server, Some(TOKEN))
        .reading_lists()
        .update(
            &ListId::new("l1"),
            &UpdateReadingList::replace_books(vec![]),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Conflict("List was changed by another session".to_string())
    );
}

#[tokio::test]
async fn delete_accepts_empty_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/reading-lists/l1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server, Some(TOKEN))
        .reading_lists()
        .delete(&ListId::new("l1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn list_id_is_escaped_as_one_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/reading-lists/shelf%2F2%3Fdraft"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(list_json("shelf/2?draft", "Odd", &[])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let updated = client(&server, Some(TOKEN))
        .reading_lists()
        .update(
            &ListId::new("shelf/2?draft"),
            &UpdateReadingList::replace_books(Vec::new()),
        )
        .await
        .unwrap();
    assert_eq!(updated.id, ListId::new("shelf/2?draft"));
}

#[tokio::test]
async fn unstructured_failures_use_endpoint_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/reading-lists/l1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reading-lists"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client(&server, None);
    let err = client
        .reading_lists()
        .delete(&ListId::new("l1"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Failed {
            status: 502,
            message: "Failed to delete reading list".to_string()
        }
    );

    let err = client.reading_lists().list().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized("Failed to load reading lists".to_string())
    );
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reading-lists/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let err = client(&server, Some(TOKEN))
        .reading_lists()
        .get(&ListId::new("l1"))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Decode("Failed to load reading list".to_string()));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = CatalogClient::from_base_url(&format!("http://127.0.0.1:{port}"), None).unwrap();
    let err = client.reading_lists().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
    assert!(err.to_string().starts_with("Failed to load reading lists"));
}
