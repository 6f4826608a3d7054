use booklist::domain::ApiError;
use booklist::domain::books::BookFilter;
use booklist::domain::ids::BookId;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{NoAuthHeader, book_json, client, envelope};

#[tokio::test]
async fn list_books_passes_search_and_genre() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .and(query_param("search", "dune"))
        .and(query_param("genre", "Science Fiction"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([book_json("b1", "Dune")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let filter = BookFilter {
        search: Some(" dune ".to_string()),
        genre: Some("Science Fiction".to_string()),
    }
    .normalize();
    let books = client(&server, None).books().list(&filter).await.unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].published_year, Some(2001));
}

#[tokio::test]
async fn anonymous_requests_carry_no_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/b1"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(book_json("b1", "Emma")))
        .expect(1)
        .mount(&server)
        .await;

    let book = client(&server, None)
        .books()
        .get(&BookId::new("b1"))
        .await
        .unwrap();
    assert_eq!(book.id, BookId::new("b1"));
}

#[tokio::test]
async fn missing_book_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server, None)
        .books()
        .get(&BookId::new("gone"))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::NotFound("Failed to load book".to_string()));
}

#[tokio::test]
async fn recommendations_accept_enveloped_payload() {
    let server = MockServer::start().await;
    let payload = json!([book_json("r1", "Piranesi"), book_json("r2", "Circe")]);
    Mock::given(method("GET"))
        .and(path("/api/books/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(200, &payload)))
        .mount(&server)
        .await;

    let books = client(&server, None)
        .books()
        .recommendations()
        .await
        .unwrap();
    let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Piranesi", "Circe"]);
}
