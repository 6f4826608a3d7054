use async_trait::async_trait;

use super::CatalogClient;
use crate::domain::books::{Book, BookFilter};
use crate::domain::errors::ApiError;
use crate::domain::ids::BookId;
use crate::domain::repositories::BookRepository;

pub struct BooksClient<'a> {
    client: &'a CatalogClient,
}

impl<'a> BooksClient<'a> {
    pub fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, ApiError> {
        let mut url = self.client.endpoint("api/books")?;
        for (key, value) in filter.query_pairs() {
            url.query_pairs_mut().append_pair(key, value);
        }
        let request = self.client.request(reqwest::Method::GET, url);
        self.client.send(request, "Failed to load books").await
    }

    pub async fn get(&self, id: &BookId) -> Result<Book, ApiError> {
        let url = self.client.entity_endpoint("api/books", id.as_str())?;
        let request = self.client.request(reqwest::Method::GET, url);
        self.client.send(request, "Failed to load book").await
    }

    pub async fn recommendations(&self) -> Result<Vec<Book>, ApiError> {
        let url = self.client.endpoint("api/books/recommendations")?;
        let request = self.client.request(reqwest::Method::GET, url);
        self.client
            .send(request, "Failed to load recommendations")
            .await
    }
}

#[async_trait]
impl BookRepository for CatalogClient {
    async fn get(&self, id: &BookId) -> Result<Book, ApiError> {
        self.books().get(id).await
    }

    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, ApiError> {
        self.books().list(filter).await
    }

    async fn recommendations(&self) -> Result<Vec<Book>, ApiError> {
        self.books().recommendations().await
    }
}
