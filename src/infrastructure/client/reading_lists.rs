use async_trait::async_trait;

use super::CatalogClient;
use crate::domain::errors::ApiError;
use crate::domain::ids::ListId;
use crate::domain::reading_lists::{NewReadingList, ReadingList, UpdateReadingList};
use crate::domain::repositories::ReadingListRepository;

const ENTITY_PATH: &str = "api/reading-lists";

pub struct ReadingListsClient<'a> {
    client: &'a CatalogClient,
}

impl<'a> ReadingListsClient<'a> {
    pub fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<ReadingList>, ApiError> {
        let url = self.client.endpoint(ENTITY_PATH)?;
        let request = self.client.request(reqwest::Method::GET, url);
        self.client
            .send(request, "Failed to load reading lists")
            .await
    }

    pub async fn get(&self, id: &ListId) -> Result<ReadingList, ApiError> {
        let url = self.client.entity_endpoint(ENTITY_PATH, id.as_str())?;
        let request = self.client.request(reqwest::Method::GET, url);
        self.client
            .send(request, "Failed to load reading list")
            .await
    }

    pub async fn create(&self, payload: &NewReadingList) -> Result<ReadingList, ApiError> {
        let url = self.client.endpoint(ENTITY_PATH)?;
        let request = self
            .client
            .request(reqwest::Method::POST, url)
            .json(payload);
        self.client
            .send(request, "Failed to create reading list")
            .await
    }

    pub async fn update(
        &self,
        id: &ListId,
        payload: &UpdateReadingList,
    ) -> Result<ReadingList, ApiError> {
        let url = self.client.entity_endpoint(ENTITY_PATH, id.as_str())?;
        let request = self.client.request(reqwest::Method::PUT, url).json(payload);
        self.client
            .send(request, "Failed to update reading list")
            .await
    }

    pub async fn delete(&self, id: &ListId) -> Result<(), ApiError> {
        let url = self.client.entity_endpoint(ENTITY_PATH, id.as_str())?;
        let request = self.client.request(reqwest::Method::DELETE, url);
        self.client
            .send_empty(request, "Failed to delete reading list")
            .await
    }
}

#[async_trait]
impl ReadingListRepository for CatalogClient {
    async fn list(&self) -> Result<Vec<ReadingList>, ApiError> {
        self.reading_lists().list().await
    }

    async fn get(&self, id: &ListId) -> Result<ReadingList, ApiError> {
        self.reading_lists().get(id).await
    }

    async fn create(&self, list: &NewReadingList) -> Result<ReadingList, ApiError> {
        self.reading_lists().create(list).await
    }

    async fn update(
        &self,
        id: &ListId,
        changes: &UpdateReadingList,
    ) -> Result<ReadingList, ApiError> {
        self.reading_lists().update(id, changes).await
    }

    async fn delete(&self, id: &ListId) -> Result<(), ApiError> {
        self.reading_lists().delete(id).await
    }
}
