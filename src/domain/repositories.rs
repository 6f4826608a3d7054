use async_trait::async_trait;

use crate::domain::books::{Book, BookFilter};
use crate::domain::errors::ApiError;
use crate::domain::ids::{BookId, ListId};
use crate::domain::reading_lists::{NewReadingList, ReadingList, UpdateReadingList};

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn get(&self, id: &BookId) -> Result<Book, ApiError>;
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, ApiError>;
    async fn recommendations(&self) -> Result<Vec<Book>, ApiError>;
}

/// Reading lists belonging to the authenticated user.
#[async_trait]
pub trait ReadingListRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<ReadingList>, ApiError>;
    async fn get(&self, id: &ListId) -> Result<ReadingList, ApiError>;
    async fn create(&self, list: &NewReadingList) -> Result<ReadingList, ApiError>;
    async fn update(
        &self,
        id: &ListId,
        changes: &UpdateReadingList,
    ) -> Result<ReadingList, ApiError>;
    async fn delete(&self, id: &ListId) -> Result<(), ApiError>;
}
