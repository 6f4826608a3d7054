use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::books::normalize_optional_field;
use crate::domain::ids::{BookId, ListId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingList {
    pub id: ListId,
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub book_ids: Vec<BookId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReadingList {
    pub fn contains(&self, book_id: &BookId) -> bool {
        self.book_ids.contains(book_id)
    }

    /// The identifier set with `book_id` added. Unchanged if already present.
    pub fn book_ids_with(&self, book_id: &BookId) -> Vec<BookId> {
        let mut ids = self.book_ids.clone();
        if !ids.contains(book_id) {
            ids.push(book_id.clone());
        }
        ids
    }

    /// The identifier set with every occurrence of `book_id` removed.
    pub fn book_ids_without(&self, book_id: &BookId) -> Vec<BookId> {
        self.book_ids
            .iter()
            .filter(|id| *id != book_id)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReadingList {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub book_ids: Vec<BookId>,
}

impl NewReadingList {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            book_ids: Vec::new(),
        }
    }

    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.description = normalize_optional_field(self.description);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)
    }
}

/// Partial update. `book_ids`, when present, replaces the stored set wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReadingList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_ids: Option<Vec<BookId>>,
}

impl UpdateReadingList {
    pub fn replace_books(book_ids: Vec<BookId>) -> Self {
        Self {
            book_ids: Some(book_ids),
            ..Self::default()
        }
    }

    pub fn rename(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            description,
            book_ids: None,
        }
    }

    pub fn normalize(mut self) -> Self {
        self.name = self.name.map(|n| n.trim().to_string());
        self.description = normalize_optional_field(self.description);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.name {
            Some(ref name) => validate_name(name),
            None => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Please enter a name for the reading list".to_string());
    }
    Ok(())
}
