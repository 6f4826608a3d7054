use serde::{Deserialize, Serialize};

use crate::domain::ids::BookId;

/// A catalog entry. Read-only from the client's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub published_year: Option<i32>,
}

/// Query parameters for browsing the catalog.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub search: Option<String>,
    pub genre: Option<String>,
}

impl BookFilter {
    pub fn normalize(mut self) -> Self {
        self.search = normalize_optional_field(self.search);
        self.genre = normalize_optional_field(self.genre);
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(ref search) = self.search {
            pairs.push(("search", search.as_str()));
        }
        if let Some(ref genre) = self.genre {
            pairs.push(("genre", genre.as_str()));
        }
        pairs
    }
}

pub(crate) fn normalize_optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
