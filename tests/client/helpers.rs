use std::sync::{Arc, Mutex};

use booklist::application::services::{
    ConfirmationDialog, NotificationLevel, Notifier, ReadingListController,
};
use booklist::infrastructure::client::CatalogClient;
use serde_json::{Value, json};
use wiremock::{Match, MockServer, Request};

pub const TOKEN: &str = "test-session-token";

#[allow(clippy::expect_used)]
pub fn client(server: &MockServer, token: Option<&str>) -> CatalogClient {
    CatalogClient::from_base_url(&server.uri(), token.map(str::to_string))
        .expect("Failed to build client")
}

pub fn list_json(id: &str, name: &str, book_ids: &[&str]) -> Value {
    json!({
        "id": id,
        "userId": "user-1",
        "name": name,
        "description": null,
        "bookIds": book_ids,
        "createdAt": "2024-06-01T09:00:00Z",
        "updatedAt": "2024-06-01T09:00:00Z"
    })
}

pub fn book_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "author": "Test Author",
        "genre": "Fiction",
        "rating": 4.0,
        "publishedYear": 2001
    })
}

/// Wrap a payload the way the service's gateway does.
pub fn envelope(status: u16, body: &Value) -> Value {
    json!({ "statusCode": status, "body": body.to_string() })
}

/// Matches requests that carry no `Authorization` header.
pub struct NoAuthHeader;

impl Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<(NotificationLevel, String)>>,
}

#[allow(clippy::unwrap_used)]
impl RecordingNotifier {
    pub fn levels(&self) -> Vec<NotificationLevel> {
        self.seen.lock().unwrap().iter().map(|(l, _)| *l).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }
}

#[allow(clippy::unwrap_used)]
impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.seen.lock().unwrap().push((level, message.to_string()));
    }
}

pub struct TestController {
    pub controller: ReadingListController,
    pub notifier: Arc<RecordingNotifier>,
    pub dialog: Arc<ConfirmationDialog>,
}

/// Controller wired to the real HTTP client pointed at `server`.
pub fn controller(server: &MockServer) -> TestController {
    let client = Arc::new(client(server, Some(TOKEN)));
    let notifier = Arc::new(RecordingNotifier::default());
    let dialog = Arc::new(ConfirmationDialog::new());
    let controller =
        ReadingListController::new(client.clone(), client, notifier.clone(), dialog.clone());
    TestController {
        controller,
        notifier,
        dialog,
    }
}
