use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::try_join_all;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::confirmation::{ConfirmOptions, Confirmer, Severity};
use super::notifications::Notifier;
use crate::domain::books::Book;
use crate::domain::errors::ApiError;
use crate::domain::ids::{BookId, ListId};
use crate::domain::reading_lists::{NewReadingList, ReadingList, UpdateReadingList};
use crate::domain::repositories::{BookRepository, ReadingListRepository};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("reading list {0} is not loaded")]
    UnknownList(ListId),
    #[error("no reading list is selected")]
    NoSelection,
    #[error("reading list {0} already has a change in progress")]
    InProgress(ListId),
}

/// Result of selecting a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// The resolved books were committed to the view.
    Committed(Vec<Book>),
    /// A newer selection started while these books were resolving.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Declined,
}

#[derive(Debug, Default)]
struct ViewState {
    lists: Vec<ReadingList>,
    selected: Option<ReadingList>,
    books: Vec<Book>,
    /// Bumped on every selection change; stale book resolutions compare against it.
    generation: u64,
    deleting: HashSet<ListId>,
    /// Lists with a book change awaiting the server's answer.
    changing: HashSet<ListId>,
}

impl ViewState {
    /// Replace the cached copy (and the selection) with the server's version.
    fn adopt(&mut self, list: &ReadingList) {
        if let Some(entry) = self.lists.iter_mut().find(|l| l.id == list.id) {
            *entry = list.clone();
        }
        if self.selected.as_ref().is_some_and(|s| s.id == list.id) {
            self.selected = Some(list.clone());
            self.books.retain(|b| list.contains(&b.id));
        }
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.books.clear();
        self.generation += 1;
    }
}

/// Reading lists of the current user, the selected list and its books.
///
/// Server responses are authoritative: every successful mutation replaces the
/// affected slice of state with what the server returned. Every mutation ends
/// in exactly one notification.
pub struct ReadingListController {
    lists: Arc<dyn ReadingListRepository>,
    books: Arc<dyn BookRepository>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    state: Mutex<ViewState>,
}

impl ReadingListController {
    pub fn new(
        lists: Arc<dyn ReadingListRepository>,
        books: Arc<dyn BookRepository>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            lists,
            books,
            notifier,
            confirmer,
            state: Mutex::new(ViewState::default()),
        }
    }

    pub fn lists(&self) -> Vec<ReadingList> {
        self.state().lists.clone()
    }

    pub fn selected(&self) -> Option<ReadingList> {
        self.state().selected.clone()
    }

    /// Materialized books of the selected list.
    pub fn books(&self) -> Vec<Book> {
        self.state().books.clone()
    }

    pub fn is_deleting(&self, list_id: &ListId) -> bool {
        self.state().deleting.contains(list_id)
    }

    /// Fetch all lists and replace the cache. On failure the cache is left alone.
    pub async fn load_lists(&self) -> Result<Vec<ReadingList>, ControllerError> {
        let lists = match self.lists.list().await {
            Ok(lists) => lists,
            Err(err) => {
                warn!(error = %err, "failed to load reading lists");
                return self.fail(err.into());
            }
        };

        info!(count = lists.len(), "reading lists loaded");
        let mut state = self.state();
        state.lists = lists.clone();
        if let Some(fresh) = state
            .selected
            .as_ref()
            .and_then(|s| lists.iter().find(|l| l.id == s.id))
            .cloned()
        {
            state.adopt(&fresh);
        }
        Ok(lists)
    }

    pub async fn create_list(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<ReadingList, ControllerError> {
        let new_list = NewReadingList::new(name, description).normalize();
        if let Err(message) = new_list.validate() {
            return self.fail(ControllerError::Validation(message));
        }

        match self.lists.create(&new_list).await {
            Ok(list) => {
                info!(list_id = %list.id, "reading list created");
                self.state().lists.push(list.clone());
                self.notifier
                    .success(&format!("Created reading list \"{}\"", list.name));
                Ok(list)
            }
            Err(err) => {
                warn!(error = %err, "failed to create reading list");
                self.fail(err.into())
            }
        }
    }

    /// Make a cached list the selection and resolve its books.
    ///
    /// Only the latest selection commits its books; an older one that
    /// finishes later returns [`Selection::Superseded`].
    pub async fn select_list(&self, list_id: &ListId) -> Result<Selection, ControllerError> {
        let (list, generation) = {
            let mut state = self.state();
            let Some(list) = state.lists.iter().find(|l| &l.id == list_id).cloned() else {
                return Err(ControllerError::UnknownList(list_id.clone()));
            };
            state.generation += 1;
            state.selected = Some(list.clone());
            state.books.clear();
            (list, state.generation)
        };

        let resolved = self.resolve_books(&list.book_ids).await;

        {
            let mut state = self.state();
            if state.generation != generation {
                debug!(list_id = %list.id, "discarding books for superseded selection");
                return Ok(Selection::Superseded);
            }
            if let Ok(ref books) = resolved {
                state.books = books.clone();
            }
        }

        match resolved {
            Ok(books) => Ok(Selection::Committed(books)),
            Err(err) => {
                warn!(error = %err, list_id = %list.id, "failed to load books for reading list");
                self.fail(err.into())
            }
        }
    }

    /// Resolve identifiers concurrently. Missing books are dropped silently;
    /// any other failure fails the whole batch with one notification.
    pub async fn load_list_books(&self, book_ids: &[BookId]) -> Result<Vec<Book>, ControllerError> {
        match self.resolve_books(book_ids).await {
            Ok(books) => Ok(books),
            Err(err) => {
                warn!(error = %err, count = book_ids.len(), "failed to load books for reading list");
                self.fail(err.into())
            }
        }
    }

    async fn resolve_books(&self, book_ids: &[BookId]) -> Result<Vec<Book>, ApiError> {
        let lookups = book_ids.iter().map(|id| async move {
            match self.books.get(id).await {
                Ok(book) => Ok(Some(book)),
                Err(err) if err.is_not_found() => {
                    debug!(book_id = %id, "book no longer exists, skipping");
                    Ok(None)
                }
                Err(err) => Err(err),
            }
        });

        let resolved = try_join_all(lookups).await?;
        Ok(resolved.into_iter().flatten().collect())
    }

    /// Add a book to the selected list.
    ///
    /// Book changes to one list run one at a time; a second one while the
    /// first awaits the server is refused with [`ControllerError::InProgress`].
    pub async fn add_book_to_list(&self, book_id: &BookId) -> Result<ReadingList, ControllerError> {
        let (selected, generation) = {
            let state = self.state();
            (state.selected.clone(), state.generation)
        };
        let Some(list) = selected else {
            return self.fail(ControllerError::NoSelection);
        };

        if list.contains(book_id) {
            self.notifier
                .info(&format!("That book is already in \"{}\"", list.name));
            return Ok(list);
        }

        if !self.state().changing.insert(list.id.clone()) {
            debug!(list_id = %list.id, %book_id, "book change already in flight");
            return Err(ControllerError::InProgress(list.id));
        }

        let changes = UpdateReadingList::replace_books(list.book_ids_with(book_id));
        let result = self.lists.update(&list.id, &changes).await;
        {
            let mut state = self.state();
            state.changing.remove(&list.id);
            if let Ok(ref updated) = result {
                state.adopt(updated);
            }
        }

        let updated = match result {
            Ok(updated) => updated,
            Err(err) => {
                warn!(error = %err, list_id = %list.id, %book_id, "failed to add book");
                return self.fail(err.into());
            }
        };

        let book = match self.books.get(book_id).await {
            Ok(book) => Some(book),
            Err(err) => {
                warn!(error = %err, %book_id, "added book could not be resolved for display");
                None
            }
        };

        {
            let mut state = self.state();
            if state.generation == generation
                && let Some(book) = book
                && state.selected.as_ref().is_some_and(|s| s.contains(&book.id))
                && !state.books.iter().any(|b| b.id == book.id)
            {
                state.books.push(book);
            }
        }

        info!(list_id = %updated.id, %book_id, "book added to reading list");
        self.notifier
            .success(&format!("Added book to \"{}\"", updated.name));
        Ok(updated)
    }

    /// Remove a book from the selected list.
    ///
    /// The book leaves the materialized view immediately. If the server
    /// rejects the change, the view is restored to what it was before. Like
    /// [`Self::add_book_to_list`], a second change to the same list while one
    /// is in flight is refused.
    pub async fn remove_book_from_list(
        &self,
        book_id: &BookId,
    ) -> Result<ReadingList, ControllerError> {
        let claimed = {
            let mut state = self.state();
            match state.selected.clone() {
                None => None,
                Some(list) => {
                    if !state.changing.insert(list.id.clone()) {
                        debug!(list_id = %list.id, %book_id, "book change already in flight");
                        return Err(ControllerError::InProgress(list.id));
                    }
                    let snapshot = state.books.clone();
                    state.books.retain(|b| &b.id != book_id);
                    Some((list, snapshot, state.generation))
                }
            }
        };
        let Some((list, snapshot, generation)) = claimed else {
            return self.fail(ControllerError::NoSelection);
        };

        let changes = UpdateReadingList::replace_books(list.book_ids_without(book_id));
        let result = self.lists.update(&list.id, &changes).await;
        self.state().changing.remove(&list.id);

        match result {
            Ok(updated) => {
                self.state().adopt(&updated);
                info!(list_id = %updated.id, %book_id, "book removed from reading list");
                self.notifier
                    .success(&format!("Removed book from \"{}\"", updated.name));
                Ok(updated)
            }
            Err(err) => {
                {
                    let mut state = self.state();
                    if state.generation == generation {
                        state.books = snapshot;
                    }
                }
                warn!(error = %err, list_id = %list.id, %book_id, "failed to remove book");
                self.fail(err.into())
            }
        }
    }

    pub async fn rename_list(
        &self,
        list_id: &ListId,
        name: &str,
        description: Option<String>,
    ) -> Result<ReadingList, ControllerError> {
        let changes = UpdateReadingList::rename(name, description).normalize();
        if let Err(message) = changes.validate() {
            return self.fail(ControllerError::Validation(message));
        }

        match self.lists.update(list_id, &changes).await {
            Ok(updated) => {
                self.state().adopt(&updated);
                info!(%list_id, "reading list renamed");
                self.notifier
                    .success(&format!("Renamed reading list to \"{}\"", updated.name));
                Ok(updated)
            }
            Err(err) => {
                warn!(error = %err, %list_id, "failed to rename reading list");
                self.fail(err.into())
            }
        }
    }

    /// Delete a list after the user confirms.
    ///
    /// A declined prompt makes no request and sends no notification. A second
    /// delete of the same list while one is in flight is refused.
    pub async fn delete_list(&self, list_id: &ListId) -> Result<Deletion, ControllerError> {
        let name = {
            let state = self.state();
            if state.deleting.contains(list_id) {
                return Err(ControllerError::InProgress(list_id.clone()));
            }
            state
                .lists
                .iter()
                .find(|l| &l.id == list_id)
                .map_or_else(|| list_id.to_string(), |l| l.name.clone())
        };

        let options = ConfirmOptions::new(
            "Delete reading list",
            format!("Delete \"{name}\"? This cannot be undone."),
        )
        .confirm_label("Delete")
        .severity(Severity::Danger);

        if !self.confirmer.confirm(options).await {
            debug!(%list_id, "deletion declined");
            return Ok(Deletion::Declined);
        }

        if !self.state().deleting.insert(list_id.clone()) {
            return Err(ControllerError::InProgress(list_id.clone()));
        }

        let result = self.lists.delete(list_id).await;

        {
            let mut state = self.state();
            state.deleting.remove(list_id);
            if result.is_ok() {
                state.lists.retain(|l| &l.id != list_id);
                if state.selected.as_ref().is_some_and(|s| &s.id == list_id) {
                    state.clear_selection();
                }
            }
        }

        match result {
            Ok(()) => {
                info!(%list_id, "reading list deleted");
                self.notifier
                    .success(&format!("Deleted reading list \"{name}\""));
                Ok(Deletion::Deleted)
            }
            Err(err) => {
                warn!(error = %err, %list_id, "failed to delete reading list");
                self.fail(err.into())
            }
        }
    }

    fn fail<T>(&self, err: ControllerError) -> Result<T, ControllerError> {
        self.notifier.error(&err.to_string());
        Err(err)
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
