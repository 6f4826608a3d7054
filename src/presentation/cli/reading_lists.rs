use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::prompt::PromptConfirmer;
use super::{Reported, print_json};
use crate::application::services::{
    AutoConfirm, Confirmer, ControllerError, Deletion, Notifier, ReadingListController, Selection,
};
use crate::domain::books::Book;
use crate::domain::ids::{BookId, ListId};
use crate::domain::reading_lists::ReadingList;
use crate::infrastructure::client::CatalogClient;

#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// Show all reading lists
    All,
    /// Create a reading list
    Create(CreateListCommand),
    /// Show a reading list with its books
    Show(ShowListCommand),
    /// Add a book to a reading list
    AddBook(ListBookCommand),
    /// Remove a book from a reading list
    RemoveBook(ListBookCommand),
    /// Rename a reading list
    Rename(RenameListCommand),
    /// Delete a reading list
    Delete(DeleteListCommand),
}

#[derive(Debug, Args)]
pub struct CreateListCommand {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowListCommand {
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListBookCommand {
    /// Reading list ID
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub book_id: String,
}

#[derive(Debug, Args)]
pub struct RenameListCommand {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteListCommand {
    #[arg(long)]
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Serialize)]
struct ListView<'a> {
    list: &'a ReadingList,
    books: &'a [Book],
}

pub async fn run(
    client: Arc<CatalogClient>,
    notifier: Arc<dyn Notifier>,
    cmd: ListCommands,
) -> Result<()> {
    let confirmer: Arc<dyn Confirmer> = match cmd {
        ListCommands::Delete(ref c) if c.yes => Arc::new(AutoConfirm),
        _ => Arc::new(PromptConfirmer),
    };
    let controller = ReadingListController::new(client.clone(), client, notifier, confirmer);

    match cmd {
        ListCommands::All => {
            let lists = reported(controller.load_lists().await)?;
            print_json(&lists)
        }
        ListCommands::Create(c) => {
            let list = reported(controller.create_list(&c.name, c.description).await)?;
            print_json(&list)
        }
        ListCommands::Show(c) => {
            select(&controller, &ListId::new(c.id)).await?;
            print_selection(&controller)
        }
        ListCommands::AddBook(c) => {
            select(&controller, &ListId::new(c.id)).await?;
            reported(controller.add_book_to_list(&BookId::new(c.book_id)).await)?;
            print_selection(&controller)
        }
        ListCommands::RemoveBook(c) => {
            select(&controller, &ListId::new(c.id)).await?;
            reported(
                controller
                    .remove_book_from_list(&BookId::new(c.book_id))
                    .await,
            )?;
            print_selection(&controller)
        }
        ListCommands::Rename(c) => {
            let list_id = ListId::new(c.id);
            reported(controller.load_lists().await)?;
            let list = reported(
                controller
                    .rename_list(&list_id, &c.name, c.description)
                    .await,
            )?;
            print_json(&list)
        }
        ListCommands::Delete(c) => {
            reported(controller.load_lists().await)?;
            match reported(controller.delete_list(&ListId::new(c.id)).await)? {
                Deletion::Deleted => Ok(()),
                Deletion::Declined => {
                    eprintln!("Nothing deleted.");
                    Ok(())
                }
            }
        }
    }
}

/// Load the user's lists and make `list_id` the selection.
async fn select(controller: &ReadingListController, list_id: &ListId) -> Result<()> {
    reported(controller.load_lists().await)?;
    match controller.select_list(list_id).await {
        Ok(Selection::Committed(_)) => Ok(()),
        // Nothing else selects concurrently from the CLI.
        Ok(Selection::Superseded) => Ok(()),
        Err(ControllerError::UnknownList(id)) => {
            anyhow::bail!("no reading list with ID {id}")
        }
        Err(err) => reported(Err(err)),
    }
}

fn print_selection(controller: &ReadingListController) -> Result<()> {
    let Some(list) = controller.selected() else {
        anyhow::bail!("no reading list is selected");
    };
    let books = controller.books();
    print_json(&ListView {
        list: &list,
        books: &books,
    })
}

/// Controller failures have already been shown through the notifier.
fn reported<T>(result: Result<T, ControllerError>) -> Result<T> {
    result.map_err(|err| {
        tracing::debug!(error = %err, "reading list command failed");
        anyhow::Error::new(Reported)
    })
}
