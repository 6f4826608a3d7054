use anyhow::Result;
use clap::{Args, Subcommand};

use super::print_json;
use crate::domain::books::BookFilter;
use crate::domain::ids::BookId;
use crate::infrastructure::client::CatalogClient;

#[derive(Debug, Subcommand)]
pub enum BookCommands {
    /// List or search catalog books
    List(ListBooksCommand),
    /// Get a book by ID
    Get(GetBookCommand),
    /// Show recommended books
    Recommend,
}

pub async fn run(client: &CatalogClient, cmd: BookCommands) -> Result<()> {
    match cmd {
        BookCommands::List(c) => list_books(client, c).await,
        BookCommands::Get(c) => get_book(client, c).await,
        BookCommands::Recommend => recommend_books(client).await,
    }
}

#[derive(Debug, Args)]
pub struct ListBooksCommand {
    /// Match against title or author
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
}

pub async fn list_books(client: &CatalogClient, command: ListBooksCommand) -> Result<()> {
    let filter = BookFilter {
        search: command.search,
        genre: command.genre,
    }
    .normalize();
    let books = client.books().list(&filter).await?;
    print_json(&books)
}

#[derive(Debug, Args)]
pub struct GetBookCommand {
    #[arg(long)]
    pub id: String,
}

pub async fn get_book(client: &CatalogClient, command: GetBookCommand) -> Result<()> {
    let book = client.books().get(&BookId::new(command.id)).await?;
    print_json(&book)
}

pub async fn recommend_books(client: &CatalogClient) -> Result<()> {
    let books = client.books().recommendations().await?;
    print_json(&books)
}
