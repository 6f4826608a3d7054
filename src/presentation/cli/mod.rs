pub mod accounts;
pub mod books;
pub mod prompt;
pub mod reading_lists;

use accounts::AccountCommands;
use books::BookCommands;
use clap::{Parser, Subcommand};
use reading_lists::ListCommands;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(author, version, about = "Browse the catalog and manage reading lists", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "BOOKLIST_API_URL",
        default_value = "http://localhost:3000"
    )]
    pub api_url: String,

    /// Session token sent as a bearer header
    #[arg(long, global = true, env = "BOOKLIST_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse and search the catalog
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },

    /// Manage reading lists
    List {
        #[command(subcommand)]
        command: ListCommands,
    },

    /// Sign up, verify and log in
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
}

/// A failure that has already been shown to the user through the notifier.
#[derive(Debug, Error)]
#[error("command failed")]
pub struct Reported;

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
