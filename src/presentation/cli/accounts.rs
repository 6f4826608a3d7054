use anyhow::Result;
use clap::{Args, Subcommand};

use super::{Reported, print_json};
use crate::application::services::Notifier;
use crate::domain::ApiError;
use crate::domain::accounts::{Credentials, NewAccount, Verification};
use crate::infrastructure::client::CatalogClient;

#[derive(Debug, Subcommand)]
pub enum AccountCommands {
    /// Create an account; a verification code is sent by email
    Signup(SignupCommand),
    /// Confirm an account with the emailed code
    Verify(VerifyCommand),
    /// Log in and print a session token
    Login(LoginCommand),
}

pub async fn run(
    client: &CatalogClient,
    notifier: &dyn Notifier,
    cmd: AccountCommands,
) -> Result<()> {
    match cmd {
        AccountCommands::Signup(c) => signup(client, notifier, c).await,
        AccountCommands::Verify(c) => verify(client, notifier, c).await,
        AccountCommands::Login(c) => login(client, notifier, c).await,
    }
}

#[derive(Debug, Args)]
pub struct SignupCommand {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn signup(
    client: &CatalogClient,
    notifier: &dyn Notifier,
    command: SignupCommand,
) -> Result<()> {
    let payload = NewAccount {
        email: command.email,
        password: command.password,
        name: command.name,
    }
    .normalize();
    if let Err(message) = payload.validate() {
        return Err(report(notifier, &message));
    }

    let account = client
        .accounts()
        .signup(&payload)
        .await
        .map_err(|err| failed(notifier, &err))?;
    notifier.info(&format!(
        "Check {} for a verification code",
        account.email
    ));
    print_json(&account)
}

#[derive(Debug, Args)]
pub struct VerifyCommand {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub code: String,
}

pub async fn verify(
    client: &CatalogClient,
    notifier: &dyn Notifier,
    command: VerifyCommand,
) -> Result<()> {
    let payload = Verification {
        email: command.email.trim().to_lowercase(),
        code: command.code.trim().to_string(),
    };
    let account = client
        .accounts()
        .verify(&payload)
        .await
        .map_err(|err| failed(notifier, &err))?;
    notifier.success("Account verified, you can now log in");
    print_json(&account)
}

#[derive(Debug, Args)]
pub struct LoginCommand {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

pub async fn login(
    client: &CatalogClient,
    notifier: &dyn Notifier,
    command: LoginCommand,
) -> Result<()> {
    let payload = Credentials {
        email: command.email.trim().to_lowercase(),
        password: command.password,
    };
    let session = client
        .accounts()
        .login(&payload)
        .await
        .map_err(|err| failed(notifier, &err))?;
    print_json(&session)
}

fn failed(notifier: &dyn Notifier, err: &ApiError) -> anyhow::Error {
    tracing::debug!(error = ?err, "account command failed");
    report(notifier, &err.to_string())
}

/// Show `message` once and mark the failure as already reported.
fn report(notifier: &dyn Notifier, message: &str) -> anyhow::Error {
    notifier.error(message);
    anyhow::Error::new(Reported)
}
