use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

use crate::application::services::{ConfirmOptions, Confirmer, Severity};

/// Asks on the terminal. Anything but an explicit yes cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptConfirmer;

#[async_trait]
impl Confirmer for PromptConfirmer {
    async fn confirm(&self, options: ConfirmOptions) -> bool {
        let mut stderr = tokio::io::stderr();
        let rendered = render(&options);
        if let Err(err) = stderr.write_all(rendered.as_bytes()).await {
            warn!(error = %err, "failed to write confirmation prompt");
            return false;
        }
        let _ = stderr.flush().await;

        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        match stdin.read_line(&mut line).await {
            Ok(_) => is_yes(&line, &options.confirm_label),
            Err(err) => {
                warn!(error = %err, "failed to read confirmation answer");
                false
            }
        }
    }
}

fn render(options: &ConfirmOptions) -> String {
    let marker = match options.severity {
        Severity::Danger => "!! ",
        Severity::Warning => "! ",
        Severity::Info => "",
    };
    format!(
        "{marker}{}\n{}\n[{}/{}] (y/N): ",
        options.title, options.message, options.confirm_label, options.cancel_label
    )
}

fn is_yes(answer: &str, confirm_label: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y")
        || answer.eq_ignore_ascii_case("yes")
        || answer.eq_ignore_ascii_case(confirm_label)
}
