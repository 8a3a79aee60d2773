//! Review history commands

use clap::Args;
use coderev_core::ReviewService;

use super::print_review;

/// List your past reviews
#[derive(Args, Debug)]
pub struct HistoryArgs {}

impl HistoryArgs {
    /// Execute the history command
    pub async fn execute(&self, service: &ReviewService, owner: &str) -> anyhow::Result<()> {
        let summaries = service.history(owner).await?;

        if summaries.is_empty() {
            println!("No reviews yet.");
            return Ok(());
        }

        for summary in summaries {
            let line = if summary.summary.is_empty() {
                "(no summary)".to_string()
            } else {
                summary.summary.clone()
            };

            println!(
                "#{:<6} {:<12} {}  {}",
                summary.id,
                summary.language,
                summary.created_at.format("%Y-%m-%d %H:%M"),
                line
            );
        }

        Ok(())
    }
}

/// Show one review in full
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Review id
    pub id: i64,
}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self, service: &ReviewService, owner: &str) -> anyhow::Result<()> {
        let review = service.get(owner, self.id).await?;
        print_review(&review);
        Ok(())
    }
}

/// Delete one review
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Review id
    pub id: i64,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, service: &ReviewService, owner: &str) -> anyhow::Result<()> {
        service.delete(owner, self.id).await?;
        println!("Deleted review #{}", self.id);
        Ok(())
    }
}
