//! Validate command - Run the validator against a live issue

use clap::Args;
use tpi_core::Config;
use tpi_github::{GitHubClient, Outcome, TestPlanItemValidator};

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Issue number
    pub number: u64,

    /// Repository (owner/repo format)
    #[arg(short, long, env = "GITHUB_REPOSITORY")]
    pub repo: String,
}

impl ValidateArgs {
    /// Execute the validate command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let client = GitHubClient::from_url(&self.repo).map_err(|e| anyhow::anyhow!("{}", e))?;

        if verbose {
            println!(
                "Validating issue #{} in {}/{}...",
                self.number,
                client.owner(),
                client.repo()
            );
        }

        let issue = client.issue(self.number);
        let outcome = TestPlanItemValidator::new(&issue, &config.validator)
            .run()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        match outcome {
            Outcome::Skipped => {
                println!(
                    "#{} is not labeled {} or {}, nothing to do",
                    self.number, config.validator.label, config.validator.invalid_label
                );
            }
            Outcome::Valid(item) => {
                println!(
                    "#{} is a valid test plan item ({} assignments, complexity {})",
                    self.number,
                    item.assignments.len(),
                    item.complexity
                );
            }
            Outcome::Invalid(error) => {
                println!("#{} is invalid: {}", self.number, error);
            }
        }

        Ok(())
    }
}
