//! Test plan item validator action
//!
//! Keeps the label of a test plan item issue in sync with whether its body
//! parses: valid items carry the configured label, invalid ones carry the
//! invalid label plus a single comment explaining the first problem found.

use tpi_core::{parse_test_plan_item, ParseError, ParsedTestPlanItem, ValidatorConfig};
use tracing::{info, warn};

use crate::{GitHubIssue, Result};

/// Marker identifying comments posted by the validator
pub const COMMENT_TAG: &str = "<!-- INVALID TEST PLAN ITEM -->";

/// What a validator run concluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Issue carries neither label
    Skipped,
    Valid(ParsedTestPlanItem),
    Invalid(ParseError),
}

/// Validates one issue and applies labels and comments accordingly
pub struct TestPlanItemValidator<'a> {
    github: &'a dyn GitHubIssue,
    config: &'a ValidatorConfig,
}

impl<'a> TestPlanItemValidator<'a> {
    pub fn new(github: &'a dyn GitHubIssue, config: &'a ValidatorConfig) -> Self {
        Self { github, config }
    }

    pub async fn run(&self) -> Result<Outcome> {
        let issue = self.github.get_issue().await?;

        if !issue.has_label(&self.config.label) && !issue.has_label(&self.config.invalid_label) {
            info!(
                number = issue.number,
                labels = ?issue.labels,
                "Labels {}/{} not on issue, skipping",
                self.config.label,
                self.config.invalid_label
            );
            return Ok(Outcome::Skipped);
        }

        for comment in self.github.get_comments().await? {
            if comment.body.contains(COMMENT_TAG) {
                info!(number = issue.number, comment = comment.id, "Deleting prior comment");
                self.github.delete_comment(comment.id).await?;
            }
        }

        match parse_test_plan_item(&issue.body, &issue.author) {
            Err(error) => {
                warn!(number = issue.number, %error, "Invalid test plan item");
                self.github
                    .post_comment(&format!(
                        "{}\n{}\n\n**Error:** {}",
                        COMMENT_TAG, self.config.comment, error
                    ))
                    .await?;
                self.github.add_label(&self.config.invalid_label).await?;
                self.github.remove_label(&self.config.label).await?;
                Ok(Outcome::Invalid(error))
            }
            Ok(item) => {
                info!(
                    number = issue.number,
                    complexity = item.complexity,
                    assignments = item.assignments.len(),
                    "Test plan item is valid"
                );
                self.github.remove_label(&self.config.invalid_label).await?;
                self.github.add_label(&self.config.label).await?;

                if let Some(refs_label) = &self.config.refs_label {
                    for reference in &item.issue_refs {
                        if let Err(e) = self
                            .github
                            .label_referenced_issue(reference, refs_label)
                            .await
                        {
                            warn!(reference = %reference, error = %e, "Failed to label referenced issue");
                        }
                    }
                }

                Ok(Outcome::Valid(item))
            }
        }
    }
}
