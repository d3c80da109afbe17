//! Issue capability used by the validator

use async_trait::async_trait;
use tpi_core::IssueRef;

use crate::issues::{Comment, Issue};
use crate::Result;

/// Operations on a single issue.
///
/// Implemented by [`IssueHandle`](crate::IssueHandle) against the GitHub
/// REST API and by [`TestbedIssue`](crate::TestbedIssue) in memory.
#[async_trait]
pub trait GitHubIssue: Send + Sync {
    /// Fetch the issue
    async fn get_issue(&self) -> Result<Issue>;

    /// Fetch comments on the issue, oldest first
    async fn get_comments(&self) -> Result<Vec<Comment>>;

    async fn post_comment(&self, body: &str) -> Result<()>;

    async fn delete_comment(&self, id: u64) -> Result<()>;

    async fn add_label(&self, label: &str) -> Result<()>;

    /// Remove a label; removing a label the issue does not carry succeeds
    async fn remove_label(&self, label: &str) -> Result<()>;

    /// Add a label to another issue named on the `Refs:` line
    async fn label_referenced_issue(&self, issue: &IssueRef, label: &str) -> Result<()>;
}
