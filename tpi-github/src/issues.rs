//! Issue fetching and management

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::models::issues::{Comment as OctocrabComment, Issue as OctocrabIssue};
use octocrab::models::CommentId;
use serde::{Deserialize, Serialize};
use tpi_core::IssueRef;
use tracing::{debug, info};

use crate::client::parse_issue_url;
use crate::{Error, GitHubClient, GitHubIssue, Result};

/// Issue state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl From<octocrab::models::IssueState> for IssueState {
    fn from(state: octocrab::models::IssueState) -> Self {
        match state {
            octocrab::models::IssueState::Open => IssueState::Open,
            octocrab::models::IssueState::Closed => IssueState::Closed,
            _ => IssueState::Open, // Default to open for unknown states
        }
    }
}

/// GitHub issue representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Issue body/description
    pub body: String,
    /// Login of the reporter
    pub author: String,
    /// Current state (open/closed)
    pub state: IssueState,
    /// Labels attached to the issue
    pub labels: Vec<String>,
    /// When the issue was created
    pub created_at: DateTime<Utc>,
    /// When the issue was last updated
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

impl From<OctocrabIssue> for Issue {
    fn from(issue: OctocrabIssue) -> Self {
        Issue {
            number: issue.number,
            title: issue.title,
            body: issue.body.unwrap_or_default(),
            author: issue.user.login,
            state: issue.state.into(),
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        }
    }
}

/// A comment on an issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Comment ID
    pub id: u64,
    /// Comment body/text
    pub body: String,
    /// Author username
    pub author: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

impl From<OctocrabComment> for Comment {
    fn from(comment: OctocrabComment) -> Self {
        Comment {
            id: comment.id.0,
            body: comment.body.unwrap_or_default(),
            author: comment.user.login,
            created_at: comment.created_at,
        }
    }
}

/// A single issue in the client's repository
#[derive(Debug, Clone, Copy)]
pub struct IssueHandle<'a> {
    client: &'a GitHubClient,
    number: u64,
}

impl GitHubClient {
    /// Handle to issue `number` in this repository
    pub fn issue(&self, number: u64) -> IssueHandle<'_> {
        IssueHandle {
            client: self,
            number,
        }
    }
}

/// Whether an API error is GitHub reporting a missing resource
fn is_not_found(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::GitHub { source, .. }
            if source.message.contains("Not Found") || source.message.contains("does not exist")
    )
}

#[async_trait]
impl<'a> GitHubIssue for IssueHandle<'a> {
    async fn get_issue(&self) -> Result<Issue> {
        debug!(number = self.number, "Fetching issue");

        let issue = self
            .client
            .client()
            .issues(self.client.owner(), self.client.repo())
            .get(self.number)
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    Error::IssueNotFound(self.number)
                } else {
                    Error::Api(e)
                }
            })?;

        Ok(issue.into())
    }

    async fn get_comments(&self) -> Result<Vec<Comment>> {
        debug!(number = self.number, "Fetching comments");

        let page = self
            .client
            .client()
            .issues(self.client.owner(), self.client.repo())
            .list_comments(self.number)
            .per_page(100)
            .send()
            .await?;

        Ok(page.items.into_iter().map(Comment::from).collect())
    }

    async fn post_comment(&self, body: &str) -> Result<()> {
        self.client
            .client()
            .issues(self.client.owner(), self.client.repo())
            .create_comment(self.number, body)
            .await?;

        info!(number = self.number, "Posted comment");
        Ok(())
    }

    async fn delete_comment(&self, id: u64) -> Result<()> {
        self.client
            .client()
            .issues(self.client.owner(), self.client.repo())
            .delete_comment(CommentId(id))
            .await?;

        info!(number = self.number, comment = id, "Deleted comment");
        Ok(())
    }

    async fn add_label(&self, label: &str) -> Result<()> {
        self.client
            .client()
            .issues(self.client.owner(), self.client.repo())
            .add_labels(self.number, &[label.to_string()])
            .await?;

        info!(number = self.number, label, "Added label");
        Ok(())
    }

    async fn remove_label(&self, label: &str) -> Result<()> {
        let result = self
            .client
            .client()
            .issues(self.client.owner(), self.client.repo())
            .remove_label(self.number, label)
            .await;

        match result {
            Ok(_) => {
                info!(number = self.number, label, "Removed label");
                Ok(())
            }
            Err(e) if is_not_found(&e) => {
                debug!(number = self.number, label, "Label not present");
                Ok(())
            }
            Err(e) => Err(Error::Api(e)),
        }
    }

    async fn label_referenced_issue(&self, issue: &IssueRef, label: &str) -> Result<()> {
        let (owner, repo, number) = match issue {
            IssueRef::Number(number) => (
                self.client.owner().to_string(),
                self.client.repo().to_string(),
                *number,
            ),
            IssueRef::Url(url) => parse_issue_url(url)?,
        };

        self.client
            .client()
            .issues(&owner, &repo)
            .add_labels(number, &[label.to_string()])
            .await?;

        info!(owner = %owner, repo = %repo, number, label, "Labeled referenced issue");
        Ok(())
    }
}
