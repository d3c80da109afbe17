//! In-memory issue for exercising the validator without GitHub

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use tpi_core::IssueRef;

use crate::issues::{Comment, Issue, IssueState};
use crate::{Error, GitHubIssue, Result};

#[derive(Debug)]
struct TestbedState {
    issue: Issue,
    comments: Vec<Comment>,
    referenced_labels: Vec<(IssueRef, String)>,
    unreachable_refs: Vec<IssueRef>,
    next_comment_id: u64,
}

/// A single issue held in memory.
///
/// Every write is applied immediately, so the state can be inspected after
/// running the validator and reused across runs.
#[derive(Debug)]
pub struct TestbedIssue {
    state: Mutex<TestbedState>,
}

impl TestbedIssue {
    pub fn new(issue: Issue) -> Self {
        Self {
            state: Mutex::new(TestbedState {
                issue,
                comments: Vec::new(),
                referenced_labels: Vec::new(),
                unreachable_refs: Vec::new(),
                next_comment_id: 1,
            }),
        }
    }

    /// Open issue #1 by `author` with the given body and labels
    pub fn with_body(author: &str, body: &str, labels: &[&str]) -> Self {
        let now = Utc::now();
        Self::new(Issue {
            number: 1,
            title: "Test plan item".to_string(),
            body: body.to_string(),
            author: author.to_string(),
            state: IssueState::Open,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            created_at: now,
            updated_at: now,
        })
    }

    fn state(&self) -> MutexGuard<'_, TestbedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn labels(&self) -> Vec<String> {
        self.state().issue.labels.clone()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.state().comments.clone()
    }

    /// Labels added to referenced issues, in call order
    pub fn referenced_labels(&self) -> Vec<(IssueRef, String)> {
        self.state().referenced_labels.clone()
    }

    /// Make labeling `issue` fail as if it did not exist
    pub fn fail_labeling(&self, issue: IssueRef) {
        self.state().unreachable_refs.push(issue);
    }

    pub fn set_body(&self, body: &str) {
        let mut state = self.state();
        state.issue.body = body.to_string();
        state.issue.updated_at = Utc::now();
    }
}

#[async_trait]
impl GitHubIssue for TestbedIssue {
    async fn get_issue(&self) -> Result<Issue> {
        Ok(self.state().issue.clone())
    }

    async fn get_comments(&self) -> Result<Vec<Comment>> {
        Ok(self.comments())
    }

    async fn post_comment(&self, body: &str) -> Result<()> {
        let mut state = self.state();
        let id = state.next_comment_id;
        state.next_comment_id += 1;
        state.comments.push(Comment {
            id,
            body: body.to_string(),
            author: "tpi-bot".to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn delete_comment(&self, id: u64) -> Result<()> {
        self.state().comments.retain(|c| c.id != id);
        Ok(())
    }

    async fn add_label(&self, label: &str) -> Result<()> {
        let mut state = self.state();
        if !state.issue.has_label(label) {
            state.issue.labels.push(label.to_string());
        }
        Ok(())
    }

    async fn remove_label(&self, label: &str) -> Result<()> {
        self.state().issue.labels.retain(|l| l != label);
        Ok(())
    }

    async fn label_referenced_issue(&self, issue: &IssueRef, label: &str) -> Result<()> {
        let mut state = self.state();
        if state.unreachable_refs.contains(issue) {
            return Err(match issue {
                IssueRef::Number(number) => Error::IssueNotFound(*number),
                IssueRef::Url(url) => Error::Parse(format!("Not a GitHub issue URL: {}", url)),
            });
        }
        state
            .referenced_labels
            .push((issue.clone(), label.to_string()));
        Ok(())
    }
}
