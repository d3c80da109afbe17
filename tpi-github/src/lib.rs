//! tpi-github - GitHub integration for test plan item validation
//!
//! This crate provides the issue capability the validator is written
//! against, a live octocrab-backed implementation, an in-memory testbed,
//! and the validator action itself.

mod api;
mod client;
mod error;
mod issues;
mod testbed;
mod validator;

pub use api::GitHubIssue;
pub use client::GitHubClient;
pub use error::{Error, Result};
pub use issues::{Comment, Issue, IssueHandle, IssueState};
pub use testbed::TestbedIssue;
pub use validator::{Outcome, TestPlanItemValidator, COMMENT_TAG};
