//! GitHub API client using octocrab

use crate::{Error, Result};
use octocrab::Octocrab;
use tpi_core::Secrets;
use tracing::info;

/// GitHub API client for repository operations
pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a new GitHub client for the specified repository
    ///
    /// Token is loaded from (in priority order):
    /// 1. GITHUB_TOKEN environment variable
    /// 2. ~/.config/tpi/secrets.toml
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();

        let secrets = Secrets::load().map_err(|e| Error::Auth(e.to_string()))?;

        let token = secrets.github_token().ok_or_else(|| {
            Error::Auth(
                "GitHub token not found. Set GITHUB_TOKEN environment variable \
                 or add token to ~/.config/tpi/secrets.toml"
                    .to_string(),
            )
        })?;

        let client = Octocrab::builder()
            .personal_token(token)
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(owner = %owner, repo = %repo, "Created GitHub client");

        Ok(Self {
            client,
            owner,
            repo,
        })
    }

    /// Create a GitHub client from a repository URL
    ///
    /// Supports formats:
    /// - owner/repo
    /// - https://github.com/owner/repo
    pub fn from_url(url: &str) -> Result<Self> {
        let (owner, repo) = parse_github_url(url)?;
        Self::new(owner, repo)
    }

    /// Get the repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

/// Split `owner/repo` or `https://github.com/owner/repo[.git]` into owner
/// and repo
fn parse_github_url(url: &str) -> Result<(String, String)> {
    let path = if url.starts_with("https://") || url.starts_with("http://") {
        let parsed = url::Url::parse(url).map_err(|e| Error::Parse(e.to_string()))?;
        parsed.path().trim_matches('/').to_string()
    } else {
        url.to_string()
    };

    match path.trim_end_matches(".git").split('/').collect::<Vec<_>>().as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() && !owner.contains(':') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Parse(format!(
            "Invalid repository: {}. Expected owner/repo or a GitHub URL",
            url
        ))),
    }
}

/// Split an issue URL (`https://github.com/<owner>/<repo>/issues/<n>`) into
/// owner, repo and issue number
pub(crate) fn parse_issue_url(url: &str) -> Result<(String, String, u64)> {
    let parsed = url::Url::parse(url).map_err(|e| Error::Parse(e.to_string()))?;
    let parts: Vec<&str> = parsed
        .path()
        .trim_matches('/')
        .split('/')
        .collect();

    match parts.as_slice() {
        [owner, repo, "issues", number] => {
            let number = number
                .parse()
                .map_err(|_| Error::Parse(format!("Invalid issue number in URL: {}", url)))?;
            Ok((owner.to_string(), repo.to_string(), number))
        }
        _ => Err(Error::Parse(format!("Not a GitHub issue URL: {}", url))),
    }
}
