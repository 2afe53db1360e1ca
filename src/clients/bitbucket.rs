//! Bitbucket Cloud API 2.0 client: repositories, pull requests, branches,
//! commits, and code search, all scoped under a workspace.

use super::encode::component as encode;
use crate::config::ConnectionConfig;
use crate::error::GatewayError;
use crate::transport::Transport;
use std::sync::Arc;

#[derive(Clone)]
pub struct BitbucketClient {
    transport: Arc<Transport>,
    config: Arc<ConnectionConfig>,
}

impl BitbucketClient {
    #[must_use]
    pub fn new(transport: Arc<Transport>, config: Arc<ConnectionConfig>) -> Self {
        Self { transport, config }
    }

    /// `GET /2.0/repositories/{ws}?pagelen=…`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn list_repos(&self, workspace: &str, pagelen: i64) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/2.0/repositories/{}?pagelen={}",
            encode(workspace),
            pagelen
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `GET /2.0/repositories/{ws}/{slug}`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn get_repo(&self, workspace: &str, slug: &str) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/2.0/repositories/{}/{}",
            encode(workspace),
            encode(slug)
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `GET /2.0/repositories/{ws}/{slug}/pullrequests?pagelen=…&state=…`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn list_pull_requests(
        &self,
        workspace: &str,
        slug: &str,
        pagelen: i64,
        state: &str,
    ) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/2.0/repositories/{}/{}/pullrequests?pagelen={}&state={}",
            encode(workspace),
            encode(slug),
            pagelen,
            encode(state)
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `GET /2.0/repositories/{ws}/{slug}/pullrequests/{id}`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn get_pull_request(
        &self,
        workspace: &str,
        slug: &str,
        id: &str,
    ) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/2.0/repositories/{}/{}/pullrequests/{}",
            encode(workspace),
            encode(slug),
            encode(id)
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `GET /2.0/workspaces/{ws}/search/code?search_query=…`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn search_code(&self, workspace: &str, query: &str) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/2.0/workspaces/{}/search/code?search_query={}",
            encode(workspace),
            encode(query)
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `POST /2.0/repositories/{ws}/{slug}/pullrequests`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn create_pull_request(
        &self,
        workspace: &str,
        slug: &str,
        body: String,
    ) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/2.0/repositories/{}/{}/pullrequests",
            encode(workspace),
            encode(slug)
        ));
        self.transport.post(&self.config, &url, body).await
    }

    /// `GET /2.0/repositories/{ws}/{slug}/refs/branches?pagelen=…`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn list_branches(
        &self,
        workspace: &str,
        slug: &str,
        pagelen: i64,
    ) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/2.0/repositories/{}/{}/refs/branches?pagelen={}",
            encode(workspace),
            encode(slug),
            pagelen
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `GET /2.0/repositories/{ws}/{slug}/commits?pagelen=…&include=…`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn get_commits(
        &self,
        workspace: &str,
        slug: &str,
        pagelen: i64,
        include: &str,
    ) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/2.0/repositories/{}/{}/commits?pagelen={}&include={}",
            encode(workspace),
            encode(slug),
            pagelen,
            encode(include)
        ));
        self.transport.get(&self.config, &url).await
    }
}
