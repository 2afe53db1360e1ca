//! Jira REST API v3 (issues, projects, comments, transitions, users) and
//! REST Agile API v1 (boards, sprints) client.

use super::encode::component as encode;
use crate::config::ConnectionConfig;
use crate::error::GatewayError;
use crate::transport::Transport;
use std::sync::Arc;

/// One client per configured Jira instance. Cheap to clone: both fields
/// are `Arc`.
#[derive(Clone)]
pub struct JiraClient {
    transport: Arc<Transport>,
    config: Arc<ConnectionConfig>,
}

impl JiraClient {
    #[must_use]
    pub fn new(transport: Arc<Transport>, config: Arc<ConnectionConfig>) -> Self {
        Self { transport, config }
    }

    /// `GET /rest/api/3/search?jql=…&maxResults=…`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn search_issues(&self, jql: &str, max_results: i64) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/rest/api/3/search?jql={}&maxResults={}",
            encode(jql),
            max_results
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `GET /rest/api/3/issue/{key}`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn get_issue(&self, key: &str) -> Result<String, GatewayError> {
        let url = self
            .config
            .build_url(&format!("/rest/api/3/issue/{}", encode(key)));
        self.transport.get(&self.config, &url).await
    }

    /// `POST /rest/api/3/issue`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn create_issue(&self, body: String) -> Result<String, GatewayError> {
        let url = self.config.build_url("/rest/api/3/issue");
        self.transport.post(&self.config, &url, body).await
    }

    /// `PUT /rest/api/3/issue/{key}`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn update_issue(&self, key: &str, body: String) -> Result<String, GatewayError> {
        let url = self
            .config
            .build_url(&format!("/rest/api/3/issue/{}", encode(key)));
        self.transport.put(&self.config, &url, body).await
    }

    /// `POST /rest/api/3/issue/{key}/transitions`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn transition_issue(&self, key: &str, body: String) -> Result<String, GatewayError> {
        let url = self
            .config
            .build_url(&format!("/rest/api/3/issue/{}/transitions", encode(key)));
        self.transport.post(&self.config, &url, body).await
    }

    /// `GET /rest/api/3/project`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn list_projects(&self) -> Result<String, GatewayError> {
        let url = self.config.build_url("/rest/api/3/project");
        self.transport.get(&self.config, &url).await
    }

    /// `GET /rest/agile/1.0/board/{id}/sprint?state=active`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn get_sprint(&self, board_id: &str) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/rest/agile/1.0/board/{}/sprint?state=active",
            encode(board_id)
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `GET /rest/agile/1.0/board/{id}/issue?state=active&maxResults=…`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn get_sprint_issues(
        &self,
        board_id: &str,
        max_results: i64,
    ) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/rest/agile/1.0/board/{}/issue?state=active&maxResults={}",
            encode(board_id),
            max_results
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `POST /rest/api/3/issue/{key}/comment`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn add_comment(&self, key: &str, body: String) -> Result<String, GatewayError> {
        let url = self
            .config
            .build_url(&format!("/rest/api/3/issue/{}/comment", encode(key)));
        self.transport.post(&self.config, &url, body).await
    }

    /// `GET /rest/api/3/issue/{key}/comment`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn get_comments(&self, key: &str) -> Result<String, GatewayError> {
        let url = self
            .config
            .build_url(&format!("/rest/api/3/issue/{}/comment", encode(key)));
        self.transport.get(&self.config, &url).await
    }

    /// `PUT /rest/api/3/issue/{key}/assignee`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn assign_issue(&self, key: &str, body: String) -> Result<String, GatewayError> {
        let url = self
            .config
            .build_url(&format!("/rest/api/3/issue/{}/assignee", encode(key)));
        self.transport.put(&self.config, &url, body).await
    }

    /// `GET /rest/api/3/user/search?query=…`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn search_users(&self, query: &str) -> Result<String, GatewayError> {
        let url = self
            .config
            .build_url(&format!("/rest/api/3/user/search?query={}", encode(query)));
        self.transport.get(&self.config, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> JiraClient {
        let config = Arc::new(
            ConnectionConfig::new(
                server.uri(),
                Credentials::personal_access_token("tok").unwrap(),
                5,
            )
            .unwrap(),
        );
        JiraClient::new(Arc::new(Transport::new(5).unwrap()), config)
    }

    #[tokio::test]
    async fn search_issues_sends_jql_and_max_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/search"))
            .and(query_param("jql", "project = FOO"))
            .and(query_param("maxResults", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let c = client(&server).await;
        c.search_issues("project = FOO", 25).await.unwrap();
    }

    #[tokio::test]
    async fn get_issue_encodes_key_in_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/issue/PROJ-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"key\":\"PROJ-1\"}"))
            .mount(&server)
            .await;

        let c = client(&server).await;
        let body = c.get_issue("PROJ-1").await.unwrap();
        assert!(body.contains("PROJ-1"));
    }
}
