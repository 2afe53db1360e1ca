//! Confluence client: REST API v2 for pages and spaces, v1 content/search
//! for CQL.

use super::encode::component as encode;
use crate::config::ConnectionConfig;
use crate::error::GatewayError;
use crate::transport::Transport;
use std::sync::Arc;

#[derive(Clone)]
pub struct ConfluenceClient {
    transport: Arc<Transport>,
    config: Arc<ConnectionConfig>,
}

impl ConfluenceClient {
    #[must_use]
    pub fn new(transport: Arc<Transport>, config: Arc<ConnectionConfig>) -> Self {
        Self { transport, config }
    }

    /// `GET /rest/api/content/search?cql=…&limit=…`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn search(&self, cql: &str, limit: i64) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/rest/api/content/search?cql={}&limit={}",
            encode(cql),
            limit
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `GET /api/v2/pages/{id}?body-format=storage`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn get_page(&self, id: &str) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!(
            "/api/v2/pages/{}?body-format=storage",
            encode(id)
        ));
        self.transport.get(&self.config, &url).await
    }

    /// `POST /api/v2/pages`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn create_page(&self, body: String) -> Result<String, GatewayError> {
        let url = self.config.build_url("/api/v2/pages");
        self.transport.post(&self.config, &url, body).await
    }

    /// `PUT /api/v2/pages/{id}`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn update_page(&self, id: &str, body: String) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!("/api/v2/pages/{}", encode(id)));
        self.transport.put(&self.config, &url, body).await
    }

    /// `GET /api/v2/spaces`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn list_spaces(&self) -> Result<String, GatewayError> {
        let url = self.config.build_url("/api/v2/spaces");
        self.transport.get(&self.config, &url).await
    }

    /// `GET /api/v2/pages/{id}/children`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn get_page_children(&self, id: &str) -> Result<String, GatewayError> {
        let url = self
            .config
            .build_url(&format!("/api/v2/pages/{}/children", encode(id)));
        self.transport.get(&self.config, &url).await
    }

    /// `DELETE /api/v2/pages/{id}`
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport or remote failure.
    pub async fn delete_page(&self, id: &str) -> Result<String, GatewayError> {
        let url = self.config.build_url(&format!("/api/v2/pages/{}", encode(id)));
        self.transport.delete(&self.config, &url).await
    }
}
