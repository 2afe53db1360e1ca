//! Typed REST method surfaces over Jira, Confluence, and Bitbucket.
//!
//! Every method returns the opaque response body as a `String` — clients
//! never parse; that's left to the handlers and the unified search engine,
//! both built on [`crate::json`].

pub mod bitbucket;
pub mod confluence;
mod encode;
pub mod jira;

pub use bitbucket::BitbucketClient;
pub use confluence::ConfluenceClient;
pub use jira::JiraClient;

/// The configured subset of product clients, wired once at startup from
/// [`crate::config::GatewayConfig`]. A `None` field means the product is
/// either disabled (`enabledProducts`) or the gateway is unconfigured.
#[derive(Clone, Default)]
pub struct ProductClients {
    pub jira: Option<JiraClient>,
    pub confluence: Option<ConfluenceClient>,
    pub bitbucket: Option<BitbucketClient>,
}
