//! atlassian-mcp-gateway: a Model Context Protocol server exposing Jira,
//! Confluence, and Bitbucket as AI-callable tools over JSON-RPC on stdio.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           STDIO Server Loop (C10)            │
//! │         JSON-RPC over stdin/stdout           │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │       Registry & Dispatcher (C9) + rpc       │
//! │   jira_*, confluence_*, bitbucket_*, unified │
//! └───────┬─────────────┬─────────────┬─────────┘
//!         │             │             │
//!    ┌────▼───┐   ┌─────▼─────┐  ┌────▼─────┐
//!    │ Jira   │   │ Confluence│  │ Bitbucket│
//!    │Handler │   │  Handler  │  │ Handler  │
//!    └────┬───┘   └─────┬─────┘  └────┬─────┘
//!         │             │             │
//!    ┌────▼─────────────▼─────────────▼────┐
//!    │       Product Clients (C6)           │
//!    └─────────────────┬─────────────────────┘
//!                      │
//!    ┌─────────────────▼─────────────────────┐
//!    │         HTTP Transport (C5)            │
//!    └─────────────────────────────────────────┘
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod json;
pub mod registry;
pub mod rpc;
pub mod search;
pub mod server;
pub mod transport;
pub mod types;

pub use error::{GatewayError, Result};
pub use types::{Product, ToolDescriptor, ToolResponse};
