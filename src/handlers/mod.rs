//! Per-product tool handlers: one module per product, each exposing
//! `execute_*` free functions that validate arguments, call the product
//! client, and wrap the result in a [`crate::types::ToolResponse`].

pub mod bitbucket;
pub mod common;
pub mod confluence;
pub mod jira;
