//! Core value types shared across the gateway: the product tag, the tool
//! catalogue entry, and the response envelope every tool invocation
//! returns.

use std::fmt;

/// Which Atlassian product (or the unified search engine) a tool or
/// response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    Jira,
    Confluence,
    Bitbucket,
    Unified,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Jira => "Jira",
            Self::Confluence => "Confluence",
            Self::Bitbucket => "Bitbucket",
            Self::Unified => "Unified",
        };
        write!(f, "{s}")
    }
}

/// Static catalogue entry for a single registered tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub product: Product,
}

/// The value every tool invocation returns. Immutable once built:
/// `content` is copied into the struct on construction and never mutated
/// afterward.
#[derive(Debug, Clone)]
pub struct ToolResponse {
    pub product: Product,
    pub tool_name: String,
    pub is_error: bool,
    content: Vec<String>,
    pub item_count: usize,
}

impl ToolResponse {
    /// A successful response with a single text block.
    #[must_use]
    pub fn success(product: Product, tool_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            product,
            tool_name: tool_name.into(),
            is_error: false,
            content: vec![text.into()],
            item_count: 0,
        }
    }

    /// A successful response summarizing `item_count` items.
    #[must_use]
    pub fn success_with_count(
        product: Product,
        tool_name: impl Into<String>,
        text: impl Into<String>,
        item_count: usize,
    ) -> Self {
        Self {
            product,
            tool_name: tool_name.into(),
            is_error: false,
            content: vec![text.into()],
            item_count,
        }
    }

    /// An error response. `item_count` is always 0 for errors.
    #[must_use]
    pub fn error(product: Product, tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            product,
            tool_name: tool_name.into(),
            is_error: true,
            content: vec![message.into()],
            item_count: 0,
        }
    }

    /// The ordered content blocks, copied out for the caller.
    #[must_use]
    pub fn content(&self) -> &[String] {
        &self.content
    }

    /// The first content block — what the JSON-RPC layer embeds as the
    /// `text` field of the tool-call result.
    #[must_use]
    pub fn first_text(&self) -> &str {
        self.content.first().map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_one_block_and_zero_count_by_default() {
        let r = ToolResponse::success(Product::Jira, "jira_get_issue", "ok");
        assert!(!r.is_error);
        assert_eq!(r.item_count, 0);
        assert_eq!(r.content().len(), 1);
        assert_eq!(r.first_text(), "ok");
    }

    #[test]
    fn error_always_has_zero_item_count() {
        let r = ToolResponse::error(Product::Jira, "jira_get_issue", "boom");
        assert!(r.is_error);
        assert_eq!(r.item_count, 0);
    }

    #[test]
    fn success_with_count_preserves_count() {
        let r = ToolResponse::success_with_count(Product::Confluence, "confluence_search", "found", 7);
        assert_eq!(r.item_count, 7);
        assert!(!r.is_error);
    }
}
