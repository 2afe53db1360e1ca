//! atlassian-mcp-gateway: an MCP server exposing Jira, Confluence, and
//! Bitbucket as AI-callable tools over JSON-RPC on stdio.
//!
//! Usage:
//!   atlassian-mcp-gateway --mcp   # Start the MCP server

use atlassian_mcp_gateway::clients::{BitbucketClient, ConfluenceClient, JiraClient, ProductClients};
use atlassian_mcp_gateway::config::ConfigLoader;
use atlassian_mcp_gateway::registry::Registry;
use atlassian_mcp_gateway::transport::Transport;
use atlassian_mcp_gateway::types::Product;
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "atlassian-mcp-gateway")]
#[command(about = "MCP gateway exposing Jira, Confluence, and Bitbucket as AI tool calls")]
#[command(version)]
struct Cli {
    /// Run as MCP server (stdin/stdout JSON-RPC). The only supported mode.
    #[arg(long)]
    mcp: bool,

    /// Overrides the configuration search root (same as
    /// `ATLASSIAN_CONFIG_DIR`).
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // CRITICAL: log to stderr only, stdout is reserved for JSON-RPC.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("atlassian_mcp_gateway=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    if !cli.mcp {
        eprintln!("Use --mcp to start the MCP server.");
        eprintln!("Run with --help for more information.");
        std::process::exit(1);
    }

    let loader = cli
        .config_dir
        .map_or_else(ConfigLoader::new, ConfigLoader::with_config_dir);
    let config_hint = format!(
        "Set ATLASSIAN_BASE_URL, ATLASSIAN_EMAIL/ATLASSIAN_TOKEN (or ATLASSIAN_AUTH_MODE=pat + ATLASSIAN_TOKEN), \
         or write them to {} or {}.",
        loader.shared_file_path().display(),
        loader.local_file_path().display()
    );

    let clients = match loader.load() {
        Ok(gateway_config) => {
            tracing::info!("configuration loaded from {}", loader.config_dir().display());
            let transport = Arc::new(Transport::new(gateway_config.atlassian.timeout_seconds())?);
            let atlassian_cfg = Arc::new(gateway_config.atlassian.clone());
            let bitbucket_cfg = Arc::new(gateway_config.bitbucket.clone());
            ProductClients {
                jira: gateway_config
                    .is_enabled(Product::Jira)
                    .then(|| JiraClient::new(Arc::clone(&transport), Arc::clone(&atlassian_cfg))),
                confluence: gateway_config.is_enabled(Product::Confluence).then(|| {
                    ConfluenceClient::new(Arc::clone(&transport), Arc::clone(&atlassian_cfg))
                }),
                bitbucket: gateway_config
                    .is_enabled(Product::Bitbucket)
                    .then(|| BitbucketClient::new(Arc::clone(&transport), Arc::clone(&bitbucket_cfg))),
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "starting in unconfigured mode");
            ProductClients::default()
        }
    };

    let registry = Registry::new(clients, config_hint);
    let running = Arc::new(AtomicBool::new(true));

    let signal_running = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_running.store(false, Ordering::SeqCst);
        }
    });

    atlassian_mcp_gateway::server::run(&registry, running).await?;
    Ok(())
}
