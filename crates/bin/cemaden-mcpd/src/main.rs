//! Daemon entry point for the CEMADEN MCP server.
//!
//! Loads configuration from the environment, reads the municipality dataset,
//! and serves the tools over stdio, streamable HTTP, and the JSON gateway as
//! configured.

mod config;
mod control;

use cemaden_gateway::{GatewayConfig, GatewayServer};
use cemaden_mcp::CemadenMcp;
use cemaden_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tokio::task::JoinSet;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::CemadenConfig;
use crate::control::build_control_plane;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_LOG_FILTER: &str =
    "cemaden_core=info,cemaden_mcp=info,cemaden_gateway=info,cemaden_mcpd=info";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = CemadenConfig::from_args()?;
    info!(
        dataset = %config.dataset_path.display(),
        panel = %config.panel_url,
        stdio = config.enable_stdio,
        mcp_http = config.mcp_serve,
        gateway = config.gateway_serve,
        "cemaden-mcpd starting"
    );
    let control = build_control_plane(&config).await?;

    let mut servers: JoinSet<Result<(), BoxError>> = JoinSet::new();
    if config.mcp_serve {
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
        servers.spawn(serve_streamable_http(control.clone(), http_config));
    }
    if config.gateway_serve {
        let gateway_config = GatewayConfig::new(config.gateway_addr)
            .with_request_timeout(config.gateway_timeout)
            .with_max_body_bytes(config.gateway_max_body_bytes);
        let gateway = GatewayServer::new(CemadenMcp::new(control.clone()), gateway_config);
        servers.spawn(gateway.serve());
    }

    if config.enable_stdio {
        return serve_alongside(serve_stdio(control), &mut servers).await;
    }

    watch_servers(&mut servers).await
}

/// Runs the stdio transport while watching the listener tasks.
///
/// Returns when stdio ends or as soon as a listener fails.
async fn serve_alongside(
    stdio: impl Future<Output = Result<(), BoxError>>,
    servers: &mut JoinSet<Result<(), BoxError>>,
) -> Result<(), BoxError> {
    tokio::select! {
        result = stdio => result?,
        Err(err) = watch_servers(servers) => return Err(err),
    }
    servers.abort_all();
    Ok(())
}

/// Waits on the listener tasks, returning the first failure.
async fn watch_servers(servers: &mut JoinSet<Result<(), BoxError>>) -> Result<(), BoxError> {
    while let Some(joined) = servers.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                error!(error = %err, "server stopped");
                return Err(err);
            }
            Err(err) => {
                error!(error = %err, "server task failed");
                return Err(Box::new(err));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn failing_server() -> Result<(), BoxError> {
        Err(Box::new(io::Error::new(io::ErrorKind::AddrInUse, "address in use")))
    }

    #[tokio::test]
    async fn listener_failure_ends_stdio_session() {
        let mut servers: JoinSet<Result<(), BoxError>> = JoinSet::new();
        servers.spawn(async { failing_server() });

        let err = serve_alongside(std::future::pending(), &mut servers)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("address in use"));
    }

    #[tokio::test]
    async fn stdio_end_stops_listeners() {
        let mut servers: JoinSet<Result<(), BoxError>> = JoinSet::new();
        servers.spawn(std::future::pending());

        serve_alongside(async { Ok(()) }, &mut servers)
            .await
            .expect("stdio should end cleanly");

        assert!(servers.join_next().await.is_some_and(|joined| joined.is_err()));
    }

    #[tokio::test]
    async fn stdio_alone_ends_cleanly() {
        let mut servers: JoinSet<Result<(), BoxError>> = JoinSet::new();

        serve_alongside(async { Ok(()) }, &mut servers)
            .await
            .expect("stdio should end cleanly");
    }

    #[tokio::test]
    async fn watch_reports_listener_failure() {
        let mut servers: JoinSet<Result<(), BoxError>> = JoinSet::new();
        servers.spawn(async { Ok(()) });
        servers.spawn(async { failing_server() });

        assert!(watch_servers(&mut servers).await.is_err());
    }
}
