//! MCP stdio transport helpers decoupled from tool logic.

use rmcp::handler::server::router::Router;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::serve_server;
use tokio::io::{AsyncRead, AsyncWrite};

pub use rmcp::ServerHandler;

/// Serve MCP over an arbitrary reader/writer pair until the peer goes away.
pub async fn serve_io<H, R, W>(
    factory: impl FnOnce() -> (H, ToolRouter<H>),
    reader: R,
    writer: W,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    H: ServerHandler,
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Send + Unpin + 'static,
{
    let (handler, tools) = factory();
    let service = Router::new(handler).with_tools(tools);
    let running = serve_server(service, (reader, writer)).await?;
    let reason = running.waiting().await?;
    tracing::info!(?reason, "MCP session ended");
    Ok(())
}

pub async fn serve_stdio<H>(
    factory: impl FnOnce() -> (H, ToolRouter<H>),
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    H: ServerHandler,
{
    serve_io(factory, tokio::io::stdin(), tokio::io::stdout()).await
}
