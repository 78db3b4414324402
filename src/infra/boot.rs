use std::sync::Arc;

use crate::clients::exec::{CommandRunner, ProcessRunner};
use crate::infra::config::AppConfig;
use crate::tools::diagnostics::tool_router::{DiagnosticsRouter, DiagnosticsSvc};

/// Handler/router pair for the transport, with the runner injected.
pub fn make_factory(
    cfg: AppConfig,
    runner: Arc<dyn CommandRunner>,
) -> impl Fn() -> (DiagnosticsSvc, DiagnosticsRouter) + Clone + Send + 'static {
    move || {
        let handler = DiagnosticsSvc::from_config(&cfg, runner.clone());
        (handler, DiagnosticsSvc::router())
    }
}

pub async fn run_server(cfg: AppConfig) -> anyhow::Result<()> {
    cfg.validate()?;
    tracing::info!(
        oc = %cfg.oc_bin,
        kubectl = %cfg.kubectl_bin,
        "BOOT kueue-mcp-server (stdio)"
    );

    let factory = make_factory(cfg, Arc::new(ProcessRunner));
    crate::infra::runtime::mcp_transport::serve_stdio(factory)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
