use std::future::Future;
use std::sync::Arc;

use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{
    CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::RoleServer;

use crate::clients::exec::CommandRunner;
use crate::clients::kueue::KueueClient;
use crate::clients::openshift::OpenShiftClient;
use crate::core::error::DiagnosticError;
use crate::infra::config::AppConfig;
use crate::infra::runtime::mcp_transport::ServerHandler;
use crate::tools::params::{ClusterQueueArgs, MustGatherArgs};

pub const MUST_GATHER_TOOL: &str = "collect_must_gather_ocp_kueue";
pub const CLUSTER_QUEUE_TOOL: &str = "cluster_queue_status";
pub const SERVER_NAME: &str = "Kueue Support";

/// MCP handler exposing the Kueue diagnostic commands.
#[derive(Clone)]
pub struct DiagnosticsSvc {
    openshift: OpenShiftClient,
    kueue: KueueClient,
}

impl DiagnosticsSvc {
    pub fn from_config(cfg: &AppConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            openshift: OpenShiftClient::new(runner.clone(), cfg.oc_bin.clone()),
            kueue: KueueClient::new(runner, cfg.kubectl_bin.clone()),
        }
    }
}

impl ServerHandler for DiagnosticsSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Kueue support tools: collect must-gather data from OpenShift and describe ClusterQueues."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

#[rmcp::tool_router]
impl DiagnosticsSvc {
    #[rmcp::tool(
        name = "collect_must_gather_ocp_kueue",
        description = "Runs \"oc adm must-gather\" to capture debugging information.\n\nCreate a temporary directory and pass it using the --dest-dir option to store the output in a single place.\n\noc adm must-gather can scoop up almost every artifact engineers or support need in a single shot: it exports the full YAML for all cluster-scoped and namespaced resources (Deployments, CRDs, Nodes, ClusterOperators, etc.); captures pod and container logs as well as systemd journal slices from each node to trace runtime crashes or OOMs; grabs API-server and OAuth audit logs for security or compliance forensics; collects kernel, cgroup, and other node sysinfo plus tuned and kubelet configs for performance tuning; optionally runs add-on scripts such as gather_network_logs to archive iptables/OVN flows and CNI pod logs, or gather_profiling_node to fetch 30-second CPU and heap pprof dumps from both kubelet and CRI-O for hotspot analysis; and, through plug-in images, can extend to operator-specific data like storage states or virtualization metrics, ensuring one reproducible tarball contains configuration, logs, network traces, performance profiles, and security audits for thorough offline debugging. Use \"oc adm must-gather -h\" for available options.",
        annotations(title = "Collect cluster data via oc adm must-gather")
    )]
    async fn collect_must_gather(
        &self,
        Parameters(args): Parameters<MustGatherArgs>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        Ok(run_or_cancel(MUST_GATHER_TOOL, self.handle_must_gather(args), ctx.ct.cancelled()).await)
    }

    #[rmcp::tool(
        name = "cluster_queue_status",
        description = "Provides information about why no workloads are admitted in the ClusterQueue.",
        annotations(title = "Why no workloads are admitted in the ClusterQueue")
    )]
    async fn cluster_queue_status(
        &self,
        Parameters(args): Parameters<ClusterQueueArgs>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        Ok(run_or_cancel(CLUSTER_QUEUE_TOOL, self.handle_cluster_queue(args), ctx.ct.cancelled()).await)
    }
}

impl DiagnosticsSvc {
    /// Runs must-gather and reports the outcome in-band; never fails the call.
    pub async fn handle_must_gather(&self, args: MustGatherArgs) -> CallToolResult {
        tracing::debug!(dest_dir = %args.dest_dir, extra_args = ?args.extra_args, "must-gather invoked");
        let result = self
            .openshift
            .must_gather(&args.dest_dir, &args.extra_args)
            .await;
        into_tool_result(MUST_GATHER_TOOL, result)
    }

    pub async fn handle_cluster_queue(&self, args: ClusterQueueArgs) -> CallToolResult {
        tracing::debug!(cluster_queue = %args.cluster_queue_name, "cluster queue status invoked");
        let result = self
            .kueue
            .describe_cluster_queue(&args.cluster_queue_name)
            .await;
        into_tool_result(CLUSTER_QUEUE_TOOL, result)
    }
}

fn into_tool_result(tool: &str, result: Result<String, DiagnosticError>) -> CallToolResult {
    match result {
        Ok(out) => {
            tracing::info!(tool, bytes = out.len(), "tool succeeded");
            CallToolResult::success(vec![Content::text(out)])
        }
        Err(e) => {
            tracing::warn!(tool, error = %e, "tool failed");
            CallToolResult::error(vec![Content::text(e.to_string())])
        }
    }
}

/// Resolves to `work` unless `cancel` fires first. Dropping `work` kills any
/// child process it started.
async fn run_or_cancel(
    tool: &str,
    work: impl Future<Output = CallToolResult>,
    cancel: impl Future<Output = ()>,
) -> CallToolResult {
    tokio::select! {
        result = work => result,
        _ = cancel => {
            tracing::info!(tool, "tool call cancelled");
            CallToolResult::error(vec![Content::text(format!("{tool} cancelled"))])
        }
    }
}

pub type DiagnosticsRouter = ToolRouter<DiagnosticsSvc>;

impl DiagnosticsSvc {
    pub fn router() -> DiagnosticsRouter {
        // Wrapper to expose the macro-generated private tool_router
        Self::tool_router()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::exec::{ExecError, FnRunner};
    use crate::clients::openshift::MUST_GATHER_IMAGE;
    use crate::tools::catalog::PLANNED_TOOLS;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    fn svc_with(runner: FnRunner) -> DiagnosticsSvc {
        DiagnosticsSvc::from_config(&AppConfig::default(), Arc::new(runner))
    }

    fn ok_runner(out: &'static str) -> FnRunner {
        FnRunner::new(move |_program: String, _args: Vec<String>| async move { Ok(out.to_string()) })
    }

    fn failing_runner() -> FnRunner {
        FnRunner::new(|_program: String, _args: Vec<String>| async move {
            Err(ExecError::Exit {
                code: 1,
                output: String::new(),
            })
        })
    }

    fn recording_runner(calls: Arc<Mutex<Vec<Vec<String>>>>) -> FnRunner {
        FnRunner::new(move |_program: String, args: Vec<String>| {
            calls.lock().unwrap().push(args);
            async move { Ok("ok".to_string()) }
        })
    }

    fn args(v: Value) -> MustGatherArgs {
        serde_json::from_value(v).unwrap()
    }

    fn text_of(result: &CallToolResult) -> String {
        let v = serde_json::to_value(result).unwrap();
        v["content"][0]["text"].as_str().unwrap_or_default().to_string()
    }

    fn is_error(result: &CallToolResult) -> bool {
        serde_json::to_value(result).unwrap()["isError"] == json!(true)
    }

    #[tokio::test]
    async fn must_gather_success_returns_text() {
        let svc = svc_with(ok_runner("must-gather output"));
        let result = svc
            .handle_must_gather(args(json!({"dest_dir": "/tmp/test", "extra_args": ["--foo", "--bar"]})))
            .await;
        assert!(!is_error(&result));
        assert_eq!(text_of(&result), "must-gather output");
    }

    #[tokio::test]
    async fn must_gather_failure_is_reported_in_band() {
        let svc = svc_with(failing_runner());
        let result = svc
            .handle_must_gather(args(json!({"dest_dir": "", "extra_args": []})))
            .await;
        assert!(is_error(&result));
        assert!(text_of(&result).starts_with("oc adm must-gather failed"));
    }

    #[tokio::test]
    async fn must_gather_without_extra_args_runs_with_none() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let svc = svc_with(recording_runner(calls.clone()));
        let result = svc.handle_must_gather(args(json!({"dest_dir": "/tmp/test"}))).await;
        assert_eq!(text_of(&result), "ok");
        assert_eq!(calls.lock().unwrap()[0].len(), 4);
    }

    #[tokio::test]
    async fn must_gather_ignores_non_array_extra_args() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let svc = svc_with(recording_runner(calls.clone()));
        let result = svc
            .handle_must_gather(args(json!({"dest_dir": "/tmp/test", "extra_args": "not-an-array"})))
            .await;
        assert!(!is_error(&result));
        assert_eq!(
            calls.lock().unwrap()[0],
            vec![
                "adm".to_string(),
                "must-gather".into(),
                format!("--image={MUST_GATHER_IMAGE}"),
                "--dest-dir=/tmp/test".into(),
            ]
        );
    }

    #[tokio::test]
    async fn cluster_queue_failure_mentions_describe() {
        let svc = svc_with(failing_runner());
        let result = svc
            .handle_cluster_queue(ClusterQueueArgs {
                cluster_queue_name: "cq1".into(),
            })
            .await;
        assert!(is_error(&result));
        assert!(text_of(&result).contains("kubectl describe cluster queue failed"));
    }

    #[tokio::test]
    async fn cluster_queue_success_returns_raw_output() {
        let svc = svc_with(ok_runner("Name: cq1\nStatus: Active"));
        let result = svc.handle_cluster_queue(ClusterQueueArgs::default()).await;
        assert_eq!(text_of(&result), "Name: cq1\nStatus: Active");
    }

    #[tokio::test]
    async fn cancellation_wins_over_pending_work() {
        let work = std::future::pending::<CallToolResult>();
        let result = run_or_cancel(MUST_GATHER_TOOL, work, std::future::ready(())).await;
        assert!(is_error(&result));
        assert_eq!(text_of(&result), "collect_must_gather_ocp_kueue cancelled");
    }

    #[tokio::test]
    async fn finished_work_is_returned_when_not_cancelled() {
        let svc = svc_with(ok_runner("Name: cq1"));
        let result = run_or_cancel(
            CLUSTER_QUEUE_TOOL,
            svc.handle_cluster_queue(ClusterQueueArgs::default()),
            std::future::pending(),
        )
        .await;
        assert!(!is_error(&result));
        assert_eq!(text_of(&result), "Name: cq1");
    }

    #[test]
    fn router_registers_only_implemented_tools() {
        let mut names: Vec<String> = DiagnosticsSvc::router()
            .into_iter()
            .map(|r| r.name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec![CLUSTER_QUEUE_TOOL, MUST_GATHER_TOOL]);
        for planned in PLANNED_TOOLS {
            assert!(!names.iter().any(|n| n == planned.name));
        }
    }

    #[test]
    fn server_info_enables_tools() {
        let info = svc_with(ok_runner("")).get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "Kueue Support");
        assert_eq!(info.server_info.version, "1.0.0");
    }
}
