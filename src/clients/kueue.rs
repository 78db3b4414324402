use std::sync::Arc;

use crate::clients::exec::CommandRunner;
use crate::core::error::DiagnosticError;

pub fn describe_cluster_queue_args(name: &str) -> Vec<String> {
    vec![
        "describe".to_string(),
        "clusterqueue".to_string(),
        name.to_string(),
    ]
}

/// Queries Kueue resources through `kubectl`.
#[derive(Clone)]
pub struct KueueClient {
    runner: Arc<dyn CommandRunner>,
    binary: String,
}

impl KueueClient {
    pub fn new(runner: Arc<dyn CommandRunner>, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }

    /// `kubectl describe clusterqueue <name>`. The name is passed through unchecked.
    pub async fn describe_cluster_queue(&self, name: &str) -> Result<String, DiagnosticError> {
        let args = describe_cluster_queue_args(name);
        self.runner
            .run(&self.binary, &args)
            .await
            .map_err(|source| DiagnosticError::DescribeClusterQueue {
                output: source.output().to_owned(),
                source,
            })
    }
}
