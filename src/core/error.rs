use thiserror::Error;

use crate::clients::exec::ExecError;

/// Failure of a diagnostic command. The captured output is kept in the
/// message so callers still see what the tool printed before failing.
#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("oc adm must-gather failed: {source}: {output}")]
    MustGather { source: ExecError, output: String },
    #[error("kubectl describe cluster queue failed: {source}: {output}")]
    DescribeClusterQueue { source: ExecError, output: String },
}
