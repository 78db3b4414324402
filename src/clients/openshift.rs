use std::sync::Arc;

use crate::clients::exec::CommandRunner;
use crate::core::error::DiagnosticError;

/// Kueue must-gather plug-in image, pinned by commit.
pub const MUST_GATHER_IMAGE: &str = "registry.redhat.io/kueue-tech-preview/kueue-must-gather-rhel9:eb54d00af3f19663d025db9887d9425988cfef19";

/// Argument vector for `oc adm must-gather`. Extra arguments are appended verbatim.
pub fn must_gather_args(dest_dir: &str, extra: &[String]) -> Vec<String> {
    let mut args = vec![
        "adm".to_string(),
        "must-gather".to_string(),
        format!("--image={MUST_GATHER_IMAGE}"),
    ];
    if !dest_dir.is_empty() {
        args.push(format!("--dest-dir={dest_dir}"));
    }
    args.extend(extra.iter().cloned());
    args
}

#[derive(Clone)]
pub struct OpenShiftClient {
    runner: Arc<dyn CommandRunner>,
    binary: String,
}

impl OpenShiftClient {
    pub fn new(runner: Arc<dyn CommandRunner>, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }

    pub async fn must_gather(
        &self,
        dest_dir: &str,
        extra: &[String],
    ) -> Result<String, DiagnosticError> {
        let args = must_gather_args(dest_dir, extra);
        self.runner
            .run(&self.binary, &args)
            .await
            .map_err(|source| DiagnosticError::MustGather {
                output: source.output().to_owned(),
                source,
            })
    }
}
