//! Subprocess execution seam shared by the `oc` and `kubectl` clients.

use std::future::Future;
use std::io::Read;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("exit status {code}")]
    Exit { code: i32, output: String },
    #[error("terminated by signal")]
    Signal { output: String },
}

impl ExecError {
    /// Output captured before the failure. Empty when the process never
    /// started or its output could not be collected.
    pub fn output(&self) -> &str {
        match self {
            ExecError::Spawn { .. } | ExecError::Io { .. } => "",
            ExecError::Exit { output, .. } | ExecError::Signal { output } => output,
        }
    }
}

/// Runs an external binary and returns its combined stdout/stderr.
#[async_trait]
pub trait CommandRunner: Send + Sync + 'static {
    async fn run(&self, program: &str, args: &[String]) -> Result<String, ExecError>;
}

/// Spawns real child processes with tokio.
///
/// stdout and stderr share a single pipe, so the captured output keeps the
/// order in which the child wrote it. The child is killed if the returned
/// future is dropped, so a cancelled tool call does not leave `oc` running
/// in the background.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String, ExecError> {
        tracing::debug!(program, ?args, "spawning command");
        let spawn_err = |source| ExecError::Spawn {
            program: program.to_owned(),
            source,
        };
        let io_err = |source| ExecError::Io {
            program: program.to_owned(),
            source,
        };

        let (mut reader, writer) = std::io::pipe().map_err(spawn_err)?;
        let stderr_writer = writer.try_clone().map_err(spawn_err)?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer)
            .kill_on_drop(true);
        let mut child = cmd.spawn().map_err(spawn_err)?;
        // The parent's write ends live in `cmd`; the reader only sees EOF once they are closed.
        drop(cmd);

        let collect = tokio::task::spawn_blocking(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map(|_| buf)
        });
        let status = child.wait().await.map_err(io_err)?;
        let bytes = collect
            .await
            .map_err(|e| io_err(std::io::Error::other(e)))?
            .map_err(io_err)?;
        let combined = String::from_utf8_lossy(&bytes).into_owned();

        if status.success() {
            return Ok(combined);
        }
        match status.code() {
            Some(code) => Err(ExecError::Exit {
                code,
                output: combined,
            }),
            None => Err(ExecError::Signal { output: combined }),
        }
    }
}

type RunFuture = Pin<Box<dyn Future<Output = Result<String, ExecError>> + Send>>;

/// Closure-backed runner for substituting fake process behaviour.
#[derive(Clone)]
pub struct FnRunner {
    inner: Arc<dyn Fn(String, Vec<String>) -> RunFuture + Send + Sync>,
}

impl FnRunner {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(String, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ExecError>> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |program, args| Box::pin(f(program, args))),
        }
    }
}

#[async_trait]
impl CommandRunner for FnRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String, ExecError> {
        (self.inner)(program.to_owned(), args.to_vec()).await
    }
}
