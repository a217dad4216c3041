//! # Command Runner
//!
//! Process boundary of the optimizer. [`CommandRunner`] runs one tool
//! invocation and reports how it exited; [`SystemRunner`] does it for real
//! with `tokio::process::Command`.
//!
//! ## I/O Contract
//! - stdin: null
//! - stdout: discarded
//! - stderr: inherited, so tool diagnostics reach the terminal
//!
//! No timeout is applied: a hung tool blocks its caller.

use crate::command::Arg;
use crate::tool::ToolName;
use crate::tool_resolver::ToolPathResolver;
use futures::future::BoxFuture;
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// How a tool process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
}

impl ToolExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external tools on behalf of the optimizer
pub trait CommandRunner: Send + Sync {
    /// Run `tool` with `args` to completion.
    ///
    /// `Err` means the process could not be started at all.
    fn run<'a>(&'a self, tool: ToolName, args: &'a [Arg]) -> BoxFuture<'a, io::Result<ToolExit>>;
}

/// Spawns real processes, resolving binaries through [`ToolPathResolver`]
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    resolver: ToolPathResolver,
}

impl SystemRunner {
    pub fn new(resolver: ToolPathResolver) -> Self {
        Self { resolver }
    }

    async fn spawn<I, S>(program: &Path, args: I) -> io::Result<ToolExit>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let start_time = std::time::Instant::now();
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .await?;
        debug!(
            "{} exited with {:?} after {:?}",
            program.display(),
            status.code(),
            start_time.elapsed()
        );

        Ok(ToolExit { code: status.code() })
    }
}

impl CommandRunner for SystemRunner {
    fn run<'a>(&'a self, tool: ToolName, args: &'a [Arg]) -> BoxFuture<'a, io::Result<ToolExit>> {
        Box::pin(async move {
            let program = self.resolver.program_for(tool);
            debug!("Using tool path: {:?}", program);
            Self::spawn(&program, args.iter().map(Arg::as_os_str)).await
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted runner: records every invocation and answers from a table.
    /// Tools without an entry exit with status 0.
    #[derive(Default)]
    pub(crate) struct RecordingRunner {
        pub(crate) calls: Mutex<Vec<(ToolName, Vec<String>)>>,
        exits: HashMap<ToolName, Option<i32>>,
        unspawnable: Vec<ToolName>,
    }

    impl RecordingRunner {
        pub(crate) fn exiting(mut self, tool: ToolName, code: i32) -> Self {
            self.exits.insert(tool, Some(code));
            self
        }

        pub(crate) fn missing(mut self, tool: ToolName) -> Self {
            self.unspawnable.push(tool);
            self
        }

        pub(crate) fn called_tools(&self) -> Vec<ToolName> {
            self.calls.lock().unwrap().iter().map(|(tool, _)| *tool).collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run<'a>(
            &'a self,
            tool: ToolName,
            args: &'a [Arg],
        ) -> BoxFuture<'a, io::Result<ToolExit>> {
            Box::pin(async move {
                let rendered = args
                    .iter()
                    .map(|arg| arg.as_os_str().to_string_lossy().into_owned())
                    .collect();
                self.calls.lock().unwrap().push((tool, rendered));

                if self.unspawnable.contains(&tool) {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        "No such file or directory",
                    ));
                }
                let code = self.exits.get(&tool).copied().unwrap_or(Some(0));
                Ok(ToolExit { code })
            })
        }
    }

    #[test]
    fn test_tool_exit_success() {
        assert!(ToolExit { code: Some(0) }.success());
        assert!(!ToolExit { code: Some(1) }.success());
        assert!(!ToolExit { code: None }.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_reports_exit_code() {
        let ok = SystemRunner::spawn(Path::new("sh"), ["-c", "exit 0"]).await.unwrap();
        assert!(ok.success());

        let failed = SystemRunner::spawn(Path::new("sh"), ["-c", "exit 3"]).await.unwrap();
        assert_eq!(failed.code, Some(3));
    }

    #[tokio::test]
    async fn test_spawn_missing_binary() {
        let program = Path::new("definitely-not-an-optimizer-binary");
        let result = SystemRunner::spawn(program, ["--help"]).await;
        assert!(result.is_err());
    }
}
