//! # Optimizer
//!
//! Entry point of the library: `optimize(path)` detects the file type from
//! its content, builds the tool pipeline for it from the enabled tools, runs
//! it, and reports the outcome as a plain `bool`.
//!
//! ## Processing pipeline per file
//! 1. Reject anything that is not an existing regular file
//! 2. Copy the original to `<file>.orig` when `debug` is set
//! 3. Sniff the type (gif / jpeg / png) from magic bytes
//! 4. Build the command (see [`crate::command`])
//! 5. Run the stages in order, stopping at the first failure
//!
//! ## Error handling
//! Every failure (bad path, unsupported type, no enabled tool, non-zero
//! exit, spawn error) is logged and becomes `false`. Nothing is returned to
//! the caller beyond that. A PNG pipeline that fails midway leaves the file
//! as the last successful stage wrote it.
//!
//! ## Result compatibility
//! With `Config::legacy_always_false` set (the default) `optimize` returns
//! `false` even after a successful run, matching what existing callers
//! have always observed. Clear the flag to get `true` on success.
//!
//! ## Example
//! ```rust,no_run
//! use image_optimizer::{Config, Optimizer};
//! use std::path::Path;
//!
//! # async fn demo() {
//! let optimizer = Optimizer::new(Config { legacy_always_false: false, ..Default::default() });
//! if optimizer.optimize(Path::new("/var/www/static/logo.png")).await {
//!     println!("optimized");
//! }
//! # }
//! ```

use crate::command::{self, Command, Stage};
use crate::config::Config;
use crate::error::OptimizeError;
use crate::file_manager::FileManager;
use crate::file_type::FileType;
use crate::runner::{CommandRunner, SystemRunner};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Dispatches image files to the external optimizers enabled in [`Config`]
pub struct Optimizer {
    config: Config,
    runner: Arc<dyn CommandRunner>,
}

impl Optimizer {
    /// Create an optimizer that spawns tools found via `TOOLS_DIR` / `PATH`
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner::default()))
    }

    /// Create an optimizer with a custom process runner
    pub fn with_runner(config: Config, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// The configuration this optimizer was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Optimize `path` in place.
    ///
    /// Returns `true` only when the whole pipeline succeeded and
    /// `legacy_always_false` is off. Never panics, never returns an error.
    pub async fn optimize(&self, path: &Path) -> bool {
        match self.try_optimize(path).await {
            Ok(()) if self.config.legacy_always_false => {
                debug!("Optimized {} (reporting false: legacy result mode)", path.display());
                false
            }
            Ok(()) => {
                debug!("Optimized {}", path.display());
                true
            }
            Err(e) => {
                error!("Image optimization failed for {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Detect the type of `path` and build its command without running it.
    ///
    /// An empty command is reported as `NoToolAvailable`.
    pub async fn command_for(&self, path: &Path) -> Result<Command, OptimizeError> {
        let file_type = FileType::sniff(path).await?;
        debug!("Detected {} for {}", file_type, path.display());

        let command = command::build(file_type, &self.config.tools, path);
        if command.is_empty() {
            return Err(OptimizeError::NoToolAvailable(file_type));
        }
        Ok(command)
    }

    async fn try_optimize(&self, path: &Path) -> Result<(), OptimizeError> {
        let is_file = tokio::fs::metadata(path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(OptimizeError::InvalidPath(path.to_path_buf()));
        }

        if self.config.debug {
            self.keep_original(path).await;
        }

        let command = self.command_for(path).await?;
        self.execute(&command).await
    }

    /// Best-effort copy to `<file>.orig`
    async fn keep_original(&self, path: &Path) {
        let backup = FileManager::with_suffix(path, ".orig");
        match tokio::fs::copy(path, &backup).await {
            Ok(_) => debug!("Saved original to {}", backup.display()),
            Err(e) => warn!("Could not save original to {}: {}", backup.display(), e),
        }
    }

    /// Run stages in order; the first failing stage aborts the rest
    async fn execute(&self, command: &Command) -> Result<(), OptimizeError> {
        debug!("Running: {}", command);

        for stage in command.stages() {
            match stage {
                Stage::Tool { tool, args } => {
                    let exit = self
                        .runner
                        .run(*tool, args)
                        .await
                        .map_err(|source| OptimizeError::ToolSpawn { tool: *tool, source })?;
                    if !exit.success() {
                        return Err(OptimizeError::ToolFailed {
                            tool: *tool,
                            command: stage.to_string(),
                            code: exit.code,
                        });
                    }
                }
                Stage::Replace { from, to } => {
                    tokio::fs::rename(from, to).await?;
                }
            }
        }

        Ok(())
    }
}
