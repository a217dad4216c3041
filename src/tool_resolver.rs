//! # Tool Path Resolver
//!
//! This module handles finding optimizer binaries:
//! - An explicit tools directory (`TOOLS_DIR`), checked first
//! - The system `PATH`
//!
//! Tools that cannot be resolved are still spawned by bare name, so the
//! failure surfaces as a spawn error in the optimizer log.

use crate::tool::{ToolName, ToolSet};
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Tool path resolver for system-installed or bundled optimizers
#[derive(Debug, Clone)]
pub struct ToolPathResolver {
    /// Directory checked before PATH
    tools_dir: Option<PathBuf>,
    /// Directories from PATH, in search order
    search_path: Vec<PathBuf>,
}

impl ToolPathResolver {
    /// Create a resolver from the `TOOLS_DIR` and `PATH` environment variables
    pub fn new() -> Self {
        let tools_dir = env::var_os("TOOLS_DIR")
            .map(PathBuf::from)
            .filter(|dir| dir.is_dir());
        let search_path = env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).collect())
            .unwrap_or_default();

        Self::with_dirs(tools_dir, search_path)
    }

    /// Create a resolver over explicit directories
    pub fn with_dirs(tools_dir: Option<PathBuf>, search_path: Vec<PathBuf>) -> Self {
        debug!("Tools directory: {:?}", tools_dir);
        Self { tools_dir, search_path }
    }

    /// Resolve the path to a specific tool
    pub fn resolve_tool(&self, tool: ToolName) -> Option<PathBuf> {
        let file_name = Self::executable_name(tool);

        if let Some(ref tools_dir) = self.tools_dir {
            let bundled = tools_dir.join(&file_name);
            if bundled.is_file() {
                debug!("Using bundled tool: {} -> {:?}", tool, bundled);
                return Some(bundled);
            }
        }

        let found = self
            .search_path
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|path| path.is_file());
        match found {
            Some(ref path) => debug!("Using system tool: {} -> {:?}", tool, path),
            None => debug!("Tool not found: {}", tool),
        }
        found
    }

    /// Path to spawn for `tool`, falling back to the bare binary name
    pub fn program_for(&self, tool: ToolName) -> PathBuf {
        self.resolve_tool(tool)
            .unwrap_or_else(|| PathBuf::from(tool.binary()))
    }

    /// Check if a specific tool is available
    pub fn is_tool_available(&self, tool: ToolName) -> bool {
        self.resolve_tool(tool).is_some()
    }

    /// Get a report of tool availability for the enabled tools
    pub fn tools_report(&self, enabled: &ToolSet) -> String {
        let mut report = String::new();
        report.push_str("Optimization tools report\n");
        report.push_str(&format!("Tools dir: {:?}\n", self.tools_dir));

        let groups = [
            ("GIF", vec![ToolName::Gifsicle]),
            ("JPEG", vec![ToolName::Jpegtran, ToolName::Jpegoptim]),
            ("PNG", vec![ToolName::Optipng, ToolName::Advpng, ToolName::Pngcrush]),
        ];

        for (category, tools) in groups {
            report.push_str(&format!("\n{}:\n", category));
            for tool in tools {
                let line = match (enabled.contains(tool), self.resolve_tool(tool)) {
                    (false, _) => format!("  -  {} (disabled)\n", tool),
                    (true, Some(path)) => format!("  ✅ {} -> {}\n", tool, path.display()),
                    (true, None) => {
                        format!("  ❌ {} (install with: {})\n", tool, tool.install_hint())
                    }
                };
                report.push_str(&line);
            }
        }

        report
    }

    fn executable_name(tool: ToolName) -> String {
        let extension = if cfg!(windows) { ".exe" } else { "" };
        format!("{}{}", tool.binary(), extension)
    }
}

impl Default for ToolPathResolver {
    fn default() -> Self {
        Self::new()
    }
}
