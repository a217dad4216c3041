//! # Command Building
//!
//! Turns a detected [`FileType`] and the enabled [`ToolSet`] into the
//! [`Command`] to run against one file.
//!
//! ## Tool Selection
//!
//! | Type | Tools                                   | Strategy                       |
//! |------|-----------------------------------------|--------------------------------|
//! | GIF  | gifsicle                                | single tool                    |
//! | JPEG | jpegtran, then jpegoptim                | first available only           |
//! | PNG  | optipng, advpng, pngcrush (+ replace)   | every available, chained       |
//!
//! Commands are argument vectors, never shell strings: a path full of quotes
//! or `;` reaches the tool untouched.
//!
//! ## Example
//! ```rust
//! use image_optimizer::{command, FileType, ToolSet};
//! use std::path::Path;
//!
//! let command = command::build(FileType::Png, &ToolSet::default(), Path::new("/tmp/a.png"));
//! assert_eq!(command.len(), 4);
//! ```

use crate::file_manager::FileManager;
use crate::file_type::FileType;
use crate::tool::{ToolName, ToolSet};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Chunks pngcrush strips from PNG files
const PNGCRUSH_REMOVED_CHUNKS: [&str; 6] = ["gAMA", "alla", "cHRM", "iCCP", "sRGB", "time"];

/// One argument of a tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Flag(&'static str),
    Path(PathBuf),
}

impl Arg {
    pub fn as_os_str(&self) -> &OsStr {
        match self {
            Arg::Flag(flag) => OsStr::new(flag),
            Arg::Path(path) => path.as_os_str(),
        }
    }
}

/// A single step of a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Run an external tool
    Tool { tool: ToolName, args: Vec<Arg> },
    /// Move `from` over `to` inside this process
    Replace { from: PathBuf, to: PathBuf },
}

impl Stage {
    fn tool(tool: ToolName, args: Vec<Arg>) -> Self {
        Stage::Tool { tool, args }
    }
}

/// Paths are single-quoted so log lines read like the equivalent shell command
impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Tool { tool, args } => {
                write!(f, "{}", tool)?;
                for arg in args {
                    match arg {
                        Arg::Flag(flag) => write!(f, " {}", flag)?,
                        Arg::Path(path) => write!(f, " '{}'", path.display())?,
                    }
                }
                Ok(())
            }
            Stage::Replace { from, to } => write!(f, "mv '{}' '{}'", from.display(), to.display()),
        }
    }
}

/// Ordered stages run as a sequential-AND pipeline.
/// Empty means no enabled tool applies to the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    stages: Vec<Stage>,
}

impl Command {
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, stage) in self.stages.iter().enumerate() {
            if index > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{}", stage)?;
        }
        Ok(())
    }
}

/// Build the command for `file`, dispatching on its detected type
pub fn build(file_type: FileType, tools: &ToolSet, file: &Path) -> Command {
    match file_type {
        FileType::Gif => gif_command(tools, file),
        FileType::Jpeg => jpeg_command(tools, file),
        FileType::Png => png_command(tools, file),
    }
}

/// gifsicle only pays off on animations; static GIFs pass through it unchanged.
// TODO: convert static GIFs to PNG8 when a PNG tool is enabled
fn gif_command(tools: &ToolSet, file: &Path) -> Command {
    let mut command = Command::default();
    if tools.contains(ToolName::Gifsicle) {
        command.push(Stage::tool(
            ToolName::Gifsicle,
            vec![Arg::Flag("-O2"), Arg::Flag("--batch"), Arg::Path(file.to_path_buf())],
        ));
    }
    command
}

/// jpegtran wins over jpegoptim: smaller output, and it writes progressive JPEGs.
fn jpeg_command(tools: &ToolSet, file: &Path) -> Command {
    let mut command = Command::default();
    if tools.contains(ToolName::Jpegtran) {
        command.push(Stage::tool(
            ToolName::Jpegtran,
            vec![
                Arg::Flag("-copy"),
                Arg::Flag("none"),
                Arg::Flag("-progressive"),
                Arg::Flag("-optimize"),
                Arg::Flag("-outfile"),
                Arg::Path(file.to_path_buf()),
                Arg::Path(file.to_path_buf()),
            ],
        ));
    } else if tools.contains(ToolName::Jpegoptim) {
        command.push(Stage::tool(
            ToolName::Jpegoptim,
            vec![Arg::Flag("-f"), Arg::Flag("--strip-all"), Arg::Path(file.to_path_buf())],
        ));
    }
    command
}

fn png_command(tools: &ToolSet, file: &Path) -> Command {
    let mut command = Command::default();

    if tools.contains(ToolName::Optipng) {
        command.push(Stage::tool(
            ToolName::Optipng,
            vec![Arg::Flag("-force"), Arg::Flag("-o7"), Arg::Path(file.to_path_buf())],
        ));
    }

    if tools.contains(ToolName::Advpng) {
        command.push(Stage::tool(
            ToolName::Advpng,
            vec![Arg::Flag("-z4"), Arg::Path(file.to_path_buf())],
        ));
    }

    if tools.contains(ToolName::Pngcrush) {
        let tmp = FileManager::with_suffix(file, ".tmp");
        let mut args: Vec<Arg> = PNGCRUSH_REMOVED_CHUNKS
            .into_iter()
            .flat_map(|chunk| [Arg::Flag("-rem"), Arg::Flag(chunk)])
            .collect();
        args.push(Arg::Path(file.to_path_buf()));
        args.push(Arg::Path(tmp.clone()));

        command.push(Stage::tool(ToolName::Pngcrush, args));
        command.push(Stage::Replace {
            from: tmp,
            to: file.to_path_buf(),
        });
    }

    command
}
