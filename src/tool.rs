//! # Supported Tools
//!
//! Closed set of external optimizer binaries and the configurable set of
//! tools enabled for a deployment.

use crate::error::OptimizeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// An external optimizer binary this crate knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolName {
    Gifsicle,
    Jpegoptim,
    Jpegtran,
    Optipng,
    Advpng,
    Pngcrush,
}

impl ToolName {
    /// Every supported tool
    pub const ALL: [ToolName; 6] = [
        ToolName::Gifsicle,
        ToolName::Jpegoptim,
        ToolName::Jpegtran,
        ToolName::Optipng,
        ToolName::Advpng,
        ToolName::Pngcrush,
    ];

    /// Binary name as found on PATH (without platform extension)
    pub fn binary(&self) -> &'static str {
        match self {
            ToolName::Gifsicle => "gifsicle",
            ToolName::Jpegoptim => "jpegoptim",
            ToolName::Jpegtran => "jpegtran",
            ToolName::Optipng => "optipng",
            ToolName::Advpng => "advpng",
            ToolName::Pngcrush => "pngcrush",
        }
    }

    /// Package hint shown when the tool is missing on Linux
    pub fn install_hint(&self) -> &'static str {
        match self {
            ToolName::Gifsicle => "sudo apt-get install gifsicle",
            ToolName::Jpegoptim => "sudo apt-get install jpegoptim",
            ToolName::Jpegtran => "sudo apt-get install libjpeg-progs",
            ToolName::Optipng => "sudo apt-get install optipng",
            ToolName::Advpng => "sudo apt-get install advancecomp",
            ToolName::Pngcrush => "sudo apt-get install pngcrush",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

impl FromStr for ToolName {
    type Err = OptimizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ToolName::ALL
            .iter()
            .copied()
            .find(|tool| tool.binary() == name)
            .ok_or_else(|| {
                OptimizeError::Config(format!("Unknown optimization tool: '{}'", s.trim()))
            })
    }
}

/// Set of tools enabled for this deployment.
///
/// Membership is all that matters here: the per-type builders decide the
/// order in which tools are tried or chained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolSet(BTreeSet<ToolName>);

impl ToolSet {
    pub fn contains(&self, tool: ToolName) -> bool {
        self.0.contains(&tool)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ToolName> + '_ {
        self.0.iter().copied()
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        ToolName::ALL.into_iter().collect()
    }
}

impl FromIterator<ToolName> for ToolSet {
    fn from_iter<I: IntoIterator<Item = ToolName>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parses a comma-separated list such as `"jpegtran, optipng"`.
/// Blank entries are skipped, so an empty string yields an empty set.
impl FromStr for ToolSet {
    type Err = OptimizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToolName::from_str)
            .collect()
    }
}

impl fmt::Display for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|tool| tool.binary()).collect();
        f.write_str(&names.join(","))
    }
}
