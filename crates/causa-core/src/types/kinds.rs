//! Selectable algorithm variants. Parsed from TOML, env vars and CLI flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Conditional-independence test used during skeleton discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CiTestKind {
    /// Partial correlation with a Student's t p-value.
    #[default]
    PartialCorrelation,
    /// Partial correlation with Fisher's z-transform and a normal p-value.
    FisherZ,
}

impl CiTestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PartialCorrelation => "partial_correlation",
            Self::FisherZ => "fisher_z",
        }
    }
}

/// Adjacency search used to build the skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkeletonStrategy {
    /// Test every subset of the remaining variables for every candidate pair.
    #[default]
    Exhaustive,
    /// Order-independent PC adjacency search over current neighbours.
    PcStable,
}

impl SkeletonStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exhaustive => "exhaustive",
            Self::PcStable => "pc_stable",
        }
    }
}

/// Report format for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Normalizes `fisher-z`, `Fisher_Z` and `fisher_z` to the same key.
fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('-', "_")
}

impl FromStr for CiTestKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "partial_correlation" | "pcorr" => Ok(Self::PartialCorrelation),
            "fisher_z" | "fisherz" => Ok(Self::FisherZ),
            other => Err(format!("unknown CI test '{other}'")),
        }
    }
}

impl FromStr for SkeletonStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "exhaustive" => Ok(Self::Exhaustive),
            "pc_stable" | "pc" => Ok(Self::PcStable),
            other => Err(format!("unknown skeleton strategy '{other}'")),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

impl fmt::Display for CiTestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SkeletonStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
