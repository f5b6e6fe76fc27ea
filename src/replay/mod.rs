//! Scripted symbol table sessions.
//! A scenario lists table operations together with the results
//! they are expected to produce, and can be replayed to check
//! a table against them.
mod step;
pub use step::*;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{config::TableConfig, SymbolTable};

/// Structure of a scenario file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,

    /// Config of the table the scenario runs against.
    #[serde(default)]
    pub config: TableConfig,

    pub steps: Vec<Step>,
}

/// A step whose result differed from what the scenario expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Index into [Scenario::steps]
    pub step: usize,
    pub expected: String,
    pub got: String,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "step {}: expected {}, got {}",
            self.step, self.expected, self.got
        )
    }
}

impl Scenario {
    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;

        Self::from_yaml(&content).with_context(|| format!("in scenario {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let scenario: Self = serde_yaml::from_str(content)?;
        scenario.config.validate()?;

        Ok(scenario)
    }

    /// Replays all steps on a fresh table.
    pub fn run(&self) -> Vec<Mismatch> {
        let mut table = SymbolTable::with_config(self.config);
        self.run_on(&mut table)
    }

    /// Replays all steps on `table`, continuing after mismatches.
    pub fn run_on(&self, table: &mut SymbolTable) -> Vec<Mismatch> {
        self.steps
            .iter()
            .enumerate()
            .filter_map(|(i, step)| {
                let outcome = step.apply(table);
                let (expected, got) = outcome.mismatch()?;
                log::debug!("scenario {}: step {i} mismatched", self.name);

                Some(Mismatch {
                    step: i,
                    expected,
                    got,
                })
            })
            .collect()
    }
}

/// Reads all `.yaml`/`.yml` scenarios below `dir`, ordered by path.
pub fn read_scenarios(dir: impl AsRef<Path>) -> anyhow::Result<Vec<(PathBuf, Scenario)>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir.as_ref()) {
        let entry = entry?;

        if !entry.file_type().is_file() {
            continue;
        }

        let is_yaml = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if !is_yaml {
            continue;
        }

        paths.push(entry.into_path());
    }

    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let scenario = Scenario::read(&path)?;
            Ok((path, scenario))
        })
        .collect()
}
