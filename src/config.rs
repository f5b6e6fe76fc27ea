use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::index::DEFAULT_BUCKETS;

/// Structure of a symbol table config file, e.g.
///
/// ```yaml
/// buckets: 19997
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Modulus identifiers are hashed by. A prime keeps chains short.
    pub buckets: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            buckets: DEFAULT_BUCKETS,
        }
    }
}

impl TableConfig {
    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading table config {}", path.display()))?;

        Self::from_yaml(&content).with_context(|| format!("in table config {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(content)?;
        cfg.validate()?;

        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.buckets == 0 {
            bail!("expected buckets to be at least 1, found 0");
        }

        Ok(())
    }
}
