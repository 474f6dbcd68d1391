// Config file handling

use anyhow::{Context, Result};
use blind_score::features::Category;
use blind_score::policy::ScoringPolicy;
use blind_score::preset::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Optional TOML file; command-line flags take precedence over every field.
///
/// ```toml
/// server = "http://127.0.0.1:5000"
/// bits = 2048
///
/// [weights]
/// hesitation = 3
/// selflead = 0
///
/// [lexicon]
/// keywords = ["Rust", "tokio"]
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub server: Option<String>,
    pub bits: Option<u64>,
    #[serde(default)]
    pub weights: BTreeMap<String, u8>,
    pub lexicon: Option<Lexicon>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Applies the `[weights]` table on top of `policy`.
    pub fn apply_weights(&self, policy: &mut ScoringPolicy) -> Result<()> {
        for (key, weight) in &self.weights {
            let category: Category = key.parse()?;
            policy.set_weight(category, *weight)?;
        }
        Ok(())
    }
}
