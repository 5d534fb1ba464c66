// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run configuration
//!
//! Built once (from a TOML file, CLI overrides on top) and then only read.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::provers::{Domain, Logic, ProverConfig, ProverKind};
use crate::topology::validate_layout;
use crate::verification::ConsensusPolicy;

fn deserialize_kind<'de, D>(deserializer: D) -> std::result::Result<ProverKind, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

/// One engine of the roster; unset fields fall back to the engine defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(deserialize_with = "deserialize_kind")]
    pub kind: ProverKind,
    #[serde(default)]
    pub executable: Option<PathBuf>,
    #[serde(default)]
    pub install_dir: Option<PathBuf>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
    #[serde(default)]
    pub logic: Option<Logic>,
    #[serde(default)]
    pub domain: Option<Domain>,
}

impl EngineSettings {
    pub fn new(kind: ProverKind) -> Self {
        Self {
            kind,
            executable: None,
            install_dir: None,
            args: None,
            logic: None,
            domain: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Base soft timeout in seconds, scaled per engine
    pub base_timeout: u64,
    pub theorem_threshold: usize,
    pub non_theorem_threshold: usize,
    pub logic: Logic,
    pub domain: Domain,
    /// Number of ranks; defaults to one group
    pub processes: Option<usize>,
    pub formula_set_path: PathBuf,
    pub output_path: PathBuf,
    /// Engine roster; the position is the role index
    pub engines: Vec<EngineSettings>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_timeout: 10,
            theorem_threshold: 1,
            non_theorem_threshold: 1,
            logic: Logic::S5,
            domain: Domain::Const,
            processes: None,
            formula_set_path: PathBuf::from("formulas.bin"),
            output_path: PathBuf::from("results.csv"),
            engines: ProverKind::ALL.iter().copied().map(EngineSettings::new).collect(),
        }
    }
}

impl RunConfig {
    /// Parse a TOML document; missing fields take their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Reject settings that would make the run meaningless or impossible.
    pub fn validate(&self) -> Result<()> {
        if self.theorem_threshold == 0 || self.non_theorem_threshold == 0 {
            return Err(Error::config("thresholds must be at least 1"));
        }
        if self.engines.is_empty() {
            return Err(Error::config("engine roster is empty"));
        }

        let mut seen = HashSet::new();
        for engine in &self.engines {
            if !seen.insert(engine.kind) {
                return Err(Error::config(format!(
                    "engine {} is listed more than once",
                    engine.kind
                )));
            }
        }

        validate_layout(self.process_count(), self.engines.len())
    }

    pub fn process_count(&self) -> usize {
        self.processes.unwrap_or(self.engines.len())
    }

    pub fn policy(&self) -> ConsensusPolicy {
        ConsensusPolicy {
            theorem_threshold: self.theorem_threshold,
            non_theorem_threshold: self.non_theorem_threshold,
        }
    }

    pub fn engine_names(&self) -> Vec<String> {
        self.engines.iter().map(|e| e.kind.name().to_string()).collect()
    }

    /// Backend configuration for roster entry `role_index`
    pub fn prover_config(&self, role_index: usize) -> Result<(ProverKind, ProverConfig)> {
        let settings = self.engines.get(role_index).ok_or_else(|| {
            Error::config(format!("no engine configured for role {}", role_index))
        })?;

        let mut config = ProverConfig::for_kind(settings.kind);
        if let Some(executable) = &settings.executable {
            config.executable = executable.clone();
        }
        if let Some(dir) = &settings.install_dir {
            config.install_dir = dir.clone();
        }
        if let Some(args) = &settings.args {
            config.args = args.clone();
        }
        config.logic = Some(settings.logic.unwrap_or(self.logic));
        config.domain = Some(settings.domain.unwrap_or(self.domain));

        Ok((settings.kind, config))
    }
}
