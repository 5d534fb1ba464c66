// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Modal theorem prover backends
//!
//! Every engine is an external executable. A backend builds the engine's
//! input (command line or problem file), runs it under a hard deadline and
//! parses its answer into a [`Verdict`]. The [`Prover`] wrapper keeps the
//! per-rank statistics and turns every engine failure into `Unknown`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::Formula;
use crate::error::{Error, Result};

pub mod leo3;
pub mod mleancop;
pub mod mleantap;
pub mod tpg;

/// Supported engines, in roster order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProverKind {
    MleanCoP,
    MleanTAP,
    Leo3,
    Tpg,
}

impl std::str::FromStr for ProverKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mleancop" => Ok(ProverKind::MleanCoP),
            "mleantap" => Ok(ProverKind::MleanTAP),
            "leo3" | "leo-iii" | "leoiii" => Ok(ProverKind::Leo3),
            "tpg" => Ok(ProverKind::Tpg),
            _ => Err(Error::config(format!("Unknown prover: {}", s))),
        }
    }
}

impl std::fmt::Display for ProverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl ProverKind {
    pub const ALL: [ProverKind; 4] = [
        ProverKind::MleanCoP,
        ProverKind::MleanTAP,
        ProverKind::Leo3,
        ProverKind::Tpg,
    ];

    /// Name used in logs and report column headers
    pub fn name(&self) -> &'static str {
        match self {
            ProverKind::MleanCoP => "MleanCoP",
            ProverKind::MleanTAP => "MleanTAP",
            ProverKind::Leo3 => "LEO-III",
            ProverKind::Tpg => "TPG",
        }
    }

    /// Fraction of the base timeout granted to this engine
    pub fn timeout_modifier(&self) -> f64 {
        match self {
            ProverKind::MleanCoP => 1.0,
            ProverKind::MleanTAP => 0.8,
            ProverKind::Leo3 => 0.6,
            ProverKind::Tpg => 1.0,
        }
    }

    pub fn supported_logics(&self) -> &'static [Logic] {
        match self {
            ProverKind::MleanCoP => &[Logic::D, Logic::T, Logic::S4, Logic::S5, Logic::Multi],
            ProverKind::MleanTAP => &[Logic::D, Logic::T, Logic::S4, Logic::S5],
            ProverKind::Leo3 => &[Logic::K, Logic::T, Logic::D, Logic::S4, Logic::S5],
            ProverKind::Tpg => &[Logic::S5],
        }
    }

    pub fn supported_domains(&self) -> &'static [Domain] {
        match self {
            ProverKind::MleanCoP | ProverKind::MleanTAP => {
                &[Domain::Const, Domain::Cumul, Domain::Vary]
            }
            ProverKind::Leo3 => &[Domain::Const, Domain::Cumul, Domain::Vary, Domain::Decr],
            ProverKind::Tpg => &[Domain::Const],
        }
    }
}

/// Modal logic the engines are asked to reason in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Logic {
    K,
    D,
    T,
    S4,
    S5,
    Multi,
}

impl Logic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Logic::K => "k",
            Logic::D => "d",
            Logic::T => "t",
            Logic::S4 => "s4",
            Logic::S5 => "s5",
            Logic::Multi => "multi",
        }
    }
}

impl std::str::FromStr for Logic {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "k" => Ok(Logic::K),
            "d" => Ok(Logic::D),
            "t" => Ok(Logic::T),
            "s4" => Ok(Logic::S4),
            "s5" => Ok(Logic::S5),
            "multi" => Ok(Logic::Multi),
            _ => Err(Error::config(format!(
                "Value '{}' is not recognized as 'logic' value",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quantification domain across worlds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Const,
    Cumul,
    Vary,
    Decr,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Const => "const",
            Domain::Cumul => "cumul",
            Domain::Vary => "vary",
            Domain::Decr => "decr",
        }
    }
}

impl std::str::FromStr for Domain {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "const" => Ok(Domain::Const),
            "cumul" => Ok(Domain::Cumul),
            "vary" => Ok(Domain::Vary),
            "decr" => Ok(Domain::Decr),
            _ => Err(Error::config(format!(
                "Value '{}' is not recognized as 'domain' value",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a prover backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProverConfig {
    /// Interpreter or script that is launched
    pub executable: PathBuf,

    /// Directory holding the engine's sources, jar or entry script
    pub install_dir: PathBuf,

    /// Additional interpreter arguments
    pub args: Vec<String>,

    /// None selects the engine default (s5)
    pub logic: Option<Logic>,

    /// None selects the engine default (const)
    pub domain: Option<Domain>,
}

impl ProverConfig {
    /// Default installation layout for `kind`
    pub fn for_kind(kind: ProverKind) -> Self {
        let (executable, install_dir, args): (&str, &str, &[&str]) = match kind {
            ProverKind::MleanCoP => (
                "./prover_install/mleancop13/mleancop.py",
                "./prover_install/mleancop13",
                &[],
            ),
            ProverKind::MleanTAP => ("swipl", "./prover_install/mleantap13", &["--no-debug"]),
            ProverKind::Leo3 => ("java", "./prover_install/leo3", &[]),
            ProverKind::Tpg => ("node", "./prover_install/tpg", &[]),
        };

        ProverConfig {
            executable: PathBuf::from(executable),
            install_dir: PathBuf::from(install_dir),
            args: args.iter().map(|a| a.to_string()).collect(),
            logic: None,
            domain: None,
        }
    }

    /// Resolve logic and domain against what `kind` accepts.
    pub fn resolve(&self, kind: ProverKind) -> Result<(Logic, Domain)> {
        let logic = self.logic.unwrap_or(Logic::S5);
        let domain = self.domain.unwrap_or(Domain::Const);

        if !kind.supported_logics().contains(&logic) {
            return Err(Error::config(format!(
                "{}: logic '{}' is not supported",
                kind, logic
            )));
        }
        if !kind.supported_domains().contains(&domain) {
            return Err(Error::config(format!(
                "{}: domain '{}' is not supported",
                kind, domain
            )));
        }
        Ok((logic, domain))
    }
}

/// Outcome of one engine on one formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Theorem,
    NonTheorem,
    Unknown,
}

impl Verdict {
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, Verdict::Unknown)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Verdict::Theorem => "Theorem",
            Verdict::NonTheorem => "Non-Theorem",
            Verdict::Unknown => "Unknown",
        })
    }
}

/// Engine failures; the `Prover` wrapper recovers all of them to `Unknown`
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine timed out")]
    Timeout,

    #[error("engine protocol error: {0}")]
    Protocol(String),

    #[error("failed to run engine: {0}")]
    Launch(String),
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Launch(e.to_string())
    }
}

impl From<anyhow::Error> for EngineError {
    fn from(e: anyhow::Error) -> Self {
        EngineError::Launch(format!("{:#}", e))
    }
}

/// Parsed answer of a single engine call
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRun {
    pub verdict: Verdict,
    pub proof: Option<String>,
    pub proving_time: Duration,
}

/// One (formula, engine) outcome as it travels between ranks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineResult {
    pub engine: String,
    pub formula: Formula,
    pub verdict: Verdict,
    pub proof: Option<String>,
}

/// Universal trait for theorem prover backends
#[async_trait]
pub trait ProverBackend: Send + Sync {
    /// Get prover kind
    fn kind(&self) -> ProverKind;

    fn name(&self) -> &str {
        self.kind().name()
    }

    /// Decide `formula`, giving the engine `timeout` seconds (0 = unlimited).
    async fn prove(
        &self,
        formula: &Formula,
        timeout: u64,
    ) -> std::result::Result<EngineRun, EngineError>;
}

/// Running totals for one rank's engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProverStats {
    pub processed: usize,
    pub conclusion_reached: usize,
    pub time_processing: Duration,
    pub time_proving: Duration,
}

/// Stats-keeping front end to a backend
pub struct Prover {
    backend: Box<dyn ProverBackend>,
    rank: usize,
    stats: ProverStats,
}

impl Prover {
    pub fn new(backend: Box<dyn ProverBackend>, rank: usize) -> Self {
        Prover {
            backend,
            rank,
            stats: ProverStats::default(),
        }
    }

    pub fn kind(&self) -> ProverKind {
        self.backend.kind()
    }

    pub fn name(&self) -> &str {
        self.backend.name()
    }

    pub fn stats(&self) -> &ProverStats {
        &self.stats
    }

    /// Prove one formula. Never fails: engine errors become `Unknown`.
    pub async fn prove(&mut self, formula: &Formula, timeout: u64) -> EngineResult {
        let started = Instant::now();
        let outcome = self.backend.prove(formula, timeout).await;
        let elapsed = started.elapsed();

        let (verdict, proof, proving_time) = match outcome {
            Ok(run) => (run.verdict, run.proof, run.proving_time),
            Err(EngineError::Timeout) => {
                debug!("[{} {}] timed out after {}s", self.name(), self.rank, timeout);
                (Verdict::Unknown, None, elapsed)
            }
            Err(e) => {
                warn!("[{} {}] {}", self.name(), self.rank, e);
                (Verdict::Unknown, None, elapsed)
            }
        };

        self.stats.processed += 1;
        if verdict.is_conclusive() {
            self.stats.conclusion_reached += 1;
        }
        self.stats.time_processing += elapsed;
        self.stats.time_proving += proving_time;

        debug!("[{} {}] {} : {}", self.name(), self.rank, verdict, formula);

        EngineResult {
            engine: self.name().to_string(),
            formula: formula.clone(),
            verdict,
            proof: proof.filter(|_| verdict == Verdict::Theorem),
        }
    }
}

/// Factory for creating prover backends
pub struct ProverFactory;

impl ProverFactory {
    /// Build the backend for `kind`; unsupported logic or domain is fatal here,
    /// before any formula is processed.
    pub fn create(
        kind: ProverKind,
        config: ProverConfig,
        rank: usize,
    ) -> Result<Box<dyn ProverBackend>> {
        match kind {
            ProverKind::MleanCoP => Ok(Box::new(mleancop::MleanCoPBackend::new(config, rank)?)),
            ProverKind::MleanTAP => Ok(Box::new(mleantap::MleanTAPBackend::new(config, rank)?)),
            ProverKind::Leo3 => Ok(Box::new(leo3::Leo3Backend::new(config, rank)?)),
            ProverKind::Tpg => Ok(Box::new(tpg::TpgBackend::new(config, rank)?)),
        }
    }
}

/// Write `contents` to a temporary problem file named `<engine>_<rank>_*`.
/// The file is removed when the handle is dropped.
pub(crate) fn write_problem_file(
    engine: &str,
    rank: usize,
    contents: &str,
) -> std::io::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("{}_{}_", engine, rank))
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Hard kill deadline: `factor` times the soft timeout; none when unlimited.
pub(crate) fn hard_deadline(timeout: u64, factor: u64) -> Option<Duration> {
    (timeout > 0).then(|| Duration::from_secs(timeout.saturating_mul(factor)))
}

/// Lines strictly between the first two and the last one.
pub(crate) fn inner_lines(lines: &[&str]) -> String {
    if lines.len() < 3 {
        return String::new();
    }
    lines[2..lines.len() - 1].join("\n")
}
