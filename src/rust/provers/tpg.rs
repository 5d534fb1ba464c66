// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! TPG backend
//!
//! Tree Proof Generator, run under Node.js with the formula in its unicode
//! notation. Only S5 with constant domains is available, which is the `rmt`
//! (reflexive, symmetric, transitive) accessibility setting.

use async_trait::async_trait;
use tokio::process::Command;

use super::{
    hard_deadline, inner_lines, EngineError, EngineRun, ProverBackend, ProverConfig, ProverKind,
    Verdict,
};
use crate::core::Formula;
use crate::error::Result;
use crate::executor::run_with_deadline;

const ENTRY_FILE: &str = "index.js";
const ACCESSIBILITY: &str = "rmt";

/// TPG theorem prover backend
pub struct TpgBackend {
    config: ProverConfig,
}

impl TpgBackend {
    pub fn new(config: ProverConfig, _rank: usize) -> Result<Self> {
        config.resolve(ProverKind::Tpg)?;
        Ok(TpgBackend { config })
    }

    fn command(&self, formula: &Formula) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.args(&self.config.args)
            .arg(self.config.install_dir.join(ENTRY_FILE))
            .arg(formula.to_unicode())
            .arg(ACCESSIBILITY);
        cmd
    }

    /// The status is the second token of the first line; the proof sits
    /// between the `PROOF START` line and the last line.
    pub fn parse_output(stdout: &str) -> std::result::Result<(Verdict, Option<String>), EngineError> {
        let lines: Vec<&str> = stdout.trim().lines().collect();
        let status = lines
            .first()
            .and_then(|line| line.split(' ').nth(1))
            .ok_or_else(|| EngineError::Protocol("missing status line".to_string()))?;

        match status {
            "Theorem" => Ok((Verdict::Theorem, Some(inner_lines(&lines)))),
            "Non-Theorem" => Ok((Verdict::NonTheorem, None)),
            other => Err(EngineError::Protocol(format!("unexpected status '{}'", other))),
        }
    }
}

#[async_trait]
impl ProverBackend for TpgBackend {
    fn kind(&self) -> ProverKind {
        ProverKind::Tpg
    }

    async fn prove(
        &self,
        formula: &Formula,
        timeout: u64,
    ) -> std::result::Result<EngineRun, EngineError> {
        let output =
            run_with_deadline(self.command(formula), hard_deadline(timeout, 1)).await?;
        if output.timed_out {
            return Err(EngineError::Timeout);
        }

        let (verdict, proof) = Self::parse_output(&output.stdout)?;
        Ok(EngineRun {
            verdict,
            proof,
            proving_time: output.elapsed,
        })
    }
}
