// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Leo-III backend
//!
//! Leo-III is a higher-order prover with native modal logic support. The
//! problem is a THF file whose logic specification fixes the modal system,
//! the quantification domain, rigid constants and global consequence. The
//! answer follows the SZS conventions:
//!
//! - `% SZS status <Status> for <file>`
//! - `% SZS output start <Type> for <file>` ... `% SZS output end ...`

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

use super::{
    hard_deadline, write_problem_file, Domain, EngineError, EngineRun, Logic, ProverBackend,
    ProverConfig, ProverKind, Verdict,
};
use crate::core::Formula;
use crate::error::Result;
use crate::executor::{run_with_deadline, ProcessOutput};

const JAR_FILE: &str = "leo3.jar";

/// Leo-III theorem prover backend
pub struct Leo3Backend {
    config: ProverConfig,
    logic: Logic,
    domain: Domain,
    rank: usize,
}

fn modal_system(logic: Logic) -> &'static str {
    match logic {
        Logic::K => "$modal_system_K",
        Logic::T => "$modal_system_T",
        Logic::D => "$modal_system_D",
        Logic::S4 => "$modal_system_S4",
        // Multi is rejected when the backend is built
        Logic::S5 | Logic::Multi => "$modal_system_S5",
    }
}

fn quantification(domain: Domain) -> &'static str {
    match domain {
        Domain::Const => "$constant",
        Domain::Vary => "$varying",
        Domain::Cumul => "$cumulative",
        Domain::Decr => "$decreasing",
    }
}

impl Leo3Backend {
    pub fn new(config: ProverConfig, rank: usize) -> Result<Self> {
        let (logic, domain) = config.resolve(ProverKind::Leo3)?;
        Ok(Leo3Backend {
            config,
            logic,
            domain,
            rank,
        })
    }

    fn jar_path(&self) -> PathBuf {
        self.config.install_dir.join(JAR_FILE)
    }

    /// THF problem for `formula` under the configured logic
    pub fn problem(&self, formula: &Formula) -> String {
        format!(
            "thf(modal_logic_descr, logic, (\n    \
                 $modal :=\n        \
                     [ $constants := $rigid,\n          \
                       $quantification := {},\n          \
                       $consequence := $global,\n          \
                       $modalities := {} ] )).\n\n\
             thf(m_type, type, ( m: $i > $o ) ).\n\n\
             thf(p_type, type, ( p: $i > $o ) ).\n\n\
             thf(s_type, type, ( s: $i > $o ) ).\n\n\
             thf(prob, conjecture, {} ).\n",
            quantification(self.domain),
            modal_system(self.logic),
            formula.to_thf()
        )
    }

    fn command(&self, problem_file: &std::path::Path, timeout: u64) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.args(&self.config.args)
            .arg("-jar")
            .arg(self.jar_path())
            .arg(problem_file)
            .arg("-v")
            .arg("0")
            .arg("-p");
        if timeout > 0 {
            cmd.arg("-t").arg(timeout.to_string());
        }
        cmd
    }

    /// Parse SZS output. Statuses ending in `Error` are protocol errors; a
    /// Theorem proof is prefixed with its output type.
    pub fn parse_output(stdout: &str) -> std::result::Result<(Verdict, Option<String>), EngineError> {
        let mut status: Option<&str> = None;
        let mut proof: Option<String> = None;
        let mut in_proof = false;

        for line in stdout.trim().lines() {
            if in_proof {
                if line.starts_with("% SZS output end") {
                    break;
                }
                if let Some(p) = proof.as_mut() {
                    p.push_str(line);
                    p.push('\n');
                }
            } else if line.starts_with("% SZS status") {
                let s = line.split(' ').nth(3).ok_or_else(|| {
                    EngineError::Protocol(format!("malformed status line: {}", line))
                })?;
                if s.ends_with("Error") {
                    return Err(EngineError::Protocol(format!(
                        "{} while proving: {}",
                        s, line
                    )));
                }
                status = Some(s);
            } else if status == Some("Theorem") && line.starts_with("% SZS output start") {
                let kind = line.split(' ').nth(4).unwrap_or("Proof");
                proof = Some(format!("% {}\n", kind));
                in_proof = true;
            }
        }

        match status {
            Some("Theorem") => Ok((Verdict::Theorem, proof)),
            Some("CounterSatisfiable") => Ok((Verdict::NonTheorem, None)),
            Some("Timeout") => Err(EngineError::Timeout),
            Some(_) => Ok((Verdict::Unknown, None)),
            None => Err(EngineError::Protocol("no SZS status in output".to_string())),
        }
    }

    /// Verdict for a finished process. Unparseable output from a failed
    /// process is reported with its exit code; an SZS timeout stays a timeout.
    pub fn interpret(
        output: &ProcessOutput,
    ) -> std::result::Result<(Verdict, Option<String>), EngineError> {
        if output.timed_out {
            return Err(EngineError::Timeout);
        }

        match Self::parse_output(&output.stdout) {
            Err(EngineError::Protocol(_)) if output.exit_code != Some(0) => {
                Err(EngineError::Protocol(format!(
                    "exited with {:?}: {}",
                    output.exit_code,
                    output.stderr.lines().next().unwrap_or_default()
                )))
            }
            parsed => parsed,
        }
    }
}

#[async_trait]
impl ProverBackend for Leo3Backend {
    fn kind(&self) -> ProverKind {
        ProverKind::Leo3
    }

    async fn prove(
        &self,
        formula: &Formula,
        timeout: u64,
    ) -> std::result::Result<EngineRun, EngineError> {
        let problem = write_problem_file("leo3", self.rank, &self.problem(formula))?;
        let cmd = self.command(problem.path(), timeout);

        let deadline: Option<Duration> = hard_deadline(timeout, 2);
        let output = run_with_deadline(cmd, deadline).await?;

        let (verdict, proof) = Self::interpret(&output)?;
        Ok(EngineRun {
            verdict,
            proof,
            proving_time: output.elapsed,
        })
    }
}
