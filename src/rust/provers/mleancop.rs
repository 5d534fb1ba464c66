// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! MleanCoP backend
//!
//! MleanCoP is a connection-calculus prover for first-order modal logic.
//! The problem is written as `f( <prolog term> ).` into a temporary file and
//! handed to the `mleancop.py` driver, which prints the status on its first
//! output line.

use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tracing::warn;

use super::{
    hard_deadline, inner_lines, write_problem_file, Domain, EngineError, EngineRun, Logic,
    ProverBackend, ProverConfig, ProverKind, Verdict,
};
use crate::core::Formula;
use crate::error::Result;
use crate::executor::run_with_deadline;

/// MleanCoP theorem prover backend
pub struct MleanCoPBackend {
    config: ProverConfig,
    logic: Logic,
    domain: Domain,
    rank: usize,
}

impl MleanCoPBackend {
    pub fn new(config: ProverConfig, rank: usize) -> Result<Self> {
        let (logic, domain) = config.resolve(ProverKind::MleanCoP)?;
        Ok(MleanCoPBackend {
            config,
            logic,
            domain,
            rank,
        })
    }

    /// The driver honours the soft timeout itself; the hard kill comes at twice it.
    pub fn deadline_for(timeout: u64) -> Option<Duration> {
        hard_deadline(timeout, 2)
    }

    pub fn problem(formula: &Formula) -> String {
        format!("f( {} ).", formula.to_prolog())
    }

    fn command(&self, problem_file: &std::path::Path, timeout: u64) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.args(&self.config.args)
            .arg("-q")
            .arg("--mleancop-path")
            .arg(&self.config.install_dir)
            .arg("--logic")
            .arg(self.logic.as_str())
            .arg("--domain")
            .arg(self.domain.as_str())
            .arg(problem_file);
        if timeout > 0 {
            cmd.arg(timeout.to_string());
        }
        cmd
    }

    /// Parse the driver's stdout: the status is the last token of the first
    /// line; a proof sits between the second and the last line.
    pub fn parse_output(stdout: &str) -> std::result::Result<(Verdict, Option<String>), EngineError> {
        let lines: Vec<&str> = stdout.trim().lines().collect();
        let status = lines
            .first()
            .and_then(|line| line.split(' ').last())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EngineError::Protocol("empty output".to_string()))?;

        match status {
            "Theorem" => Ok((Verdict::Theorem, Some(inner_lines(&lines)))),
            "Non-Theorem" => Ok((Verdict::NonTheorem, None)),
            "Timeout" => Err(EngineError::Timeout),
            other => Err(EngineError::Protocol(format!("unexpected status '{}'", other))),
        }
    }
}

#[async_trait]
impl ProverBackend for MleanCoPBackend {
    fn kind(&self) -> ProverKind {
        ProverKind::MleanCoP
    }

    async fn prove(
        &self,
        formula: &Formula,
        timeout: u64,
    ) -> std::result::Result<EngineRun, EngineError> {
        let problem = write_problem_file("mleancop", self.rank, &Self::problem(formula))?;
        let cmd = self.command(problem.path(), timeout);

        let output = run_with_deadline(cmd, Self::deadline_for(timeout)).await?;
        if output.timed_out {
            warn!("[{} {}] swipl process left dangling", self.name(), self.rank);
            return Err(EngineError::Timeout);
        }

        for line in output.stderr.lines() {
            if !line.starts_with("Warning") && !line.trim().is_empty() {
                warn!("[{} {}] {}", self.name(), self.rank, line);
            }
        }

        let (verdict, proof) = Self::parse_output(&output.stdout)?;
        Ok(EngineRun {
            verdict,
            proof,
            proving_time: output.elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{exists, pred};

    #[test]
    fn test_problem_uses_prolog_term() {
        let problem = MleanCoPBackend::problem(&exists(pred("S")));
        assert_eq!(problem, "f( (ex X: s(X)) ).");
    }

    #[test]
    fn test_parse_theorem_with_proof() {
        let stdout = "problem is a Theorem\nStart of proof\n step 1\n step 2\nEnd of proof\n";
        let (verdict, proof) = MleanCoPBackend::parse_output(stdout).unwrap();
        assert_eq!(verdict, Verdict::Theorem);
        assert_eq!(proof.as_deref(), Some(" step 1\n step 2"));
    }

    #[test]
    fn test_parse_non_theorem_and_timeout() {
        let (verdict, proof) = MleanCoPBackend::parse_output("problem is a Non-Theorem\n").unwrap();
        assert_eq!(verdict, Verdict::NonTheorem);
        assert_eq!(proof, None);

        assert!(matches!(
            MleanCoPBackend::parse_output("problem Timeout"),
            Err(EngineError::Timeout)
        ));
    }

    #[test]
    fn test_parse_garbage_is_protocol_error() {
        assert!(matches!(
            MleanCoPBackend::parse_output(""),
            Err(EngineError::Protocol(_))
        ));
        assert!(matches!(
            MleanCoPBackend::parse_output("syntax error near line 1"),
            Err(EngineError::Protocol(_))
        ));
    }

    #[test]
    fn test_command_line() {
        let backend = MleanCoPBackend::new(ProverConfig::for_kind(ProverKind::MleanCoP), 2).unwrap();
        let cmd = backend.command(std::path::Path::new("/tmp/mleancop_2_x"), 10);
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            args,
            vec![
                "-q",
                "--mleancop-path",
                "./prover_install/mleancop13",
                "--logic",
                "s5",
                "--domain",
                "const",
                "/tmp/mleancop_2_x",
                "10"
            ]
        );
        assert_eq!(MleanCoPBackend::deadline_for(10), Some(Duration::from_secs(20)));
    }

    #[tokio::test]
    #[ignore = "requires a MleanCoP installation"]
    async fn test_real_mleancop_proves_tautology() {
        let backend = MleanCoPBackend::new(ProverConfig::for_kind(ProverKind::MleanCoP), 0).unwrap();
        let f = crate::core::implies(pred("S"), pred("S"));
        let run = backend.prove(&f, 10).await.unwrap();
        assert_eq!(run.verdict, Verdict::Theorem);
    }
}
