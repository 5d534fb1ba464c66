// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! MleanTAP backend
//!
//! MleanTAP is a tableau prover loaded into SWI-Prolog. The goal is passed on
//! the command line and the answer is the interpreter's exit code. The engine
//! has no timeout of its own, so the deadline is the only bound.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

use super::{
    hard_deadline, Domain, EngineError, EngineRun, Logic, ProverBackend, ProverConfig,
    ProverKind, Verdict,
};
use crate::core::Formula;
use crate::error::Result;
use crate::executor::run_with_deadline;

const ENTRY_FILE: &str = "mleantap13_swi.pl";

/// MleanTAP theorem prover backend
pub struct MleanTAPBackend {
    config: ProverConfig,
    logic: Logic,
    domain: Domain,
}

impl MleanTAPBackend {
    pub fn new(config: ProverConfig, _rank: usize) -> Result<Self> {
        let (logic, domain) = config.resolve(ProverKind::MleanTAP)?;
        Ok(MleanTAPBackend {
            config,
            logic,
            domain,
        })
    }

    fn entry_path(&self) -> PathBuf {
        self.config.install_dir.join(ENTRY_FILE)
    }

    fn command(&self, formula: &Formula) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.args(&self.config.args)
            .arg("-g")
            .arg(format!("['{}'].", self.entry_path().display()))
            .arg("-g")
            .arg(format!("asserta(logic({})).", self.logic))
            .arg("-g")
            .arg(format!("asserta(domain({})).", self.domain))
            .arg("-g")
            .arg(format!("( prove( {} ) -> halt(0) ; halt(1) ).", formula.to_prolog()))
            .arg("-t")
            .arg("halt.");
        cmd
    }

    /// Exit 0 proves, exit 1 refutes, anything else is inconclusive.
    pub fn verdict_from_exit(code: Option<i32>) -> Verdict {
        match code {
            Some(0) => Verdict::Theorem,
            Some(1) => Verdict::NonTheorem,
            _ => Verdict::Unknown,
        }
    }
}

#[async_trait]
impl ProverBackend for MleanTAPBackend {
    fn kind(&self) -> ProverKind {
        ProverKind::MleanTAP
    }

    async fn prove(
        &self,
        formula: &Formula,
        timeout: u64,
    ) -> std::result::Result<EngineRun, EngineError> {
        let deadline: Option<Duration> = hard_deadline(timeout, 1);
        let output = run_with_deadline(self.command(formula), deadline).await?;
        if output.timed_out {
            return Err(EngineError::Timeout);
        }

        Ok(EngineRun {
            verdict: Self::verdict_from_exit(output.exit_code),
            proof: None,
            proving_time: output.elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{implies, nec, pred};

    #[test]
    fn test_command_line() {
        let mut config = ProverConfig::for_kind(ProverKind::MleanTAP);
        config.logic = Some(Logic::S4);
        config.domain = Some(Domain::Vary);
        let backend = MleanTAPBackend::new(config, 1).unwrap();

        let cmd = backend.command(&implies(nec(pred("M")), pred("M")));
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(cmd.as_std().get_program(), "swipl");
        assert_eq!(
            args,
            vec![
                "--no-debug",
                "-g",
                "['./prover_install/mleantap13/mleantap13_swi.pl'].",
                "-g",
                "asserta(logic(s4)).",
                "-g",
                "asserta(domain(vary)).",
                "-g",
                "( prove( ((# m(X)) => m(X)) ) -> halt(0) ; halt(1) ).",
                "-t",
                "halt."
            ]
        );
    }

    #[test]
    fn test_verdict_from_exit() {
        assert_eq!(MleanTAPBackend::verdict_from_exit(Some(0)), Verdict::Theorem);
        assert_eq!(MleanTAPBackend::verdict_from_exit(Some(1)), Verdict::NonTheorem);
        assert_eq!(MleanTAPBackend::verdict_from_exit(Some(2)), Verdict::Unknown);
        assert_eq!(MleanTAPBackend::verdict_from_exit(None), Verdict::Unknown);
    }

    #[test]
    fn test_multi_logic_is_rejected() {
        let mut config = ProverConfig::for_kind(ProverKind::MleanTAP);
        config.logic = Some(Logic::Multi);
        assert!(MleanTAPBackend::new(config, 0).is_err());
    }

    #[tokio::test]
    #[ignore = "requires SWI-Prolog and MleanTAP"]
    async fn test_real_mleantap_proves_t_axiom() {
        let backend = MleanTAPBackend::new(ProverConfig::for_kind(ProverKind::MleanTAP), 0).unwrap();
        let run = backend
            .prove(&implies(nec(pred("M")), pred("M")), 10)
            .await
            .unwrap();
        assert_eq!(run.verdict, Verdict::Theorem);
    }
}
