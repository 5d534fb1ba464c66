// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Mock prover backend for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use sylloprove::core::Formula;
use sylloprove::orchestrator::EngineRoster;
use sylloprove::provers::{EngineError, EngineRun, ProverBackend, ProverKind, Verdict};
use sylloprove::Result;

/// What a scripted engine answers for one formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Says(Verdict),
    TimesOut,
    Garbles,
}

/// Per-formula answers with a fallback
#[derive(Debug, Clone)]
pub struct Script {
    pub fallback: Answer,
    pub answers: HashMap<Formula, Answer>,
}

impl Script {
    pub fn always(verdict: Verdict) -> Self {
        Script {
            fallback: Answer::Says(verdict),
            answers: HashMap::new(),
        }
    }

    pub fn with(mut self, formula: &Formula, answer: Answer) -> Self {
        self.answers.insert(formula.clone(), answer);
        self
    }
}

/// A mock prover backend that replays a script
pub struct MockProver {
    pub kind: ProverKind,
    pub script: Arc<Script>,
    pub calls: Arc<AtomicUsize>,
}

impl MockProver {
    pub fn new(kind: ProverKind, script: Arc<Script>, calls: Arc<AtomicUsize>) -> Self {
        MockProver {
            kind,
            script,
            calls,
        }
    }
}

#[async_trait]
impl ProverBackend for MockProver {
    fn kind(&self) -> ProverKind {
        self.kind
    }

    async fn prove(
        &self,
        formula: &Formula,
        _timeout: u64,
    ) -> std::result::Result<EngineRun, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let answer = self
            .script
            .answers
            .get(formula)
            .copied()
            .unwrap_or(self.script.fallback);

        match answer {
            Answer::Says(verdict) => Ok(EngineRun {
                verdict,
                proof: Some(format!("closed by {}", self.kind.name())),
                proving_time: Duration::from_millis(1),
            }),
            Answer::TimesOut => Err(EngineError::Timeout),
            Answer::Garbles => Err(EngineError::Protocol("unexpected output".to_string())),
        }
    }
}

/// Roster of scripted engines, one per role index
pub struct MockRoster {
    pub engines: Vec<(ProverKind, Arc<Script>)>,
    pub calls: Vec<Arc<AtomicUsize>>,
}

impl MockRoster {
    pub fn new(engines: Vec<(ProverKind, Script)>) -> Self {
        let calls = engines.iter().map(|_| Arc::new(AtomicUsize::new(0))).collect();
        MockRoster {
            engines: engines
                .into_iter()
                .map(|(kind, script)| (kind, Arc::new(script)))
                .collect(),
            calls,
        }
    }

    /// Total engine invocations for a role index across all its ranks
    pub fn calls(&self, role_index: usize) -> usize {
        self.calls[role_index].load(Ordering::SeqCst)
    }
}

impl EngineRoster for MockRoster {
    fn engine_names(&self) -> Vec<String> {
        self.engines.iter().map(|(k, _)| k.name().to_string()).collect()
    }

    fn build(&self, role_index: usize, _rank: usize) -> Result<Box<dyn ProverBackend>> {
        let (kind, script) = &self.engines[role_index];
        Ok(Box::new(MockProver::new(
            *kind,
            Arc::clone(script),
            Arc::clone(&self.calls[role_index]),
        )))
    }
}
