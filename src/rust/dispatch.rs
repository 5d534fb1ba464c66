// SPDX-License-Identifier: PMPL-1.0-or-later

//! Batch dispatch module
//!
//! Splits the formula set into one chunk per process group and runs a rank's
//! engine over its chunk with the engine's scaled timeout.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::provers::{EngineResult, Prover, ProverKind, ProverStats};
use crate::syllogism::Syllogism;

/// Split `items` into exactly `groups` contiguous chunks of
/// `ceil(len / groups)` items, padding with empty chunks at the end.
pub fn partition<T>(items: Vec<T>, groups: usize) -> Vec<Vec<T>> {
    if groups == 0 {
        return Vec::new();
    }

    let piece = items.len().div_ceil(groups).max(1);
    let mut chunks: Vec<Vec<T>> = Vec::with_capacity(groups);
    let mut rest = items.into_iter().peekable();
    while rest.peek().is_some() {
        chunks.push(rest.by_ref().take(piece).collect());
    }
    chunks.resize_with(groups, Vec::new);
    chunks
}

/// Soft timeout for `kind`: `floor(base × modifier)` seconds. A positive
/// base never scales down to 0, which would mean no timeout at all.
pub fn scaled_timeout(base: u64, kind: ProverKind) -> u64 {
    if base == 0 {
        return 0;
    }
    ((base as f64 * kind.timeout_modifier()).floor() as u64).max(1)
}

/// Results of one rank's chunk, in input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<EngineResult>,
    pub stats: ProverStats,
}

/// Runs a rank's engine over its chunk
pub struct BatchDispatcher {
    base_timeout: u64,
}

impl BatchDispatcher {
    pub fn new(base_timeout: u64) -> Self {
        Self { base_timeout }
    }

    pub fn timeout_for(&self, kind: ProverKind) -> u64 {
        scaled_timeout(self.base_timeout, kind)
    }

    /// Prove every formula of `chunk` in order. Engine failures are already
    /// folded into `Unknown` by the prover, so the batch always completes.
    pub async fn run(&self, prover: &mut Prover, chunk: &[Syllogism]) -> BatchOutcome {
        let timeout = self.timeout_for(prover.kind());
        let start = Instant::now();

        info!(
            "Dispatching {} formulas to {} (timeout {}s)",
            chunk.len(),
            prover.name(),
            timeout
        );

        let mut results = Vec::with_capacity(chunk.len());
        for syllogism in chunk {
            results.push(prover.prove(&syllogism.formula, timeout).await);
        }

        info!(
            "{} finished {} formulas in {:.2}s",
            prover.name(),
            results.len(),
            start.elapsed().as_secs_f64()
        );

        BatchOutcome {
            results,
            stats: *prover.stats(),
        }
    }
}
