// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Distributed batch run
//!
//! Every rank is an independent task that only talks to others through its
//! communicators:
//!
//! 1. the master partitions the formula set and scatters one chunk to each
//!    group leader over the executive set;
//! 2. each leader broadcasts its chunk to its group;
//! 3. every rank proves the chunk with its own engine;
//! 4. each group gathers its engines' results at the leader, which
//!    consolidates them;
//! 5. the leaders gather their records at the master, which concatenates
//!    them in group order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::info;

use crate::comm::{build_fabric, RankChannels};
use crate::config::RunConfig;
use crate::dispatch::{partition, BatchDispatcher};
use crate::error::{Error, Result};
use crate::provers::{Prover, ProverBackend, ProverFactory, ProverStats};
use crate::syllogism::Syllogism;
use crate::topology::{validate_layout, ProcessTopology, Role};
use crate::verification::{ConsensusAggregator, ConsensusPolicy, ConsolidatedRecord};

/// Source of the engine each role index runs
pub trait EngineRoster: Send + Sync {
    /// Engine names in role order
    fn engine_names(&self) -> Vec<String>;

    /// Build the backend for `role_index` on `rank`.
    fn build(&self, role_index: usize, rank: usize) -> Result<Box<dyn ProverBackend>>;
}

/// Roster backed by the run configuration
pub struct ConfiguredRoster {
    config: RunConfig,
}

impl ConfiguredRoster {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }
}

impl EngineRoster for ConfiguredRoster {
    fn engine_names(&self) -> Vec<String> {
        self.config.engine_names()
    }

    fn build(&self, role_index: usize, rank: usize) -> Result<Box<dyn ProverBackend>> {
        let (kind, config) = self.config.prover_config(role_index)?;
        ProverFactory::create(kind, config, rank)
    }
}

/// End-of-run summary for one rank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankReport {
    pub rank: usize,
    pub role: Role,
    pub engine: String,
    pub elapsed: Duration,
    pub stats: ProverStats,
}

impl fmt::Display for RankReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} lasted {:.2}s | prover: {} | running: {:.2}s | proving: {:.2}s | \
             processed: {} | conclusion reached: {}",
            self.role,
            self.rank,
            self.elapsed.as_secs_f64(),
            self.engine,
            self.stats.time_processing.as_secs_f64(),
            self.stats.time_proving.as_secs_f64(),
            self.stats.processed,
            self.stats.conclusion_reached
        )
    }
}

/// Everything the master holds after a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Records in input order
    pub records: Vec<ConsolidatedRecord>,
    /// One report per rank, ordered by rank
    pub reports: Vec<RankReport>,
    /// Engines that actually ran, in role order
    pub engine_names: Vec<String>,
}

impl RunSummary {
    pub fn contradictions(&self) -> usize {
        self.records.iter().filter(|r| r.contradiction).count()
    }
}

struct RankOutcome {
    report: RankReport,
    records: Option<Vec<ConsolidatedRecord>>,
}

/// Runs one batch over a fixed number of ranks
pub struct Orchestrator {
    roster: Arc<dyn EngineRoster>,
    total: usize,
    engine_count: usize,
    base_timeout: u64,
    policy: ConsensusPolicy,
}

impl Orchestrator {
    /// Fails on an impossible layout, before anything is read or launched.
    pub fn new(
        roster: Arc<dyn EngineRoster>,
        processes: usize,
        base_timeout: u64,
        policy: ConsensusPolicy,
    ) -> Result<Self> {
        let engine_count = roster.engine_names().len();
        validate_layout(processes, engine_count)?;

        Ok(Self {
            roster,
            total: processes,
            engine_count,
            base_timeout,
            policy,
        })
    }

    pub fn from_config(config: &RunConfig) -> Result<Self> {
        config.validate()?;
        Self::new(
            Arc::new(ConfiguredRoster::new(config.clone())),
            config.process_count(),
            config.base_timeout,
            config.policy(),
        )
    }

    /// Engines that will run; a single process runs only the first one.
    pub fn active_engines(&self) -> Vec<String> {
        let mut names = self.roster.engine_names();
        names.truncate(self.engine_count.min(self.total));
        names
    }

    pub async fn run(&self, formulas: Vec<Syllogism>) -> Result<RunSummary> {
        info!(
            "Starting run: {} formulas, {} processes, {} engines",
            formulas.len(),
            self.total,
            self.engine_count
        );

        // Backends are built up front so configuration errors stop the run
        // before any formula is processed.
        let mut provers = Vec::with_capacity(self.total);
        for rank in 0..self.total {
            let topology = ProcessTopology::new(rank, self.total, self.engine_count)?;
            let backend = self.roster.build(topology.role_index, rank)?;
            provers.push((topology, Prover::new(backend, rank)));
        }

        let fabric = build_fabric(self.total, self.engine_count)?;
        let mut formulas = Some(formulas);

        let mut tasks = JoinSet::new();
        for ((topology, prover), channels) in provers.into_iter().zip(fabric) {
            let input = if topology.is_master() { formulas.take() } else { None };
            let dispatcher = BatchDispatcher::new(self.base_timeout);
            let aggregator = ConsensusAggregator::new(self.policy);
            tasks.spawn(run_rank(topology, channels, prover, input, dispatcher, aggregator));
        }

        let mut reports = Vec::with_capacity(self.total);
        let mut records = None;
        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    tasks.abort_all();
                    return Err(e);
                }
                Err(e) => {
                    tasks.abort_all();
                    return Err(Error::Comm(format!("rank task failed: {}", e)));
                }
            };
            if outcome.records.is_some() {
                records = outcome.records;
            }
            reports.push(outcome.report);
        }
        reports.sort_by_key(|r| r.rank);

        let records =
            records.ok_or_else(|| Error::Comm("master finished without records".to_string()))?;
        info!("Final count of results: {}", records.len());

        Ok(RunSummary {
            records,
            reports,
            engine_names: self.active_engines(),
        })
    }
}

async fn run_rank(
    topology: ProcessTopology,
    channels: RankChannels,
    mut prover: Prover,
    formulas: Option<Vec<Syllogism>>,
    dispatcher: BatchDispatcher,
    aggregator: ConsensusAggregator,
) -> Result<RankOutcome> {
    let started = Instant::now();
    let RankChannels {
        mut work,
        mut executive,
    } = channels;

    let leader_chunk = match executive.as_mut() {
        Some(exec) => {
            let groups = exec.size();
            let chunks = formulas.map(|all| partition(all, groups));
            Some(exec.scatter(0, chunks).await?)
        }
        None => None,
    };
    let chunk: Vec<Syllogism> = work.broadcast(0, leader_chunk).await?;

    let outcome = dispatcher.run(&mut prover, &chunk).await;
    let gathered = work.gather(0, outcome.results).await?;

    let mut records = None;
    if let Some(gathered) = gathered {
        let consolidated = aggregator.consolidate_group(&chunk, gathered, work.size())?;
        let exec = executive.as_mut().ok_or_else(|| {
            Error::Comm(format!("group leader {} has no executive channel", topology.rank))
        })?;
        records = exec
            .gather(0, consolidated)
            .await?
            .map(|groups| groups.into_iter().flatten().collect());
    }

    let report = RankReport {
        rank: topology.rank,
        role: topology.role(),
        engine: prover.name().to_string(),
        elapsed: started.elapsed(),
        stats: outcome.stats,
    };
    info!("{}", report);

    Ok(RankOutcome { report, records })
}
