// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sylloprove: modal syllogism generation and multi-prover adjudication
//!
//! Enumerates every modal categorical syllogism over the four figures, then
//! runs a batch of them through a roster of modal theorem provers spread over
//! process groups, and merges the engines' verdicts by quorum.

pub mod comm;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod provers;
pub mod report;
pub mod store;
pub mod syllogism;
pub mod topology;
pub mod verification;

pub use config::RunConfig;
pub use core::Formula;
pub use error::{Error, Result};
pub use orchestrator::{Orchestrator, RunSummary};
pub use provers::{ProverBackend, ProverConfig, ProverKind, Verdict};
pub use syllogism::{generate_all, make_instance_from_uid, GenerateOptions, Syllogism};
pub use verification::{ConsensusPolicy, ConsolidatedRecord};
