// SPDX-License-Identifier: PMPL-1.0-or-later

//! Verdict reconciliation
//!
//! Merges the per-engine verdicts for each formula into one adjudicated
//! record, flagging engines that contradict each other.

pub mod consensus;

pub use consensus::{ConsensusAggregator, ConsensusPolicy, ConsolidatedRecord, EngineVerdict};
