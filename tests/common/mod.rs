// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Common test utilities for the Sylloprove test suite

#![allow(dead_code)]

use sylloprove::provers::{ProverKind, Verdict};
use sylloprove::{generate_all, GenerateOptions, Syllogism};

pub mod mock_prover;

pub use mock_prover::{Answer, MockProver, MockRoster, Script};

/// First `n` syllogisms in enumeration order
pub fn sample_formulas(n: usize) -> Vec<Syllogism> {
    generate_all(GenerateOptions {
        limit: Some(n),
        ..Default::default()
    })
    .expect("default options are valid")
}

/// Full four-engine roster where every engine gives the same answer
pub fn uniform_roster(verdict: Verdict) -> MockRoster {
    MockRoster::new(
        ProverKind::ALL
            .iter()
            .map(|&kind| (kind, Script::always(verdict)))
            .collect(),
    )
}

/// UIDs of a slice of syllogisms, in order
pub fn uids(formulas: &[Syllogism]) -> Vec<String> {
    formulas.iter().map(|s| s.uid.clone()).collect()
}
