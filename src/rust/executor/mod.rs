// SPDX-License-Identifier: PMPL-1.0-or-later

//! Engine process execution
//!
//! Launches engine executables as child processes and enforces the hard
//! deadline after which a hung engine is killed.

pub mod process;

pub use process::{run_with_deadline, ProcessOutput};
