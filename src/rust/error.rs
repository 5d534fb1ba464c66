// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types shared by the generator, the collectives and the orchestrator

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for everything outside a single engine call
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid run or engine configuration; always fatal before proving starts
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed syllogism identifier
    #[error(transparent)]
    Uid(#[from] UidError),

    /// Gathered results do not line up with the partitioned input
    #[error("alignment violation: {0}")]
    Alignment(String),

    /// A collective could not complete
    #[error("communication failure: {0}")]
    Comm(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn alignment(msg: impl Into<String>) -> Self {
        Error::Alignment(msg.into())
    }
}

/// Reasons a syllogism UID fails to decode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UidError {
    #[error("syllogism UID must be 7 characters, got {0}")]
    Length(usize),

    #[error("invalid figure digit '{0}' (expected 1-4)")]
    Figure(char),

    #[error("invalid mood letter '{0}' at position {1} (expected A, E, I or O)")]
    Mood(char, usize),

    #[error("invalid modal code '{0}' at position {1} (expected one of 0aAnNpP)")]
    Modal(char, usize),
}
