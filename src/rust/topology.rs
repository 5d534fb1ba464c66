// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Rank layout for a batch run
//!
//! Ranks are split into groups of `engine_count` consecutive members. Member
//! `i` of a group runs engine `i`; member 0 leads the group and belongs to
//! the executive set that the master (rank 0) coordinates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Position of one rank in the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTopology {
    pub rank: usize,
    pub total: usize,
    pub engine_count: usize,
    pub group_id: usize,
    pub role_index: usize,
    pub is_group_leader: bool,
}

/// What a rank does once proving is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Master,
    Leader,
    Worker,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Reject process counts that would leave some formulas unchecked by an engine.
pub fn validate_layout(total: usize, engine_count: usize) -> Result<()> {
    if engine_count == 0 {
        return Err(Error::config("at least one engine is required"));
    }
    if total == 0 {
        return Err(Error::config("at least one process is required"));
    }
    if total != 1 && total % engine_count != 0 {
        return Err(Error::config(format!(
            "number of processes is not divisible by number of provers; \
             some formulas would not be checked by all provers (processes: {}, provers: {})",
            total, engine_count
        )));
    }
    Ok(())
}

impl ProcessTopology {
    pub fn new(rank: usize, total: usize, engine_count: usize) -> Result<Self> {
        validate_layout(total, engine_count)?;
        if rank >= total {
            return Err(Error::config(format!(
                "rank {} out of range for {} processes",
                rank, total
            )));
        }

        let role_index = rank % engine_count;
        Ok(ProcessTopology {
            rank,
            total,
            engine_count,
            group_id: rank / engine_count,
            role_index,
            is_group_leader: role_index == 0,
        })
    }

    pub fn num_groups(&self) -> usize {
        num_groups(self.total, self.engine_count)
    }

    /// Members of this rank's group; the leader comes first
    pub fn group_members(&self) -> Vec<usize> {
        let start = self.group_id * self.engine_count;
        (start..(start + self.engine_count).min(self.total)).collect()
    }

    /// Index of this rank within the executive set, if it leads a group
    pub fn executive_index(&self) -> Option<usize> {
        self.is_group_leader.then_some(self.group_id)
    }

    pub fn is_master(&self) -> bool {
        self.rank == 0
    }

    pub fn role(&self) -> Role {
        if self.is_master() {
            Role::Master
        } else if self.is_group_leader {
            Role::Leader
        } else {
            Role::Worker
        }
    }
}

pub fn num_groups(total: usize, engine_count: usize) -> usize {
    total.div_ceil(engine_count)
}

/// Global ranks of all group leaders, ordered by group id
pub fn executive_set(total: usize, engine_count: usize) -> Vec<usize> {
    (0..num_groups(total, engine_count))
        .map(|g| g * engine_count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_processes_four_engines() {
        assert_eq!(executive_set(12, 4), vec![0, 4, 8]);

        let t = ProcessTopology::new(5, 12, 4).unwrap();
        assert_eq!(t.group_id, 1);
        assert_eq!(t.role_index, 1);
        assert!(!t.is_group_leader);
        assert_eq!(t.role(), Role::Worker);
        assert_eq!(t.group_members(), vec![4, 5, 6, 7]);
        assert_eq!(t.num_groups(), 3);

        for rank in [0, 4, 8] {
            let t = ProcessTopology::new(rank, 12, 4).unwrap();
            assert!(t.is_group_leader);
            assert_eq!(t.executive_index(), Some(rank / 4));
        }
        assert_eq!(ProcessTopology::new(0, 12, 4).unwrap().role(), Role::Master);
        assert_eq!(ProcessTopology::new(8, 12, 4).unwrap().role(), Role::Leader);
    }

    #[test]
    fn test_indivisible_count_is_fatal() {
        assert!(matches!(ProcessTopology::new(0, 10, 4), Err(Error::Config(_))));
        assert!(matches!(validate_layout(6, 4), Err(Error::Config(_))));
    }

    #[test]
    fn test_single_process_is_allowed() {
        let t = ProcessTopology::new(0, 1, 4).unwrap();
        assert!(t.is_master());
        assert!(t.is_group_leader);
        assert_eq!(t.num_groups(), 1);
        assert_eq!(t.group_members(), vec![0]);
        assert_eq!(executive_set(1, 4), vec![0]);
    }

    #[test]
    fn test_out_of_range_rank_and_zero_engines() {
        assert!(ProcessTopology::new(12, 12, 4).is_err());
        assert!(validate_layout(4, 0).is_err());
        assert!(validate_layout(0, 4).is_err());
    }
}
