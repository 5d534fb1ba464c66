// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Collective operations between ranks
//!
//! Each rank owns one `Communicator` endpoint per group it belongs to. The
//! endpoints of a group are connected pairwise by unbounded channels that
//! carry bincode frames, so ranks share no memory. Every member of a group
//! must issue the same collectives in the same order; receives are matched by
//! source, which keeps consecutive collectives from interleaving.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::VecDeque;
use tokio::sync::mpsc;
use tracing::trace;

use crate::error::{Error, Result};
use crate::topology::{executive_set, num_groups, validate_layout};

struct Frame {
    from: usize,
    payload: Vec<u8>,
}

/// One member's endpoint in a communication group
pub struct Communicator {
    label: String,
    index: usize,
    peers: Vec<Option<mpsc::UnboundedSender<Frame>>>,
    inbox: mpsc::UnboundedReceiver<Frame>,
    pending: Vec<VecDeque<Vec<u8>>>,
}

impl std::fmt::Debug for Communicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Communicator")
            .field("label", &self.label)
            .field("index", &self.index)
            .field("size", &self.size())
            .finish()
    }
}

impl Communicator {
    /// Create a fully connected group; endpoint `i` is member `i`.
    pub fn group(label: &str, size: usize) -> Vec<Communicator> {
        let (senders, receivers): (Vec<_>, Vec<_>) =
            (0..size).map(|_| mpsc::unbounded_channel::<Frame>()).unzip();

        receivers
            .into_iter()
            .enumerate()
            .map(|(index, inbox)| Communicator {
                label: label.to_string(),
                index,
                peers: senders
                    .iter()
                    .enumerate()
                    .map(|(i, tx)| (i != index).then(|| tx.clone()))
                    .collect(),
                inbox,
                pending: (0..size).map(|_| VecDeque::new()).collect(),
            })
            .collect()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> usize {
        self.peers.len()
    }

    fn check_root(&self, root: usize) -> Result<()> {
        if root >= self.size() {
            return Err(Error::Comm(format!(
                "{}: root {} out of range for {} members",
                self.label,
                root,
                self.size()
            )));
        }
        Ok(())
    }

    fn send_bytes(&self, to: usize, payload: Vec<u8>) -> Result<()> {
        let tx = self.peers[to].as_ref().ok_or_else(|| {
            Error::Comm(format!("{}: member {} cannot message itself", self.label, to))
        })?;
        tx.send(Frame {
            from: self.index,
            payload,
        })
        .map_err(|_| Error::Comm(format!("{}: member {} hung up", self.label, to)))
    }

    async fn recv_from<T: DeserializeOwned>(&mut self, from: usize) -> Result<T> {
        loop {
            if let Some(payload) = self.pending[from].pop_front() {
                return Ok(bincode::deserialize(&payload)?);
            }

            let frame = self.inbox.recv().await.ok_or_else(|| {
                Error::Comm(format!(
                    "{}: member {} waiting on {} but the group closed",
                    self.label, self.index, from
                ))
            })?;
            self.pending[frame.from].push_back(frame.payload);
        }
    }

    /// Root's value is delivered to every member.
    pub async fn broadcast<T>(&mut self, root: usize, value: Option<T>) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        self.check_root(root)?;

        if self.index != root {
            return self.recv_from(root).await;
        }

        let value = value.ok_or_else(|| {
            Error::Comm(format!("{}: broadcast root has no value", self.label))
        })?;
        let payload = bincode::serialize(&value)?;
        trace!("{}: broadcasting {} bytes", self.label, payload.len());
        for member in (0..self.size()).filter(|&m| m != root) {
            self.send_bytes(member, payload.clone())?;
        }
        Ok(value)
    }

    /// Root supplies exactly one item per member; member `i` receives item `i`.
    pub async fn scatter<T>(&mut self, root: usize, values: Option<Vec<T>>) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        self.check_root(root)?;

        if self.index != root {
            return self.recv_from(root).await;
        }

        let values = values.ok_or_else(|| {
            Error::Comm(format!("{}: scatter root has no values", self.label))
        })?;
        if values.len() != self.size() {
            return Err(Error::alignment(format!(
                "{}: scatter needs {} items, got {}",
                self.label,
                self.size(),
                values.len()
            )));
        }

        let mut own = None;
        for (member, value) in values.into_iter().enumerate() {
            if member == root {
                own = Some(value);
            } else {
                self.send_bytes(member, bincode::serialize(&value)?)?;
            }
        }
        own.ok_or_else(|| Error::Comm(format!("{}: scatter lost the root item", self.label)))
    }

    /// Every member's value arrives at root, ordered by member index.
    pub async fn gather<T>(&mut self, root: usize, value: T) -> Result<Option<Vec<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        self.check_root(root)?;

        if self.index != root {
            self.send_bytes(root, bincode::serialize(&value)?)?;
            return Ok(None);
        }

        let mut own = Some(value);
        let mut gathered = Vec::with_capacity(self.size());
        for member in 0..self.size() {
            if member == root {
                if let Some(v) = own.take() {
                    gathered.push(v);
                }
            } else {
                gathered.push(self.recv_from(member).await?);
            }
        }
        Ok(Some(gathered))
    }
}

/// Endpoints owned by one rank
#[derive(Debug)]
pub struct RankChannels {
    /// The rank's process group; the leader is member 0
    pub work: Communicator,
    /// Executive set, present only on group leaders
    pub executive: Option<Communicator>,
}

/// Build every rank's endpoints for `total` ranks and `engine_count` engines.
pub fn build_fabric(total: usize, engine_count: usize) -> Result<Vec<RankChannels>> {
    validate_layout(total, engine_count)?;

    let mut work: Vec<Option<Communicator>> = (0..total).map(|_| None).collect();
    for group in 0..num_groups(total, engine_count) {
        let first = group * engine_count;
        let size = engine_count.min(total - first);
        for (offset, endpoint) in Communicator::group(&format!("work-{}", group), size)
            .into_iter()
            .enumerate()
        {
            work[first + offset] = Some(endpoint);
        }
    }

    let mut executive: Vec<Option<Communicator>> = (0..total).map(|_| None).collect();
    let leaders = executive_set(total, engine_count);
    for (rank, endpoint) in leaders
        .iter()
        .zip(Communicator::group("executive", leaders.len()))
    {
        executive[*rank] = Some(endpoint);
    }

    work.into_iter()
        .zip(executive)
        .enumerate()
        .map(|(rank, (work, executive))| {
            let work = work.ok_or_else(|| {
                Error::Comm(format!("rank {} was not assigned a work group", rank))
            })?;
            Ok(RankChannels { work, executive })
        })
        .collect()
}
