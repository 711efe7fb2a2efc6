// Copyright (c) 2026 Amunchain
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! State view capabilities supplied to the ledger per invocation.
//!
//! `Immutable` reads, `Mutable` reads and writes. A missing key reads as
//! `Ok(None)`; every other fault is a [`StateError`].

use std::cell::RefCell;
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// State errors.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("db open")]
    DbOpen,
    #[error("db io")]
    DbIo,
    #[error("tx conflict")]
    TxConflict,
}

/// State operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KvOp {
    /// Put key/value.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete key.
    Del { key: Vec<u8> },
}

/// Read capability.
pub trait Immutable {
    /// Value stored under `key`, `None` when absent.
    fn get_value(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;
}

/// Read/write capability.
pub trait Mutable: Immutable {
    /// Upsert `key`.
    fn insert(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StateError>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&mut self, key: &[u8]) -> Result<(), StateError>;

    /// Apply a batch of operations. Backends with transactions override this.
    fn apply(&mut self, ops: Vec<KvOp>) -> Result<(), StateError> {
        for op in ops {
            match op {
                KvOp::Put { key, value } => self.insert(&key, value)?,
                KvOp::Del { key } => self.remove(&key)?,
            }
        }
        Ok(())
    }
}

impl<T: Immutable + ?Sized> Immutable for &T {
    fn get_value(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        (**self).get_value(key)
    }
}

/// State keyspace paired with the transaction-metadata keyspace.
///
/// [`Journal::commit`] writes one executed transaction: its state batch and
/// its metadata batch.
pub trait Journal {
    /// State keyspace.
    type State: Immutable + ?Sized;
    /// Metadata keyspace.
    type Metadata: Immutable + ?Sized;

    /// Read view of the state keyspace.
    fn state_view(&self) -> &Self::State;

    /// Read view of the metadata keyspace.
    fn metadata_view(&self) -> &Self::Metadata;

    /// Commit both batches.
    fn commit(&mut self, state: Vec<KvOp>, metadata: Vec<KvOp>) -> Result<(), StateError>;
}

/// Two independent stores. The state batch is applied first.
impl<S: Mutable + ?Sized, M: Mutable + ?Sized> Journal for (&mut S, &mut M) {
    type State = S;
    type Metadata = M;

    fn state_view(&self) -> &S {
        &*self.0
    }

    fn metadata_view(&self) -> &M {
        &*self.1
    }

    fn commit(&mut self, state: Vec<KvOp>, metadata: Vec<KvOp>) -> Result<(), StateError> {
        self.0.apply(state)?;
        self.1.apply(metadata)
    }
}

/// In-memory state, ordered by key.
#[derive(Clone, Debug, Default)]
pub struct MemoryState {
    kv: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate all pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, Vec<u8>, Vec<u8>> {
        self.kv.iter()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.kv.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.kv.is_empty()
    }
}

impl Immutable for MemoryState {
    fn get_value(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.kv.get(key).cloned())
    }
}

impl Mutable for MemoryState {
    fn insert(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StateError> {
        self.kv.insert(key.to_vec(), value);
        Ok(())
    }

    fn remove(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.kv.remove(key);
        Ok(())
    }
}

/// Write-staging view over a base state.
///
/// Reads see staged writes first. Nothing reaches the base until the caller
/// takes [`Overlay::into_ops`] and applies them.
pub struct Overlay<'a, S: Immutable + ?Sized> {
    base: &'a S,
    staged: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
    reads: RefCell<BTreeSet<Vec<u8>>>,
    allocated: BTreeSet<Vec<u8>>,
}

impl<'a, S: Immutable + ?Sized> Overlay<'a, S> {
    /// Empty overlay on `base`.
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            staged: BTreeMap::new(),
            reads: RefCell::new(BTreeSet::new()),
            allocated: BTreeSet::new(),
        }
    }

    /// Distinct keys read from the base.
    pub fn read_count(&self) -> u64 {
        self.reads.borrow().len() as u64
    }

    /// Staged writes that create a key absent from the base.
    pub fn allocate_count(&self) -> u64 {
        self.allocated.len() as u64
    }

    /// Distinct keys with a staged write.
    pub fn write_count(&self) -> u64 {
        self.staged.len() as u64
    }

    /// Staged writes in key order.
    pub fn into_ops(self) -> Vec<KvOp> {
        self.staged
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => KvOp::Put { key, value },
                None => KvOp::Del { key },
            })
            .collect()
    }
}

impl<S: Immutable + ?Sized> Immutable for Overlay<'_, S> {
    fn get_value(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        if let Some(staged) = self.staged.get(key) {
            return Ok(staged.clone());
        }
        let mut reads = self.reads.borrow_mut();
        if !reads.contains(key) {
            reads.insert(key.to_vec());
        }
        self.base.get_value(key)
    }
}

impl<S: Immutable + ?Sized> Mutable for Overlay<'_, S> {
    fn insert(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StateError> {
        if !self.staged.contains_key(key) && self.base.get_value(key)?.is_none() {
            self.allocated.insert(key.to_vec());
        }
        self.staged.insert(key.to_vec(), Some(value));
        Ok(())
    }

    fn remove(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.allocated.remove(key);
        self.staged.insert(key.to_vec(), None);
        Ok(())
    }
}
