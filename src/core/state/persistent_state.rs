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

//! Persistent ledger state using sled, with deterministic Merkle roots and inclusion proofs.
//!
//! The default tree holds the state keyspace. Transaction metadata lives in a
//! separate `metadata` tree and does not contribute to the state root.

use crate::core::state::merkle::{
    merkle_proof_sorted, merkle_root_sorted, verify_proof, Hash32, MerkleProof,
};
use crate::core::state::view::{Immutable, Journal, KvOp, Mutable, StateError};
use sled::transaction::{
    ConflictableTransactionResult, TransactionError, TransactionalTree,
    UnabortableTransactionError,
};
use sled::Transactional;
use tracing::debug;

const METADATA_TREE: &str = "metadata";

/// One sled tree viewed as a state keyspace.
#[derive(Clone)]
pub struct SledTree {
    tree: sled::Tree,
}

impl SledTree {
    /// Atomic commit using a sled transaction.
    pub fn commit_atomic(&self, ops: Vec<KvOp>) -> Result<(), StateError> {
        let n = ops.len();
        let res = self
            .tree
            .transaction(|t| -> ConflictableTransactionResult<(), StateError> {
                stage(t, &ops)?;
                Ok(())
            });
        finish(res, n)
    }

    /// All pairs in key order.
    pub fn pairs(&self) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StateError> {
        self.tree
            .iter()
            .map(|item| {
                item.map(|(k, v)| (k.to_vec(), v.to_vec()))
                    .map_err(|_| StateError::DbIo)
            })
            .collect()
    }

    /// True when the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

fn stage(t: &TransactionalTree, ops: &[KvOp]) -> Result<(), UnabortableTransactionError> {
    for op in ops {
        match op {
            KvOp::Put { key, value } => {
                t.insert(key.as_slice(), value.as_slice())?;
            }
            KvOp::Del { key } => {
                t.remove(key.as_slice())?;
            }
        }
    }
    Ok(())
}

fn finish(res: Result<(), TransactionError<StateError>>, ops: usize) -> Result<(), StateError> {
    match res {
        Ok(()) => {
            debug!(ops, "committed");
            Ok(())
        }
        Err(TransactionError::Abort(e)) => Err(e),
        Err(TransactionError::Storage(_)) => Err(StateError::DbIo),
    }
}

impl Immutable for SledTree {
    fn get_value(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        let v = self.tree.get(key).map_err(|_| StateError::DbIo)?;
        Ok(v.map(|iv| iv.to_vec()))
    }
}

impl Mutable for SledTree {
    fn insert(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StateError> {
        self.tree.insert(key, value).map_err(|_| StateError::DbIo)?;
        Ok(())
    }

    fn remove(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.tree.remove(key).map_err(|_| StateError::DbIo)?;
        Ok(())
    }

    fn apply(&mut self, ops: Vec<KvOp>) -> Result<(), StateError> {
        self.commit_atomic(ops)
    }
}

/// Persistent state wrapper.
#[derive(Clone)]
pub struct PersistentState {
    db: sled::Db,
    state: SledTree,
    metadata: SledTree,
}

impl PersistentState {
    /// Open sled DB at path (directory).
    pub fn open(path: &str) -> Result<Self, StateError> {
        let db = sled::open(path).map_err(|_| StateError::DbOpen)?;
        let metadata = db.open_tree(METADATA_TREE).map_err(|_| StateError::DbOpen)?;
        let state = SledTree {
            tree: (*db).clone(),
        };
        Ok(Self {
            db,
            state,
            metadata: SledTree { tree: metadata },
        })
    }

    /// Handle on the transaction metadata keyspace.
    pub fn metadata(&self) -> SledTree {
        self.metadata.clone()
    }

    /// Get value.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        self.state.get_value(key)
    }

    /// Atomic commit of state-keyspace operations.
    pub fn commit_atomic(&self, ops: Vec<KvOp>) -> Result<(), StateError> {
        self.state.commit_atomic(ops)
    }

    /// State and metadata operations committed in one sled transaction.
    pub fn commit_with_metadata(
        &self,
        state: Vec<KvOp>,
        metadata: Vec<KvOp>,
    ) -> Result<(), StateError> {
        let n = state.len() + metadata.len();
        let res = (&self.state.tree, &self.metadata.tree).transaction(
            |(s, m)| -> ConflictableTransactionResult<(), StateError> {
                stage(s, &state)?;
                stage(m, &metadata)?;
                Ok(())
            },
        );
        finish(res, n)
    }

    /// True when the state keyspace is empty (fresh database).
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Flush to disk.
    pub fn flush(&self) -> Result<(), StateError> {
        self.db.flush().map_err(|_| StateError::DbIo)?;
        Ok(())
    }

    /// All state pairs in key order.
    pub fn pairs(&self) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StateError> {
        self.state.pairs()
    }

    /// Deterministic Merkle root over the state keyspace.
    pub fn state_root(&self) -> Result<Hash32, StateError> {
        Ok(merkle_root_sorted(&self.pairs()?))
    }

    /// Produce an inclusion proof for a key, if it exists.
    pub fn prove_key(
        &self,
        key: &[u8],
    ) -> Result<Option<(Vec<u8>, Vec<u8>, Hash32, MerkleProof)>, StateError> {
        let pairs = self.pairs()?;
        let Ok(i) = pairs.binary_search_by(|p| p.0.as_slice().cmp(key)) else {
            return Ok(None);
        };
        let root = merkle_root_sorted(&pairs);
        Ok(merkle_proof_sorted(&pairs, i)
            .map(|proof| (pairs[i].0.clone(), pairs[i].1.clone(), root, proof)))
    }

    /// Verify a Merkle proof.
    pub fn verify_proof(root: Hash32, proof: &MerkleProof) -> bool {
        verify_proof(root, proof)
    }
}

impl Immutable for PersistentState {
    fn get_value(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        self.state.get_value(key)
    }
}

impl Mutable for PersistentState {
    fn insert(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StateError> {
        self.state.insert(key, value)
    }

    fn remove(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.state.remove(key)
    }

    fn apply(&mut self, ops: Vec<KvOp>) -> Result<(), StateError> {
        self.state.commit_atomic(ops)
    }
}

impl Journal for PersistentState {
    type State = SledTree;
    type Metadata = SledTree;

    fn state_view(&self) -> &SledTree {
        &self.state
    }

    fn metadata_view(&self) -> &SledTree {
        &self.metadata
    }

    fn commit(&mut self, state: Vec<KvOp>, metadata: Vec<KvOp>) -> Result<(), StateError> {
        self.commit_with_metadata(state, metadata)
    }
}
