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

//! Deterministic Merkle tree over the sorted ledger keyspace.
//!
//! leaf = H( "Warpledger-State-Leaf-v1" || H(key) || H(value) )
//! node = H( "Warpledger-State-Node-v1" || left || right )
//!
//! An odd node at the end of a level is paired with itself.

use crate::core::types::Id;

/// Hash32 type.
pub type Hash32 = [u8; 32];

const LEAF_DOMAIN: &[u8] = b"Warpledger-State-Leaf-v1";
const NODE_DOMAIN: &[u8] = b"Warpledger-State-Node-v1";

/// Side of sibling in proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Sibling is left.
    Left,
    /// Sibling is right.
    Right,
}

/// One proof item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofItem {
    /// Whether sibling is left or right of current hash.
    pub side: Side,
    /// Sibling hash.
    pub sibling: Hash32,
}

/// Merkle inclusion proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleProof {
    /// Leaf hash.
    pub leaf: Hash32,
    /// Path items from leaf to root.
    pub path: Vec<ProofItem>,
}

fn h(data: &[u8]) -> Hash32 {
    *Id::digest(data).as_bytes()
}

fn domain_hash(domain: &[u8], a: &Hash32, b: &Hash32) -> Hash32 {
    let mut buf = Vec::with_capacity(domain.len() + 64);
    buf.extend_from_slice(domain);
    buf.extend_from_slice(a);
    buf.extend_from_slice(b);
    h(&buf)
}

/// Leaf hash of one key/value pair.
pub fn hash_leaf(key: &[u8], value: &[u8]) -> Hash32 {
    domain_hash(LEAF_DOMAIN, &h(key), &h(value))
}

fn hash_node(left: &Hash32, right: &Hash32) -> Hash32 {
    domain_hash(NODE_DOMAIN, left, right)
}

fn next_level(level: &[Hash32]) -> Vec<Hash32> {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            hash_node(left, pair.get(1).unwrap_or(left))
        })
        .collect()
}

/// Build Merkle root from sorted (key,value) pairs.
/// If empty, returns ZERO hash.
pub fn merkle_root_sorted(pairs: &[(Vec<u8>, Vec<u8>)]) -> Hash32 {
    if pairs.is_empty() {
        return [0u8; 32];
    }
    let mut level: Vec<Hash32> = pairs.iter().map(|(k, v)| hash_leaf(k, v)).collect();
    while level.len() > 1 {
        level = next_level(&level);
    }
    level[0]
}

/// Generate inclusion proof for a pair at `index` (pairs must be sorted).
pub fn merkle_proof_sorted(pairs: &[(Vec<u8>, Vec<u8>)], index: usize) -> Option<MerkleProof> {
    if index >= pairs.len() {
        return None;
    }
    let mut level: Vec<Hash32> = pairs.iter().map(|(k, v)| hash_leaf(k, v)).collect();
    let leaf = level[index];
    let mut idx = index;
    let mut path = Vec::new();
    while level.len() > 1 {
        let (side, sib_idx) = if idx % 2 == 1 {
            (Side::Left, idx - 1)
        } else {
            (Side::Right, idx + 1)
        };
        let sibling = level.get(sib_idx).copied().unwrap_or(level[idx]);
        path.push(ProofItem { side, sibling });
        level = next_level(&level);
        idx /= 2;
    }
    Some(MerkleProof { leaf, path })
}

/// Verify proof against root.
pub fn verify_proof(root: Hash32, proof: &MerkleProof) -> bool {
    let cur = proof.path.iter().fold(proof.leaf, |cur, item| match item.side {
        Side::Left => hash_node(&item.sibling, &cur),
        Side::Right => hash_node(&cur, &item.sibling),
    });
    cur == root
}
