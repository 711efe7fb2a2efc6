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

//! State key layout.
//!
//! ```text
//! state keyspace
//!   0x0 | owner(32) | asset(32) | chunks(2)    balance
//!   0x1 | asset(32) | chunks(2)                asset
//!   0x2 | nft(32) | chunks(2)                  nft
//!   0x3 | asset(32) | destination(32) | chunks(2)  loan
//!   0x7 | source chain(32) | message id(32)    imported warp marker
//!   0x8 | tx id(32)                            outgoing warp message
//! metadata keyspace
//!   0x0 | tx id(32)                            transaction metadata
//! ```
//!
//! The trailing chunk count must match the value used to size the record in
//! the backing store, or reads misalign.

use crate::core::codec::U16_LEN;
use crate::core::types::{Address, Id, ADDRESS_LEN, ID_LEN};
use std::ops::Deref;
use std::sync::Mutex;

const TX_PREFIX: u8 = 0x0;

const BALANCE_PREFIX: u8 = 0x0;
const ASSET_PREFIX: u8 = 0x1;
const NFT_PREFIX: u8 = 0x2;
const LOAN_PREFIX: u8 = 0x3;
const INCOMING_WARP_PREFIX: u8 = 0x7;
const OUTGOING_WARP_PREFIX: u8 = 0x8;

/// Chunk count for balance records.
pub const BALANCE_CHUNKS: u16 = 1;
/// Chunk count for asset records.
pub const ASSET_CHUNKS: u16 = 5;
/// Chunk count for NFT records.
pub const NFT_CHUNKS: u16 = 5;
/// Chunk count for loan records.
pub const LOAN_CHUNKS: u16 = 1;

/// Encoded balance key width.
pub const BALANCE_KEY_LEN: usize = 1 + ADDRESS_LEN + ID_LEN + U16_LEN;

// Buffers retained beyond this are dropped instead of pooled.
const MAX_POOLED: usize = 64;

static BALANCE_KEYS: KeyPool = KeyPool::new(BALANCE_KEY_LEN);

/// Pool of reusable key buffers of one fixed width.
pub struct KeyPool {
    width: usize,
    free: Mutex<Vec<Vec<u8>>>,
}

impl KeyPool {
    /// Empty pool handing out `width`-byte buffers.
    pub const fn new(width: usize) -> Self {
        Self {
            width,
            free: Mutex::new(Vec::new()),
        }
    }

    /// Borrow a buffer with stale contents. It goes back to the pool when the guard drops.
    pub fn acquire(&self) -> PooledKey<'_> {
        let buf = self
            .free
            .lock()
            .ok()
            .and_then(|mut free| free.pop())
            .unwrap_or_else(|| vec![0u8; self.width]);
        PooledKey { buf, pool: self }
    }

    /// Buffers currently idle in the pool.
    pub fn idle(&self) -> usize {
        self.free.lock().map(|free| free.len()).unwrap_or(0)
    }

    fn release(&self, buf: Vec<u8>) {
        if buf.len() != self.width {
            return;
        }
        if let Ok(mut free) = self.free.lock() {
            if free.len() < MAX_POOLED {
                free.push(buf);
            }
        }
    }
}

/// A key buffer on loan from a [`KeyPool`].
///
/// The buffer is owned by the guard, so it cannot be reused while a caller
/// still holds the key.
pub struct PooledKey<'a> {
    buf: Vec<u8>,
    pool: &'a KeyPool,
}

impl Deref for PooledKey<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl AsRef<[u8]> for PooledKey<'_> {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl Drop for PooledKey<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

/// Balance prefix + owner + asset + chunks, on a pooled buffer.
pub fn balance_key(owner: &Address, asset: &Id) -> PooledKey<'static> {
    let mut k = BALANCE_KEYS.acquire();
    k.buf[0] = BALANCE_PREFIX;
    k.buf[1..1 + ADDRESS_LEN].copy_from_slice(owner.as_bytes());
    k.buf[1 + ADDRESS_LEN..1 + ADDRESS_LEN + ID_LEN].copy_from_slice(asset.as_bytes());
    k.buf[1 + ADDRESS_LEN + ID_LEN..].copy_from_slice(&BALANCE_CHUNKS.to_be_bytes());
    k
}

/// Idle buffers in the balance key pool.
pub fn balance_pool_idle() -> usize {
    BALANCE_KEYS.idle()
}

fn id_key(prefix: u8, id: &Id, chunks: Option<u16>) -> Vec<u8> {
    let mut k = Vec::with_capacity(1 + ID_LEN + U16_LEN);
    k.push(prefix);
    k.extend_from_slice(id.as_bytes());
    if let Some(chunks) = chunks {
        k.extend_from_slice(&chunks.to_be_bytes());
    }
    k
}

/// Asset record key.
pub fn asset_key(asset: &Id) -> Vec<u8> {
    id_key(ASSET_PREFIX, asset, Some(ASSET_CHUNKS))
}

/// NFT record key.
pub fn nft_key(nft: &Id) -> Vec<u8> {
    id_key(NFT_PREFIX, nft, Some(NFT_CHUNKS))
}

/// Loan record key for `asset` lent to `destination`.
pub fn loan_key(asset: &Id, destination: &Id) -> Vec<u8> {
    let mut k = Vec::with_capacity(1 + ID_LEN * 2 + U16_LEN);
    k.push(LOAN_PREFIX);
    k.extend_from_slice(asset.as_bytes());
    k.extend_from_slice(destination.as_bytes());
    k.extend_from_slice(&LOAN_CHUNKS.to_be_bytes());
    k
}

/// Transaction metadata key (metadata keyspace).
pub fn tx_key(tx_id: &Id) -> Vec<u8> {
    id_key(TX_PREFIX, tx_id, None)
}

/// Marker key for an imported warp message.
pub fn incoming_warp_key(source_chain: &Id, message_id: &Id) -> Vec<u8> {
    let mut k = Vec::with_capacity(1 + ID_LEN * 2);
    k.push(INCOMING_WARP_PREFIX);
    k.extend_from_slice(source_chain.as_bytes());
    k.extend_from_slice(message_id.as_bytes());
    k
}

/// Key for the warp message emitted by `tx_id`.
pub fn outgoing_warp_key(tx_id: &Id) -> Vec<u8> {
    id_key(OUTGOING_WARP_PREFIX, tx_id, None)
}

/// True if `key` is a balance key.
pub fn is_balance_key(key: &[u8]) -> bool {
    key.len() == BALANCE_KEY_LEN && key[0] == BALANCE_PREFIX
}

/// True if `key` is a loan key.
pub fn is_loan_key(key: &[u8]) -> bool {
    key.len() == 1 + ID_LEN * 2 + U16_LEN && key[0] == LOAN_PREFIX
}

/// Split a balance key into (owner, asset).
pub fn parse_balance_key(key: &[u8]) -> Option<(Address, Id)> {
    if !is_balance_key(key) {
        return None;
    }
    let owner = Address::from_slice(&key[1..1 + ADDRESS_LEN])?;
    let asset = Id::from_slice(&key[1 + ADDRESS_LEN..1 + ADDRESS_LEN + ID_LEN])?;
    Some((owner, asset))
}

/// Split a loan key into (asset, destination).
pub fn parse_loan_key(key: &[u8]) -> Option<(Id, Id)> {
    if !is_loan_key(key) {
        return None;
    }
    let asset = Id::from_slice(&key[1..1 + ID_LEN])?;
    let destination = Id::from_slice(&key[1 + ID_LEN..1 + ID_LEN * 2])?;
    Some((asset, destination))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_key_layout() {
        let owner = Address::from_bytes([1u8; ADDRESS_LEN]);
        let asset = Id::from_bytes([2u8; ID_LEN]);
        let k = balance_key(&owner, &asset);
        assert_eq!(k.len(), BALANCE_KEY_LEN);
        assert_eq!(k[0], BALANCE_PREFIX);
        assert_eq!(&k[1..33], owner.as_bytes());
        assert_eq!(&k[33..65], asset.as_bytes());
        assert_eq!(&k[65..], &[0, 1]);
        assert_eq!(parse_balance_key(&k), Some((owner, asset)));
    }

    #[test]
    fn pooled_buffer_is_rewritten_on_reuse() {
        let a = Address::from_bytes([0xaa; ADDRESS_LEN]);
        let b = Address::from_bytes([0xbb; ADDRESS_LEN]);
        let first = balance_key(&a, &Id::EMPTY).to_vec();
        let second = balance_key(&b, &Id::EMPTY).to_vec();
        assert_ne!(first, second);
        assert_eq!(&second[1..33], b.as_bytes());
    }

    #[test]
    fn private_pool_recycles() {
        let pool = KeyPool::new(4);
        {
            let _k = pool.acquire();
            assert_eq!(pool.idle(), 0);
        }
        assert_eq!(pool.idle(), 1);
        let k = pool.acquire();
        assert_eq!(k.len(), 4);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn chunked_keys_carry_suffix() {
        let id = Id::from_bytes([3u8; ID_LEN]);
        let k = asset_key(&id);
        assert_eq!(&k[k.len() - 2..], &ASSET_CHUNKS.to_be_bytes());
        let k = nft_key(&id);
        assert_eq!(&k[k.len() - 2..], &NFT_CHUNKS.to_be_bytes());
        let k = loan_key(&id, &Id::EMPTY);
        assert_eq!(&k[k.len() - 2..], &LOAN_CHUNKS.to_be_bytes());
        assert_eq!(parse_loan_key(&k), Some((id, Id::EMPTY)));
        assert_eq!(tx_key(&id).len(), 1 + ID_LEN);
    }
}
