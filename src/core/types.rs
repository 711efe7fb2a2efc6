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

//! Deterministic core types: identifiers, addresses and resource dimensions.

use ring::digest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier length in bytes.
pub const ID_LEN: usize = 32;
/// Address length in bytes.
pub const ADDRESS_LEN: usize = 32;
/// Number of resource dimensions tracked per transaction.
pub const DIMENSIONS: usize = 5;
/// Encoded width of a [`Dimensions`] vector.
pub const DIMENSIONS_LEN: usize = DIMENSIONS * 8;

/// Text parsing error for ids and addresses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid encoding")]
    Encoding,
    #[error("invalid length")]
    Length,
}

/// 256-bit identifier (transactions, assets, NFTs, chains).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Id([u8; ID_LEN]);

impl Id {
    /// The all-zero id. Names the native asset and means "unset" elsewhere.
    pub const EMPTY: Id = Id([0u8; ID_LEN]);

    /// Construct from raw bytes.
    pub const fn from_bytes(b: [u8; ID_LEN]) -> Self {
        Self(b)
    }

    /// Construct from a slice of exactly [`ID_LEN`] bytes.
    pub fn from_slice(b: &[u8]) -> Option<Self> {
        let arr: [u8; ID_LEN] = b.try_into().ok()?;
        Some(Self(arr))
    }

    /// SHA-256 of `data`.
    pub fn digest(data: &[u8]) -> Self {
        let d = digest::digest(&digest::SHA256, data);
        let mut out = [0u8; ID_LEN];
        out.copy_from_slice(d.as_ref());
        Self(out)
    }

    /// Return bytes.
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// True for [`Id::EMPTY`].
    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; ID_LEN]
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Id {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s.trim()).map_err(|_| ParseError::Encoding)?;
        Self::from_slice(&raw).ok_or(ParseError::Length)
    }
}

/// Account address (32 bytes). Rendered as base58.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address. Owner of bridged assets and the NFT burn sink.
    pub const EMPTY: Address = Address([0u8; ADDRESS_LEN]);

    /// Construct from raw bytes.
    pub const fn from_bytes(b: [u8; ADDRESS_LEN]) -> Self {
        Self(b)
    }

    /// Construct from a slice of exactly [`ADDRESS_LEN`] bytes.
    pub fn from_slice(b: &[u8]) -> Option<Self> {
        let arr: [u8; ADDRESS_LEN] = b.try_into().ok()?;
        Some(Self(arr))
    }

    /// Return bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = bs58::decode(s.trim())
            .into_vec()
            .map_err(|_| ParseError::Encoding)?;
        Self::from_slice(&raw).ok_or(ParseError::Length)
    }
}

/// Resource usage vector: bandwidth, compute, storage read, storage allocate, storage write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions(pub [u64; DIMENSIONS]);

impl Dimensions {
    /// Bandwidth index.
    pub const BANDWIDTH: usize = 0;
    /// Compute index.
    pub const COMPUTE: usize = 1;
    /// Storage read index.
    pub const STORAGE_READ: usize = 2;
    /// Storage allocate index.
    pub const STORAGE_ALLOCATE: usize = 3;
    /// Storage write index.
    pub const STORAGE_WRITE: usize = 4;

    /// Fixed-width big-endian encoding.
    pub fn to_bytes(&self) -> [u8; DIMENSIONS_LEN] {
        let mut out = [0u8; DIMENSIONS_LEN];
        for (i, d) in self.0.iter().enumerate() {
            out[i * 8..(i + 1) * 8].copy_from_slice(&d.to_be_bytes());
        }
        out
    }

    /// Inverse of [`Dimensions::to_bytes`].
    pub fn from_bytes(b: &[u8; DIMENSIONS_LEN]) -> Self {
        let mut out = [0u64; DIMENSIONS];
        for (i, d) in out.iter_mut().enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(&b[i * 8..(i + 1) * 8]);
            *d = u64::from_be_bytes(word);
        }
        Self(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_hex_roundtrip() {
        let id = Id::digest(b"asset");
        let parsed: Id = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!("zz".parse::<Id>(), Err(ParseError::Encoding));
        assert_eq!("00ff".parse::<Id>(), Err(ParseError::Length));
    }

    #[test]
    fn address_base58_roundtrip() {
        let addr = Address::from_bytes([7u8; ADDRESS_LEN]);
        let parsed: Address = addr.to_string().parse().unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn empty_id_is_native() {
        assert!(Id::EMPTY.is_empty());
        assert!(!Id::digest(b"").is_empty());
    }
}
