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

//! Persisted record layouts. These are a durability contract: reordering a
//! field or changing a width breaks every stored ledger.
//!
//! ```text
//! asset  symbolLen(2) | symbol | decimals(1) | metadataLen(2) | metadata |
//!        supply(8) | maxSupply(8) | owner(32) | warp(1)
//! nft    metadataLen(2) | metadata | owner(32) | urlLen(2) | url
//! amount value(8)                       (balances, loans)
//! tx     timestamp(8) | success(1) | dimensions(40) | fee(8)
//! ```

use crate::core::codec::{CodecError, Packer, Unpacker, U16_LEN, U64_LEN};
use crate::core::types::{Address, Dimensions, ADDRESS_LEN, DIMENSIONS_LEN};

/// Fungible asset record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRecord {
    /// Ticker, at most 8 bytes.
    pub symbol: Vec<u8>,
    /// Display decimals, at most 9.
    pub decimals: u8,
    /// Free-form metadata. Bridged assets store origin asset || origin chain.
    pub metadata: Vec<u8>,
    /// Units in circulation on this chain.
    pub supply: u64,
    /// Mint cap.
    pub max_supply: u64,
    /// Minting authority. [`Address::EMPTY`] for bridged assets.
    pub owner: Address,
    /// Set for assets imported over warp.
    pub warp: bool,
}

impl AssetRecord {
    /// Encode to the persisted layout.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut p = Packer::with_capacity(
            U16_LEN * 2
                + self.symbol.len()
                + 1
                + self.metadata.len()
                + U64_LEN * 2
                + ADDRESS_LEN
                + 1,
        );
        p.pack_bytes(&self.symbol)?;
        p.pack_u8(self.decimals);
        p.pack_bytes(&self.metadata)?;
        p.pack_u64(self.supply);
        p.pack_u64(self.max_supply);
        p.pack_address(&self.owner);
        p.pack_bool(self.warp);
        Ok(p.into_bytes())
    }

    /// Decode the persisted layout. Trailing bytes are rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut u = Unpacker::new(bytes);
        let symbol = u.unpack_bytes(u16::MAX as usize, false)?.to_vec();
        let decimals = u.unpack_u8()?;
        let metadata = u.unpack_bytes(u16::MAX as usize, false)?.to_vec();
        let supply = u.unpack_u64(false)?;
        let max_supply = u.unpack_u64(false)?;
        let owner = u.unpack_address()?;
        let warp = u.unpack_bool()?;
        u.finish()?;
        Ok(Self {
            symbol,
            decimals,
            metadata,
            supply,
            max_supply,
            owner,
            warp,
        })
    }
}

/// Non-fungible token record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NftRecord {
    /// Free-form metadata, at most 256 bytes.
    pub metadata: Vec<u8>,
    /// Current owner.
    pub owner: Address,
    /// Content location, at most 1000 bytes.
    pub url: Vec<u8>,
}

impl NftRecord {
    /// Encode to the persisted layout.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut p =
            Packer::with_capacity(U16_LEN * 2 + self.metadata.len() + ADDRESS_LEN + self.url.len());
        p.pack_bytes(&self.metadata)?;
        p.pack_address(&self.owner);
        p.pack_bytes(&self.url)?;
        Ok(p.into_bytes())
    }

    /// Decode the persisted layout. Trailing bytes are rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut u = Unpacker::new(bytes);
        let metadata = u.unpack_bytes(u16::MAX as usize, false)?.to_vec();
        let owner = u.unpack_address()?;
        let url = u.unpack_bytes(u16::MAX as usize, false)?.to_vec();
        u.finish()?;
        Ok(Self {
            metadata,
            owner,
            url,
        })
    }
}

/// Encode a balance or loan amount.
pub fn encode_amount(amount: u64) -> Vec<u8> {
    amount.to_be_bytes().to_vec()
}

/// Decode a balance or loan amount.
pub fn decode_amount(bytes: &[u8]) -> Result<u64, CodecError> {
    let mut u = Unpacker::new(bytes);
    let v = u.unpack_u64(false)?;
    u.finish()?;
    Ok(v)
}

/// Per-transaction execution metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionMeta {
    /// Block timestamp (unix ms).
    pub timestamp: i64,
    /// Whether the action succeeded.
    pub success: bool,
    /// Resources consumed.
    pub units: Dimensions,
    /// Fee charged.
    pub fee: u64,
}

impl TransactionMeta {
    /// Encoded width.
    pub const LEN: usize = U64_LEN + 1 + DIMENSIONS_LEN + U64_LEN;

    /// Encode to the persisted layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut p = Packer::with_capacity(Self::LEN);
        p.pack_i64(self.timestamp);
        p.pack_bool(self.success);
        p.pack_fixed(&self.units.to_bytes());
        p.pack_u64(self.fee);
        p.into_bytes()
    }

    /// Decode the persisted layout.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut u = Unpacker::new(bytes);
        let timestamp = u.unpack_i64()?;
        let success = u.unpack_bool()?;
        let mut dims = [0u8; DIMENSIONS_LEN];
        dims.copy_from_slice(u.unpack_fixed(DIMENSIONS_LEN)?);
        let fee = u.unpack_u64(false)?;
        u.finish()?;
        Ok(Self {
            timestamp,
            success,
            units: Dimensions::from_bytes(&dims),
            fee,
        })
    }
}
