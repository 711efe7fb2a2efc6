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

//! Cross-chain (warp) transfer payloads.
//!
//! An export emits an unsigned [`WarpMessage`] whose payload is an encoded
//! [`WarpTransfer`]. Signing, aggregation and verification happen outside the
//! ledger; import only ever sees a message the caller has already verified.
//!
//! ```text
//! message   networkId(4) | sourceChain(32) | payloadLen(4) | payload
//! transfer  to(32) | symbolLen(2) symbol | decimals(1) | asset(32) | value(8) |
//!           return(1) | bits(1) [reward(8)] [swapIn(8)] [assetOut(32)]
//!           [swapOut(8)] [swapExpiry(8)] | txId(32) | destination(32)
//! ```

use crate::core::actions::consts::MAX_SYMBOL_SIZE;
use crate::core::codec::{CodecError, OptionalPacker, Packer, Unpacker, U16_LEN, U64_LEN};
use crate::core::types::{Address, Id, ADDRESS_LEN, ID_LEN};

/// Largest payload a message may carry.
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

const MESSAGE_DOMAIN: &[u8] = b"Warpledger-Warp-Message-v1";

/// Unsigned cross-chain message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WarpMessage {
    /// Network both chains belong to.
    pub network_id: u32,
    /// Chain that produced the message.
    pub source_chain_id: Id,
    /// Opaque payload, a [`WarpTransfer`] for ledger messages.
    pub payload: Vec<u8>,
}

impl WarpMessage {
    /// Encode for signing and storage.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        if self.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(CodecError::TooLarge);
        }
        let mut p = Packer::with_capacity(4 + ID_LEN + 4 + self.payload.len());
        p.pack_u32(self.network_id);
        p.pack_id(&self.source_chain_id);
        p.pack_u32(self.payload.len() as u32);
        p.pack_fixed(&self.payload);
        Ok(p.into_bytes())
    }

    /// Inverse of [`WarpMessage::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut u = Unpacker::new(bytes);
        let network_id = u.unpack_u32()?;
        let source_chain_id = u.unpack_id(true)?;
        let len = u.unpack_u32()? as usize;
        if len > MAX_PAYLOAD_SIZE {
            return Err(CodecError::TooLarge);
        }
        let payload = u.unpack_fixed(len)?.to_vec();
        u.finish()?;
        Ok(Self {
            network_id,
            source_chain_id,
            payload,
        })
    }

    /// Message id: domain-separated SHA-256 of the encoding.
    pub fn id(&self) -> Result<Id, CodecError> {
        let body = self.encode()?;
        let mut buf = Vec::with_capacity(MESSAGE_DOMAIN.len() + body.len());
        buf.extend_from_slice(MESSAGE_DOMAIN);
        buf.extend_from_slice(&body);
        Ok(Id::digest(&buf))
    }
}

/// Bridged value transfer between chains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WarpTransfer {
    /// Recipient on the destination chain.
    pub to: Address,
    /// Asset ticker as known on the source chain.
    pub symbol: Vec<u8>,
    /// Asset decimals as known on the source chain.
    pub decimals: u8,
    /// Asset id. On a return transfer this is the id on the destination chain.
    pub asset: Id,
    /// Amount credited to `to`.
    pub value: u64,
    /// Set when funds go back to the chain that created the asset.
    pub return_funds: bool,
    /// Amount paid to whoever submits the import.
    pub reward: u64,
    /// Amount of the bridged asset offered in a swap.
    pub swap_in: u64,
    /// Asset requested in exchange.
    pub asset_out: Id,
    /// Amount of `asset_out` requested.
    pub swap_out: u64,
    /// Unix ms after which the import may proceed without a swap.
    pub swap_expiry: i64,
    /// Export transaction, keeps message ids unique.
    pub tx_id: Id,
    /// Chain that must import this transfer.
    pub destination_chain_id: Id,
}

impl WarpTransfer {
    /// True when swap terms are attached.
    pub fn has_swap(&self) -> bool {
        self.swap_in > 0
    }

    /// Amount that leaves the source chain: value plus reward.
    pub fn total(&self) -> Option<u64> {
        self.value.checked_add(self.reward)
    }

    /// Encode the payload.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut size = ADDRESS_LEN + U16_LEN + self.symbol.len() + 1 + ID_LEN + U64_LEN + 1 + 1;
        if self.reward > 0 {
            size += U64_LEN;
        }
        if self.has_swap() {
            size += U64_LEN + ID_LEN + U64_LEN + U64_LEN;
        }
        size += ID_LEN * 2;

        let mut p = Packer::with_capacity(size);
        p.pack_address(&self.to);
        p.pack_bytes(&self.symbol)?;
        p.pack_u8(self.decimals);
        p.pack_id(&self.asset);
        p.pack_u64(self.value);
        p.pack_bool(self.return_funds);
        let mut op = OptionalPacker::new();
        op.pack_u64(self.reward)?;
        op.pack_u64(self.swap_in)?;
        op.pack_id(&self.asset_out)?;
        op.pack_u64(self.swap_out)?;
        op.pack_i64(self.swap_expiry)?;
        p.pack_optional(op);
        p.pack_id(&self.tx_id);
        p.pack_id(&self.destination_chain_id);
        Ok(p.into_bytes())
    }

    /// Decode a payload, rejecting trailing bytes and invalid swap terms.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut u = Unpacker::new(bytes);
        let to = u.unpack_address()?;
        let symbol = u.unpack_bytes(MAX_SYMBOL_SIZE, true)?.to_vec();
        let decimals = u.unpack_u8()?;
        let asset = u.unpack_id(false)?;
        let value = u.unpack_u64(true)?;
        let return_funds = u.unpack_bool()?;
        let mut op = u.unpack_optional()?;
        let reward = op.unpack_u64(&mut u)?;
        let swap_in = op.unpack_u64(&mut u)?;
        let asset_out = op.unpack_id(&mut u)?;
        let swap_out = op.unpack_u64(&mut u)?;
        let swap_expiry = op.unpack_i64(&mut u)?;
        op.done()?;
        let tx_id = u.unpack_id(true)?;
        let destination_chain_id = u.unpack_id(true)?;
        u.finish()?;

        if !valid_swap_params(value, swap_in, &asset_out, swap_out, swap_expiry) {
            return Err(CodecError::InvalidObject);
        }
        Ok(Self {
            to,
            symbol,
            decimals,
            asset,
            value,
            return_funds,
            reward,
            swap_in,
            asset_out,
            swap_out,
            swap_expiry,
            tx_id,
            destination_chain_id,
        })
    }
}

/// Swap terms are either fully absent or name a positive request bounded by `value`.
pub fn valid_swap_params(
    value: u64,
    swap_in: u64,
    asset_out: &Id,
    swap_out: u64,
    swap_expiry: i64,
) -> bool {
    if swap_expiry < 0 || swap_in > value {
        return false;
    }
    if swap_in > 0 {
        return swap_out > 0;
    }
    asset_out.is_empty() && swap_out == 0 && swap_expiry == 0
}

/// Local id of an asset bridged in from `source_chain`.
pub fn imported_asset_id(asset: &Id, source_chain: &Id) -> Id {
    Id::digest(&imported_asset_metadata(asset, source_chain))
}

/// Metadata stored on a bridged asset: origin asset || origin chain.
pub fn imported_asset_metadata(asset: &Id, source_chain: &Id) -> Vec<u8> {
    let mut k = Vec::with_capacity(ID_LEN * 2);
    k.extend_from_slice(asset.as_bytes());
    k.extend_from_slice(source_chain.as_bytes());
    k
}

/// Split bridged-asset metadata into (origin asset, origin chain).
pub fn parse_imported_metadata(metadata: &[u8]) -> Option<(Id, Id)> {
    if metadata.len() != ID_LEN * 2 {
        return None;
    }
    Some((
        Id::from_slice(&metadata[..ID_LEN])?,
        Id::from_slice(&metadata[ID_LEN..])?,
    ))
}
