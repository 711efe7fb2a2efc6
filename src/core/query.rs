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

//! Read-only lookups over immutable views.
//!
//! Replies are plain serde structs; ids render as hex and addresses as base58.
//! `Ok(None)` means not found.

use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::view::Immutable;
use crate::core::types::{Address, Id};
use serde::Serialize;

/// Asset lookup reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetReply {
    pub symbol: String,
    pub decimals: u8,
    pub metadata: String,
    pub supply: u64,
    pub max_supply: u64,
    pub owner: String,
    pub warp: bool,
}

/// NFT lookup reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftReply {
    pub metadata: String,
    pub owner: String,
    pub url: String,
}

/// Transaction metadata reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionReply {
    pub timestamp: i64,
    pub success: bool,
    pub units: [u64; 5],
    pub fee: u64,
}

/// Outgoing warp message reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WarpReply {
    pub network_id: u32,
    pub source_chain_id: String,
    pub message_id: String,
    pub payload: String,
}

/// Query surface over a state view and a metadata view.
pub struct Query<'a, S: ?Sized, M: ?Sized> {
    state: &'a S,
    metadata: &'a M,
}

impl<'a, S, M> Query<'a, S, M>
where
    S: Immutable + ?Sized,
    M: Immutable + ?Sized,
{
    /// Queries over `state`, with transaction metadata read from `metadata`.
    pub fn new(state: &'a S, metadata: &'a M) -> Self {
        Self { state, metadata }
    }

    /// Asset record.
    pub fn get_asset(&self, asset: &Id) -> Result<Option<AssetReply>, LedgerError> {
        Ok(ledger::get_asset(self.state, asset)?.map(|a| AssetReply {
            symbol: String::from_utf8_lossy(&a.symbol).into_owned(),
            decimals: a.decimals,
            metadata: String::from_utf8_lossy(&a.metadata).into_owned(),
            supply: a.supply,
            max_supply: a.max_supply,
            owner: a.owner.to_string(),
            warp: a.warp,
        }))
    }

    /// NFT record.
    pub fn get_nft(&self, nft: &Id) -> Result<Option<NftReply>, LedgerError> {
        Ok(ledger::get_nft(self.state, nft)?.map(|n| NftReply {
            metadata: String::from_utf8_lossy(&n.metadata).into_owned(),
            owner: n.owner.to_string(),
            url: String::from_utf8_lossy(&n.url).into_owned(),
        }))
    }

    /// Balance; absent accounts read as zero.
    pub fn get_balance(&self, owner: &Address, asset: &Id) -> Result<u64, LedgerError> {
        ledger::get_balance(self.state, owner, asset)
    }

    /// Outstanding loan of `asset` to `destination`; zero when none.
    pub fn get_loan(&self, asset: &Id, destination: &Id) -> Result<u64, LedgerError> {
        ledger::get_loan(self.state, asset, destination)
    }

    /// Execution metadata of `tx_id`.
    pub fn get_transaction(&self, tx_id: &Id) -> Result<Option<TransactionReply>, LedgerError> {
        Ok(
            ledger::get_transaction(self.metadata, tx_id)?.map(|t| TransactionReply {
                timestamp: t.timestamp,
                success: t.success,
                units: t.units.0,
                fee: t.fee,
            }),
        )
    }

    /// Unsigned message emitted by export `tx_id`.
    pub fn get_outgoing_warp(&self, tx_id: &Id) -> Result<Option<WarpReply>, LedgerError> {
        let Some(m) = ledger::get_outgoing_warp(self.state, tx_id)? else {
            return Ok(None);
        };
        let message_id = m.id().map_err(|e| LedgerError::Corrupt {
            key: tx_id.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(WarpReply {
            network_id: m.network_id,
            source_chain_id: m.source_chain_id.to_string(),
            message_id: message_id.to_string(),
            payload: hex::encode(&m.payload),
        }))
    }
}
