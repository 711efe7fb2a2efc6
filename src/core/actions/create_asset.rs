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

use super::consts::{
    CREATE_ASSET_COMPUTE_UNITS, MAX_DECIMALS, MAX_METADATA_SIZE, MAX_SUPPLY, MAX_SYMBOL_SIZE,
};
use super::{outputs, ExecutionContext, Outcome};
use crate::core::codec::{CodecError, Packer, Unpacker};
use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::records::AssetRecord;
use crate::core::state::view::Mutable;

/// Register a fungible asset owned by the actor. The asset id is the tx id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateAsset {
    /// Ticker.
    pub symbol: Vec<u8>,
    /// Display decimals.
    pub decimals: u8,
    /// Free-form metadata.
    pub metadata: Vec<u8>,
    /// Mint cap.
    pub max_supply: u64,
}

impl CreateAsset {
    /// Encode the body.
    pub fn marshal(&self, p: &mut Packer) -> Result<(), CodecError> {
        p.pack_bytes(&self.symbol)?;
        p.pack_u8(self.decimals);
        p.pack_bytes(&self.metadata)?;
        p.pack_u64(self.max_supply);
        Ok(())
    }

    /// Decode the body.
    pub fn unmarshal(u: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            symbol: u.unpack_bytes(MAX_SYMBOL_SIZE, true)?.to_vec(),
            decimals: u.unpack_u8()?,
            metadata: u.unpack_bytes(MAX_METADATA_SIZE, true)?.to_vec(),
            max_supply: u.unpack_u64(true)?,
        })
    }

    /// Write the asset record with zero supply.
    pub fn execute<S: Mutable + ?Sized>(
        &self,
        state: &mut S,
        ctx: &ExecutionContext,
    ) -> Result<Outcome, LedgerError> {
        let units = CREATE_ASSET_COMPUTE_UNITS;
        if self.symbol.is_empty() {
            return Ok(Outcome::failure(units, outputs::SYMBOL_EMPTY));
        }
        if self.symbol.len() > MAX_SYMBOL_SIZE {
            return Ok(Outcome::failure(units, outputs::SYMBOL_TOO_LARGE));
        }
        if self.decimals > MAX_DECIMALS {
            return Ok(Outcome::failure(units, outputs::DECIMALS_TOO_LARGE));
        }
        if self.metadata.is_empty() {
            return Ok(Outcome::failure(units, outputs::METADATA_EMPTY));
        }
        if self.metadata.len() > MAX_METADATA_SIZE {
            return Ok(Outcome::failure(units, outputs::METADATA_TOO_LARGE));
        }
        if self.max_supply > MAX_SUPPLY {
            return Ok(Outcome::failure(units, outputs::MAX_SUPPLY_TOO_LARGE));
        }

        // Keyed by tx id: an existing record is only overwritten on a hash collision.
        let record = AssetRecord {
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            metadata: self.metadata.clone(),
            supply: 0,
            max_supply: self.max_supply,
            owner: ctx.actor,
            warp: false,
        };
        ledger::set_asset(state, &ctx.tx_id, &record)?;
        Ok(Outcome::success(units, Vec::new()))
    }
}
