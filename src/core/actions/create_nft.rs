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

use super::consts::{CREATE_NFT_COMPUTE_UNITS, MAX_METADATA_SIZE, MAX_NFT_URL_SIZE};
use super::{outputs, ExecutionContext, Outcome};
use crate::core::codec::{CodecError, Packer, Unpacker};
use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::records::NftRecord;
use crate::core::state::view::Mutable;
use crate::core::types::Address;

/// Register an NFT under the tx id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateNft {
    /// Free-form metadata.
    pub metadata: Vec<u8>,
    /// Initial owner. Need not be the actor.
    pub owner: Address,
    /// Content location.
    pub url: Vec<u8>,
}

impl CreateNft {
    /// Encode the body.
    pub fn marshal(&self, p: &mut Packer) -> Result<(), CodecError> {
        p.pack_bytes(&self.metadata)?;
        p.pack_address(&self.owner);
        p.pack_bytes(&self.url)
    }

    /// Decode the body.
    pub fn unmarshal(u: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            metadata: u.unpack_bytes(MAX_METADATA_SIZE, true)?.to_vec(),
            owner: u.unpack_address()?,
            url: u.unpack_bytes(MAX_NFT_URL_SIZE, true)?.to_vec(),
        })
    }

    /// Write the NFT record.
    pub fn execute<S: Mutable + ?Sized>(
        &self,
        state: &mut S,
        ctx: &ExecutionContext,
    ) -> Result<Outcome, LedgerError> {
        let units = CREATE_NFT_COMPUTE_UNITS;
        if self.metadata.is_empty() {
            return Ok(Outcome::failure(units, outputs::METADATA_EMPTY));
        }
        if self.metadata.len() > MAX_METADATA_SIZE {
            return Ok(Outcome::failure(units, outputs::METADATA_TOO_LARGE));
        }
        if self.url.is_empty() {
            return Ok(Outcome::failure(units, outputs::URL_EMPTY));
        }
        if self.url.len() > MAX_NFT_URL_SIZE {
            return Ok(Outcome::failure(units, outputs::URL_TOO_LARGE));
        }
        let record = NftRecord {
            metadata: self.metadata.clone(),
            owner: self.owner,
            url: self.url.clone(),
        };
        ledger::set_nft(state, &ctx.tx_id, &record)?;
        Ok(Outcome::success(units, Vec::new()))
    }
}
