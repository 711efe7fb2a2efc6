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

use super::consts::{MAX_MEMO_SIZE, TRANSFER_NFT_COMPUTE_UNITS};
use super::{outputs, ExecutionContext, Outcome};
use crate::core::codec::{CodecError, Packer, Unpacker};
use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::view::Mutable;
use crate::core::types::{Address, Id};

/// Reassign an NFT. Sending to [`Address::EMPTY`] burns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferNft {
    /// New owner.
    pub to: Address,
    /// NFT to move.
    pub nft: Id,
    /// Free-form note.
    pub memo: Vec<u8>,
}

impl TransferNft {
    /// Encode the body.
    pub fn marshal(&self, p: &mut Packer) -> Result<(), CodecError> {
        p.pack_address(&self.to);
        p.pack_id(&self.nft);
        p.pack_bytes(&self.memo)
    }

    /// Decode the body.
    pub fn unmarshal(u: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            to: u.unpack_address()?,
            nft: u.unpack_id(false)?,
            memo: u.unpack_bytes(MAX_MEMO_SIZE, false)?.to_vec(),
        })
    }

    /// Rewrite the record with the new owner; metadata and url are kept.
    pub fn execute<S: Mutable + ?Sized>(
        &self,
        state: &mut S,
        ctx: &ExecutionContext,
    ) -> Result<Outcome, LedgerError> {
        let units = TRANSFER_NFT_COMPUTE_UNITS;
        if self.memo.len() > MAX_MEMO_SIZE {
            return Ok(Outcome::failure(units, outputs::MEMO_TOO_LARGE));
        }
        let Some(mut nft) = ledger::get_nft(state, &self.nft)? else {
            return Ok(Outcome::failure(units, outputs::NFT_NOT_FOUND));
        };
        if nft.owner != ctx.actor {
            return Ok(Outcome::failure(units, outputs::NOT_NFT_OWNER));
        }
        nft.owner = self.to;
        ledger::set_nft(state, &self.nft, &nft)?;
        Ok(Outcome::success(units, Vec::new()))
    }
}
