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

use super::consts::GET_NFT_COMPUTE_UNITS;
use super::{outputs, ExecutionContext, Outcome};
use crate::core::codec::{CodecError, Packer, Unpacker};
use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::view::Immutable;
use crate::core::types::Id;

/// Look up an NFT and return its url as output. Never writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetNft {
    /// NFT to read.
    pub id: Id,
}

impl GetNft {
    /// Encode the body.
    pub fn marshal(&self, p: &mut Packer) -> Result<(), CodecError> {
        p.pack_id(&self.id);
        Ok(())
    }

    /// Decode the body.
    pub fn unmarshal(u: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            id: u.unpack_id(false)?,
        })
    }

    /// Read the url.
    pub fn execute<S: Immutable + ?Sized>(
        &self,
        state: &S,
        _ctx: &ExecutionContext,
    ) -> Result<Outcome, LedgerError> {
        let units = GET_NFT_COMPUTE_UNITS;
        if self.id.is_empty() {
            return Ok(Outcome::failure(units, outputs::NFT_ID_EMPTY));
        }
        match ledger::get_nft(state, &self.id)? {
            Some(nft) => Ok(Outcome::success(units, nft.url)),
            None => Ok(Outcome::failure(units, outputs::NFT_NOT_FOUND)),
        }
    }
}
