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

use super::consts::{MAX_MEMO_SIZE, TRANSFER_COMPUTE_UNITS};
use super::{outputs, ExecutionContext, Outcome};
use crate::core::codec::{CodecError, Packer, Unpacker};
use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::view::{Mutable, Overlay};
use crate::core::types::{Address, Id};

/// Native-asset transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    /// Recipient.
    pub to: Address,
    /// Amount of native asset.
    pub value: u64,
    /// Free-form note, at most 256 bytes.
    pub memo: Vec<u8>,
}

impl Transfer {
    /// Encode the body.
    pub fn marshal(&self, p: &mut Packer) -> Result<(), CodecError> {
        p.pack_address(&self.to);
        p.pack_u64(self.value);
        p.pack_bytes(&self.memo)
    }

    /// Decode the body.
    pub fn unmarshal(u: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            to: u.unpack_address()?,
            value: u.unpack_u64(true)?,
            memo: u.unpack_bytes(MAX_MEMO_SIZE, false)?.to_vec(),
        })
    }

    /// Debit the actor, credit `to`.
    pub fn execute<S: Mutable + ?Sized>(
        &self,
        state: &mut S,
        ctx: &ExecutionContext,
    ) -> Result<Outcome, LedgerError> {
        let units = TRANSFER_COMPUTE_UNITS;
        if self.value == 0 {
            return Ok(Outcome::failure(units, outputs::VALUE_ZERO));
        }
        if self.memo.len() > MAX_MEMO_SIZE {
            return Ok(Outcome::failure(units, outputs::MEMO_TOO_LARGE));
        }

        let mut staged = Overlay::new(&*state);
        settle!(units, ledger::sub_balance(&mut staged, &ctx.actor, &Id::EMPTY, self.value));
        settle!(units, ledger::add_balance(&mut staged, &self.to, &Id::EMPTY, self.value, true));
        let ops = staged.into_ops();
        state.apply(ops)?;
        Ok(Outcome::success(units, Vec::new()))
    }
}
