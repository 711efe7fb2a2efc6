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

use super::consts::MINT_ASSET_COMPUTE_UNITS;
use super::{outputs, ExecutionContext, Outcome};
use crate::core::codec::{CodecError, Packer, Unpacker};
use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::view::Mutable;
use crate::core::types::{Address, Id};

/// Mint new units of an asset the actor owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintAsset {
    /// Recipient.
    pub to: Address,
    /// Asset to mint. Never the native asset.
    pub asset: Id,
    /// Units to mint.
    pub value: u64,
}

impl MintAsset {
    /// Encode the body.
    pub fn marshal(&self, p: &mut Packer) -> Result<(), CodecError> {
        p.pack_address(&self.to);
        p.pack_id(&self.asset);
        p.pack_u64(self.value);
        Ok(())
    }

    /// Decode the body.
    pub fn unmarshal(u: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            to: u.unpack_address()?,
            asset: u.unpack_id(true)?,
            value: u.unpack_u64(true)?,
        })
    }

    /// Credit `to` and raise supply, bounded by the mint cap.
    pub fn execute<S: Mutable + ?Sized>(
        &self,
        state: &mut S,
        ctx: &ExecutionContext,
    ) -> Result<Outcome, LedgerError> {
        let units = MINT_ASSET_COMPUTE_UNITS;
        if self.asset.is_empty() {
            return Ok(Outcome::failure(units, outputs::ASSET_IS_NATIVE));
        }
        if self.value == 0 {
            return Ok(Outcome::failure(units, outputs::VALUE_ZERO));
        }
        let Some(mut record) = ledger::get_asset(state, &self.asset)? else {
            return Ok(Outcome::failure(units, outputs::ASSET_MISSING));
        };
        if record.owner != ctx.actor {
            return Ok(Outcome::failure(units, outputs::WRONG_OWNER));
        }
        if record.warp {
            return Ok(Outcome::failure(units, outputs::WARP_ASSET));
        }
        let supply = match record.supply.checked_add(self.value) {
            Some(s) if s <= record.max_supply => s,
            _ => return Ok(Outcome::failure(units, outputs::MAX_SUPPLY_EXCEEDED)),
        };

        settle!(units, ledger::add_balance(state, &self.to, &self.asset, self.value, true));
        record.supply = supply;
        ledger::set_asset(state, &self.asset, &record)?;
        Ok(Outcome::success(units, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::testing::{addr, ctx};
    use crate::core::state::records::AssetRecord;
    use crate::core::state::view::MemoryState;

    fn seeded(owner: Address, warp: bool) -> (MemoryState, Id) {
        let mut st = MemoryState::new();
        let asset = Id::digest(b"tix");
        let rec = AssetRecord {
            symbol: b"TIX".to_vec(),
            decimals: 2,
            metadata: b"m".to_vec(),
            supply: 0,
            max_supply: 1000,
            owner,
            warp,
        };
        ledger::set_asset(&mut st, &asset, &rec).unwrap();
        (st, asset)
    }

    #[test]
    fn mint_up_to_cap() {
        let (mut st, asset) = seeded(addr(1), false);
        let m = MintAsset {
            to: addr(2),
            asset,
            value: 1000,
        };
        assert!(m.execute(&mut st, &ctx(addr(1))).unwrap().success);
        assert_eq!(ledger::get_asset(&st, &asset).unwrap().unwrap().supply, 1000);
        assert_eq!(ledger::get_balance(&st, &addr(2), &asset).unwrap(), 1000);

        let m = MintAsset {
            to: addr(2),
            asset,
            value: 1,
        };
        let out = m.execute(&mut st, &ctx(addr(1))).unwrap();
        assert_eq!(out.output, outputs::MAX_SUPPLY_EXCEEDED);
        assert_eq!(ledger::get_asset(&st, &asset).unwrap().unwrap().supply, 1000);
    }

    #[test]
    fn rejects_non_owner_native_and_warp() {
        let (mut st, asset) = seeded(addr(1), false);
        let m = MintAsset {
            to: addr(2),
            asset,
            value: 5,
        };
        assert_eq!(m.execute(&mut st, &ctx(addr(9))).unwrap().output, outputs::WRONG_OWNER);

        let native = MintAsset {
            asset: Id::EMPTY,
            ..m.clone()
        };
        assert_eq!(
            native.execute(&mut st, &ctx(addr(1))).unwrap().output,
            outputs::ASSET_IS_NATIVE
        );

        let missing = MintAsset {
            asset: Id::digest(b"nope"),
            ..m.clone()
        };
        assert_eq!(
            missing.execute(&mut st, &ctx(addr(1))).unwrap().output,
            outputs::ASSET_MISSING
        );

        let (mut st, asset) = seeded(addr(1), true);
        let m = MintAsset { asset, ..m };
        assert_eq!(m.execute(&mut st, &ctx(addr(1))).unwrap().output, outputs::WARP_ASSET);
    }
}
