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

use super::consts::{IMPORT_ASSET_COMPUTE_UNITS, MAX_SUPPLY};
use super::{outputs, ExecutionContext, Outcome};
use crate::core::codec::{CodecError, Packer, Unpacker};
use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::records::AssetRecord;
use crate::core::state::view::{Mutable, Overlay};
use crate::core::types::Address;
use crate::core::warp::{imported_asset_id, imported_asset_metadata, WarpMessage, WarpTransfer};
use tracing::debug;

/// Consume a verified warp message.
///
/// A fresh transfer mints a bridged asset; a returning transfer releases the
/// loan taken out when the asset left. Either way `to` receives `value` and
/// the actor receives `reward`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportAsset {
    /// Execute the attached swap instead of letting it lapse.
    pub fill: bool,
    message: WarpMessage,
    transfer: WarpTransfer,
}

impl ImportAsset {
    /// Bind an import to `message`, decoding its payload.
    pub fn new(message: WarpMessage, fill: bool) -> Result<Self, CodecError> {
        let transfer = WarpTransfer::decode(&message.payload)?;
        Ok(Self {
            fill,
            message,
            transfer,
        })
    }

    /// The message being imported.
    pub fn message(&self) -> &WarpMessage {
        &self.message
    }

    /// The decoded payload.
    pub fn transfer(&self) -> &WarpTransfer {
        &self.transfer
    }

    /// Encode the body. The message travels beside the action.
    pub fn marshal(&self, p: &mut Packer) -> Result<(), CodecError> {
        p.pack_bool(self.fill);
        Ok(())
    }

    /// Decode the body against the transaction's warp message.
    pub fn unmarshal(
        u: &mut Unpacker<'_>,
        message: Option<&WarpMessage>,
    ) -> Result<Self, CodecError> {
        let fill = u.unpack_bool()?;
        let message = message.ok_or(CodecError::Missing)?;
        Self::new(message.clone(), fill)
    }

    /// Mint or release, credit, then settle any swap.
    pub fn execute<S: Mutable + ?Sized>(
        &self,
        state: &mut S,
        ctx: &ExecutionContext,
    ) -> Result<Outcome, LedgerError> {
        let units = IMPORT_ASSET_COMPUTE_UNITS;
        let t = &self.transfer;
        let source = self.message.source_chain_id;

        if !ctx.warp_verified {
            return Ok(Outcome::failure(units, outputs::WARP_VERIFICATION_FAILED));
        }
        if self.message.network_id != ctx.network_id || t.destination_chain_id != ctx.chain_id {
            return Ok(Outcome::failure(units, outputs::WRONG_DESTINATION));
        }
        if self.fill && !t.has_swap() {
            return Ok(Outcome::failure(units, outputs::NO_SWAP_TO_FILL));
        }
        if t.has_swap() && !self.fill && t.swap_expiry > ctx.timestamp {
            return Ok(Outcome::failure(units, outputs::MUST_FILL));
        }
        let message_id = self.message.id().map_err(|e| LedgerError::Corrupt {
            key: "warp message".into(),
            reason: e.to_string(),
        })?;
        if ledger::has_incoming_warp(state, &source, &message_id)? {
            return Ok(Outcome::failure(units, outputs::WARP_ALREADY_IMPORTED));
        }
        let Some(total) = t.total() else {
            return Ok(Outcome::failure(units, outputs::TOTAL_OVERFLOW));
        };

        let mut staged = Overlay::new(&*state);
        let asset = if t.return_funds {
            let Some(record) = ledger::get_asset(&staged, &t.asset)? else {
                return Ok(Outcome::failure(units, outputs::ASSET_MISSING));
            };
            if record.warp {
                return Ok(Outcome::failure(units, outputs::WARP_ASSET));
            }
            if let Some(reason) = mismatch(&record, t) {
                return Ok(Outcome::failure(units, reason));
            }
            settle!(units, ledger::sub_loan(&mut staged, &t.asset, &source, total));
            t.asset
        } else {
            let asset = imported_asset_id(&t.asset, &source);
            let record = match ledger::get_asset(&staged, &asset)? {
                Some(record) => {
                    if !record.warp {
                        return Ok(Outcome::failure(units, outputs::CONFLICTING_ASSET));
                    }
                    if let Some(reason) = mismatch(&record, t) {
                        return Ok(Outcome::failure(units, reason));
                    }
                    record
                }
                None => AssetRecord {
                    symbol: t.symbol.clone(),
                    decimals: t.decimals,
                    metadata: imported_asset_metadata(&t.asset, &source),
                    supply: 0,
                    max_supply: MAX_SUPPLY,
                    owner: Address::EMPTY,
                    warp: true,
                },
            };
            let supply = match record.supply.checked_add(total) {
                Some(s) if s <= record.max_supply => s,
                _ => return Ok(Outcome::failure(units, outputs::MAX_SUPPLY_EXCEEDED)),
            };
            ledger::set_asset(&mut staged, &asset, &AssetRecord { supply, ..record })?;
            asset
        };

        settle!(units, ledger::add_balance(&mut staged, &t.to, &asset, t.value, true));
        if t.reward > 0 {
            settle!(units, ledger::add_balance(&mut staged, &ctx.actor, &asset, t.reward, true));
        }

        if self.fill {
            if t.swap_expiry < ctx.timestamp {
                debug!(expiry = t.swap_expiry, now = ctx.timestamp, "swap expired; skipping fill");
            } else {
                settle!(units, ledger::sub_balance(&mut staged, &ctx.actor, &t.asset_out, t.swap_out));
                settle!(units, ledger::add_balance(&mut staged, &t.to, &t.asset_out, t.swap_out, true));
                settle!(units, ledger::sub_balance(&mut staged, &t.to, &asset, t.swap_in));
                settle!(units, ledger::add_balance(&mut staged, &ctx.actor, &asset, t.swap_in, true));
            }
        }

        ledger::mark_incoming_warp(&mut staged, &source, &message_id)?;
        let ops = staged.into_ops();
        state.apply(ops)?;
        Ok(Outcome::success(units, Vec::new()))
    }
}

fn mismatch(record: &AssetRecord, t: &WarpTransfer) -> Option<&'static [u8]> {
    if record.symbol != t.symbol {
        return Some(outputs::SYMBOL_INCORRECT);
    }
    if record.decimals != t.decimals {
        return Some(outputs::DECIMALS_INCORRECT);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::testing::{addr, ctx};
    use crate::core::state::view::MemoryState;
    use crate::core::types::Id;

    fn transfer(dest: Id) -> WarpTransfer {
        WarpTransfer {
            to: addr(2),
            symbol: b"TIX".to_vec(),
            decimals: 2,
            asset: Id::digest(b"tix"),
            value: 100,
            return_funds: false,
            reward: 10,
            swap_in: 0,
            asset_out: Id::EMPTY,
            swap_out: 0,
            swap_expiry: 0,
            tx_id: Id::digest(b"export-tx"),
            destination_chain_id: dest,
        }
    }

    fn import(t: &WarpTransfer, network_id: u32, fill: bool) -> ImportAsset {
        let message = WarpMessage {
            network_id,
            source_chain_id: Id::digest(b"chain-o"),
            payload: t.encode().unwrap(),
        };
        ImportAsset::new(message, fill).unwrap()
    }

    fn verified(actor: Address) -> ExecutionContext {
        ExecutionContext {
            warp_verified: true,
            ..ctx(actor)
        }
    }

    #[test]
    fn mint_path_creates_bridged_asset() {
        let mut st = MemoryState::new();
        let c = verified(addr(9));
        let t = transfer(c.chain_id);
        let out = import(&t, c.network_id, false).execute(&mut st, &c).unwrap();
        assert!(out.success, "{:?}", String::from_utf8_lossy(&out.output));

        let local = imported_asset_id(&t.asset, &Id::digest(b"chain-o"));
        let rec = ledger::get_asset(&st, &local).unwrap().unwrap();
        assert!(rec.warp);
        assert_eq!(rec.supply, 110);
        assert_eq!(rec.owner, Address::EMPTY);
        assert_eq!(ledger::get_balance(&st, &addr(2), &local).unwrap(), 100);
        assert_eq!(ledger::get_balance(&st, &addr(9), &local).unwrap(), 10);
    }

    #[test]
    fn replay_is_rejected() {
        let mut st = MemoryState::new();
        let c = verified(addr(9));
        let i = import(&transfer(c.chain_id), c.network_id, false);
        assert!(i.execute(&mut st, &c).unwrap().success);
        assert_eq!(
            i.execute(&mut st, &c).unwrap().output,
            outputs::WARP_ALREADY_IMPORTED
        );
    }

    #[test]
    fn unverified_or_misdirected_messages_fail() {
        let mut st = MemoryState::new();
        let c = ctx(addr(9));
        let i = import(&transfer(c.chain_id), c.network_id, false);
        assert_eq!(
            i.execute(&mut st, &c).unwrap().output,
            outputs::WARP_VERIFICATION_FAILED
        );
        let c = verified(addr(9));
        let i = import(&transfer(Id::digest(b"other")), c.network_id, false);
        assert_eq!(i.execute(&mut st, &c).unwrap().output, outputs::WRONG_DESTINATION);
        let i = import(&transfer(c.chain_id), c.network_id + 1, false);
        assert_eq!(i.execute(&mut st, &c).unwrap().output, outputs::WRONG_DESTINATION);
        let i = import(&transfer(c.chain_id), c.network_id, true);
        assert_eq!(i.execute(&mut st, &c).unwrap().output, outputs::NO_SWAP_TO_FILL);
        assert!(st.is_empty());
    }

    #[test]
    fn return_path_requires_matching_local_asset() {
        let mut st = MemoryState::new();
        let c = verified(addr(9));
        let mut t = transfer(c.chain_id);
        t.return_funds = true;
        assert_eq!(
            import(&t, c.network_id, false).execute(&mut st, &c).unwrap().output,
            outputs::ASSET_MISSING
        );

        let rec = AssetRecord {
            symbol: b"TIC".to_vec(),
            decimals: 2,
            metadata: b"m".to_vec(),
            supply: 500,
            max_supply: 1000,
            owner: addr(1),
            warp: false,
        };
        ledger::set_asset(&mut st, &t.asset, &rec).unwrap();
        assert_eq!(
            import(&t, c.network_id, false).execute(&mut st, &c).unwrap().output,
            outputs::SYMBOL_INCORRECT
        );
    }

    #[test]
    fn unfilled_swap_before_expiry_must_fill() {
        let mut st = MemoryState::new();
        let c = verified(addr(9));
        let mut t = transfer(c.chain_id);
        t.swap_in = 40;
        t.asset_out = Id::digest(b"usd");
        t.swap_out = 8;
        t.swap_expiry = c.timestamp + 1;
        assert_eq!(
            import(&t, c.network_id, false).execute(&mut st, &c).unwrap().output,
            outputs::MUST_FILL
        );
        t.swap_expiry = c.timestamp - 1;
        assert!(import(&t, c.network_id, false).execute(&mut st, &c).unwrap().success);
    }

    #[test]
    fn filled_swap_exchanges_both_legs() {
        let mut st = MemoryState::new();
        let c = verified(addr(9));
        let usd = Id::digest(b"usd");
        ledger::set_balance(&mut st, &addr(9), &usd, 8).unwrap();
        let mut t = transfer(c.chain_id);
        t.swap_in = 40;
        t.asset_out = usd;
        t.swap_out = 8;
        t.swap_expiry = c.timestamp + 1;
        let out = import(&t, c.network_id, true).execute(&mut st, &c).unwrap();
        assert!(out.success);

        let local = imported_asset_id(&t.asset, &Id::digest(b"chain-o"));
        assert_eq!(ledger::get_balance(&st, &addr(2), &local).unwrap(), 60);
        assert_eq!(ledger::get_balance(&st, &addr(2), &usd).unwrap(), 8);
        assert_eq!(ledger::get_balance(&st, &addr(9), &local).unwrap(), 50);
        assert_eq!(ledger::get_balance(&st, &addr(9), &usd).unwrap(), 0);
    }

    #[test]
    fn unfunded_fill_writes_nothing() {
        let mut st = MemoryState::new();
        let c = verified(addr(9));
        let mut t = transfer(c.chain_id);
        t.swap_in = 40;
        t.asset_out = Id::digest(b"usd");
        t.swap_out = 5;
        t.swap_expiry = c.timestamp + 1;
        let out = import(&t, c.network_id, true).execute(&mut st, &c).unwrap();
        assert!(!out.success);
        assert!(String::from_utf8(out.output).unwrap().contains("could not subtract balance"));
        assert!(st.is_empty());
    }

    #[test]
    fn return_without_loan_writes_nothing() {
        let mut st = MemoryState::new();
        let c = verified(addr(9));
        let mut t = transfer(c.chain_id);
        t.return_funds = true;
        let rec = AssetRecord {
            symbol: b"TIX".to_vec(),
            decimals: 2,
            metadata: b"m".to_vec(),
            supply: 500,
            max_supply: 1000,
            owner: addr(1),
            warp: false,
        };
        ledger::set_asset(&mut st, &t.asset, &rec).unwrap();
        ledger::set_loan(&mut st, &t.asset, &Id::digest(b"chain-o"), 50).unwrap();
        let before = st.clone();

        let out = import(&t, c.network_id, false).execute(&mut st, &c).unwrap();
        assert!(!out.success);
        assert!(st.iter().eq(before.iter()));
    }

    #[test]
    fn body_needs_message() {
        let mut u = Unpacker::new(&[1]);
        assert_eq!(ImportAsset::unmarshal(&mut u, None), Err(CodecError::Missing));
    }
}
