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

use super::consts::EXPORT_ASSET_COMPUTE_UNITS;
use super::{outputs, ExecutionContext, Outcome};
use crate::core::codec::{CodecError, OptionalPacker, Packer, Unpacker};
use crate::core::state::keys;
use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::view::{Mutable, Overlay};
use crate::core::types::{Address, Id};
use crate::core::warp::{parse_imported_metadata, valid_swap_params, WarpMessage, WarpTransfer};

/// Send value to another chain.
///
/// A local asset is locked as a loan to the destination. A bridged asset
/// travelling back to its origin chain is burned here instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportAsset {
    /// Recipient on the destination chain.
    pub to: Address,
    /// Local asset id.
    pub asset: Id,
    /// Amount credited to `to`.
    pub value: u64,
    /// Send a bridged asset home.
    pub return_funds: bool,
    /// Amount paid to the importer.
    pub reward: u64,
    /// Amount of `asset` offered in a swap on the destination.
    pub swap_in: u64,
    /// Destination asset requested in exchange.
    pub asset_out: Id,
    /// Amount of `asset_out` requested.
    pub swap_out: u64,
    /// Unix ms after which the swap no longer binds the importer.
    pub swap_expiry: i64,
    /// Chain that must import the message.
    pub destination: Id,
}

impl ExportAsset {
    /// Encode the body.
    pub fn marshal(&self, p: &mut Packer) -> Result<(), CodecError> {
        p.pack_address(&self.to);
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
        p.pack_id(&self.destination);
        Ok(())
    }

    /// Decode the body.
    pub fn unmarshal(u: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        let to = u.unpack_address()?;
        let asset = u.unpack_id(false)?;
        let value = u.unpack_u64(true)?;
        let return_funds = u.unpack_bool()?;
        let mut op = u.unpack_optional()?;
        let reward = op.unpack_u64(u)?;
        let swap_in = op.unpack_u64(u)?;
        let asset_out = op.unpack_id(u)?;
        let swap_out = op.unpack_u64(u)?;
        let swap_expiry = op.unpack_i64(u)?;
        op.done()?;
        let destination = u.unpack_id(true)?;
        if !valid_swap_params(value, swap_in, &asset_out, swap_out, swap_expiry) {
            return Err(CodecError::InvalidObject);
        }
        Ok(Self {
            to,
            asset,
            value,
            return_funds,
            reward,
            swap_in,
            asset_out,
            swap_out,
            swap_expiry,
            destination,
        })
    }

    /// Debit the actor, lock or burn, and emit the unsigned message.
    pub fn execute<S: Mutable + ?Sized>(
        &self,
        state: &mut S,
        ctx: &ExecutionContext,
    ) -> Result<Outcome, LedgerError> {
        let units = EXPORT_ASSET_COMPUTE_UNITS;
        if self.value == 0 {
            return Ok(Outcome::failure(units, outputs::VALUE_ZERO));
        }
        if self.destination.is_empty() {
            return Ok(Outcome::failure(units, outputs::ANYCAST));
        }
        if self.destination == ctx.chain_id {
            return Ok(Outcome::failure(units, outputs::INVALID_DESTINATION));
        }
        if !valid_swap_params(
            self.value,
            self.swap_in,
            &self.asset_out,
            self.swap_out,
            self.swap_expiry,
        ) {
            return Ok(Outcome::failure(units, outputs::INVALID_SWAP));
        }
        let Some(total) = self.value.checked_add(self.reward) else {
            return Ok(Outcome::failure(units, outputs::TOTAL_OVERFLOW));
        };
        let Some(mut record) = ledger::get_asset(&*state, &self.asset)? else {
            return Ok(Outcome::failure(units, outputs::ASSET_MISSING));
        };

        let mut staged = Overlay::new(&*state);

        let payload_asset = if self.return_funds {
            if !record.warp {
                return Ok(Outcome::failure(units, outputs::NOT_WARP_ASSET));
            }
            let (origin_asset, origin_chain) =
                parse_imported_metadata(&record.metadata).ok_or_else(|| LedgerError::Corrupt {
                    key: hex::encode(keys::asset_key(&self.asset)),
                    reason: "bridged asset metadata".into(),
                })?;
            if origin_chain != self.destination {
                return Ok(Outcome::failure(units, outputs::WRONG_DESTINATION));
            }
            settle!(units, ledger::sub_balance(&mut staged, &ctx.actor, &self.asset, total));
            record.supply = record.supply.checked_sub(total).ok_or_else(|| LedgerError::Corrupt {
                key: hex::encode(keys::asset_key(&self.asset)),
                reason: "supply below returned amount".into(),
            })?;
            if record.supply == 0 {
                ledger::delete_asset(&mut staged, &self.asset)?;
            } else {
                ledger::set_asset(&mut staged, &self.asset, &record)?;
            }
            origin_asset
        } else {
            if record.warp {
                return Ok(Outcome::failure(units, outputs::WARP_ASSET));
            }
            settle!(units, ledger::sub_balance(&mut staged, &ctx.actor, &self.asset, total));
            settle!(units, ledger::add_loan(&mut staged, &self.asset, &self.destination, total));
            self.asset
        };

        let transfer = WarpTransfer {
            to: self.to,
            symbol: record.symbol,
            decimals: record.decimals,
            asset: payload_asset,
            value: self.value,
            return_funds: self.return_funds,
            reward: self.reward,
            swap_in: self.swap_in,
            asset_out: self.asset_out,
            swap_out: self.swap_out,
            swap_expiry: self.swap_expiry,
            tx_id: ctx.tx_id,
            destination_chain_id: self.destination,
        };
        let payload = transfer.encode().map_err(|e| LedgerError::Corrupt {
            key: hex::encode(keys::asset_key(&self.asset)),
            reason: e.to_string(),
        })?;
        let message = WarpMessage {
            network_id: ctx.network_id,
            source_chain_id: ctx.chain_id,
            payload,
        };
        ledger::store_outgoing_warp(&mut staged, &ctx.tx_id, &message)?;
        let ops = staged.into_ops();
        state.apply(ops)?;
        Ok(Outcome::success(units, Vec::new()).with_warp(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::testing::{addr, ctx};
    use crate::core::state::records::AssetRecord;
    use crate::core::state::view::MemoryState;
    use crate::core::warp::imported_asset_metadata;

    fn local_asset(st: &mut MemoryState, warp: bool, metadata: Vec<u8>) -> Id {
        let asset = Id::digest(b"tix");
        let rec = AssetRecord {
            symbol: b"TIX".to_vec(),
            decimals: 2,
            metadata,
            supply: 500,
            max_supply: 1000,
            owner: addr(1),
            warp,
        };
        ledger::set_asset(st, &asset, &rec).unwrap();
        ledger::set_balance(st, &addr(1), &asset, 500).unwrap();
        asset
    }

    fn export(asset: Id, destination: Id) -> ExportAsset {
        ExportAsset {
            to: addr(2),
            asset,
            value: 100,
            return_funds: false,
            reward: 10,
            swap_in: 0,
            asset_out: Id::EMPTY,
            swap_out: 0,
            swap_expiry: 0,
            destination,
        }
    }

    #[test]
    fn loan_path_locks_value_and_reward() {
        let mut st = MemoryState::new();
        let asset = local_asset(&mut st, false, b"m".to_vec());
        let x = Id::digest(b"chain-x");
        let c = ctx(addr(1));
        let out = export(asset, x).execute(&mut st, &c).unwrap();
        assert!(out.success);
        assert_eq!(ledger::get_balance(&st, &addr(1), &asset).unwrap(), 390);
        assert_eq!(ledger::get_loan(&st, &asset, &x).unwrap(), 110);

        let msg = out.warp_message.unwrap();
        assert_eq!(msg.source_chain_id, c.chain_id);
        assert_eq!(msg.network_id, c.network_id);
        let t = WarpTransfer::decode(&msg.payload).unwrap();
        assert_eq!((t.value, t.reward, t.destination_chain_id), (100, 10, x));
        assert_eq!(t.asset, asset);
        assert_eq!(t.symbol, b"TIX");
        assert_eq!(ledger::get_outgoing_warp(&st, &c.tx_id).unwrap(), Some(msg));
    }

    #[test]
    fn return_path_burns_and_names_origin() {
        let mut st = MemoryState::new();
        let origin_asset = Id::digest(b"origin");
        let origin_chain = Id::digest(b"chain-o");
        let asset = local_asset(&mut st, true, imported_asset_metadata(&origin_asset, &origin_chain));

        let mut e = export(asset, Id::digest(b"elsewhere"));
        e.return_funds = true;
        assert_eq!(
            e.execute(&mut st, &ctx(addr(1))).unwrap().output,
            outputs::WRONG_DESTINATION
        );

        e.destination = origin_chain;
        let out = e.execute(&mut st, &ctx(addr(1))).unwrap();
        assert!(out.success);
        assert_eq!(ledger::get_asset(&st, &asset).unwrap().unwrap().supply, 390);
        let t = WarpTransfer::decode(&out.warp_message.unwrap().payload).unwrap();
        assert_eq!(t.asset, origin_asset);
        assert!(t.return_funds);
    }

    #[test]
    fn full_return_deletes_asset() {
        let mut st = MemoryState::new();
        let origin_chain = Id::digest(b"chain-o");
        let asset = local_asset(
            &mut st,
            true,
            imported_asset_metadata(&Id::digest(b"origin"), &origin_chain),
        );
        let mut e = export(asset, origin_chain);
        e.return_funds = true;
        e.value = 490;
        assert!(e.execute(&mut st, &ctx(addr(1))).unwrap().success);
        assert_eq!(ledger::get_asset(&st, &asset).unwrap(), None);
        assert_eq!(ledger::get_balance(&st, &addr(1), &asset).unwrap(), 0);
    }

    #[test]
    fn loan_overflow_keeps_the_debit_unapplied() {
        let mut st = MemoryState::new();
        let asset = local_asset(&mut st, false, b"m".to_vec());
        let x = Id::digest(b"chain-x");
        ledger::set_loan(&mut st, &asset, &x, u64::MAX - 5).unwrap();
        let before = st.clone();

        let out = export(asset, x).execute(&mut st, &ctx(addr(1))).unwrap();
        assert!(!out.success);
        assert!(String::from_utf8(out.output).unwrap().contains("could not add loan"));
        assert!(st.iter().eq(before.iter()));
    }

    #[test]
    fn destination_and_path_checks() {
        let mut st = MemoryState::new();
        let asset = local_asset(&mut st, false, b"m".to_vec());
        let c = ctx(addr(1));
        assert_eq!(
            export(asset, Id::EMPTY).execute(&mut st, &c).unwrap().output,
            outputs::ANYCAST
        );
        assert_eq!(
            export(asset, c.chain_id).execute(&mut st, &c).unwrap().output,
            outputs::INVALID_DESTINATION
        );
        let mut e = export(asset, Id::digest(b"chain-x"));
        e.return_funds = true;
        assert_eq!(e.execute(&mut st, &c).unwrap().output, outputs::NOT_WARP_ASSET);

        let mut e = export(asset, Id::digest(b"chain-x"));
        e.swap_out = 3;
        assert_eq!(e.execute(&mut st, &c).unwrap().output, outputs::INVALID_SWAP);
        assert_eq!(ledger::get_balance(&st, &addr(1), &asset).unwrap(), 500);
    }

    #[test]
    fn body_with_swap_terms_decodes() {
        let mut e = export(Id::digest(b"tix"), Id::digest(b"chain-x"));
        e.swap_in = 50;
        e.asset_out = Id::digest(b"usd");
        e.swap_out = 20;
        e.swap_expiry = 99;
        let mut p = Packer::default();
        e.marshal(&mut p).unwrap();
        let bytes = p.into_bytes();
        let mut u = Unpacker::new(&bytes);
        assert_eq!(ExportAsset::unmarshal(&mut u).unwrap(), e);
        u.finish().unwrap();
    }
}
