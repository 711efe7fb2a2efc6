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

//! Supply conservation on two chains exchanging native assets both ways.

use proptest::prelude::*;
use std::collections::BTreeMap;
use warpledger::core::actions::{Action, ExportAsset, ImportAsset};
use warpledger::core::genesis::Genesis;
use warpledger::core::runtime::executor::Executor;
use warpledger::core::state::keys;
use warpledger::core::state::ledger;
use warpledger::core::state::records::decode_amount;
use warpledger::core::state::view::MemoryState;
use warpledger::core::types::{Address, Id, ADDRESS_LEN};
use warpledger::core::warp::{imported_asset_id, WarpMessage};

#[derive(Clone, Debug)]
enum Op {
    /// Lock native funds and send them to the other chain.
    Lend { side: usize, actor: u8, to: u8, value: u64, reward: u64 },
    /// Burn the other chain's bridged native asset and send it home.
    Return { side: usize, actor: u8, to: u8, value: u64, reward: u64 },
    /// Import a pending message on its destination.
    Relay { pick: usize, relayer: u8 },
}

struct Side {
    exec: Executor,
    state: MemoryState,
    nonce: u64,
}

impl Side {
    fn new(name: &[u8]) -> Self {
        let mut state = MemoryState::new();
        Genesis {
            symbol: "WLG".into(),
            decimals: 9,
            allocations: (1u8..=3).map(|b| (addr(b), 1_000)).collect(),
        }
        .apply(&mut state)
        .unwrap();
        Self {
            exec: Executor::new(Id::digest(name), 1),
            state,
            nonce: 0,
        }
    }

    fn run(&mut self, actor: u8, action: &Action, verified: bool) -> Option<WarpMessage> {
        self.nonce += 1;
        let mut seed = self.exec.chain_id().as_bytes().to_vec();
        seed.extend_from_slice(&self.nonce.to_be_bytes());
        let ctx = self.exec.context(addr(actor), Id::digest(&seed), 0, verified);
        let r = self.exec.execute(&mut self.state, &ctx, action).unwrap();
        r.outcome.warp_message
    }
}

fn addr(b: u8) -> Address {
    Address::from_bytes([b; ADDRESS_LEN])
}

fn actor() -> impl Strategy<Value = u8> {
    1u8..=4
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..2, actor(), actor(), 0u64..400, 0u64..20).prop_map(
            |(side, actor, to, value, reward)| Op::Lend { side, actor, to, value, reward }
        ),
        (0usize..2, actor(), actor(), 0u64..300, 0u64..10).prop_map(
            |(side, actor, to, value, reward)| Op::Return { side, actor, to, value, reward }
        ),
        (any::<usize>(), actor()).prop_map(|(pick, relayer)| Op::Relay { pick, relayer }),
        (any::<usize>(), actor()).prop_map(|(pick, relayer)| Op::Relay { pick, relayer }),
    ]
}

fn export(to: u8, asset: Id, value: u64, reward: u64, return_funds: bool, dest: Id) -> Action {
    Action::ExportAsset(ExportAsset {
        to: addr(to),
        asset,
        value,
        return_funds,
        reward,
        swap_in: 0,
        asset_out: Id::EMPTY,
        swap_out: 0,
        swap_expiry: 0,
        destination: dest,
    })
}

/// Checks supply == balances + loans for `assets` on one chain and returns
/// the supply of each (zero for a deleted record).
fn conserved(state: &MemoryState, assets: &[Id]) -> Result<Vec<u64>, TestCaseError> {
    let mut held: BTreeMap<Id, u64> = BTreeMap::new();
    for (k, v) in state.iter() {
        let cell = if let Some((_, asset)) = keys::parse_balance_key(k) {
            Some(asset)
        } else {
            keys::parse_loan_key(k).map(|(asset, _)| asset)
        };
        if let Some(asset) = cell {
            let amount = decode_amount(v).unwrap();
            prop_assert!(amount > 0, "zero amount persisted under {}", hex::encode(k));
            *held.entry(asset).or_default() += amount;
        }
    }

    let mut supplies = Vec::new();
    for asset in assets {
        let held = held.get(asset).copied().unwrap_or(0);
        match ledger::get_asset(state, asset).unwrap() {
            Some(record) => {
                prop_assert!(record.supply > 0 || asset.is_empty());
                prop_assert_eq!(record.supply, held);
                supplies.push(record.supply);
            }
            None => {
                prop_assert_eq!(held, 0);
                supplies.push(0);
            }
        }
    }
    Ok(supplies)
}

fn relay(sides: &mut [Side; 2], ids: &[Id; 2], message: &WarpMessage, relayer: u8) {
    let dest = usize::from(message.source_chain_id == ids[0]);
    let action = Action::ImportAsset(ImportAsset::new(message.clone(), false).unwrap());
    sides[dest].run(relayer, &action, true);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bridged_supply_is_conserved_on_both_chains(ops in prop::collection::vec(op(), 1..60)) {
        let mut sides = [Side::new(b"chain-a"), Side::new(b"chain-b")];
        let ids = [sides[0].exec.chain_id(), sides[1].exec.chain_id()];
        // wrapped[i]: the other chain's native asset as bridged onto side i.
        let wrapped = [
            imported_asset_id(&Id::EMPTY, &ids[1]),
            imported_asset_id(&Id::EMPTY, &ids[0]),
        ];
        let mut pending: Vec<WarpMessage> = Vec::new();

        for op in &ops {
            match *op {
                Op::Lend { side, actor, to, value, reward } => {
                    let action = export(to, Id::EMPTY, value, reward, false, ids[1 - side]);
                    pending.extend(sides[side].run(actor, &action, false));
                }
                Op::Return { side, actor, to, value, reward } => {
                    let action = export(to, wrapped[side], value, reward, true, ids[1 - side]);
                    pending.extend(sides[side].run(actor, &action, false));
                }
                Op::Relay { pick, relayer } => {
                    if !pending.is_empty() {
                        let message = pending[pick % pending.len()].clone();
                        relay(&mut sides, &ids, &message, relayer);
                    }
                }
            }
            for side in 0..2 {
                conserved(&sides[side].state, &[Id::EMPTY, wrapped[side]])?;
            }
        }

        // Deliver everything still in flight; replays are rejected.
        for message in pending.clone() {
            relay(&mut sides, &ids, &message, 4);
        }
        let a = conserved(&sides[0].state, &[Id::EMPTY, wrapped[0]])?;
        let b = conserved(&sides[1].state, &[Id::EMPTY, wrapped[1]])?;

        // Each chain's outstanding loan is backed by bridged supply on the other.
        prop_assert_eq!(ledger::get_loan(&sides[0].state, &Id::EMPTY, &ids[1]).unwrap(), b[1]);
        prop_assert_eq!(ledger::get_loan(&sides[1].state, &Id::EMPTY, &ids[0]).unwrap(), a[1]);
        prop_assert_eq!(a[0], 3_000);
        prop_assert_eq!(b[0], 3_000);
    }
}
