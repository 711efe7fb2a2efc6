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

use proptest::prelude::*;
use std::collections::BTreeMap;
use warpledger::core::actions::{Action, CreateAsset, ExportAsset, MintAsset, Transfer};
use warpledger::core::genesis::Genesis;
use warpledger::core::runtime::executor::Executor;
use warpledger::core::state::keys;
use warpledger::core::state::ledger;
use warpledger::core::state::records::decode_amount;
use warpledger::core::state::view::MemoryState;
use warpledger::core::types::{Address, Id, ADDRESS_LEN};

#[derive(Clone, Debug)]
enum Op {
    Transfer { from: u8, to: u8, value: u64 },
    Create { actor: u8, max_supply: u64 },
    Mint { actor: u8, asset: usize, to: u8, value: u64 },
    Export { actor: u8, asset: usize, value: u64, reward: u64 },
}

fn actor() -> impl Strategy<Value = u8> {
    1u8..=4
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (actor(), actor(), 0u64..1_500).prop_map(|(from, to, value)| Op::Transfer { from, to, value }),
        (actor(), 1u64..2_000).prop_map(|(actor, max_supply)| Op::Create { actor, max_supply }),
        (actor(), any::<usize>(), actor(), 0u64..800)
            .prop_map(|(actor, asset, to, value)| Op::Mint { actor, asset, to, value }),
        (actor(), any::<usize>(), 0u64..600, 0u64..50)
            .prop_map(|(actor, asset, value, reward)| Op::Export { actor, asset, value, reward }),
    ]
}

fn addr(b: u8) -> Address {
    Address::from_bytes([b; ADDRESS_LEN])
}

fn pick(assets: &[Id], i: usize) -> Id {
    assets[i % assets.len()]
}

fn to_action(op: &Op, assets: &[Id]) -> (u8, Action) {
    match *op {
        Op::Transfer { from, to, value } => (
            from,
            Action::Transfer(Transfer {
                to: addr(to),
                value,
                memo: Vec::new(),
            }),
        ),
        Op::Create { actor, max_supply } => (
            actor,
            Action::CreateAsset(CreateAsset {
                symbol: b"PT".to_vec(),
                decimals: 0,
                metadata: b"prop".to_vec(),
                max_supply,
            }),
        ),
        Op::Mint { actor, asset, to, value } => (
            actor,
            Action::MintAsset(MintAsset {
                to: addr(to),
                asset: pick(assets, asset),
                value,
            }),
        ),
        Op::Export { actor, asset, value, reward } => (
            actor,
            Action::ExportAsset(ExportAsset {
                to: addr(actor),
                asset: pick(assets, asset),
                value,
                return_funds: false,
                reward,
                swap_in: 0,
                asset_out: Id::EMPTY,
                swap_out: 0,
                swap_expiry: 0,
                destination: Id::digest(b"chain-b"),
            }),
        ),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn supply_equals_balances_plus_loans(ops in prop::collection::vec(op(), 1..40)) {
        let exec = Executor::new(Id::digest(b"chain-a"), 1);
        let mut state = MemoryState::new();
        Genesis {
            symbol: "WLG".into(),
            decimals: 9,
            allocations: (1u8..=4).map(|b| (addr(b), 1_000)).collect(),
        }
        .apply(&mut state)
        .unwrap();

        let mut assets = vec![Id::EMPTY];
        for (n, op) in ops.iter().enumerate() {
            let tx = Id::digest(&(n as u64).to_be_bytes());
            let (actor, action) = to_action(op, &assets);
            let ctx = exec.context(addr(actor), tx, 0, false);
            let r = exec.execute(&mut state, &ctx, &action).unwrap();
            if r.outcome.success && matches!(op, Op::Create { .. }) {
                assets.push(tx);
            }
        }

        let mut held: BTreeMap<Id, u64> = BTreeMap::new();
        for (k, v) in state.iter() {
            let amount = if let Some((_, asset)) = keys::parse_balance_key(k) {
                Some((asset, decode_amount(v).unwrap()))
            } else {
                keys::parse_loan_key(k).map(|(asset, _)| (asset, decode_amount(v).unwrap()))
            };
            if let Some((asset, amount)) = amount {
                prop_assert!(amount > 0, "zero amount persisted under {}", hex::encode(k));
                *held.entry(asset).or_default() += amount;
            }
        }

        for asset in &assets {
            let record = ledger::get_asset(&state, asset).unwrap().unwrap();
            prop_assert!(record.supply <= record.max_supply);
            prop_assert_eq!(record.supply, held.get(asset).copied().unwrap_or(0));
        }
    }
}
