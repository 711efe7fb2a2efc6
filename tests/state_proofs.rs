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

use warpledger::core::state::keys;
use warpledger::core::state::ledger;
use warpledger::core::state::persistent_state::PersistentState;
use warpledger::core::state::records::encode_amount;
use warpledger::core::types::{Address, Id, ADDRESS_LEN};

#[test]
fn balance_is_provable_against_state_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut st = PersistentState::open(dir.path().to_str().unwrap()).unwrap();

    let owners: Vec<Address> = (1u8..=3)
        .map(|b| Address::from_bytes([b; ADDRESS_LEN]))
        .collect();
    for (i, owner) in owners.iter().enumerate() {
        ledger::set_balance(&mut st, owner, &Id::EMPTY, 10 * (i as u64 + 1)).unwrap();
    }

    let root = st.state_root().unwrap();
    let key = keys::balance_key(&owners[1], &Id::EMPTY);
    let (k, v, root2, proof) = st.prove_key(&key).unwrap().unwrap();
    assert_eq!(root, root2);
    assert_eq!(k, key.to_vec());
    assert_eq!(v, encode_amount(20));
    assert!(PersistentState::verify_proof(root, &proof));

    ledger::set_balance(&mut st, &owners[0], &Id::EMPTY, 11).unwrap();
    assert_ne!(st.state_root().unwrap(), root);
    assert!(!PersistentState::verify_proof(st.state_root().unwrap(), &proof));
}

#[test]
fn zeroed_balance_has_no_proof() {
    let dir = tempfile::tempdir().unwrap();
    let mut st = PersistentState::open(dir.path().to_str().unwrap()).unwrap();
    let owner = Address::from_bytes([7u8; ADDRESS_LEN]);
    ledger::set_balance(&mut st, &owner, &Id::EMPTY, 5).unwrap();
    ledger::sub_balance(&mut st, &owner, &Id::EMPTY, 5).unwrap();
    assert!(st
        .prove_key(&keys::balance_key(&owner, &Id::EMPTY))
        .unwrap()
        .is_none());
    assert_eq!(st.state_root().unwrap(), [0u8; 32]);
}
