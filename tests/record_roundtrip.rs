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
use warpledger::core::state::records::{AssetRecord, NftRecord, TransactionMeta};
use warpledger::core::types::{Address, Dimensions, Id};
use warpledger::core::warp::{WarpMessage, WarpTransfer};

fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 32]>().prop_map(Address::from_bytes)
}

fn id() -> impl Strategy<Value = Id> {
    any::<[u8; 32]>().prop_map(Id::from_bytes)
}

fn nonzero_id() -> impl Strategy<Value = Id> {
    id().prop_filter("non-empty id", |i| !i.is_empty())
}

fn asset() -> impl Strategy<Value = AssetRecord> {
    (
        prop::collection::vec(any::<u8>(), 1..=8),
        0u8..=9,
        prop::collection::vec(any::<u8>(), 0..256),
        any::<u64>(),
        any::<u64>(),
        address(),
        any::<bool>(),
    )
        .prop_map(|(symbol, decimals, metadata, supply, max_supply, owner, warp)| AssetRecord {
            symbol,
            decimals,
            metadata,
            supply,
            max_supply,
            owner,
            warp,
        })
}

fn swap() -> impl Strategy<Value = (u64, u64, u64, Id, u64, i64)> {
    (1u64..u64::MAX / 2, any::<bool>()).prop_flat_map(|(value, with_swap)| {
        if with_swap {
            (Just(value), 0..=value / 2, 1..=value, nonzero_id(), 1u64..1_000, 0i64..i64::MAX)
                .prop_map(|(v, reward, swap_in, out, swap_out, expiry)| {
                    (v, reward, swap_in, out, swap_out, expiry)
                })
                .boxed()
        } else {
            (Just(value), 0..=value / 2)
                .prop_map(|(v, reward)| (v, reward, 0, Id::EMPTY, 0, 0))
                .boxed()
        }
    })
}

proptest! {
    #[test]
    fn asset_record_roundtrips(record in asset()) {
        let bytes = record.encode().unwrap();
        prop_assert_eq!(AssetRecord::decode(&bytes).unwrap(), record);
        prop_assert!(AssetRecord::decode(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn nft_record_roundtrips(
        metadata in prop::collection::vec(any::<u8>(), 1..256),
        owner in address(),
        url in prop::collection::vec(any::<u8>(), 0..1000),
    ) {
        let record = NftRecord { metadata, owner, url };
        let mut bytes = record.encode().unwrap();
        prop_assert_eq!(NftRecord::decode(&bytes).unwrap(), record);
        bytes.push(0);
        prop_assert!(NftRecord::decode(&bytes).is_err());
    }

    #[test]
    fn transaction_meta_roundtrips(
        timestamp in any::<i64>(),
        success in any::<bool>(),
        units in any::<[u64; 5]>(),
        fee in any::<u64>(),
    ) {
        let meta = TransactionMeta { timestamp, success, units: Dimensions(units), fee };
        let bytes = meta.encode();
        prop_assert_eq!(bytes.len(), TransactionMeta::LEN);
        prop_assert_eq!(TransactionMeta::decode(&bytes).unwrap(), meta);
    }

    #[test]
    fn warp_transfer_roundtrips_inside_a_message(
        to in address(),
        symbol in prop::collection::vec(any::<u8>(), 1..=8),
        decimals in 0u8..=9,
        asset in id(),
        (value, reward, swap_in, asset_out, swap_out, swap_expiry) in swap(),
        return_funds in any::<bool>(),
        tx_id in nonzero_id(),
        destination in nonzero_id(),
        network_id in any::<u32>(),
        source in id(),
    ) {
        let transfer = WarpTransfer {
            to,
            symbol,
            decimals,
            asset,
            value,
            return_funds,
            reward,
            swap_in,
            asset_out,
            swap_out,
            swap_expiry,
            tx_id,
            destination_chain_id: destination,
        };
        let message = WarpMessage {
            network_id,
            source_chain_id: source,
            payload: transfer.encode().unwrap(),
        };
        let decoded = WarpMessage::decode(&message.encode().unwrap()).unwrap();
        prop_assert_eq!(decoded.id().unwrap(), message.id().unwrap());
        prop_assert_eq!(WarpTransfer::decode(&decoded.payload).unwrap(), transfer);
    }
}
