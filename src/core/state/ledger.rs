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

//! Typed ledger operations over an injected state view.
//!
//! Balances and loans are accounting cells: never stored as zero, `add`
//! refuses to overflow, `sub` refuses to underflow, and a result of exactly
//! zero deletes the key. Reading a stored zero is corruption.

use crate::core::codec::CodecError;
use crate::core::state::keys;
use crate::core::state::records::{
    decode_amount, encode_amount, AssetRecord, NftRecord, TransactionMeta,
};
use crate::core::state::view::{Immutable, Mutable, StateError};
use crate::core::types::{Address, Id};
use crate::core::warp::WarpMessage;
use thiserror::Error;
use tracing::debug;

/// Ledger errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Backing store fault.
    #[error("state: {0}")]
    State(#[from] StateError),
    /// Stored bytes violate a record layout or invariant.
    #[error("corrupt record {key}: {reason}")]
    Corrupt { key: String, reason: String },
    /// Write-once record already present.
    #[error("record already exists: {key}")]
    Duplicate { key: String },
    /// Sum would exceed u64.
    #[error("could not add {kind} (asset={asset}, current={current}, amount={amount})")]
    Overflow {
        kind: &'static str,
        asset: Id,
        current: u64,
        amount: u64,
    },
    /// Amount exceeds the stored value.
    #[error("could not subtract {kind} (asset={asset}, current={current}, amount={amount})")]
    Underflow {
        kind: &'static str,
        asset: Id,
        current: u64,
        amount: u64,
    },
}

impl LedgerError {
    /// True for errors an action reports as a failed result rather than an abort.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LedgerError::Overflow { .. } | LedgerError::Underflow { .. })
    }

    fn corrupt(key: &[u8], err: impl ToString) -> Self {
        LedgerError::Corrupt {
            key: hex::encode(key),
            reason: err.to_string(),
        }
    }
}

fn decode_cell(key: &[u8], raw: Option<Vec<u8>>) -> Result<Option<u64>, LedgerError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let v = decode_amount(&raw).map_err(|e| LedgerError::corrupt(key, e))?;
    if v == 0 {
        return Err(LedgerError::corrupt(key, "zero amount persisted"));
    }
    Ok(Some(v))
}

fn write_cell<S: Mutable + ?Sized>(state: &mut S, key: &[u8], amount: u64) -> Result<(), LedgerError> {
    if amount == 0 {
        debug!(key = %hex::encode(key), "cell reached zero; removing");
        state.remove(key)?;
    } else {
        state.insert(key, encode_amount(amount))?;
    }
    Ok(())
}

fn add_cell<S: Mutable + ?Sized>(
    state: &mut S,
    key: &[u8],
    kind: &'static str,
    asset: &Id,
    amount: u64,
    create: bool,
) -> Result<(), LedgerError> {
    let current = decode_cell(key, state.get_value(key)?)?;
    if current.is_none() && !create {
        return Ok(());
    }
    let current = current.unwrap_or(0);
    let next = current.checked_add(amount).ok_or(LedgerError::Overflow {
        kind,
        asset: *asset,
        current,
        amount,
    })?;
    write_cell(state, key, next)
}

fn sub_cell<S: Mutable + ?Sized>(
    state: &mut S,
    key: &[u8],
    kind: &'static str,
    asset: &Id,
    amount: u64,
) -> Result<(), LedgerError> {
    let current = decode_cell(key, state.get_value(key)?)?.unwrap_or(0);
    let next = current.checked_sub(amount).ok_or(LedgerError::Underflow {
        kind,
        asset: *asset,
        current,
        amount,
    })?;
    write_cell(state, key, next)
}

/// Balance of `owner` in `asset`; zero when the account does not exist.
pub fn get_balance<S: Immutable + ?Sized>(
    state: &S,
    owner: &Address,
    asset: &Id,
) -> Result<u64, LedgerError> {
    let key = keys::balance_key(owner, asset);
    Ok(decode_cell(&key, state.get_value(&key)?)?.unwrap_or(0))
}

/// Overwrite a balance. Zero deletes the account.
pub fn set_balance<S: Mutable + ?Sized>(
    state: &mut S,
    owner: &Address,
    asset: &Id,
    amount: u64,
) -> Result<(), LedgerError> {
    let key = keys::balance_key(owner, asset);
    write_cell(state, &key, amount)
}

/// Credit `amount`. With `create == false` a missing account is left alone,
/// which is what fee refunds want.
pub fn add_balance<S: Mutable + ?Sized>(
    state: &mut S,
    owner: &Address,
    asset: &Id,
    amount: u64,
    create: bool,
) -> Result<(), LedgerError> {
    let key = keys::balance_key(owner, asset);
    add_cell(state, &key, "balance", asset, amount, create)
}

/// Debit `amount`, deleting the account if it reaches zero.
pub fn sub_balance<S: Mutable + ?Sized>(
    state: &mut S,
    owner: &Address,
    asset: &Id,
    amount: u64,
) -> Result<(), LedgerError> {
    let key = keys::balance_key(owner, asset);
    sub_cell(state, &key, "balance", asset, amount)
}

/// Outstanding amount of `asset` lent to `destination`.
pub fn get_loan<S: Immutable + ?Sized>(
    state: &S,
    asset: &Id,
    destination: &Id,
) -> Result<u64, LedgerError> {
    let key = keys::loan_key(asset, destination);
    Ok(decode_cell(&key, state.get_value(&key)?)?.unwrap_or(0))
}

/// Overwrite a loan. Zero deletes it.
pub fn set_loan<S: Mutable + ?Sized>(
    state: &mut S,
    asset: &Id,
    destination: &Id,
    amount: u64,
) -> Result<(), LedgerError> {
    write_cell(state, &keys::loan_key(asset, destination), amount)
}

/// Increase the loan of `asset` to `destination`.
pub fn add_loan<S: Mutable + ?Sized>(
    state: &mut S,
    asset: &Id,
    destination: &Id,
    amount: u64,
) -> Result<(), LedgerError> {
    add_cell(state, &keys::loan_key(asset, destination), "loan", asset, amount, true)
}

/// Decrease the loan of `asset` to `destination`.
pub fn sub_loan<S: Mutable + ?Sized>(
    state: &mut S,
    asset: &Id,
    destination: &Id,
    amount: u64,
) -> Result<(), LedgerError> {
    sub_cell(state, &keys::loan_key(asset, destination), "loan", asset, amount)
}

/// Asset record, `None` when absent.
pub fn get_asset<S: Immutable + ?Sized>(
    state: &S,
    asset: &Id,
) -> Result<Option<AssetRecord>, LedgerError> {
    let key = keys::asset_key(asset);
    state
        .get_value(&key)?
        .map(|raw| AssetRecord::decode(&raw).map_err(|e| LedgerError::corrupt(&key, e)))
        .transpose()
}

/// Upsert an asset record.
pub fn set_asset<S: Mutable + ?Sized>(
    state: &mut S,
    asset: &Id,
    record: &AssetRecord,
) -> Result<(), LedgerError> {
    let key = keys::asset_key(asset);
    let raw = record.encode().map_err(|e| LedgerError::corrupt(&key, e))?;
    state.insert(&key, raw)?;
    Ok(())
}

/// Remove an asset record.
pub fn delete_asset<S: Mutable + ?Sized>(state: &mut S, asset: &Id) -> Result<(), LedgerError> {
    state.remove(&keys::asset_key(asset))?;
    Ok(())
}

/// NFT record, `None` when absent.
pub fn get_nft<S: Immutable + ?Sized>(state: &S, nft: &Id) -> Result<Option<NftRecord>, LedgerError> {
    let key = keys::nft_key(nft);
    state
        .get_value(&key)?
        .map(|raw| NftRecord::decode(&raw).map_err(|e| LedgerError::corrupt(&key, e)))
        .transpose()
}

/// Upsert an NFT record.
pub fn set_nft<S: Mutable + ?Sized>(
    state: &mut S,
    nft: &Id,
    record: &NftRecord,
) -> Result<(), LedgerError> {
    let key = keys::nft_key(nft);
    let raw = record.encode().map_err(|e| LedgerError::corrupt(&key, e))?;
    state.insert(&key, raw)?;
    Ok(())
}

/// Record execution metadata for `tx_id`. Write-once.
pub fn store_transaction<S: Mutable + ?Sized>(
    metadata: &mut S,
    tx_id: &Id,
    meta: &TransactionMeta,
) -> Result<(), LedgerError> {
    let key = keys::tx_key(tx_id);
    if metadata.get_value(&key)?.is_some() {
        return Err(LedgerError::Duplicate {
            key: hex::encode(&key),
        });
    }
    metadata.insert(&key, meta.encode())?;
    Ok(())
}

/// Execution metadata for `tx_id`, `None` when unknown.
pub fn get_transaction<S: Immutable + ?Sized>(
    metadata: &S,
    tx_id: &Id,
) -> Result<Option<TransactionMeta>, LedgerError> {
    let key = keys::tx_key(tx_id);
    metadata
        .get_value(&key)?
        .map(|raw| TransactionMeta::decode(&raw).map_err(|e| LedgerError::corrupt(&key, e)))
        .transpose()
}

/// True if the warp message was already imported.
pub fn has_incoming_warp<S: Immutable + ?Sized>(
    state: &S,
    source_chain: &Id,
    message_id: &Id,
) -> Result<bool, LedgerError> {
    Ok(state
        .get_value(&keys::incoming_warp_key(source_chain, message_id))?
        .is_some())
}

/// Mark a warp message as imported.
pub fn mark_incoming_warp<S: Mutable + ?Sized>(
    state: &mut S,
    source_chain: &Id,
    message_id: &Id,
) -> Result<(), LedgerError> {
    state.insert(&keys::incoming_warp_key(source_chain, message_id), Vec::new())?;
    Ok(())
}

/// Persist the unsigned warp message emitted by `tx_id`.
pub fn store_outgoing_warp<S: Mutable + ?Sized>(
    state: &mut S,
    tx_id: &Id,
    message: &WarpMessage,
) -> Result<(), LedgerError> {
    let key = keys::outgoing_warp_key(tx_id);
    let raw = message.encode().map_err(|e| LedgerError::corrupt(&key, e))?;
    state.insert(&key, raw)?;
    Ok(())
}

/// Unsigned warp message emitted by `tx_id`, for the external signer.
pub fn get_outgoing_warp<S: Immutable + ?Sized>(
    state: &S,
    tx_id: &Id,
) -> Result<Option<WarpMessage>, LedgerError> {
    let key = keys::outgoing_warp_key(tx_id);
    state
        .get_value(&key)?
        .map(|raw| {
            WarpMessage::decode(&raw).map_err(|e: CodecError| LedgerError::corrupt(&key, e))
        })
        .transpose()
}
