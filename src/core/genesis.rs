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

//! Genesis allocations of the native asset.
//!
//! Genesis writes the native asset record under [`Id::EMPTY`] with supply equal
//! to the sum of allocations, then one balance per non-zero allocation. The
//! whole set is staged and applied as one batch.

use crate::core::actions::consts::{MAX_DECIMALS, MAX_SUPPLY, MAX_SYMBOL_SIZE};
use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::records::AssetRecord;
use crate::core::state::view::{Mutable, Overlay};
use crate::core::types::{Address, Id};
use thiserror::Error;
use tracing::info;

/// Genesis errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),
    #[error("native asset already present")]
    AlreadyApplied,
    #[error("invalid native symbol")]
    Symbol,
    #[error("native decimals too large")]
    Decimals,
    #[error("allocations exceed max supply")]
    Supply,
}

/// Initial native-asset distribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genesis {
    /// Native asset symbol.
    pub symbol: String,
    /// Native asset decimals.
    pub decimals: u8,
    /// (owner, balance) pairs. Zero balances are skipped.
    pub allocations: Vec<(Address, u64)>,
}

impl Genesis {
    /// Total allocated native supply.
    pub fn supply(&self) -> Result<u64, GenesisError> {
        self.allocations
            .iter()
            .try_fold(0u64, |acc, (_, v)| acc.checked_add(*v))
            .filter(|s| *s <= MAX_SUPPLY)
            .ok_or(GenesisError::Supply)
    }

    /// Write genesis into an empty state. Returns the native supply.
    pub fn apply<S: Mutable + ?Sized>(&self, state: &mut S) -> Result<u64, GenesisError> {
        if self.symbol.is_empty() || self.symbol.len() > MAX_SYMBOL_SIZE {
            return Err(GenesisError::Symbol);
        }
        if self.decimals > MAX_DECIMALS {
            return Err(GenesisError::Decimals);
        }
        if ledger::get_asset(&*state, &Id::EMPTY)?.is_some() {
            return Err(GenesisError::AlreadyApplied);
        }
        let supply = self.supply()?;

        let mut overlay = Overlay::new(&*state);
        ledger::set_asset(
            &mut overlay,
            &Id::EMPTY,
            &AssetRecord {
                symbol: self.symbol.as_bytes().to_vec(),
                decimals: self.decimals,
                metadata: self.symbol.as_bytes().to_vec(),
                supply,
                max_supply: MAX_SUPPLY,
                owner: Address::EMPTY,
                warp: false,
            },
        )?;
        let mut accounts = 0usize;
        for (owner, balance) in self.allocations.iter().filter(|(_, b)| *b > 0) {
            ledger::add_balance(&mut overlay, owner, &Id::EMPTY, *balance, true)?;
            accounts += 1;
        }
        let ops = overlay.into_ops();
        state.apply(ops).map_err(LedgerError::from)?;

        info!(symbol = %self.symbol, supply, accounts, "genesis applied");
        Ok(supply)
    }
}
