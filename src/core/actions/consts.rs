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
#![allow(missing_docs)]

// Type ids are part of the wire format.
pub const TRANSFER_ID: u8 = 0;
pub const MINT_ASSET_ID: u8 = 1;
pub const CREATE_ASSET_ID: u8 = 2;
pub const CREATE_NFT_ID: u8 = 3;
pub const GET_NFT_ID: u8 = 4;
pub const IMPORT_ASSET_ID: u8 = 5;
pub const EXPORT_ASSET_ID: u8 = 6;
pub const TRANSFER_NFT_ID: u8 = 7;

pub const TRANSFER_COMPUTE_UNITS: u64 = 1;
pub const TRANSFER_NFT_COMPUTE_UNITS: u64 = 1;
pub const MINT_ASSET_COMPUTE_UNITS: u64 = 2;
pub const CREATE_NFT_COMPUTE_UNITS: u64 = 10;
pub const GET_NFT_COMPUTE_UNITS: u64 = 10;
pub const CREATE_ASSET_COMPUTE_UNITS: u64 = 10;
pub const IMPORT_ASSET_COMPUTE_UNITS: u64 = 10;
pub const EXPORT_ASSET_COMPUTE_UNITS: u64 = 10;

pub const MAX_SYMBOL_SIZE: usize = 8;
pub const MAX_MEMO_SIZE: usize = 256;
pub const MAX_METADATA_SIZE: usize = 256;
pub const MAX_DECIMALS: u8 = 9;
pub const MAX_NFT_URL_SIZE: usize = 1000;

/// Protocol cap on `max_supply`. Kept within i64 so supplies survive signed consumers.
pub const MAX_SUPPLY: u64 = i64::MAX as u64;
