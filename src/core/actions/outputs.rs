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

pub const VALUE_ZERO: &[u8] = b"value is zero";
pub const MEMO_TOO_LARGE: &[u8] = b"memo is too large";
pub const ASSET_IS_NATIVE: &[u8] = b"cannot mint native asset";
pub const ASSET_MISSING: &[u8] = b"asset missing";
pub const WARP_ASSET: &[u8] = b"warp asset";
pub const WRONG_OWNER: &[u8] = b"wrong owner";

pub const SYMBOL_EMPTY: &[u8] = b"symbol is empty";
pub const SYMBOL_INCORRECT: &[u8] = b"symbol is incorrect";
pub const SYMBOL_TOO_LARGE: &[u8] = b"symbol is too large";
pub const DECIMALS_INCORRECT: &[u8] = b"decimal is incorrect";
pub const DECIMALS_TOO_LARGE: &[u8] = b"decimal is too large";
pub const METADATA_EMPTY: &[u8] = b"metadata is empty";
pub const METADATA_TOO_LARGE: &[u8] = b"metadata is too large";
pub const URL_EMPTY: &[u8] = b"url is empty";
pub const URL_TOO_LARGE: &[u8] = b"url is too large";
pub const CONFLICTING_ASSET: &[u8] = b"warp has same asset as another";
pub const MAX_SUPPLY_TOO_LARGE: &[u8] = b"max supply is too large";
pub const MAX_SUPPLY_EXCEEDED: &[u8] = b"max supply exceeded";

pub const WARP_VERIFICATION_FAILED: &[u8] = b"warp verification failed";
pub const WARP_ALREADY_IMPORTED: &[u8] = b"warp message already imported";
pub const INVALID_DESTINATION: &[u8] = b"invalid destination";
pub const MUST_FILL: &[u8] = b"must fill request";
pub const NO_SWAP_TO_FILL: &[u8] = b"no swap to fill";
pub const INVALID_SWAP: &[u8] = b"invalid swap params";
pub const ANYCAST: &[u8] = b"anycast output";
pub const NOT_WARP_ASSET: &[u8] = b"not warp asset";
pub const WRONG_DESTINATION: &[u8] = b"wrong destination";

pub const NFT_ID_EMPTY: &[u8] = b"nft id is empty";
pub const NFT_NOT_FOUND: &[u8] = b"NFT not found";
pub const NOT_NFT_OWNER: &[u8] = b"not owner of NFT";
pub const TOTAL_OVERFLOW: &[u8] = b"value plus reward overflows";
