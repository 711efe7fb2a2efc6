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

#![no_main]
#![forbid(unsafe_code)]

use libfuzzer_sys::fuzz_target;
use warpledger::core::state::records::{decode_amount, AssetRecord, NftRecord, TransactionMeta};

fuzz_target!(|data: &[u8]| {
    // Decoders must never panic, and whatever decodes must re-encode to the same bytes.
    if let Ok(r) = AssetRecord::decode(data) {
        assert_eq!(r.encode().expect("decoded record encodes"), data);
    }
    if let Ok(r) = NftRecord::decode(data) {
        assert_eq!(r.encode().expect("decoded record encodes"), data);
    }
    if let Ok(m) = TransactionMeta::decode(data) {
        assert_eq!(m.encode(), data);
    }
    let _ = decode_amount(data);
});
