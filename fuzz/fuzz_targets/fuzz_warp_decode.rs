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
use warpledger::core::registry::Registry;
use warpledger::core::warp::{WarpMessage, WarpTransfer};

fuzz_target!(|data: &[u8]| {
    if let Ok(t) = WarpTransfer::decode(data) {
        assert_eq!(t.encode().expect("decoded transfer encodes"), data);
    }
    let registry = Registry::new();
    if let Ok(m) = WarpMessage::decode(data) {
        let _ = m.id();
        let _ = WarpTransfer::decode(&m.payload);
        let _ = registry.decode_action(&[5, 0], Some(&m));
    }
    let _ = registry.decode_action(data, None);
    let _ = registry.decode_auth(data);
});
