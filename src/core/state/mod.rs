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

//! Ledger state.

/// Key encoder and key-buffer pool.
pub mod keys;
/// Typed ledger operations.
pub mod ledger;
/// Deterministic Merkle tree.
pub mod merkle;
/// sled-backed state.
pub mod persistent_state;
/// Record codecs.
pub mod records;
/// State view capabilities.
pub mod view;
