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

//! Warpledger - ledger state model for a token/NFT chain with cross-chain bridging.
//!
//! This repository provides:
//! - Fixed binary record layouts for balances, assets, NFTs, loans and transaction metadata
//! - Overflow/underflow-safe accounting with zero-record deletion
//! - A closed catalog of state-transition actions with validate-then-commit execution
//! - Cross-chain (warp) transfer payloads for asset import/export
//! - Persistent key-value state (sled) with deterministic Merkle roots and proofs
//! - Monitoring via Prometheus counters and structured logging

/// Core ledger primitives (types, codecs, state, actions).
pub mod core;
/// Observability (metrics).
pub mod monitoring;
