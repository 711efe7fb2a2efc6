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

//! Core ledger primitives.

/// State-transition actions.
pub mod actions;
/// Transaction authentication schemes.
pub mod auth;
/// Binary wire codec.
pub mod codec;
/// Node configuration.
pub mod config;
/// Genesis allocations.
pub mod genesis;
/// Read-only query surface.
pub mod query;
/// Type-tag decoder tables.
pub mod registry;
/// Action execution.
pub mod runtime;
/// Ledger state: keys, records, views, persistence.
pub mod state;
/// Identifiers, addresses, resource dimensions.
pub mod types;
/// Cross-chain transfer payloads.
pub mod warp;
