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

//! Warpledger node entrypoint.
//! Opens the ledger state, applies genesis on first start and reports the state root.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};
use warpledger::core::config::LedgerConfig;
use warpledger::core::runtime::executor::Executor;
use warpledger::core::state::persistent_state::PersistentState;
use warpledger::monitoring::metrics::Metrics;

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt().with_target(false).with_level(true);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}

fn main() -> Result<()> {
    let path = env("WARPLEDGER_CONFIG", "warpledger.toml");
    let cfg = LedgerConfig::load(&path).with_context(|| format!("config {path}"))?;
    init_tracing(cfg.node.log_json);

    info!(
        node = %cfg.node.name,
        version = env!("CARGO_PKG_VERSION"),
        git = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        rustc = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown"),
        "warpledger starting"
    );

    let chain_id = cfg.chain_id()?;
    let metrics = Arc::new(Metrics::new()?);
    let executor = Executor::new(chain_id, cfg.chain.network_id).with_metrics(metrics.clone());

    let mut state = PersistentState::open(&cfg.node.data_dir)
        .with_context(|| format!("open state at {}", cfg.node.data_dir))?;
    if state.is_empty() {
        let supply = cfg.genesis()?.apply(&mut state)?;
        state.flush()?;
        info!(supply, "fresh state initialised");
    } else if !cfg.genesis.allocations.is_empty() {
        warn!("state already initialised; ignoring genesis allocations");
    }

    let root = state.state_root()?;
    info!(
        chain = %executor.chain_id(),
        network = cfg.chain.network_id,
        data_dir = %cfg.node.data_dir,
        state_root = %hex::encode(root),
        "ledger ready"
    );

    info!(families = metrics.families(), "metrics registered");
    debug!(exposition = %metrics.render()?, "metrics snapshot");
    Ok(())
}
