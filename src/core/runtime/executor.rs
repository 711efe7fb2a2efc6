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

//! Validate-then-commit action executor.
//!
//! Each action runs against an [`Overlay`] over the caller's state. Staged
//! writes reach the state in one `apply` call, and only when the action
//! succeeded. Failed actions and aborted executions leave the state untouched.
//! Recorded executions commit state and metadata through a [`Journal`].

use crate::core::actions::{Action, ExecutionContext, Outcome};
use crate::core::codec::CodecError;
use crate::core::state::keys;
use crate::core::state::ledger::{self, LedgerError};
use crate::core::state::records::TransactionMeta;
use crate::core::state::view::{Immutable, Journal, KvOp, Mutable, Overlay, StateError};
use crate::core::types::{Address, Dimensions, Id};
use crate::monitoring::metrics::Metrics;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Execution error.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),
    #[error("codec: {0}")]
    Codec(#[from] CodecError),
    #[error("state: {0}")]
    State(#[from] StateError),
}

/// Outcome plus the resources the execution consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Action result.
    pub outcome: Outcome,
    /// bandwidth, compute, reads, allocates, writes.
    pub units: Dimensions,
}

/// Action executor bound to one chain.
#[derive(Clone)]
pub struct Executor {
    chain_id: Id,
    network_id: u32,
    metrics: Option<Arc<Metrics>>,
}

impl Executor {
    /// Executor for `chain_id` on `network_id`.
    pub fn new(chain_id: Id, network_id: u32) -> Self {
        Self {
            chain_id,
            network_id,
            metrics: None,
        }
    }

    /// Count executions in `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Local chain id.
    pub fn chain_id(&self) -> Id {
        self.chain_id
    }

    /// Context for one transaction on this chain.
    pub fn context(
        &self,
        actor: Address,
        tx_id: Id,
        timestamp: i64,
        warp_verified: bool,
    ) -> ExecutionContext {
        ExecutionContext {
            actor,
            tx_id,
            timestamp,
            chain_id: self.chain_id,
            network_id: self.network_id,
            warp_verified,
        }
    }

    /// Run `action` and commit its writes if it succeeded.
    pub fn execute<S: Mutable + ?Sized>(
        &self,
        state: &mut S,
        ctx: &ExecutionContext,
        action: &Action,
    ) -> Result<Receipt, ExecError> {
        let (receipt, ops) = self.stage(&*state, ctx, action)?;
        if !ops.is_empty() {
            state.apply(ops)?;
        }
        self.report(ctx, action, &receipt);
        Ok(receipt)
    }

    /// Execute and record [`TransactionMeta`] for `ctx.tx_id`.
    ///
    /// `auth_units` is added to the compute dimension. The state writes and
    /// the metadata record go out in one [`Journal::commit`]. A tx id that
    /// already has metadata is rejected before the action runs.
    pub fn execute_and_record<J: Journal + ?Sized>(
        &self,
        journal: &mut J,
        ctx: &ExecutionContext,
        action: &Action,
        auth_units: u64,
        fee: u64,
    ) -> Result<Receipt, ExecError> {
        if ledger::get_transaction(journal.metadata_view(), &ctx.tx_id)?.is_some() {
            return Err(LedgerError::Duplicate {
                key: hex::encode(keys::tx_key(&ctx.tx_id)),
            }
            .into());
        }

        let (mut receipt, ops) = self.stage(journal.state_view(), ctx, action)?;
        let compute = &mut receipt.units.0[Dimensions::COMPUTE];
        *compute = compute.saturating_add(auth_units);
        let meta = TransactionMeta {
            timestamp: ctx.timestamp,
            success: receipt.outcome.success,
            units: receipt.units,
            fee,
        };
        let mut staged = Overlay::new(journal.metadata_view());
        ledger::store_transaction(&mut staged, &ctx.tx_id, &meta)?;
        let meta_ops = staged.into_ops();

        journal.commit(ops, meta_ops)?;
        self.report(ctx, action, &receipt);
        Ok(receipt)
    }

    /// Run `action` on an overlay of `state`. Ops are empty unless it succeeded.
    fn stage<S: Immutable + ?Sized>(
        &self,
        state: &S,
        ctx: &ExecutionContext,
        action: &Action,
    ) -> Result<(Receipt, Vec<KvOp>), ExecError> {
        let bandwidth = action.to_bytes()?.len() as u64;

        let mut overlay = Overlay::new(state);
        let outcome = action.execute(&mut overlay, ctx)?;
        let reads = overlay.read_count();
        let (allocates, writes, ops) = if outcome.success {
            (
                overlay.allocate_count(),
                overlay.write_count(),
                overlay.into_ops(),
            )
        } else {
            (0, 0, Vec::new())
        };

        let mut units = Dimensions::default();
        units.0[Dimensions::BANDWIDTH] = bandwidth;
        units.0[Dimensions::COMPUTE] = outcome.units;
        units.0[Dimensions::STORAGE_READ] = reads;
        units.0[Dimensions::STORAGE_ALLOCATE] = allocates;
        units.0[Dimensions::STORAGE_WRITE] = writes;
        Ok((Receipt { outcome, units }, ops))
    }

    fn report(&self, ctx: &ExecutionContext, action: &Action, receipt: &Receipt) {
        let outcome = &receipt.outcome;
        if outcome.success {
            info!(
                action = action.name(),
                tx = %ctx.tx_id,
                actor = %ctx.actor,
                writes = receipt.units.0[Dimensions::STORAGE_WRITE],
                "action applied"
            );
        } else {
            debug!(
                action = action.name(),
                tx = %ctx.tx_id,
                reason = %String::from_utf8_lossy(&outcome.output),
                "action failed"
            );
        }

        if let Some(m) = &self.metrics {
            m.observe(
                action.name(),
                outcome.success,
                outcome.units,
                outcome.warp_message.is_some(),
            );
        }
    }
}
