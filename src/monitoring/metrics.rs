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

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Metrics errors.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus")]
    Prom,
}

/// Metrics container.
#[derive(Clone)]
pub struct Metrics {
    /// Registry.
    pub registry: Registry,

    /// Executed actions by kind and result.
    pub actions_total: IntCounterVec,
    /// Actions that took effect.
    pub actions_succeeded_total: IntCounter,
    /// Actions that failed terminally.
    pub actions_failed_total: IntCounter,
    /// Compute units charged.
    pub compute_units_total: IntCounter,
    /// Unsigned warp messages emitted by exports.
    pub warp_messages_total: IntCounter,
}

impl Metrics {
    /// Create and register metrics.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let actions_total = IntCounterVec::new(
            Opts::new("warpledger_actions_total", "Executed actions"),
            &["action", "result"],
        )
        .map_err(|_| MetricsError::Prom)?;
        let actions_succeeded_total =
            IntCounter::new("warpledger_actions_succeeded_total", "Successful actions")
                .map_err(|_| MetricsError::Prom)?;
        let actions_failed_total =
            IntCounter::new("warpledger_actions_failed_total", "Failed actions")
                .map_err(|_| MetricsError::Prom)?;
        let compute_units_total =
            IntCounter::new("warpledger_compute_units_total", "Compute units charged")
                .map_err(|_| MetricsError::Prom)?;
        let warp_messages_total =
            IntCounter::new("warpledger_warp_messages_total", "Warp messages emitted")
                .map_err(|_| MetricsError::Prom)?;

        registry
            .register(Box::new(actions_total.clone()))
            .map_err(|_| MetricsError::Prom)?;
        registry
            .register(Box::new(actions_succeeded_total.clone()))
            .map_err(|_| MetricsError::Prom)?;
        registry
            .register(Box::new(actions_failed_total.clone()))
            .map_err(|_| MetricsError::Prom)?;
        registry
            .register(Box::new(compute_units_total.clone()))
            .map_err(|_| MetricsError::Prom)?;
        registry
            .register(Box::new(warp_messages_total.clone()))
            .map_err(|_| MetricsError::Prom)?;

        Ok(Self {
            registry,
            actions_total,
            actions_succeeded_total,
            actions_failed_total,
            compute_units_total,
            warp_messages_total,
        })
    }

    /// Record one executed action.
    pub fn observe(&self, action: &str, success: bool, units: u64, emitted_warp: bool) {
        let result = if success { "success" } else { "failure" };
        self.actions_total.with_label_values(&[action, result]).inc();
        if success {
            self.actions_succeeded_total.inc();
        } else {
            self.actions_failed_total.inc();
        }
        self.compute_units_total.inc_by(units);
        if emitted_warp {
            self.warp_messages_total.inc();
        }
    }

    /// Metric families with at least one sample.
    pub fn families(&self) -> usize {
        self.registry.gather().len()
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> Result<String, MetricsError> {
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buf)
            .map_err(|_| MetricsError::Prom)?;
        String::from_utf8(buf).map_err(|_| MetricsError::Prom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_counts_by_kind_and_result() {
        let m = Metrics::new().unwrap();
        m.observe("transfer", true, 1, false);
        m.observe("transfer", false, 1, false);
        m.observe("export_asset", true, 10, true);
        assert_eq!(m.actions_total.with_label_values(&["transfer", "success"]).get(), 1);
        assert_eq!(m.actions_total.with_label_values(&["transfer", "failure"]).get(), 1);
        assert_eq!(m.actions_succeeded_total.get(), 2);
        assert_eq!(m.compute_units_total.get(), 12);
        assert_eq!(m.warp_messages_total.get(), 1);
        assert!(m.render().unwrap().contains("warpledger_actions_total"));
        assert_eq!(m.families(), 5);
    }

    #[test]
    fn fresh_registry_renders_plain_counters() {
        let m = Metrics::new().unwrap();
        assert_eq!(m.families(), 4);
        let text = m.render().unwrap();
        assert!(text.contains("warpledger_actions_failed_total 0"));
        assert!(!text.contains("warpledger_actions_total{"));
    }
}
