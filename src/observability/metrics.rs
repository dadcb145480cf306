//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_cache_lookups_total` (counter): category cache lookups by result
//! - `relay_cache_entries` (gauge): stored category listings
//! - `relay_upstream_requests_total` (counter): upstream calls by action, outcome
//! - `relay_upstream_duration_seconds` (histogram): upstream latency by action
//!
//! Without an installed recorder every call here is a no-op.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("relay_cache_lookups_total", "result" => result).increment(1);
}

pub fn record_cache_size(entries: usize) {
    gauge!("relay_cache_entries").set(entries as f64);
}

pub fn record_upstream_call(action: &'static str, outcome: &'static str, start: Instant) {
    counter!("relay_upstream_requests_total", "action" => action, "outcome" => outcome)
        .increment(1);
    histogram!("relay_upstream_duration_seconds", "action" => action)
        .record(start.elapsed().as_secs_f64());
}
