//! Metrics collection and exposition.
//!
//! # Metrics
//! - `saferoute_provider_requests_total` (counter): external calls by provider, outcome
//! - `saferoute_provider_duration_seconds` (histogram): external call latency
//! - `saferoute_geocode_cache_total` (counter): cache lookups by result (hit/miss)
//! - `saferoute_routes_total` (counter): planned routes by kind (direct/detour/provider)
//! - `saferoute_beacons_total` (counter): submitted beacons by persistence outcome
//! - `saferoute_hazard_version` (gauge): latest hazard store version

use std::net::SocketAddr;
use std::time::Instant;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_provider_call(provider: &'static str, outcome: &'static str, start: Instant) {
    counter!("saferoute_provider_requests_total", "provider" => provider, "outcome" => outcome)
        .increment(1);
    histogram!("saferoute_provider_duration_seconds", "provider" => provider)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("saferoute_geocode_cache_total", "result" => result).increment(1);
}

pub fn record_route(kind: &'static str) {
    counter!("saferoute_routes_total", "kind" => kind).increment(1);
}

pub fn record_beacon(persisted: bool) {
    let persisted = if persisted { "true" } else { "false" };
    counter!("saferoute_beacons_total", "persisted" => persisted).increment(1);
}

pub fn set_hazard_version(version: u64) {
    gauge!("saferoute_hazard_version").set(version as f64);
}
