//! Layered target probing: DNS, TCP, TLS and HTTP checks run concurrently,
//! plus an optional bounded-concurrency load test against the same target.

mod context;
mod dns;
mod http;
mod load;
mod retry;
mod runner;
mod stats;
mod tcp;
mod tls;
mod types;

#[cfg(test)]
mod tests;

pub use context::{CancelHandle, run_context};
pub use load::run_load_test;
pub use runner::run_layer_probes;
pub use stats::{LatencySummary, LoadStats};
pub use types::{Layer, LayerReport, ProbeConfig, Target};
