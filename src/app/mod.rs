//! Non-interactive run orchestration and result rendering.

mod client;
mod export;
mod runner;
pub(crate) mod summary;

pub(crate) use client::build_client;
pub(crate) use runner::{probe_config, run};
