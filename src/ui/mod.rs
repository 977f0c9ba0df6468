//! Interactive dashboard for a probe run.

pub(crate) mod model;
mod render;

pub(crate) use render::lifecycle::run_dashboard;
