mod dashboard;
mod frame;
pub(crate) mod lifecycle;
mod theme;
