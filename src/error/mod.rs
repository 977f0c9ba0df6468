mod app;
mod probe;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use probe::ProbeError;
pub use validation::ValidationError;
