/// Counters and latency samples collected by a load test. One sample is
/// recorded per completed request, successful or not.
#[derive(Debug, Clone)]
pub struct LoadStats {
    /// Requests the run was configured to issue.
    pub total: u64,
    /// Requests that produced any HTTP response, error statuses included.
    pub success: u64,
    /// Requests that failed below the HTTP layer.
    pub errors: u64,
    pub latencies_ms: Vec<u64>,
}

/// Latency aggregates for a load test that recorded at least one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySummary {
    /// Integer mean, truncated.
    pub avg_ms: u64,
    /// The sample at 95% of the sorted order, an exact order statistic.
    pub p95_ms: u64,
}

impl LoadStats {
    #[must_use]
    pub const fn new(total: u64) -> Self {
        Self {
            total,
            success: 0,
            errors: 0,
            latencies_ms: Vec::new(),
        }
    }

    pub fn record(&mut self, latency_ms: u64, success: bool) {
        self.latencies_ms.push(latency_ms);
        if success {
            self.success = self.success.saturating_add(1);
        } else {
            self.errors = self.errors.saturating_add(1);
        }
    }

    /// Requests that finished, regardless of outcome.
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.success.saturating_add(self.errors)
    }

    /// Average and p95 latency over the recorded samples, or `None` when the
    /// run recorded none, as a cancelled run may.
    #[must_use]
    pub fn latency_summary(&self) -> Option<LatencySummary> {
        if self.latencies_ms.is_empty() {
            return None;
        }

        let mut sorted = self.latencies_ms.clone();
        sorted.sort_unstable();

        let sum = sorted
            .iter()
            .fold(0u128, |acc, ms| acc.saturating_add(u128::from(*ms)));
        let avg_ms = sum
            .checked_div(sorted.len() as u128)
            .and_then(|avg| u64::try_from(avg).ok())
            .unwrap_or(u64::MAX);

        let index = sorted
            .len()
            .saturating_mul(95)
            .checked_div(100)
            .unwrap_or(0);
        let p95_ms = sorted.get(index).copied().unwrap_or(u64::MAX);

        Some(LatencySummary { avg_ms, p95_ms })
    }
}
