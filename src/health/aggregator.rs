use super::models::{AggregateReport, HealthStatus};
use super::registry::{HealthRegistry, NamedCheck};
use futures::future::join_all;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::time::timeout;

pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs a predicate-selected subset of a registry and folds the results.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    check_timeout: Duration,
}

impl Aggregator {
    pub fn new(check_timeout: Duration) -> Self {
        Self { check_timeout }
    }

    /// Evaluates every check whose name satisfies `predicate`.
    ///
    /// Checks run concurrently; the report lists them in registry order. A
    /// selection of zero checks is reported as healthy.
    pub async fn run<P>(&self, registry: &HealthRegistry, predicate: P) -> AggregateReport
    where
        P: Fn(&str) -> bool,
    {
        let selected: Vec<&NamedCheck> = registry.all().filter(|c| predicate(&c.name)).collect();
        let statuses = join_all(selected.iter().map(|c| self.evaluate(c))).await;

        let mut report = AggregateReport::new();
        for (named, status) in selected.into_iter().zip(statuses) {
            report.add_check(named.name.clone(), status);
        }
        report
    }

    async fn evaluate(&self, named: &NamedCheck) -> HealthStatus {
        let guarded = AssertUnwindSafe(named.check.check()).catch_unwind();

        match timeout(self.check_timeout, guarded).await {
            Ok(Ok(status)) => status,
            Ok(Err(_)) => {
                tracing::error!(check = %named.name, "Health check panicked");
                HealthStatus::Unhealthy
            }
            Err(_) => {
                tracing::error!(
                    check = %named.name,
                    timeout_ms = self.check_timeout.as_millis() as u64,
                    "Health check timed out"
                );
                HealthStatus::Unhealthy
            }
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_CHECK_TIMEOUT)
    }
}
