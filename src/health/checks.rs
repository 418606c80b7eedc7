use super::models::HealthStatus;
use super::probe::Probe;
use super::readiness::ReadinessState;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// A single health evaluation.
///
/// Implementations must not fail: anything that goes wrong while checking is
/// reported as [`HealthStatus::Unhealthy`].
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check(&self) -> HealthStatus;
}

/// The process is up and scheduling work.
#[derive(Debug, Default, Clone, Copy)]
pub struct LivenessCheck;

#[async_trait]
impl HealthCheck for LivenessCheck {
    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}

/// Mirrors the shared [`ReadinessState`] at the moment of evaluation.
#[derive(Debug, Clone)]
pub struct ReadinessCheck {
    state: ReadinessState,
}

impl ReadinessCheck {
    pub fn new(state: ReadinessState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl HealthCheck for ReadinessCheck {
    async fn check(&self) -> HealthStatus {
        if self.state.is_ready() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }
}

/// Reachability of a critical external dependency.
pub struct DependencyCheck<P> {
    dependency: String,
    probe: P,
    timeout: Duration,
}

impl<P: Probe> DependencyCheck<P> {
    pub fn new(dependency: impl Into<String>, probe: P, timeout: Duration) -> Self {
        Self {
            dependency: dependency.into(),
            probe,
            timeout,
        }
    }
}

#[async_trait]
impl<P: Probe> HealthCheck for DependencyCheck<P> {
    #[tracing::instrument(name = "Check dependency health", skip(self), fields(dependency = %self.dependency))]
    async fn check(&self) -> HealthStatus {
        let start = Instant::now();

        match timeout(self.timeout, self.probe.can_connect()).await {
            Ok(Ok(true)) => {
                tracing::debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Dependency reachable"
                );
                HealthStatus::Healthy
            }
            Ok(Ok(false)) => {
                tracing::warn!("Dependency refused the health probe");
                HealthStatus::Unhealthy
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Unable to reach {}!", self.dependency);
                HealthStatus::Unhealthy
            }
            Err(_) => {
                tracing::error!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Unable to reach {}: probe timed out",
                    self.dependency
                );
                HealthStatus::Unhealthy
            }
        }
    }
}
