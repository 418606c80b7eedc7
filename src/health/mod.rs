mod aggregator;
mod checks;
mod models;
mod probe;
mod readiness;
mod registry;

pub use aggregator::{Aggregator, DEFAULT_CHECK_TIMEOUT};
pub use checks::{DependencyCheck, HealthCheck, LivenessCheck, ReadinessCheck};
pub use models::{AggregateReport, CheckEntry, HealthStatus};
pub use probe::{HttpProbe, PgProbe, Probe, ProbeError};
pub use readiness::ReadinessState;
pub use registry::{HealthRegistry, NamedCheck, RegistrationError};

pub const LIVENESS_CHECK: &str = "live";
pub const READINESS_CHECK: &str = "ready";
pub const DATABASE_CHECK: &str = "database";
