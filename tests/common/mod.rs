use async_trait::async_trait;
use boilerplate::health::{
    Aggregator, DependencyCheck, HealthRegistry, LivenessCheck, Probe, ProbeError,
    ReadinessCheck, ReadinessState,
};
use std::time::Duration;

pub struct StubProbe {
    pub reachable: bool,
}

#[async_trait]
impl Probe for StubProbe {
    async fn can_connect(&self) -> Result<bool, ProbeError> {
        if self.reachable {
            Ok(true)
        } else {
            Err(ProbeError::Database(sqlx::Error::PoolTimedOut))
        }
    }
}

pub struct TestApp {
    pub address: String,
    pub readiness: ReadinessState,
    pub handle: actix_web::dev::ServerHandle,
}

/// `live`, `ready` and a `database` check backed by [`StubProbe`].
pub fn default_registry(readiness: &ReadinessState, database_reachable: bool) -> HealthRegistry {
    let mut registry = HealthRegistry::new();
    registry.register("live", LivenessCheck).unwrap();
    registry
        .register("ready", ReadinessCheck::new(readiness.clone()))
        .unwrap();
    registry
        .register(
            "database",
            DependencyCheck::new(
                "database",
                StubProbe {
                    reachable: database_reachable,
                },
                Duration::from_secs(1),
            ),
        )
        .unwrap();
    registry
}

pub fn spawn_app(database_reachable: bool) -> TestApp {
    let readiness = ReadinessState::default();
    let registry = default_registry(&readiness, database_reachable);
    spawn_app_with_registry(registry, readiness)
}

// we have to run server in another task
pub fn spawn_app_with_registry(registry: HealthRegistry, readiness: ReadinessState) -> TestApp {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = boilerplate::startup::run(listener, registry, Aggregator::default())
        .expect("Failed to bind address.");
    let handle = server.handle();
    let _ = tokio::spawn(server);

    TestApp {
        address,
        readiness,
        handle,
    }
}
