use crate::configuration::HealthSettings;
use crate::health::{
    Aggregator, DependencyCheck, HealthRegistry, HttpProbe, LivenessCheck, PgProbe,
    ReadinessCheck, ReadinessState, RegistrationError, DATABASE_CHECK, LIVENESS_CHECK,
    READINESS_CHECK,
};
use crate::routes;
use actix_web::{dev::Server, web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/// Registers `live`, `ready`, `database`, then every configured HTTP dependency.
pub fn build_registry(
    settings: &HealthSettings,
    pg_pool: PgPool,
    readiness: ReadinessState,
) -> Result<HealthRegistry, RegistrationError> {
    let mut registry = HealthRegistry::new();

    registry.register(LIVENESS_CHECK, LivenessCheck)?;
    registry.register(READINESS_CHECK, ReadinessCheck::new(readiness))?;
    registry.register(
        DATABASE_CHECK,
        DependencyCheck::new(
            DATABASE_CHECK,
            PgProbe::new(pg_pool),
            settings.database_timeout(),
        ),
    )?;

    let http_client = reqwest::Client::new();
    for dependency in &settings.dependencies {
        registry.register(
            &dependency.name,
            DependencyCheck::new(
                &dependency.name,
                HttpProbe::new(http_client.clone(), &dependency.url),
                dependency.timeout(),
            ),
        )?;
    }

    tracing::info!(checks = registry.len(), "Health checks registered");
    Ok(registry)
}

/// Builds the server without starting a signal handler; stopping it is up to
/// the caller, see [`crate::shutdown::drain_on_signal`].
pub fn run(
    listener: TcpListener,
    registry: HealthRegistry,
    aggregator: Aggregator,
) -> Result<Server, std::io::Error> {
    let registry = web::Data::new(registry);
    let aggregator = web::Data::new(aggregator);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(registry.clone())
            .app_data(aggregator.clone())
            .service(
                web::scope("/health")
                    .service(routes::report_handler)
                    .service(routes::live_handler)
                    .service(routes::ready_handler)
                    .service(routes::check_handler),
            )
    })
    .disable_signals()
    .listen(listener)?
    .run();

    Ok(server)
}
