use anyhow::Context;
use boilerplate::configuration::get_configuration;
use boilerplate::health::{Aggregator, ReadinessState};
use boilerplate::shutdown::{drain_on_signal, shutdown_signal};
use boilerplate::startup::{build_registry, run};
use boilerplate::telemetry::{get_subscriber, init_subscriber};
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("boilerplate".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let settings = get_configuration().context("Failed to read configuration.")?;

    tracing::info!(
        db_host = %settings.database.host,
        db_port = settings.database.port,
        db_name = %settings.database.database_name,
        "Configuring PostgreSQL pool"
    );

    // Lazy: an unreachable database shows up as 503 on /health, not as a failed boot.
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(settings.health.database_timeout())
        .connect_lazy_with(settings.database.connect_options());

    let readiness = ReadinessState::default();
    let registry = build_registry(&settings.health, pg_pool, readiness.clone())
        .context("Failed to register health checks")?;
    let aggregator = Aggregator::new(settings.health.check_timeout());

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener =
        TcpListener::bind(&address).with_context(|| format!("failed to bind to {}", address))?;

    let server = run(listener, registry, aggregator)?;
    tokio::spawn(drain_on_signal(
        shutdown_signal(),
        server.handle(),
        readiness,
        settings.health.shutdown_grace(),
    ));

    server.await?;
    Ok(())
}
