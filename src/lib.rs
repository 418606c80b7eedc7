pub mod configuration;
pub mod health;
pub mod routes;
pub mod shutdown;
pub mod startup;
pub mod telemetry;
