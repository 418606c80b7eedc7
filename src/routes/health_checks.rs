use crate::health::{AggregateReport, Aggregator, HealthRegistry, LIVENESS_CHECK, READINESS_CHECK};
use actix_web::http::header::{self, ContentType};
use actix_web::{get, web, HttpResponse, HttpResponseBuilder};

fn response_for(report: &AggregateReport) -> HttpResponseBuilder {
    let mut builder = if report.is_healthy() {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder.insert_header((header::CACHE_CONTROL, "no-store, no-cache"));
    builder
}

async fn plain_report<P>(registry: &HealthRegistry, aggregator: &Aggregator, predicate: P) -> HttpResponse
where
    P: Fn(&str) -> bool,
{
    let report = aggregator.run(registry, predicate).await;
    response_for(&report)
        .content_type(ContentType::plaintext())
        .body(report.status.as_str())
}

/// Every registered check, with per-check detail.
#[tracing::instrument(name = "Health report", skip(registry, aggregator))]
#[get("")]
pub async fn report_handler(
    registry: web::Data<HealthRegistry>,
    aggregator: web::Data<Aggregator>,
) -> HttpResponse {
    let report = aggregator.run(&registry, |_| true).await;
    if !report.is_healthy() {
        tracing::warn!(checks = ?report.checks, "Service reported unhealthy");
    }
    response_for(&report).json(&report)
}

#[tracing::instrument(name = "Liveness probe", skip(registry, aggregator))]
#[get("/live")]
pub async fn live_handler(
    registry: web::Data<HealthRegistry>,
    aggregator: web::Data<Aggregator>,
) -> HttpResponse {
    plain_report(&registry, &aggregator, |name| name == LIVENESS_CHECK).await
}

#[tracing::instrument(name = "Readiness probe", skip(registry, aggregator))]
#[get("/ready")]
pub async fn ready_handler(
    registry: web::Data<HealthRegistry>,
    aggregator: web::Data<Aggregator>,
) -> HttpResponse {
    plain_report(&registry, &aggregator, |name| name == READINESS_CHECK).await
}

/// A single named check, e.g. `/health/database`. Unknown names are 404.
#[tracing::instrument(name = "Named health probe", skip(registry, aggregator))]
#[get("/{name}")]
pub async fn check_handler(
    path: web::Path<String>,
    registry: web::Data<HealthRegistry>,
    aggregator: web::Data<Aggregator>,
) -> HttpResponse {
    let name = path.into_inner();
    if !registry.contains(&name) {
        return HttpResponse::NotFound().finish();
    }
    plain_report(&registry, &aggregator, |candidate| candidate == name).await
}
