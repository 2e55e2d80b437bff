use lambda_emf_metrics::{StorageResolution, Unit};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Deserialize)]
struct Request {
    payload: String,
}

#[derive(Serialize)]
struct Response {
    req_id: String,
}

async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let start = Instant::now();

    // One logger per invocation, flushed before returning
    let metrics = lambda_emf_metrics::Builder::new().build();

    metrics
        .set_namespace("MetricsTest")
        .add_dimension("Method", "Default")
        .set_property("RequestId", event.context.request_id.clone())
        .add_count("requests", 1, StorageResolution::Standard)
        .add_metric(
            "payload_size",
            event.payload.payload.len() as u64,
            Unit::BYTES,
            StorageResolution::Standard,
        )
        .add_metric(
            "handler_time",
            start.elapsed().as_secs_f64() * 1000.0,
            Unit::MILLISECONDS,
            StorageResolution::High,
        );

    metrics.flush()?;

    Ok(Response {
        req_id: event.context.request_id,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .compact()
        .init();

    run(service_fn(function_handler)).await
}
