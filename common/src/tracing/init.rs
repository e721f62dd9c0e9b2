use crate::error::{Result, SeedError};
use opentelemetry::{trace::TracerProvider as _, KeyValue};
use opentelemetry_sdk::Resource;
use std::env;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// environment variable holding a tracing filter directive, e.g. `common=debug`
pub const LOG_FILTER_ENV: &str = "SEEDSQL_LOG";
pub const ENABLE_OTEL_ENV: &str = "SEEDSQL_ENABLE_TRACING";

pub struct OtelGuard {
    tracer_provider: Option<opentelemetry_sdk::trace::SdkTracerProvider>,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take() {
            // flush remaining spans before the batch run exits
            if let Err(e) = provider.shutdown() {
                eprintln!("error shutting down tracer provider: {}", e);
            }
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. Console output goes to stderr so generated
/// output on stdout stays clean; spans are exported over otlp only when
/// `SEEDSQL_ENABLE_TRACING` is set and a collector endpoint is configured.
pub fn init_tracing(service_name: &str, default_level: &str) -> Result<OtelGuard> {
    let endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

    let endpoint_url = match endpoint {
        Some(url) if env_flag(ENABLE_OTEL_ENV) => url,
        _ => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter(default_level))
                .finish()
                .try_init()
                .map_err(|e| SeedError::Tracing(e.to_string()))?;

            tracing::debug!("console logging initialized (service={})", service_name);

            return Ok(OtelGuard {
                tracer_provider: None,
            });
        }
    };

    use opentelemetry_otlp::WithExportConfig;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint_url)
        .build()
        .map_err(|e| SeedError::Tracing(format!("exporter build failed: {}", e)))?;

    let resource = Resource::builder_empty()
        .with_attribute(KeyValue::new("service.name", service_name.to_string()))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    let telemetry =
        tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name.to_string()));

    tracing_subscriber::registry()
        .with(telemetry)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(default_level))
        .try_init()
        .map_err(|e| SeedError::Tracing(e.to_string()))?;

    tracing::info!(
        "opentelemetry tracing initialized for {} (endpoint: {})",
        service_name,
        endpoint_url
    );

    Ok(OtelGuard {
        tracer_provider: Some(provider),
    })
}
