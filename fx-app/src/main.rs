//! # Currency Converter Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Select the history store from `DATABASE_URL`
//! - Create the converter service around the upstream rate client
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fx_hex::{
    ConverterService,
    inbound::{HttpServer, RuntimeInfo},
    outbound::FreeCurrencyApi,
};
use fx_repo::build_history;
use fx_types::HistoryStore;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing; endpoint comes from OTEL_EXPORTER_OTLP_ENDPOINT
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("fx-server"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration; a missing CURRENCY_API_KEY stops here
    let config = config::Config::from_env()?;

    // Span export only when a collector is configured
    let otel = match config.otlp_endpoint {
        Some(_) => Some(init_tracer()?),
        None => None,
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fx_app=debug,fx_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting currency converter on port {}", config.port);
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Rate provider: {}", config.currency_api_url);

    // Build history store (handles connection and migration)
    let history = build_history(config.database_url.as_deref()).await?;
    tracing::info!("History storage: {}", history.mode().describe());

    let rates = FreeCurrencyApi::new(config.currency_api_key)
        .with_base_url(config.currency_api_url);

    // Create the converter service
    let service = ConverterService::new(rates, history);

    // Create and run the HTTP server
    let runtime = RuntimeInfo {
        environment: config.environment,
        api_key_configured: true,
    };
    let server = HttpServer::new(service, runtime).with_allowed_origins(config.allowed_origins);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
