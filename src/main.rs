//! `tagged-log` command line tool.
//!
//! - `emit`: write a single log line through the default logger
//! - `serve`: run a small HTTP server that logs every request with its
//!   request metadata, as a working example of the middleware

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    middleware,
    response::IntoResponse,
    routing::any,
    Router,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tagged_log::config::{load_config, AppConfig};
use tagged_log::http::request_metadata_middleware;
use tagged_log::observability::metrics;
use tagged_log::{fields, Context, Fields, JsonHandler, Level, RequestJsonHandler};

#[derive(Parser)]
#[command(name = "tagged-log")]
#[command(about = "Structured JSON logging from the command line", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit debug level messages.
    #[arg(long)]
    debug: bool,

    /// Use a constant timestamp for every line.
    #[arg(long)]
    freeze_time: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one log line to stdout
    Emit {
        /// Level: debug, info or error.
        #[arg(short, long, default_value = "info")]
        level: Level,

        /// Message text.
        message: String,

        /// Context tag, as key=value. Repeatable.
        #[arg(short, long = "tag", value_parser = parse_pair)]
        tags: Vec<(String, String)>,

        /// Field, as key=value. JSON values are decoded, anything else is a string.
        #[arg(short, long = "field", value_parser = parse_pair)]
        fields: Vec<(String, String)>,
    },
    /// Run a demo HTTP server that logs every request
    Serve {
        /// Bind address, overrides the config file.
        #[arg(short, long)]
        bind: Option<String>,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected key=value, got {s:?}")),
    }
}

fn field_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    config.logging.debug |= cli.debug;
    config.logging.freeze_time |= cli.freeze_time;

    // Crate diagnostics go to stderr so stdout stays pure JSON lines.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.observability.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Emit {
            level,
            message,
            tags,
            fields,
        } => {
            emit(&config, level, message, tags, fields);
            Ok(())
        }
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            serve(config).await
        }
    }
}

fn emit(
    config: &AppConfig,
    level: Level,
    message: String,
    tags: Vec<(String, String)>,
    pairs: Vec<(String, String)>,
) {
    tagged_log::set_debug(config.logging.debug);
    tagged_log::set_handler(Arc::new(JsonHandler::with_options(io::stdout(), &config.logging)));

    let ctx = Context::background().with_tags(tags);
    let fields: Fields = pairs
        .into_iter()
        .map(|(k, v)| {
            let value = field_value(&v);
            (k, value)
        })
        .collect();

    match level {
        Level::Debug => tagged_log::debug(&ctx, message, fields),
        Level::Info => tagged_log::info(&ctx, message, fields),
        Level::Error => tagged_log::error(&ctx, message, fields),
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tagged_log::set_debug(config.logging.debug);
    tagged_log::set_handler(Arc::new(RequestJsonHandler::new(io::stdout(), config.logging)));

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let app = Router::new()
        .route("/", any(echo_handler))
        .route("/{*path}", any(echo_handler))
        .layer(middleware::from_fn(request_metadata_middleware))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Demo server listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Demo server stopped");
    Ok(())
}

/// Logs the request and answers with its request ID.
async fn echo_handler(Extension(ctx): Extension<Context>, request: Request<Body>) -> impl IntoResponse {
    let query = request.uri().query().unwrap_or_default().to_string();
    tagged_log::debug(&ctx, "request received", fields! { "query" => query });

    let status = StatusCode::OK;
    tagged_log::info(&ctx, "request served", fields! { "status" => status.as_u16() });
    metrics::record_request(request.method().as_str(), status.as_u16());

    let id = ctx
        .request_metadata()
        .map(|md| md.id.clone())
        .unwrap_or_default();
    (status, format!("{id}\n"))
}

/// Wait for Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
