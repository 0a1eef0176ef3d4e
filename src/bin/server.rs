use std::{fs::OpenOptions, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use time::{Date, macros::format_description};
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use momo_dashboard::{
    AppState, DashboardConfig, DateBounds, HttpTransactionApi, build_router, graceful_shutdown,
    logging_middleware,
};

/// The web dashboard for MoMo transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base URL of the transaction API.
    #[arg(long, default_value = HttpTransactionApi::DEFAULT_BASE_URL)]
    api_url: String,

    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The earliest date the date filters allow, as YYYY-MM-DD.
    #[arg(long, value_parser = parse_date, default_value = "2024-05-10")]
    data_start: Date,

    /// The latest date the date filters allow, as YYYY-MM-DD.
    #[arg(long, value_parser = parse_date, default_value = "2025-01-16")]
    data_end: Date,

    /// Seconds to wait for each request of the first load.
    #[arg(long, default_value_t = 5)]
    request_timeout: u64,

    /// Log every request and response body.
    #[arg(long)]
    log_bodies: bool,
}

fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|error| format!("invalid date \"{text}\": {error}"))
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    tracing::info!(
        "Restricting dates to {} through {}",
        args.data_start,
        args.data_end
    );

    let config = DashboardConfig {
        request_timeout: Duration::from_secs(args.request_timeout),
        date_bounds: DateBounds::new(args.data_start, args.data_end),
        ..Default::default()
    };
    let api = HttpTransactionApi::new(&args.api_url);
    tracing::info!("Reading transactions from {}", api.base_url());

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(AppState::new(api, config));
    let router = if args.log_bodies {
        router.layer(middleware::from_fn(logging_middleware))
    } else {
        router
    };
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped: {error}");
    }
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
    {
        Ok(log_file) => log_file,
        Err(error) => {
            eprintln!("Could not create log file: {error}");
            std::process::exit(1);
        }
    };

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged by the handlers.
        .on_failure(());

    router.layer(tracing_layer)
}
