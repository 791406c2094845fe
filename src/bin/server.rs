use std::{
    fs::OpenOptions,
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use sales_dashboard::{
    AppState, DEFAULT_SEED_URL, MemoryStore, PaginationConfig, SqliteStore, TransactionStore,
    build_router, graceful_shutdown, initialize_store,
};

/// The REST API server for the sales dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. Records are kept in memory if omitted.
    #[arg(long)]
    db_path: Option<String>,

    /// The address to serve the API from.
    #[arg(long, default_value = "127.0.0.1")]
    address: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// The URL of the JSON feed used to seed the store.
    #[arg(long, env = "SEED_URL", default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// How long to wait for the seed feed before giving up.
    #[arg(long, default_value_t = 30)]
    seed_timeout_secs: u64,

    /// Seed the store once at start up.
    #[arg(long)]
    seed_on_start: bool,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let store: Arc<dyn TransactionStore> = match &args.db_path {
        Some(db_path) => {
            let connection = Connection::open(db_path).expect("Could not open database file");
            tracing::info!("Using SQLite database at {db_path}");
            Arc::new(SqliteStore::new(connection).expect("Could not initialize database"))
        }
        None => {
            tracing::info!("No database path given, keeping records in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(
        store,
        &args.seed_url,
        Duration::from_secs(args.seed_timeout_secs),
        PaginationConfig::default(),
    )
    .expect("Could not create app state");

    if args.seed_on_start {
        if let Err(error) =
            initialize_store(&state.http_client, &state.seed_url, state.store.clone()).await
        {
            tracing::warn!("Could not seed the store at start up, continuing without it: {error}");
        }
    }

    let addr = SocketAddr::new(args.address, args.port);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server failed");
}

fn setup_logging() {
    if let Ok(env_filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
            .init();
        return;
    }

    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

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
        // By default, `TraceLayer` will log 5xx responses but errors are
        // already logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
