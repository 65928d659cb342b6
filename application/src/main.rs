use std::{future::IntoFuture as _, io, sync::OnceLock};

use application::{router, Args, Catalog, Config};
use futures::TryFutureExt as _;
use service::{
    infra::{postgres, Postgres},
    Service,
};
use tokio::net::TcpListener;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

/// Levels written to `stderr` rather than `stdout`.
const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

/// Maximum level to log, set once the [`Config`] is loaded.
static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

postgres::embed_migrations!("../migrations");

#[tokio::main]
async fn main() {
    init_logging();

    _ = run().await;
}

/// Splits logs between `stdout` and `stderr` by their level.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| enabled(meta, false))),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| enabled(meta, true))),
        )
        .init();
}

/// Checks whether an event goes to `stderr` (or `stdout` otherwise).
fn enabled(meta: &log::Metadata<'_>, to_stderr: bool) -> bool {
    meta.is_span()
        || STDERR_LEVELS.contains(meta.level()) == to_stderr
            && LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO)
                >= *meta.level()
}

async fn run() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        postgres,
        server,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let postgres_config: postgres::Config = postgres.into();
    let mut postgres = Postgres::new(&postgres_config).map_err(|e| {
        log::error!("failed to initialize `Postgres` client: {e}");
    })?;

    let report = migrations::runner()
        .run_async(&mut postgres)
        .await
        .map_err(|e| {
            log::error!("failed to migrate the reservations database: {e}");
        })?;
    for m in report.applied_migrations() {
        log::info!("applied `{m}` migration");
    }

    let service = Service::new(postgres);

    match Catalog::count(&service).await {
        Ok(Catalog {
            room_types,
            available_rooms,
            out_of_service_rooms,
        }) => log::info!(
            "hotel has {room_types} room types, {available_rooms} rooms \
             available and {out_of_service_rooms} out of service",
        ),
        Err(e) => log::warn!("failed to count the hotel catalog: {e}"),
    }

    let cors = server.cors.layer().map_err(|e| {
        log::error!("invalid CORS origin in {:?}: {e}", server.cors.origins);
    })?;

    let listener = TcpListener::bind((server.host.as_str(), server.port))
        .await
        .map_err(|e| {
            log::error!(
                "failed to listen on `{}:{}`: {e}",
                server.host,
                server.port,
            );
        })?;

    log::info!(
        "accepting reservations on `{}:{}/graphql`",
        server.host,
        server.port,
    );

    axum::serve(listener, router(service, cors))
        .into_future()
        .map_err(|e| log::error!("webserver failed: {e}"))
        .await
}
