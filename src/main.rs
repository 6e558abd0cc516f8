use {
    axum::{extract::DefaultBodyLimit, http::StatusCode},
    sqlx::postgres::PgPoolOptions,
    std::{env, sync::Arc, time::Duration},
    tokio::{signal, sync::watch},
    tower::ServiceBuilder,
    tower_http::timeout::TimeoutLayer,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let platform_base_url = env::var("PLATFORM_BASE_URL").expect("PLATFORM_BASE_URL must be set");
    let platform_api_key = env::var("PLATFORM_API_KEY").expect("PLATFORM_API_KEY must be set");
    let webhook_base_url = env::var("WEBHOOK_BASE_URL").ok();

    let max_pages = match env::var("IMPORT_MAX_PAGES") {
        Ok(value) => value.parse().expect("IMPORT_MAX_PAGES must be a number"),
        Err(_) => crm_sync::domain::import::DEFAULT_MAX_PAGES,
    };
    let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
        Ok(value) => {
            Duration::from_secs(value.parse().expect("REQUEST_TIMEOUT_SECS must be a number"))
        }
        Err(_) => Duration::from_secs(300),
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&database_url)
        .await
        .expect("failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let platform = Arc::new(
        crm_sync::adapters::platform::HttpPlatform::new(platform_base_url, platform_api_key)
            .expect("failed to build platform client"),
    );
    let forwarder = Arc::new(
        crm_sync::adapters::webhook::HttpForwarder::new(webhook_base_url)
            .expect("failed to build webhook client"),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let state = crm_sync::AppState {
        store: Arc::new(crm_sync::infra::postgres::record_repo::PgRecordStore::new(
            pool,
        )),
        directory: platform.clone(),
        runtime: platform,
        forwarder,
        limits: crm_sync::domain::import::ImportLimits { max_pages },
        shutdown: shutdown_rx,
    };

    let app = crm_sync::app(state).layer(
        ServiceBuilder::new()
            .layer(DefaultBodyLimit::max(64 * 1024)) // 64 KB, request bodies carry keys not records
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            )),
    );

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // In-flight imports poll this flag between pages and bail out.
            let _ = shutdown_tx.send(true);
        })
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
