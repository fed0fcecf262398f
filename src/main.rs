//! Money Manage server binary.
//!
//! Wires configuration, PostgreSQL, the Telegram bot worker, the link
//! request sweeper and the HTTP/WebSocket router, then serves until
//! ctrl-c or SIGTERM.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use money_manage::adapters::auth::{JwtSessions, JwtSettings};
use money_manage::adapters::events::LinkageHub;
use money_manage::adapters::http::{app_router, AppState, CookieSettings};
use money_manage::adapters::postgres::{
    PostgresInviteRepository, PostgresLinkRequestRepository, PostgresRoomRepository,
    PostgresUserRepository,
};
use money_manage::adapters::telegram::{
    run_polling, BotCommandDispatcher, DisabledBotMessenger, TelegramBotClient,
};
use money_manage::application::handlers::linkage::{
    CancelLinkHandler, ConfirmLinkHandler, PurgeExpiredLinksHandler,
};
use money_manage::config::{AppConfig, LogFormat, ServerConfig, ValidationError};
use money_manage::ports::{BotMessenger, EventPublisher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "starting money-manage"
    );

    // Persistence
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let link_requests = Arc::new(PostgresLinkRequestRepository::new(pool.clone()));
    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let rooms = Arc::new(PostgresRoomRepository::new(pool.clone()));
    let invites = Arc::new(PostgresInviteRepository::new(pool.clone()));

    // Realtime hub and bot
    let hub = LinkageHub::new(config.linkage.subscriber_capacity);
    let publisher: Arc<dyn EventPublisher> = Arc::new(hub.clone());

    let telegram_client = match (config.telegram.enabled, &config.telegram.bot_token) {
        (true, Some(token)) => Some(Arc::new(TelegramBotClient::new(
            config.telegram.api_base_url.clone(),
            token.clone(),
            config.telegram.poll_timeout_secs,
        )?)),
        _ => {
            tracing::warn!("telegram bot disabled, linkage cannot be confirmed");
            None
        }
    };
    let bot: Arc<dyn BotMessenger> = match &telegram_client {
        Some(client) => client.clone(),
        None => Arc::new(DisabledBotMessenger),
    };

    // Sessions
    let sessions = Arc::new(JwtSessions::new(
        config.auth.jwt_secret.expose_secret().as_bytes(),
        JwtSettings {
            issuer: config.auth.issuer.clone(),
            audience: config.auth.audience.clone(),
            ttl_secs: config.auth.session_ttl_secs,
        },
    ));

    // Background tasks
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut background = Vec::new();

    if let Some(client) = telegram_client {
        let dispatcher = BotCommandDispatcher::new(
            ConfirmLinkHandler::new(link_requests.clone(), publisher.clone(), bot.clone()),
            CancelLinkHandler::new(link_requests.clone(), publisher.clone(), bot.clone()),
            bot.clone(),
        );
        background.push(tokio::spawn(run_polling(
            client,
            dispatcher,
            shutdown_rx.clone(),
        )));
    }

    let sweeper =
        PurgeExpiredLinksHandler::new(link_requests.clone(), config.linkage.request_ttl_secs);
    background.push(tokio::spawn(
        sweeper.run(config.linkage.sweep_interval(), shutdown_rx.clone()),
    ));

    // HTTP
    let state = AppState {
        link_requests,
        users,
        rooms,
        invites,
        bot,
        hub,
        session_validator: sessions.clone(),
        session_issuer: sessions,
        cookie: CookieSettings {
            secure: config.server.cookie_secure,
            max_age_secs: config.auth.session_ttl_secs,
        },
    };

    let app = app_router(state)
        .layer(cors_layer(&config.server)?)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("http server stopped, stopping background tasks");
    let _ = shutdown_tx.send(true);
    for task in background {
        if let Err(err) = task.await {
            tracing::warn!(error = %err, "background task ended abnormally");
        }
    }
    pool.close().await;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn cors_layer(server: &ServerConfig) -> Result<CorsLayer, ValidationError> {
    let origins = server
        .cors_origins_list()
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(&origin)
                .map_err(|_| ValidationError::InvalidCorsOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
                    _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down"),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        tracing::info!("received ctrl-c, shutting down");
    }
}
