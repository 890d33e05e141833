use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use survibe::config::Config;
use survibe::email::SmtpNotifier;
use survibe::store::PgSubmissionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env().expect("Failed to load configuration");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting survibe");

    // The pool connects on first use and is reused afterwards
    let store = PgSubmissionStore::connect_lazy(&config.database_url)
        .expect("Invalid DATABASE_URL");

    sqlx::migrate!("./migrations")
        .run(store.pool())
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations applied");

    let notifier = SmtpNotifier::new(&config.mail).expect("Failed to configure SMTP transport");
    tracing::info!(
        "Notifications go to {} via {}:{}",
        notifier.recipient(),
        config.mail.host,
        config.mail.port
    );

    let addr = SocketAddr::new(config.host, config.port);
    let app = survibe::build_app(config, Arc::new(store), Arc::new(notifier));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
