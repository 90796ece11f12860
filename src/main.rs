#![recursion_limit = "256"]

mod config;
mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::mailer::{Mailer, ResendMailer};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");

    // Mail is optional: notifications and code delivery are skipped without it.
    let mailer: Option<Arc<dyn Mailer>> = match &config.mail {
        Some(mail) => {
            tracing::info!(from = %mail.from, "resend mailer initialized");
            Some(Arc::new(ResendMailer::new(&mail.resend_api_key, mail.from.clone())))
        }
        None => {
            tracing::warn!("RESEND_API_KEY/NOTIFY_FROM not set; outbound mail disabled");
            None
        }
    };

    let state = state::AppState::new(pool, mailer, &config);

    let app = routes::leptos_app(state).expect("router init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "stockroom listening");
    axum::serve(listener, app).await.expect("server failed");
}
