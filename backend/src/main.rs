use dotenvy::dotenv;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;

mod handlers {
    pub mod contact_handlers;
    pub mod contact_dtos;
}
mod api {
    pub mod resend;
}
mod config {
    pub mod mail_settings;
}
mod utils {
    pub mod email_templates;
}

use api::resend::{EmailSender, ResendClient};
use config::mail_settings::MailSettings;
use handlers::contact_handlers;

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    pub settings: MailSettings,
    /// None when RESEND_API_KEY is absent; the contact handler answers 500 then.
    pub mailer: Option<Arc<dyn EmailSender>>,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/api/contact",
            post(contact_handlers::submit_contact).fallback(contact_handlers::method_not_allowed),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(CatchPanicLayer::custom(contact_handlers::panic_response))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any)
                .allow_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let settings = MailSettings::from_env();
    if settings.api_key.is_none() {
        tracing::warn!("RESEND_API_KEY ist nicht gesetzt, Kontaktanfragen werden mit 500 beantwortet");
    }

    let mailer: Option<Arc<dyn EmailSender>> = settings
        .api_key
        .clone()
        .map(|key| Arc::new(ResendClient::new(key)) as Arc<dyn EmailSender>);

    let state = Arc::new(AppState { settings, mailer });

    let app = app(state);

    use tokio::net::TcpListener;

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = TcpListener::bind(&addr).await.expect("failed to bind address");
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app.into_make_service()).await.unwrap();
}
