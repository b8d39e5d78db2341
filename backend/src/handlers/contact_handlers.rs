use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use tracing::{error, info, warn};

use crate::api::resend::OutgoingEmail;
use crate::handlers::contact_dtos::{ContactRequest, ContactResponse};
use crate::utils::email_templates;
use crate::AppState;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Fallback for every method except POST on /api/contact.
pub async fn method_not_allowed() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({"error": "Method not allowed"})),
    )
}

/// Converts a request-handler panic into a 500 instead of tearing down the
/// connection task.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Unbehandelter Fehler im Request-Handler: {}", details);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Interner Serverfehler", "details": details})),
    )
        .into_response()
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, (StatusCode, Json<serde_json::Value>)> {
    if form.name.trim().is_empty() || form.email.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Name und E-Mail sind Pflichtfelder"})),
        ));
    }

    if !is_valid_email(&form.email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Ungültige E-Mail-Adresse"})),
        ));
    }

    // The secret's name stays in the server log, the client gets a generic message.
    let Some(mailer) = state.mailer.as_ref() else {
        error!("RESEND_API_KEY ist nicht gesetzt");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Server-Konfiguration fehlerhaft"})),
        ));
    };

    let received_at = email_templates::german_timestamp(
        chrono::Utc::now().with_timezone(&chrono_tz::Europe::Berlin),
    );
    let notification = email_templates::render_notification(&form, &received_at);

    let email_id = match mailer
        .send(OutgoingEmail {
            from: state.settings.from_email.clone(),
            to: state.settings.to_email.clone(),
            subject: email_templates::notification_subject(&form.name, &form.company),
            html: notification.html,
            text: notification.text,
            reply_to: Some(form.email.clone()),
        })
        .await
    {
        Ok(id) => Some(id),
        Err(e) => {
            error!("Resend API Fehler: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Fehler beim Senden der E-Mail",
                    "details": e.to_string(),
                })),
            ));
        }
    };

    // The notification reached the inbox, so a failed courtesy email must
    // not fail the request.
    let confirmation = email_templates::render_confirmation(&form.name);
    if let Err(e) = mailer
        .send(OutgoingEmail {
            from: state.settings.from_email.clone(),
            to: form.email.clone(),
            subject: "Ihre Anfrage bei Franco Consulting wurde empfangen".to_string(),
            html: confirmation.html,
            text: confirmation.text,
            reply_to: None,
        })
        .await
    {
        warn!("Bestätigungs-E-Mail konnte nicht gesendet werden: {}", e);
    }

    info!("Kontaktanfrage von {} verarbeitet", form.email);

    Ok(Json(ContactResponse {
        success: true,
        message: "E-Mail erfolgreich gesendet".to_string(),
        email_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resend::{EmailSender, MailError, MockEmailSender};
    use crate::config::mail_settings::MailSettings;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use http_body_util::BodyExt;
    use mockall::Sequence;
    use tower::ServiceExt;

    fn settings() -> MailSettings {
        MailSettings {
            api_key: Some("re_test_key".to_string()),
            from_email: "Franco Consulting <kontakt@franco-consulting.com>".to_string(),
            to_email: "kontakt@franco-consulting.com".to_string(),
        }
    }

    fn app_with(mailer: Option<MockEmailSender>) -> axum::Router {
        let mut settings = settings();
        if mailer.is_none() {
            settings.api_key = None;
        }
        let state = Arc::new(AppState {
            settings,
            mailer: mailer.map(|m| Arc::new(m) as Arc<dyn EmailSender>),
        });
        crate::app(state)
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "name": "Max Mustermann",
            "email": "max@beispiel.de",
            "company": "Musterhotel GmbH",
            "phone": "+49 123 456789",
            "hasMarketing": true,
            "futureStart": null,
            "improvements": ["account-check", "more-bookings"],
            "budget": "1000-3000",
        })
    }

    async fn post_contact(
        app: axum::Router,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/contact")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::ORIGIN, "https://www.franco-consulting.com")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn non_post_requests_are_rejected_with_405() {
        let mut mailer = MockEmailSender::new();
        mailer.expect_send().times(0);

        let response = app_with(Some(mailer))
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/contact")
                    .header(header::ORIGIN, "https://www.franco-consulting.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .map(|v| v.to_str().unwrap()),
            Some("*")
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn missing_required_fields_return_400() {
        let mut mailer = MockEmailSender::new();
        mailer.expect_send().times(0);

        let mut body = valid_body();
        body["name"] = json!("");
        let (status, body) = post_contact(app_with(Some(mailer)), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name und E-Mail sind Pflichtfelder");
    }

    #[tokio::test]
    async fn malformed_email_returns_400_before_any_provider_call() {
        let mut mailer = MockEmailSender::new();
        mailer.expect_send().times(0);

        let mut body = valid_body();
        body["email"] = json!("not-an-email");
        let (status, body) = post_contact(app_with(Some(mailer)), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Ungültige E-Mail-Adresse");
    }

    #[tokio::test]
    async fn missing_credential_returns_500_without_leaking_the_secret() {
        let (status, body) = post_contact(app_with(None), valid_body()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server-Konfiguration fehlerhaft");
        let rendered = body.to_string();
        assert!(!rendered.contains("RESEND_API_KEY"));
        assert!(!rendered.contains("re_test_key"));
    }

    #[tokio::test]
    async fn failing_notification_returns_500_and_skips_the_confirmation() {
        let mut mailer = MockEmailSender::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailError::Api("Invalid from address".to_string())));

        let (status, body) = post_contact(app_with(Some(mailer)), valid_body()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Fehler beim Senden der E-Mail");
        assert_eq!(body["details"], "Invalid from address");
    }

    #[tokio::test]
    async fn failing_confirmation_still_returns_200() {
        let mut mailer = MockEmailSender::new();
        let mut seq = Sequence::new();
        mailer
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("re_notification_id".to_string()));
        mailer
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(MailError::Api("mailbox unavailable".to_string())));

        let (status, body) = post_contact(app_with(Some(mailer)), valid_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["emailId"], "re_notification_id");
    }

    #[tokio::test]
    async fn successful_submission_returns_the_notification_email_id() {
        let mut mailer = MockEmailSender::new();
        let mut seq = Sequence::new();
        mailer
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|email| {
                email.to == "kontakt@franco-consulting.com"
                    && email.reply_to.as_deref() == Some("max@beispiel.de")
                    && email.subject == "Neue Kontaktanfrage von Max Mustermann (Musterhotel GmbH)"
            })
            .returning(|_| Ok("re_notification_id".to_string()));
        mailer
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|email| {
                email.to == "max@beispiel.de"
                    && email.subject == "Ihre Anfrage bei Franco Consulting wurde empfangen"
                    && email.reply_to.is_none()
            })
            .returning(|_| Ok("re_confirmation_id".to_string()));

        let (status, body) = post_contact(app_with(Some(mailer)), valid_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "E-Mail erfolgreich gesendet");
        assert_eq!(body["emailId"], "re_notification_id");
    }
}
