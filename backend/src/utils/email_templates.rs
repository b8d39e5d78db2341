use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;

use crate::handlers::contact_dtos::ContactRequest;

pub struct EmailContent {
    pub html: String,
    pub text: String,
}

/// Escapes the characters that open markup in the email HTML. Everything
/// user-supplied goes through this before interpolation.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Known improvement ids map to their German labels; unknown ids pass
/// through raw so nothing a client sent is silently dropped.
pub fn improvement_label(id: &str) -> &str {
    match id {
        "account-check" => "Account Check",
        "more-bookings" => "Mehr Buchungen",
        "no-agency" => "Keine Agentur mehr",
        "conversion-tracking" => "Conversion Tracking",
        "better-campaigns" => "Bessere Kampagnen",
        other => other,
    }
}

pub fn budget_label(id: &str) -> &str {
    match id {
        "under-1000" => "Unter 1.000€",
        "1000-3000" => "1.000€ - 3.000€",
        "3000-5000" => "3.000€ - 5.000€",
        "5000-10000" => "5.000€ - 10.000€",
        "over-10000" => "Über 10.000€",
        other => other,
    }
}

/// "true" is a real key here: the wizard sends the literal `true` for
/// "as soon as possible" and the lookup folds it to its string form.
pub fn future_start_label(key: &str) -> &str {
    match key {
        "true" => "Ja, so bald wie möglich",
        "planning" => "Ja, bin in der Planungsphase",
        "exploring" => "Ich informiere mich erst mal",
        other => other,
    }
}

pub fn marketing_status_label(has_marketing: Option<bool>) -> &'static str {
    match has_marketing {
        Some(true) => "Bereits aktiv",
        Some(false) => "Noch nicht gestartet",
        None => "Nicht angegeben",
    }
}

const GERMAN_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// German long date plus short time, e.g. "6. August 2026 um 14:30".
pub fn german_timestamp(at: DateTime<Tz>) -> String {
    format!(
        "{}. {} {} um {:02}:{:02}",
        at.day(),
        GERMAN_MONTHS[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    )
}

pub fn notification_subject(name: &str, company: &str) -> String {
    if company.trim().is_empty() {
        format!("Neue Kontaktanfrage von {}", name)
    } else {
        format!("Neue Kontaktanfrage von {} ({})", name, company)
    }
}

fn improvements_text(form: &ContactRequest) -> String {
    form.improvements
        .iter()
        .map(|id| improvement_label(id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn future_start_text(form: &ContactRequest) -> String {
    form.future_start
        .as_ref()
        .map(|value| future_start_label(&value.as_key()).to_string())
        .unwrap_or_default()
}

/// Internal notification sent to the business inbox.
pub fn render_notification(form: &ContactRequest, received_at: &str) -> EmailContent {
    let name = if form.name.trim().is_empty() {
        "Nicht angegeben"
    } else {
        form.name.as_str()
    };
    let improvements = improvements_text(form);
    let future_start = future_start_text(form);

    let marketing_status_html = match form.has_marketing {
        Some(true) => "✅ Bereits aktiv".to_string(),
        Some(false) => "🚀 Noch nicht gestartet".to_string(),
        None => "Nicht angegeben".to_string(),
    };

    let company_row = if form.company.trim().is_empty() {
        String::new()
    } else {
        format!(
            r#"      <tr>
        <td style="padding: 10px 0; font-weight: 600; color: #4b5563;">Firma:</td>
        <td style="padding: 10px 0; color: #1f2937;">{}</td>
      </tr>
"#,
            escape_html(&form.company)
        )
    };

    let phone_row = if form.phone.trim().is_empty() {
        String::new()
    } else {
        format!(
            r#"      <tr>
        <td style="padding: 10px 0; font-weight: 600; color: #4b5563;">Telefon:</td>
        <td style="padding: 10px 0; color: #1f2937;"><a href="tel:{phone}" style="color: #6366f1; text-decoration: none;">{phone}</a></td>
      </tr>
"#,
            phone = escape_html(&form.phone)
        )
    };

    let improvements_row = if form.has_marketing == Some(true) && !improvements.is_empty() {
        format!(
            r#"      <tr>
        <td style="padding: 10px 0; font-weight: 600; color: #4b5563;">Optimierungswünsche:</td>
        <td style="padding: 10px 0; color: #1f2937;">{}</td>
      </tr>
"#,
            escape_html(&improvements)
        )
    } else {
        String::new()
    };

    let future_start_row = if form.has_marketing == Some(false) && !future_start.is_empty() {
        format!(
            r#"      <tr>
        <td style="padding: 10px 0; font-weight: 600; color: #4b5563;">Zukunftspläne:</td>
        <td style="padding: 10px 0; color: #1f2937;">{}</td>
      </tr>
"#,
            escape_html(&future_start)
        )
    } else {
        String::new()
    };

    let budget_row = match form.budget.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => format!(
            r#"      <tr>
        <td style="padding: 10px 0; font-weight: 600; color: #4b5563;">Budget:</td>
        <td style="padding: 10px 0; color: #1f2937;">{}</td>
      </tr>
"#,
            escape_html(budget_label(id))
        ),
        None => String::new(),
    };

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Neue Kontaktanfrage</title>
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: linear-gradient(135deg, #6366f1 0%, #8b5cf6 100%); padding: 30px; border-radius: 10px 10px 0 0; text-align: center;">
    <h1 style="color: white; margin: 0; font-size: 24px;">Neue Kontaktanfrage</h1>
  </div>

  <div style="background: #f9fafb; padding: 30px; border-radius: 0 0 10px 10px; border: 1px solid #e5e7eb;">
    <h2 style="color: #1f2937; margin-top: 0; font-size: 20px; border-bottom: 2px solid #6366f1; padding-bottom: 10px;">Kontaktdaten</h2>
    <table style="width: 100%; border-collapse: collapse; margin-bottom: 30px;">
      <tr>
        <td style="padding: 10px 0; font-weight: 600; color: #4b5563; width: 150px;">Name:</td>
        <td style="padding: 10px 0; color: #1f2937;">{name}</td>
      </tr>
{company_row}      <tr>
        <td style="padding: 10px 0; font-weight: 600; color: #4b5563;">E-Mail:</td>
        <td style="padding: 10px 0; color: #1f2937;"><a href="mailto:{email}" style="color: #6366f1; text-decoration: none;">{email}</a></td>
      </tr>
{phone_row}    </table>

    <h2 style="color: #1f2937; margin-top: 30px; font-size: 20px; border-bottom: 2px solid #6366f1; padding-bottom: 10px;">Marketing-Informationen</h2>
    <table style="width: 100%; border-collapse: collapse; margin-bottom: 30px;">
      <tr>
        <td style="padding: 10px 0; font-weight: 600; color: #4b5563; width: 150px;">Marketing-Status:</td>
        <td style="padding: 10px 0; color: #1f2937;">{marketing_status}</td>
      </tr>
{improvements_row}{future_start_row}{budget_row}    </table>

    <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #e5e7eb; color: #6b7280; font-size: 14px;">
      <p style="margin: 0;">Anfrage erhalten am: <strong>{received_at}</strong></p>
    </div>
  </div>
</body>
</html>
"#,
        name = escape_html(name),
        email = escape_html(&form.email),
        company_row = company_row,
        phone_row = phone_row,
        marketing_status = marketing_status_html,
        improvements_row = improvements_row,
        future_start_row = future_start_row,
        budget_row = budget_row,
        received_at = received_at,
    );

    let company_line = if form.company.trim().is_empty() {
        String::new()
    } else {
        format!("Firma: {}\n", form.company)
    };
    let phone_line = if form.phone.trim().is_empty() {
        String::new()
    } else {
        format!("Telefon: {}\n", form.phone)
    };
    let improvements_line = if form.has_marketing == Some(true) && !improvements.is_empty() {
        format!("Optimierungswünsche: {}\n", improvements)
    } else {
        String::new()
    };
    let future_start_line = if form.has_marketing == Some(false) && !future_start.is_empty() {
        format!("Zukunftspläne: {}\n", future_start)
    } else {
        String::new()
    };
    let budget_line = match form.budget.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => format!("Budget: {}\n", budget_label(id)),
        None => String::new(),
    };

    let text = format!(
        "Neue Kontaktanfrage\n\n\
         Kontaktdaten:\n\
         -----------\n\
         Name: {name}\n\
         {company_line}E-Mail: {email}\n\
         {phone_line}\n\
         Marketing-Informationen:\n\
         -----------------------\n\
         Marketing-Status: {marketing_status}\n\
         {improvements_line}{future_start_line}{budget_line}\n\
         Anfrage erhalten am: {received_at}",
        name = name,
        company_line = company_line,
        email = form.email,
        phone_line = phone_line,
        marketing_status = marketing_status_label(form.has_marketing),
        improvements_line = improvements_line,
        future_start_line = future_start_line,
        budget_line = budget_line,
        received_at = received_at,
    );

    EmailContent { html, text }
}

/// Confirmation sent to the submitter's own address.
pub fn render_confirmation(name: &str) -> EmailContent {
    let salutation = if name.trim().is_empty() { "Sie" } else { name };

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Ihre Anfrage wurde empfangen</title>
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: linear-gradient(135deg, #6366f1 0%, #8b5cf6 100%); padding: 30px; border-radius: 10px 10px 0 0; text-align: center;">
    <h1 style="color: white; margin: 0; font-size: 24px;">Anfrage empfangen</h1>
  </div>

  <div style="background: #f9fafb; padding: 30px; border-radius: 0 0 10px 10px; border: 1px solid #e5e7eb;">
    <p style="font-size: 18px; color: #1f2937; margin-top: 0;">Hallo {salutation},</p>
    <p style="color: #4b5563;">vielen Dank für Ihre Nachricht. Wir haben Ihre Anfrage erhalten und melden uns <strong>innerhalb von 24 Stunden</strong> bei Ihnen.</p>
    <p style="color: #4b5563;">Bei Rückfragen erreichen Sie uns unter <a href="mailto:kontakt@franco-consulting.com" style="color: #6366f1; text-decoration: none;">kontakt@franco-consulting.com</a>.</p>
    <p style="color: #4b5563; margin-bottom: 0;">Mit freundlichen Grüßen<br><strong>Ihr Team von Franco Consulting</strong></p>
  </div>
</body>
</html>
"#,
        salutation = escape_html(salutation),
    );

    let text = format!(
        "Hallo {salutation},\n\n\
         vielen Dank für Ihre Nachricht. Wir haben Ihre Anfrage erhalten und melden uns innerhalb von 24 Stunden bei Ihnen.\n\n\
         Bei Rückfragen erreichen Sie uns unter kontakt@franco-consulting.com.\n\n\
         Mit freundlichen Grüßen\n\
         Ihr Team von Franco Consulting",
        salutation = salutation,
    );

    EmailContent { html, text }
}
