use serde::{Deserialize, Serialize};

/// Payload of `POST /api/contact`. Field-level validation happens in the
/// handler, so everything the client might omit is defaulted here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub has_marketing: Option<bool>,
    #[serde(default)]
    pub future_start: Option<FutureStartValue>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub budget: Option<String>,
}

/// The wizard sends `futureStart` either as the literal `true` or as a
/// string id, so both shapes must deserialize.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FutureStartValue {
    Flag(bool),
    Text(String),
}

impl FutureStartValue {
    /// Lookup key for the label table. Booleans fold to "true"/"false" the
    /// way JS object keys coerce them; "false" is not in the table and
    /// passes through raw.
    pub fn as_key(&self) -> String {
        match self {
            FutureStartValue::Flag(flag) => flag.to_string(),
            FutureStartValue::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "emailId", skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}
