use serde::Serialize;
use serde_json::Value;

/// The one message every submission gets back, valid or not. Matching the
/// page's own fallback text keeps the deny path indistinguishable.
pub const DENY_MESSAGE: &str = "Usuario o contraseña incorrectos. Inténtalo de nuevo.";

/// Credentials as extracted from a submission body.
///
/// Extraction is deliberately tolerant: a body that is not JSON, not an
/// object, or carries missing or non-string fields degrades to empty
/// strings. The endpoint never rejects input — malformed submissions are
/// attacker behavior worth recording too.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginAttempt {
    pub username: String,
    pub password: String,
}

impl LoginAttempt {
    /// Pulls `username` and `password` out of a decoded body.
    ///
    /// The username is trimmed of surrounding whitespace; the password is
    /// kept verbatim, since its exact bytes may be the whole point of the
    /// capture.
    pub fn from_value(value: &Value) -> Self {
        let username = value
            .get("username")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        let password = value
            .get("password")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self { username, password }
    }
}

/// Fixed deny payload returned for every submission.
#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: &'static str,
}

impl LoginResponse {
    pub fn deny() -> Self {
        Self {
            success: false,
            message: DENY_MESSAGE,
        }
    }
}
