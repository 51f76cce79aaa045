//! Submit handlers for the auth pages. Each reads its form from a [`Page`], validates
//! locally, calls the API once, and renders the outcome back into the page. The submit
//! button stays disabled while the request is in flight; a submit arriving while it is
//! disabled is ignored.
//!
//! Passwords are read into `SecretString` and only exposed to build the request body.

mod login;
mod signup;

pub use login::{submit_login, LOGIN_FORM};
pub use signup::{submit_signup, SIGNUP_FORM};

use crate::{
    api::ErrorEnvelope,
    session::{Session, User},
    ui::{AlertKind, Page},
};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// What a submit attempt ended in.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The submit button was disabled; nothing happened.
    Ignored,
    /// Local validation failed; no request was sent.
    Invalid(String),
    Failed(ErrorEnvelope),
    /// The API accepted the request but returned no session.
    Accepted,
    SignedIn { destination: String },
}

/// Success body of signup and login. Kept as raw values so a session that is offered
/// but malformed can be told apart from no session at all.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<Value>,
    #[serde(default)]
    user: Option<Value>,
    #[serde(default)]
    redirect_url: Option<Value>,
}

/// Reads and trims a field; missing fields read as empty.
fn trimmed(page: &Page, field_id: &str) -> String {
    page.field_value(field_id)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn secret(page: &Page, field_id: &str) -> SecretString {
    SecretString::from(page.field_value(field_id).unwrap_or_default())
}

/// Stores the session from a signup or login response and navigates to the landing
/// page: the server's `redirect_url`, else the stored dashboard.
fn complete_sign_in(
    session: &Session,
    page: &mut Page,
    form_id: &str,
    data: Value,
) -> SubmitOutcome {
    let response: AuthResponse = match serde_json::from_value(data) {
        Ok(response) => response,
        Err(err) => {
            debug!("auth response carries no session: {err}");
            return SubmitOutcome::Accepted;
        }
    };

    let (Some(token), Some(user)) = (response.token, response.user) else {
        return SubmitOutcome::Accepted;
    };

    let token = match token {
        Value::String(token) if !token.is_empty() => token,
        Value::String(_) => return SubmitOutcome::Accepted,
        other => {
            warn!("auth response token is not a string: {other}");
            return unreadable_session(page, form_id);
        }
    };

    let user: User = match serde_json::from_value(user) {
        Ok(user) => user,
        Err(err) => {
            warn!("auth response user did not decode: {err}");
            return unreadable_session(page, form_id);
        }
    };

    if let Err(err) = session.establish(&SecretString::from(token), &user) {
        error!("failed to store session: {err}");
        let failure = ErrorEnvelope::serialization("Could not save your session. Please try again.");
        page.show_alert(form_id, &failure.message, AlertKind::Error);
        return SubmitOutcome::Failed(failure);
    }

    let destination = response
        .redirect_url
        .and_then(|url| url.as_str().map(str::to_string))
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| session.dashboard_url());
    session.feedback().navigator().navigate(&destination);

    SubmitOutcome::SignedIn { destination }
}

fn unreadable_session(page: &mut Page, form_id: &str) -> SubmitOutcome {
    let failure = ErrorEnvelope::parse(200);
    page.show_alert(form_id, &failure.message, AlertKind::Error);
    SubmitOutcome::Failed(failure)
}
