//! Signup submit: required fields and password length are checked locally, then the
//! account is created with the chosen role (owner unless the form says otherwise).

use super::{complete_sign_in, secret, trimmed, SubmitOutcome, REQUIRED_FIELDS_MESSAGE};
use crate::{
    api::{ErrorEnvelope, FailureKind, DEFAULT_FAILURE_MESSAGE, SIGNUP_ENDPOINT},
    session::{Role, Session},
    ui::{AlertKind, Page, MIN_PASSWORD_LENGTH},
};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::instrument;

pub const SIGNUP_FORM: &str = "signupForm";

const SUBMIT_LABEL: &str = "Sign Up";
const BUSY_LABEL: &str = "Creating Account...";

#[derive(Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    role: &'a str,
}

/// Handles a submit of `signupForm`.
#[instrument(skip_all)]
pub async fn submit_signup(session: &Session, page: &mut Page) -> SubmitOutcome {
    if page.submit_button(SIGNUP_FORM).is_some_and(|button| button.disabled) {
        return SubmitOutcome::Ignored;
    }

    let username = trimmed(page, "username");
    let email = trimmed(page, "email");
    let password = secret(page, "password");
    let role = Some(trimmed(page, "role"))
        .filter(|role| !role.is_empty())
        .map_or(Role::Owner, Role::from);

    if username.is_empty() || email.is_empty() || password.expose_secret().is_empty() {
        return invalid(page, REQUIRED_FIELDS_MESSAGE);
    }

    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return invalid(
            page,
            &format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
        );
    }

    page.clear_all_errors(SIGNUP_FORM);
    page.begin_submit(SIGNUP_FORM, BUSY_LABEL);

    let request = SignupRequest {
        username: &username,
        email: &email,
        password: password.expose_secret(),
        role: role.as_str(),
    };
    let result = session.api().post(SIGNUP_ENDPOINT, &request, false).await;

    let outcome = match result {
        Ok(data) => complete_sign_in(session, page, SIGNUP_FORM, data),
        Err(error) => {
            if error.has_field_errors() {
                session.feedback().handle_api_error(&error, Some(&mut *page));
            }
            page.show_alert(SIGNUP_FORM, &failure_message(&error), AlertKind::Error);
            SubmitOutcome::Failed(error)
        }
    };

    page.end_submit(SIGNUP_FORM, SUBMIT_LABEL);
    outcome
}

fn invalid(page: &mut Page, message: &str) -> SubmitOutcome {
    page.show_alert(SIGNUP_FORM, message, AlertKind::Error);
    SubmitOutcome::Invalid(message.to_string())
}

fn failure_message(error: &ErrorEnvelope) -> String {
    match error.kind {
        FailureKind::Http if error.message == DEFAULT_FAILURE_MESSAGE => {
            "Signup failed".to_string()
        }
        FailureKind::Http | FailureKind::Network | FailureKind::Timeout => error.message.clone(),
        FailureKind::Parse | FailureKind::Serialization => {
            "Failed to create account. Please try again.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_message_prefers_server_reason() {
        let error = ErrorEnvelope::http(409, json!({"message": "Username taken"}));
        assert_eq!(failure_message(&error), "Username taken");

        let error = ErrorEnvelope::http(400, json!({"username": ["Taken."]}));
        assert_eq!(failure_message(&error), "Signup failed");

        assert_eq!(
            failure_message(&ErrorEnvelope::parse(502)),
            "Failed to create account. Please try again."
        );
    }
}
