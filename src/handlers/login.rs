//! Login submit. Bad credentials come back as 401 and are shown on the form; every
//! other failure goes through the shared status mapping.

use super::{complete_sign_in, secret, trimmed, SubmitOutcome, REQUIRED_FIELDS_MESSAGE};
use crate::{
    api::LOGIN_ENDPOINT,
    session::Session,
    ui::{AlertKind, Page},
};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::instrument;

pub const LOGIN_FORM: &str = "loginForm";

const SUBMIT_LABEL: &str = "Login";
const BUSY_LABEL: &str = "Signing In...";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Handles a submit of `loginForm`.
#[instrument(skip_all)]
pub async fn submit_login(session: &Session, page: &mut Page) -> SubmitOutcome {
    if page.submit_button(LOGIN_FORM).is_some_and(|button| button.disabled) {
        return SubmitOutcome::Ignored;
    }

    let username = trimmed(page, "username");
    let password = secret(page, "password");

    if username.is_empty() || password.expose_secret().is_empty() {
        page.show_alert(LOGIN_FORM, REQUIRED_FIELDS_MESSAGE, AlertKind::Error);
        return SubmitOutcome::Invalid(REQUIRED_FIELDS_MESSAGE.to_string());
    }

    page.clear_all_errors(LOGIN_FORM);
    page.begin_submit(LOGIN_FORM, BUSY_LABEL);
    page.show_loading();

    let request = LoginRequest {
        username: &username,
        password: password.expose_secret(),
    };
    let result = session.api().post(LOGIN_ENDPOINT, &request, false).await;

    let outcome = match result {
        Ok(data) => complete_sign_in(session, page, LOGIN_FORM, data),
        // 401 here means wrong credentials, not an expired session.
        Err(error) if error.status == Some(401) => {
            page.show_alert(LOGIN_FORM, &error.message, AlertKind::Error);
            SubmitOutcome::Failed(error)
        }
        Err(error) => {
            session.feedback().handle_api_error(&error, Some(&mut *page));
            SubmitOutcome::Failed(error)
        }
    };

    page.hide_loading();
    page.end_submit(LOGIN_FORM, SUBMIT_LABEL);
    outcome
}
