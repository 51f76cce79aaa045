//! Maps request failures to what the user sees. Status classes decide between inline
//! field errors, a toast, or a toast followed by a trip to the login page.

use super::{navigation::Navigator, page::AlertKind, page::Page, toast::Notifier};
use crate::{api::ErrorEnvelope, LOGIN_PATH};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tokio::{runtime::Handle, time::sleep};
use tracing::warn;

/// Delay between the "please login" toast and the redirect.
pub const UNAUTHORIZED_REDIRECT_DELAY: Duration = Duration::from_secs(2);

pub const UNAUTHORIZED_MESSAGE: &str = "Authentication required. Please login.";
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied";
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// What to do after a 401 on any call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnauthorizedPolicy {
    RedirectToLogin { delay: Duration },
    NotifyOnly,
}

impl Default for UnauthorizedPolicy {
    fn default() -> Self {
        Self::RedirectToLogin {
            delay: UNAUTHORIZED_REDIRECT_DELAY,
        }
    }
}

/// The action taken by [`Feedback::handle_api_error`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedbackAction {
    /// Inline errors were rendered for these field ids.
    FieldErrors(Vec<String>),
    Toast(String),
    ToastThenRedirect {
        message: String,
        destination: String,
    },
}

#[derive(Clone)]
pub struct Feedback {
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    unauthorized: UnauthorizedPolicy,
}

impl Feedback {
    pub fn new(notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            notifier,
            navigator,
            unauthorized: UnauthorizedPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_unauthorized_policy(mut self, policy: UnauthorizedPolicy) -> Self {
        self.unauthorized = policy;
        self
    }

    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Renders a failed request. With a page, 400 field data becomes inline errors;
    /// without one, the first field message is shown as a toast.
    pub fn handle_api_error(
        &self,
        error: &ErrorEnvelope,
        page: Option<&mut Page>,
    ) -> FeedbackAction {
        warn!("API error: {error}");

        match (error.status, &error.data) {
            (Some(400), Some(Value::Object(fields))) => match page {
                Some(page) => {
                    for (field, value) in fields {
                        page.show_field_error(field, &first_message(value));
                    }
                    FeedbackAction::FieldErrors(fields.keys().cloned().collect())
                }
                None => {
                    let message = fields
                        .values()
                        .next()
                        .map(first_message)
                        .filter(|message| !message.is_empty())
                        .unwrap_or_else(|| error.message.clone());
                    self.toast(message)
                }
            },
            (Some(401), _) => {
                self.notifier.notify(UNAUTHORIZED_MESSAGE, AlertKind::Error);
                match self.unauthorized {
                    UnauthorizedPolicy::RedirectToLogin { delay } => {
                        self.redirect_after(delay, LOGIN_PATH);
                        FeedbackAction::ToastThenRedirect {
                            message: UNAUTHORIZED_MESSAGE.to_string(),
                            destination: LOGIN_PATH.to_string(),
                        }
                    }
                    UnauthorizedPolicy::NotifyOnly => {
                        FeedbackAction::Toast(UNAUTHORIZED_MESSAGE.to_string())
                    }
                }
            }
            (Some(403), _) => self.toast(ACCESS_DENIED_MESSAGE.to_string()),
            (Some(404), _) => self.toast(NOT_FOUND_MESSAGE.to_string()),
            (Some(status), _) if status >= 500 => self.toast(SERVER_ERROR_MESSAGE.to_string()),
            _ => {
                let message = if error.message.is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    error.message.clone()
                };
                self.toast(message)
            }
        }
    }

    fn toast(&self, message: String) -> FeedbackAction {
        self.notifier.notify(&message, AlertKind::Error);
        FeedbackAction::Toast(message)
    }

    /// Navigates after `delay` on the runtime, or right away when there is none.
    fn redirect_after(&self, delay: Duration, destination: &'static str) {
        let navigator = Arc::clone(&self.navigator);
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    sleep(delay).await;
                    navigator.navigate(destination);
                });
            }
            Err(_) => navigator.navigate(destination),
        }
    }
}

/// Field errors arrive either as a list of messages or as a single value.
fn first_message(value: &Value) -> String {
    let first = match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    };

    match first {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{navigation::History, page::Form, toast::ToastContainer};
    use serde_json::json;

    fn feedback() -> (Feedback, ToastContainer, History) {
        let toasts = ToastContainer::new();
        let history = History::new();
        let feedback = Feedback::new(Arc::new(toasts.clone()), Arc::new(history.clone()));
        (feedback, toasts, history)
    }

    fn signup_page() -> Page {
        Page::new().with_form(
            Form::new("signupForm", "Sign Up")
                .with_field("username", "ana")
                .with_field("email", "ana@bistro"),
        )
    }

    #[test]
    fn field_errors_go_inline_with_a_page() {
        let (feedback, toasts, _) = feedback();
        let mut page = signup_page();
        let error = ErrorEnvelope::http(
            400,
            json!({"username": ["A user with that username already exists."], "email": "Enter a valid email address."}),
        );

        let action = feedback.handle_api_error(&error, Some(&mut page));

        assert_eq!(
            action,
            FeedbackAction::FieldErrors(vec!["username".to_string(), "email".to_string()])
        );
        assert_eq!(
            page.field_error("username"),
            Some("A user with that username already exists.")
        );
        assert_eq!(page.field_error("email"), Some("Enter a valid email address."));
        assert!(toasts.messages().is_empty());
    }

    #[test]
    fn field_errors_become_one_toast_without_a_page() {
        let (feedback, toasts, _) = feedback();
        let error = ErrorEnvelope::http(
            400,
            json!({"password": ["This password is too common.", "Too short."], "email": ["Bad."]}),
        );

        let action = feedback.handle_api_error(&error, None);

        assert_eq!(
            action,
            FeedbackAction::Toast("This password is too common.".to_string())
        );
        assert_eq!(toasts.messages(), vec!["This password is too common."]);
    }

    #[test]
    fn status_classes_map_to_fixed_messages() {
        let cases = [
            (403, ACCESS_DENIED_MESSAGE),
            (404, NOT_FOUND_MESSAGE),
            (500, SERVER_ERROR_MESSAGE),
            (503, SERVER_ERROR_MESSAGE),
        ];

        for (status, expected) in cases {
            let (feedback, toasts, history) = feedback();
            let error = ErrorEnvelope::http(status, json!({"detail": "x"}));
            assert_eq!(
                feedback.handle_api_error(&error, None),
                FeedbackAction::Toast(expected.to_string())
            );
            assert_eq!(toasts.messages(), vec![expected]);
            assert!(history.visits().is_empty());
        }
    }

    #[test]
    fn other_failures_use_the_envelope_message() {
        let (feedback, toasts, _) = feedback();

        feedback.handle_api_error(&ErrorEnvelope::http(409, json!({"error": "Slot taken"})), None);
        feedback.handle_api_error(&ErrorEnvelope::network(), None);

        assert_eq!(toasts.messages(), vec!["Slot taken", "Network error"]);
    }

    #[tokio::test(start_paused = true)]
    async fn unauthorized_redirects_after_delay() {
        let (feedback, toasts, history) = feedback();
        let error = ErrorEnvelope::http(401, json!({"detail": "Invalid token."}));

        let action = feedback.handle_api_error(&error, None);

        assert!(matches!(action, FeedbackAction::ToastThenRedirect { .. }));
        assert_eq!(toasts.messages(), vec![UNAUTHORIZED_MESSAGE]);
        assert!(history.visits().is_empty());

        sleep(UNAUTHORIZED_REDIRECT_DELAY + Duration::from_millis(10)).await;
        assert_eq!(history.current().as_deref(), Some(LOGIN_PATH));
    }

    #[tokio::test(start_paused = true)]
    async fn notify_only_policy_keeps_the_page() {
        let (feedback, _, history) = feedback();
        let feedback = feedback.with_unauthorized_policy(UnauthorizedPolicy::NotifyOnly);

        let action =
            feedback.handle_api_error(&ErrorEnvelope::http(401, json!({})), None);

        assert_eq!(action, FeedbackAction::Toast(UNAUTHORIZED_MESSAGE.to_string()));
        sleep(Duration::from_secs(5)).await;
        assert!(history.visits().is_empty());
    }

    #[test]
    fn first_message_handles_shapes() {
        assert_eq!(first_message(&json!(["a", "b"])), "a");
        assert_eq!(first_message(&json!("plain")), "plain");
        assert_eq!(first_message(&json!([])), "");
        assert_eq!(first_message(&json!({"name": ["x"]})), r#"{"name":["x"]}"#);
    }
}
