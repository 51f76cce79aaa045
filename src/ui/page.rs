//! In-memory document the handlers read input from and render feedback into. It models
//! only what the auth pages use: forms with named fields, a submit button, an alert slot,
//! and the loading overlay. Lookups of missing elements are silent no-ops, matching how
//! the pages behave when markup is absent.

use std::time::Duration;
use tokio::time::Instant;

/// Alerts disappear on their own after this long.
pub const ALERT_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Supported alert and toast styles.
pub enum AlertKind {
    Info,
    Success,
    Warning,
    Error,
}

impl AlertKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Info => "info",
            AlertKind::Success => "success",
            AlertKind::Warning => "warning",
            AlertKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Field {
    pub id: String,
    pub value: String,
    /// The `error` marker on the input itself.
    pub invalid: bool,
    /// The message node rendered beside the input.
    pub message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

#[derive(Clone, Debug)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
    shown_at: Instant,
}

impl Alert {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= ALERT_LIFETIME
    }
}

#[derive(Clone, Debug)]
pub struct Form {
    pub id: String,
    pub fields: Vec<Field>,
    pub submit: SubmitButton,
    alert: Option<Alert>,
}

impl Form {
    pub fn new(id: impl Into<String>, submit_label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            submit: SubmitButton {
                label: submit_label.into(),
                disabled: false,
            },
            alert: None,
        }
    }

    #[must_use]
    pub fn with_field(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            id: id.into(),
            value: value.into(),
            ..Field::default()
        });
        self
    }

    /// The alert currently on screen, if it has not expired.
    #[must_use]
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref().filter(|alert| !alert.is_expired())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Page {
    forms: Vec<Form>,
    /// `None` when the page has no loading overlay element.
    loading: Option<bool>,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_form(mut self, form: Form) -> Self {
        self.forms.push(form);
        self
    }

    #[must_use]
    pub fn with_loading_overlay(mut self) -> Self {
        self.loading = Some(false);
        self
    }

    #[must_use]
    pub fn form(&self, form_id: &str) -> Option<&Form> {
        self.forms.iter().find(|form| form.id == form_id)
    }

    pub fn form_mut(&mut self, form_id: &str) -> Option<&mut Form> {
        self.forms.iter_mut().find(|form| form.id == form_id)
    }

    #[must_use]
    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.forms
            .iter()
            .flat_map(|form| form.fields.iter())
            .find(|field| field.id == field_id)
    }

    fn field_mut(&mut self, field_id: &str) -> Option<&mut Field> {
        self.forms
            .iter_mut()
            .flat_map(|form| form.fields.iter_mut())
            .find(|field| field.id == field_id)
    }

    #[must_use]
    pub fn field_value(&self, field_id: &str) -> Option<&str> {
        self.field(field_id).map(|field| field.value.as_str())
    }

    pub fn set_field_value(&mut self, field_id: &str, value: impl Into<String>) {
        if let Some(field) = self.field_mut(field_id) {
            field.value = value.into();
        }
    }

    /// Marks a field invalid and replaces its message node. An empty message marks the
    /// field without rendering a node.
    pub fn show_field_error(&mut self, field_id: &str, message: &str) {
        let Some(field) = self.field_mut(field_id) else {
            return;
        };
        field.invalid = true;
        field.message = (!message.is_empty()).then(|| message.to_string());
    }

    pub fn clear_field_error(&mut self, field_id: &str) {
        if let Some(field) = self.field_mut(field_id) {
            field.invalid = false;
            field.message = None;
        }
    }

    pub fn clear_all_errors(&mut self, form_id: &str) {
        if let Some(form) = self.form_mut(form_id) {
            for field in &mut form.fields {
                field.invalid = false;
                field.message = None;
            }
        }
    }

    #[must_use]
    pub fn field_error(&self, field_id: &str) -> Option<&str> {
        self.field(field_id).and_then(|field| field.message.as_deref())
    }

    /// Replaces any alert on the form with a new one.
    pub fn show_alert(&mut self, form_id: &str, message: &str, kind: AlertKind) {
        if let Some(form) = self.form_mut(form_id) {
            form.alert = Some(Alert {
                message: message.to_string(),
                kind,
                shown_at: Instant::now(),
            });
        }
    }

    #[must_use]
    pub fn alert(&self, form_id: &str) -> Option<&Alert> {
        self.form(form_id).and_then(Form::alert)
    }

    #[must_use]
    pub fn submit_button(&self, form_id: &str) -> Option<&SubmitButton> {
        self.form(form_id).map(|form| &form.submit)
    }

    /// Disables the submit button and swaps its label; returns `false` when the form is
    /// missing or the button is already disabled.
    pub fn begin_submit(&mut self, form_id: &str, busy_label: &str) -> bool {
        match self.form_mut(form_id) {
            Some(form) if !form.submit.disabled => {
                form.submit.disabled = true;
                form.submit.label = busy_label.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn end_submit(&mut self, form_id: &str, label: &str) {
        if let Some(form) = self.form_mut(form_id) {
            form.submit.disabled = false;
            form.submit.label = label.to_string();
        }
    }

    pub fn show_loading(&mut self) {
        if let Some(active) = self.loading.as_mut() {
            *active = true;
        }
    }

    pub fn hide_loading(&mut self) {
        if let Some(active) = self.loading.as_mut() {
            *active = false;
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_page() -> Page {
        Page::new().with_form(
            Form::new("signupForm", "Sign Up")
                .with_field("username", "ana")
                .with_field("email", "ana@bistro.dev"),
        )
    }

    #[test]
    fn field_errors_replace_and_clear() {
        let mut page = signup_page();

        page.show_field_error("email", "Enter a valid email address.");
        page.show_field_error("email", "This email is taken.");
        assert_eq!(page.field_error("email"), Some("This email is taken."));
        assert!(page.field("email").is_some_and(|f| f.invalid));

        page.clear_field_error("email");
        page.clear_field_error("email");
        assert_eq!(page.field_error("email"), None);
        assert!(page.field("email").is_some_and(|f| !f.invalid));
    }

    #[test]
    fn empty_message_marks_without_node() {
        let mut page = signup_page();
        page.show_field_error("username", "");
        assert!(page.field("username").is_some_and(|f| f.invalid));
        assert_eq!(page.field_error("username"), None);
    }

    #[test]
    fn missing_elements_are_ignored() {
        let mut page = signup_page();
        page.show_field_error("phone", "nope");
        page.clear_all_errors("loginForm");
        page.show_alert("loginForm", "nope", AlertKind::Error);
        page.show_loading();
        assert!(page.field("phone").is_none());
        assert!(page.alert("loginForm").is_none());
        assert!(!page.is_loading());
    }

    #[test]
    fn clear_all_errors_resets_every_field() {
        let mut page = signup_page();
        page.show_field_error("username", "Taken.");
        page.show_field_error("email", "Invalid.");
        page.clear_all_errors("signupForm");
        assert_eq!(page.field_error("username"), None);
        assert_eq!(page.field_error("email"), None);
    }

    #[test]
    fn submit_button_guards_duplicate_submission() {
        let mut page = signup_page();
        assert!(page.begin_submit("signupForm", "Creating Account..."));
        assert!(!page.begin_submit("signupForm", "Creating Account..."));
        assert_eq!(
            page.submit_button("signupForm").map(|b| b.label.as_str()),
            Some("Creating Account...")
        );

        page.end_submit("signupForm", "Sign Up");
        assert!(page.submit_button("signupForm").is_some_and(|b| !b.disabled));
    }

    #[test]
    fn loading_overlay_toggles_when_present() {
        let mut page = signup_page().with_loading_overlay();
        page.show_loading();
        assert!(page.is_loading());
        page.hide_loading();
        assert!(!page.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn alerts_replace_and_expire() {
        let mut page = signup_page();
        page.show_alert("signupForm", "first", AlertKind::Info);
        page.show_alert("signupForm", "second", AlertKind::Error);
        assert_eq!(
            page.alert("signupForm").map(|a| a.message.as_str()),
            Some("second")
        );

        tokio::time::advance(ALERT_LIFETIME).await;
        assert!(page.alert("signupForm").is_none());
    }
}
