//! Terminal rendering for the browser-side capabilities: toasts and page feedback go
//! to stderr so stdout carries only command results.

use crate::ui::{AlertKind, Notifier, Page};
use std::time::Duration;

/// Prints toasts immediately; there is nothing to dismiss on a terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_toast(&self, message: &str, kind: AlertKind, _duration: Duration) {
        eprintln!("[{}] {message}", kind.as_str());
    }
}

/// Prints the form's alert and any inline field errors.
pub fn render_form(page: &Page, form_id: &str) {
    let Some(form) = page.form(form_id) else {
        return;
    };

    if let Some(alert) = form.alert() {
        eprintln!("[{}] {}", alert.kind.as_str(), alert.message);
    }

    for field in form.fields.iter().filter(|field| field.invalid) {
        match &field.message {
            Some(message) => eprintln!("  {}: {message}", field.id),
            None => eprintln!("  {}: invalid", field.id),
        }
    }
}
