use std::sync::{Arc, Mutex};
use tracing::info;

/// Full-page navigation. Implementations leave the current page; nothing after a
/// `navigate` call should assume the page is still shown.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: &str);
}

/// Navigator that records every destination, newest last.
#[derive(Clone, Debug, Default)]
pub struct History {
    visits: Arc<Mutex<Vec<String>>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.visits
            .lock()
            .ok()
            .and_then(|visits| visits.last().cloned())
    }

    #[must_use]
    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .map(|visits| visits.clone())
            .unwrap_or_default()
    }
}

impl Navigator for History {
    fn navigate(&self, destination: &str) {
        info!("navigating to {destination}");
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(destination.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_records_in_order() {
        let history = History::new();
        assert_eq!(history.current(), None);

        history.navigate("/login/");
        history.navigate("/owner-dashboard/");

        assert_eq!(history.current().as_deref(), Some("/owner-dashboard/"));
        assert_eq!(history.visits(), vec!["/login/", "/owner-dashboard/"]);
    }
}
