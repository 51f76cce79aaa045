//! Page-entry guards. Each returns `true` when the page may continue, otherwise it
//! navigates away and returns `false`. UX-only: access control lives on the API.

use super::{Role, Session};
use crate::{
    ui::{AlertKind, ACCESS_DENIED_MESSAGE},
    LOGIN_PATH,
};
use tracing::debug;

impl Session {
    /// Sends unauthenticated clients to the login page.
    pub fn require_auth(&self) -> bool {
        if self.is_authenticated() {
            return true;
        }
        debug!("guard: not authenticated");
        self.feedback().navigator().navigate(LOGIN_PATH);
        false
    }

    /// Sends signed-in clients to their dashboard, for login and signup pages.
    pub fn require_guest(&self) -> bool {
        if !self.is_authenticated() {
            return true;
        }
        debug!("guard: already authenticated");
        self.redirect_to_dashboard();
        false
    }

    /// Requires a signed-in user with `role`; anyone else is told access is denied and
    /// sent to their own dashboard.
    pub fn require_role(&self, role: &Role) -> bool {
        if !self.is_authenticated() {
            self.feedback().navigator().navigate(LOGIN_PATH);
            return false;
        }

        if self.user_role().as_ref() != Some(role) {
            debug!("guard: role {role} required");
            self.feedback()
                .notifier()
                .notify(ACCESS_DENIED_MESSAGE, AlertKind::Error);
            self.redirect_to_dashboard();
            return false;
        }

        true
    }
}
