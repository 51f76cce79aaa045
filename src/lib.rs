//! Client session and request layer for the Tavola restaurant booking API.
//!
//! ## Core Flows
//!
//! ### Signup & Login
//!
//! 1. **Validate:** The handler reads the form fields and rejects missing values or short
//!    passwords before any request is made.
//! 2. **Submit:** The request dispatcher POSTs the form as JSON to `/api/auth/signup` (or
//!    `/api/auth/login/`) and normalizes the outcome into data or an [`ErrorEnvelope`].
//! 3. **Persist:** On success the returned token and user are stored together and the client
//!    navigates to the role dashboard.
//!
//! ### Logout
//!
//! The remote logout call is best-effort. Local state is always released and the client is
//! sent back to `/login/`.
//!
//! Browser capabilities (local storage, navigation, toasts, form elements) are injected as
//! traits so the same handlers run behind the CLI and in tests.

pub mod api;
pub mod cli;
pub mod handlers;
pub mod session;
pub mod storage;
pub mod ui;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use api::{ApiClient, ApiConfig, ApiRequest, ErrorEnvelope, FailureKind};
pub use session::{Role, Session, User, UserProfile};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use ui::{AlertKind, Feedback, History, Navigator, Notifier, Page, ToastContainer};

/// Destination used whenever a guard or logout needs the login page.
pub const LOGIN_PATH: &str = "/login/";
