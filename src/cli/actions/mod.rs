pub mod login;
pub mod session;
pub mod signup;
pub mod validate;

mod run;

use crate::{
    api::{ApiClient, ApiConfig},
    cli::{
        console::{render_form, ConsoleNotifier},
        globals::GlobalArgs,
    },
    handlers::SubmitOutcome,
    session::Session,
    storage::{FileStore, SharedStore},
    ui::{Feedback, History, Page, UnauthorizedPolicy},
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use std::sync::Arc;

#[derive(Debug)]
pub enum Action {
    Signup {
        username: String,
        email: String,
        password: SecretString,
        role: String,
    },
    Login {
        username: String,
        password: SecretString,
    },
    Logout,
    Whoami,
    Validate {
        password: Option<SecretString>,
        email: Option<String>,
        phone: Option<String>,
    },
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> Result<()> {
        run::execute(self, globals).await
    }
}

/// Session wiring for one CLI invocation: a file-backed store, console toasts, and a
/// recorded navigation history. A terminal has no page to leave, so a 401 only notifies.
pub struct Context {
    pub session: Session,
    pub history: History,
}

impl Context {
    /// # Errors
    /// Returns an error if the API URL is invalid or the HTTP client cannot be built.
    pub fn new(globals: &GlobalArgs) -> Result<Self> {
        let store: SharedStore = Arc::new(FileStore::new(&globals.session_file));

        let mut config = ApiConfig::new(&globals.api_url)?;
        if let Some(timeout) = globals.timeout {
            config = config.with_timeout(timeout);
        }
        let api = ApiClient::new(config, Arc::clone(&store))?;

        let history = History::new();
        let feedback = Feedback::new(Arc::new(ConsoleNotifier), Arc::new(history.clone()))
            .with_unauthorized_policy(UnauthorizedPolicy::NotifyOnly);

        Ok(Self {
            session: Session::new(store, api, feedback),
            history,
        })
    }

    /// Absolute URL for a navigation destination.
    #[must_use]
    pub fn location(&self, destination: &str) -> String {
        self.session.api().config().url(destination)
    }
}

/// Prints what the handler rendered and turns the outcome into an exit status.
fn conclude(context: &Context, page: &Page, form_id: &str, outcome: SubmitOutcome) -> Result<()> {
    render_form(page, form_id);

    match outcome {
        SubmitOutcome::SignedIn { destination } => {
            println!("Signed in. Continue at {}", context.location(&destination));
            Ok(())
        }
        SubmitOutcome::Accepted => {
            println!("Request accepted.");
            Ok(())
        }
        SubmitOutcome::Ignored => Err(anyhow!("a submission is already in progress")),
        SubmitOutcome::Invalid(message) => Err(anyhow!(message)),
        SubmitOutcome::Failed(error) => Err(error.into()),
    }
}
