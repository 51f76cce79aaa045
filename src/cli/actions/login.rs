use crate::{
    cli::{
        actions::{conclude, Action, Context},
        globals::GlobalArgs,
    },
    handlers::{submit_login, LOGIN_FORM},
    ui::{Form, Page},
};
use anyhow::{bail, Result};
use secrecy::ExposeSecret;

/// Handle the login action
/// # Errors
/// Returns an error if a session already exists or the credentials were rejected.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Login { username, password } = action else {
        bail!("login handler received another action");
    };

    let context = Context::new(globals)?;

    if !context.session.require_guest() {
        bail!("already signed in, run `tavola logout` first");
    }

    let mut page = Page::new().with_loading_overlay().with_form(
        Form::new(LOGIN_FORM, "Login")
            .with_field("username", username)
            .with_field("password", password.expose_secret()),
    );

    let outcome = submit_login(&context.session, &mut page).await;

    conclude(&context, &page, LOGIN_FORM, outcome)
}
