use crate::{
    cli::{
        actions::{conclude, Action, Context},
        globals::GlobalArgs,
    },
    handlers::{submit_signup, SIGNUP_FORM},
    ui::{Form, Page},
};
use anyhow::{bail, Result};
use secrecy::ExposeSecret;

/// Handle the signup action
/// # Errors
/// Returns an error if a session already exists or the account could not be created.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Signup {
        username,
        email,
        password,
        role,
    } = action
    else {
        bail!("signup handler received another action");
    };

    let context = Context::new(globals)?;

    if !context.session.require_guest() {
        bail!("already signed in, run `tavola logout` first");
    }

    let mut page = Page::new().with_form(
        Form::new(SIGNUP_FORM, "Sign Up")
            .with_field("username", username)
            .with_field("email", email)
            .with_field("password", password.expose_secret())
            .with_field("role", role),
    );

    let outcome = submit_signup(&context.session, &mut page).await;

    conclude(&context, &page, SIGNUP_FORM, outcome)
}
