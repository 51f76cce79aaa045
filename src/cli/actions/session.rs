use crate::cli::{actions::Context, globals::GlobalArgs};
use anyhow::{bail, Result};

/// Signs out remotely when possible and always forgets the local session.
/// # Errors
/// Returns an error if the session file could not be cleared.
pub async fn logout(globals: &GlobalArgs) -> Result<()> {
    let context = Context::new(globals)?;

    if !context.session.is_authenticated() {
        context.session.clear()?;
        println!("Not signed in.");
        return Ok(());
    }

    context.session.logout().await?;

    println!("Signed out.");

    Ok(())
}

/// Prints the signed-in user, refreshed from the API.
/// # Errors
/// Returns an error if there is no session or the API rejects it.
pub async fn whoami(globals: &GlobalArgs) -> Result<()> {
    let context = Context::new(globals)?;

    if !context.session.require_auth() {
        bail!("not signed in");
    }

    let user = match context.session.refresh_current_user().await {
        Ok(user) => user,
        Err(error) => {
            context.session.feedback().handle_api_error(&error, None);
            return Err(error.into());
        }
    };

    if let Some(username) = user.username.as_deref() {
        println!("username:  {username}");
    }
    if let Some(email) = user.email.as_deref().filter(|email| !email.is_empty()) {
        println!("email:     {email}");
    }
    if let Some(role) = user.role() {
        println!("role:      {role}");
    }
    println!("dashboard: {}", context.location(&context.session.dashboard_url()));

    Ok(())
}
