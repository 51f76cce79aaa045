use crate::cli::{
    actions::{login, session, signup, validate, Action},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Signup { .. } => signup::handle(action, globals).await,
        Action::Login { .. } => login::handle(action, globals).await,
        Action::Logout => session::logout(globals).await,
        Action::Whoami => session::whoami(globals).await,
        Action::Validate { .. } => validate::handle(action, globals),
    }
}
