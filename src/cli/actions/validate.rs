use crate::{
    cli::{actions::Action, globals::GlobalArgs},
    ui::{is_valid_email, is_valid_phone, validate_password},
};
use anyhow::{bail, Result};
use secrecy::ExposeSecret;

/// Runs the local input checks and reports every failure.
/// # Errors
/// Returns an error if nothing was given to check or any check failed.
pub fn handle(action: Action, _globals: &GlobalArgs) -> Result<()> {
    let Action::Validate {
        password,
        email,
        phone,
    } = action
    else {
        bail!("validate handler received another action");
    };

    if password.is_none() && email.is_none() && phone.is_none() {
        bail!("nothing to validate, pass --password, --email or --phone");
    }

    let mut failures = 0;

    if let Some(password) = password {
        let check = validate_password(password.expose_secret());
        if check.is_valid {
            println!("password: ok");
        } else {
            for error in &check.errors {
                println!("password: {error}");
            }
            failures += check.errors.len();
        }
    }

    if let Some(email) = email {
        if is_valid_email(&email) {
            println!("email: ok");
        } else {
            println!("email: Please enter a valid email address");
            failures += 1;
        }
    }

    if let Some(phone) = phone {
        if is_valid_phone(&phone) {
            println!("phone: ok");
        } else {
            println!("phone: Please enter a valid phone number");
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} check(s) failed");
    }

    Ok(())
}
