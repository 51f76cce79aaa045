use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

pub fn handler(matches: &ArgMatches) -> Result<(Action, GlobalArgs)> {
    let api_url = matches
        .get_one::<String>("api-url")
        .cloned()
        .context("missing required argument: --api-url")?;

    let mut globals = GlobalArgs::new(api_url);

    if let Some(path) = matches.get_one::<String>("session-file") {
        globals.session_file = PathBuf::from(path);
    }

    globals.timeout = matches
        .get_one::<u64>("timeout")
        .map(|&seconds| Duration::from_secs(seconds));

    let action = match matches.subcommand() {
        Some(("signup", sub_m)) => Action::Signup {
            username: required(sub_m, "username")?,
            email: required(sub_m, "email")?,
            password: SecretString::from(required(sub_m, "password")?),
            role: sub_m
                .get_one::<String>("role")
                .cloned()
                .unwrap_or_else(|| "owner".to_string()),
        },
        Some(("login", sub_m)) => Action::Login {
            username: required(sub_m, "username")?,
            password: SecretString::from(required(sub_m, "password")?),
        },
        Some(("logout", _)) => Action::Logout,
        Some(("whoami", _)) => Action::Whoami,
        Some(("validate", sub_m)) => Action::Validate {
            password: sub_m
                .get_one::<String>("password")
                .map(|password| SecretString::from(password.as_str())),
            email: sub_m.get_one::<String>("email").cloned(),
            phone: sub_m.get_one::<String>("phone").cloned(),
        },
        _ => return Err(anyhow!("unknown subcommand")),
    };

    Ok((action, globals))
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: --{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn test_handler_login() {
        temp_env::with_vars(
            [
                ("TAVOLA_SESSION_FILE", None::<&str>),
                ("TAVOLA_TIMEOUT", None),
                ("TAVOLA_PASSWORD", None),
            ],
            || {
                let matches = commands::new().get_matches_from(vec![
                    "tavola",
                    "--timeout",
                    "7",
                    "--session-file",
                    "/tmp/session.json",
                    "login",
                    "-u",
                    "ana",
                    "--password",
                    "ValidPass1",
                ]);

                let (action, globals) = handler(&matches).unwrap();
                assert_eq!(globals.timeout, Some(Duration::from_secs(7)));
                assert_eq!(globals.session_file, PathBuf::from("/tmp/session.json"));

                let Action::Login { username, password } = action else {
                    panic!("expected login action");
                };
                assert_eq!(username, "ana");
                assert_eq!(password.expose_secret(), "ValidPass1");
            },
        );
    }

    #[test]
    fn test_handler_validate() {
        temp_env::with_vars([("TAVOLA_PASSWORD", None::<&str>)], || {
            let matches = commands::new().get_matches_from(vec![
                "tavola",
                "validate",
                "--email",
                "ana@bistro.dev",
            ]);

            let (action, globals) = handler(&matches).unwrap();
            assert!(globals.timeout.is_none());

            let Action::Validate {
                password,
                email,
                phone,
            } = action
            else {
                panic!("expected validate action");
            };
            assert!(password.is_none());
            assert_eq!(email.as_deref(), Some("ana@bistro.dev"));
            assert!(phone.is_none());
        });
    }
}
