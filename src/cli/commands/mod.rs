use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn username_arg() -> Arg {
    Arg::new("username")
        .short('u')
        .long("username")
        .help("Account username")
        .env("TAVOLA_USERNAME")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new("password")
        .long("password")
        .help("Account password")
        .env("TAVOLA_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("tavola")
        .about("Restaurant booking account client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Booking API base URL")
                .default_value(crate::api::DEFAULT_API_BASE_URL)
                .env("TAVOLA_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("session-file")
                .long("session-file")
                .help("Where the session token and user are kept (default: <config dir>/tavola/session.json)")
                .env("TAVOLA_SESSION_FILE")
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Request timeout in seconds; requests wait indefinitely when unset")
                .env("TAVOLA_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("TAVOLA_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .help("Write logs to stderr as JSON lines")
                .env("TAVOLA_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("signup")
                .about("Create an account and sign in")
                .arg(username_arg())
                .arg(
                    Arg::new("email")
                        .short('e')
                        .long("email")
                        .help("Account email")
                        .env("TAVOLA_EMAIL")
                        .required(true),
                )
                .arg(password_arg())
                .arg(
                    Arg::new("role")
                        .long("role")
                        .help("Account role")
                        .value_parser(["owner", "admin"])
                        .default_value("owner"),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in with username and password")
                .arg(username_arg())
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Sign out and forget the local session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("validate")
                .about("Check input locally without contacting the API")
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Password to check against the strength rules")
                        .env("TAVOLA_PASSWORD")
                        .hide_env_values(true),
                )
                .arg(Arg::new("email").long("email").help("Email to check"))
                .arg(Arg::new("phone").long("phone").help("Phone number to check")),
        )
}
