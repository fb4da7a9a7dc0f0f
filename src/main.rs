use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use authflow::config::normalize_api_url;
use authflow::{AuthConfig, AuthController, FileStorage, History, HttpBackend, SessionState};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] authflow::config::ConfigError),
    #[error(transparent)]
    Backend(#[from] authflow::AuthError),
    #[error("invalid --field `{0}`; expected key=value")]
    InvalidField(String),
    #[error("registration data must be a JSON object")]
    NotAnObject,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
}

#[derive(Parser, Debug)]
#[command(name = "authflow", about = "Bearer-token session client")]
struct Cli {
    /// Backend origin. Overrides `AUTH_API_URL`.
    #[arg(long)]
    api_url: Option<String>,

    /// Directory holding the stored token. Overrides `AUTH_STORAGE_DIR`.
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Restore the stored session and print the current user.
    Whoami,
    /// Exchange credentials for a session token.
    Login {
        username: String,
        #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Create an account. Does not log in.
    Register(RegisterArgs),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    /// Full registration body as a JSON object.
    #[arg(long, conflicts_with = "field")]
    data: Option<String>,

    /// Single registration field; repeatable.
    #[arg(long = "field", value_name = "KEY=VALUE")]
    field: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env loaded");
    }

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = apply_overrides(AuthConfig::from_env()?, cli.api_url.as_deref(), cli.storage_dir);

    let backend = Arc::new(HttpBackend::from_config(&config)?);
    let storage = Arc::new(FileStorage::new(&config.storage_dir));
    let history = Arc::new(History::new());
    let controller = AuthController::new(backend, storage, history);

    match cli.command {
        Command::Whoami => {
            match controller.initialize().await {
                SessionState::LoggedIn { user, .. } => print_json(&serde_json::to_value(user)?)?,
                SessionState::LoggedOut | SessionState::Resolving => println!("logged out"),
            }
            Ok(())
        }
        Command::Login { username, password } => {
            let route = controller.login(&username, &password).await.map_err(CliError::Rejected)?;
            println!("{route}");
            Ok(())
        }
        Command::Logout => {
            println!("{}", controller.logout());
            Ok(())
        }
        Command::Register(args) => {
            let body = build_register_body(args.data.as_deref(), &args.field)?;
            let route = controller.register(&body).await.map_err(CliError::Rejected)?;
            println!("{route}");
            Ok(())
        }
    }
}

/// Command-line flags win over environment settings.
fn apply_overrides(mut config: AuthConfig, api_url: Option<&str>, storage_dir: Option<PathBuf>) -> AuthConfig {
    if let Some(api_url) = api_url {
        config.api_url = normalize_api_url(Some(api_url));
    }
    if let Some(storage_dir) = storage_dir {
        config.storage_dir = storage_dir;
    }
    config
}

fn build_register_body(data: Option<&str>, fields: &[String]) -> Result<Value, CliError> {
    if let Some(data) = data {
        let value = serde_json::from_str::<Value>(data)?;
        if !value.is_object() {
            return Err(CliError::NotAnObject);
        }
        return Ok(value);
    }

    let mut body = Map::new();
    for field in fields {
        let Some((key, value)) = field.split_once('=') else {
            return Err(CliError::InvalidField(field.clone()));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::InvalidField(field.clone()));
        }
        body.insert(key.to_owned(), Value::String(value.to_owned()));
    }
    Ok(Value::Object(body))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
