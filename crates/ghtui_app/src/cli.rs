//! Command-line flags and startup errors.

use std::io;
use std::time::Duration;

use clap::Parser;
use github_api::{GithubApiError, DEFAULT_GITHUB_BASE_URL};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "ghtui")]
#[command(version)]
#[command(about = "Browse your GitHub repositories and activity from the terminal", long_about = None)]
pub struct Cli {
    /// GitHub login to browse as
    #[arg(short, long, env = "GITHUB_USERNAME")]
    pub username: Option<String>,

    /// Personal access token used for every request
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_BASE_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Validated startup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub username: String,
    pub token: String,
    pub api_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("You must pass your {name} using the --{flag} flag or set the {env} environment variable.")]
    Missing {
        name: &'static str,
        flag: &'static str,
        env: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Api(#[from] GithubApiError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings, CliError> {
        let username = required(self.username, "username", "username", "GITHUB_USERNAME")?;
        let token = required(self.token, "token", "token", "GITHUB_TOKEN")?;
        Ok(Settings {
            username,
            token,
            api_url: self.api_url,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

fn required(
    value: Option<String>,
    name: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<String, CliError> {
    match value.map(|value| value.trim().to_string()) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(CliError::Missing { name, flag, env }),
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, CliError};
    use clap::Parser;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["ghtui"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => panic!("unexpected parse failure: {err}"),
        }
    }

    #[test]
    fn flags_win_over_missing_environment() {
        let mut cli = parse(&["-u", "alice", "--token", "secret", "--timeout-secs", "5"]);
        cli.api_url = "https://ghe.example.com/api/v3".to_string();
        let settings = cli.into_settings().expect("settings");
        assert_eq!(settings.username, "alice");
        assert_eq!(settings.token, "secret");
        assert_eq!(settings.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let cli = Cli {
            username: Some("  ".to_string()),
            token: Some("secret".to_string()),
            api_url: String::new(),
            timeout_secs: 30,
        };
        let err = cli.into_settings().expect_err("missing username");
        assert_eq!(
            err.to_string(),
            "You must pass your username using the --username flag or set the GITHUB_USERNAME environment variable."
        );
    }

    #[test]
    fn missing_token_names_its_flag_and_variable() {
        let cli = Cli {
            username: Some("alice".to_string()),
            token: None,
            api_url: String::new(),
            timeout_secs: 30,
        };
        assert_eq!(
            cli.into_settings(),
            Err(CliError::Missing {
                name: "token",
                flag: "token",
                env: "GITHUB_TOKEN",
            })
        );
    }
}
