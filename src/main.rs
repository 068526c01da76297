//! Payroll audit server: loads the configuration and serves the audit API.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payroll_audit::api::{AppState, create_router};
use payroll_audit::config::ConfigLoader;
use payroll_audit::error::{EngineError, EngineResult};

const DEFAULT_CONFIG_PATH: &str = "./config/audit.yaml";

#[derive(Parser, Debug)]
#[command(name = "payroll-audit")]
#[command(version, about = "Audit rule engine and analytics API for municipal payrolls")]
struct Cli {
    /// Configuration file path (defaults to ./config/audit.yaml)
    #[arg(env = "PAYROLL_AUDIT_CONFIG")]
    config: Option<PathBuf>,
}

/// Loads the configuration named on the command line.
///
/// An explicit path must load. Without one, a missing default file falls
/// back to built-in defaults.
fn load_config(explicit: Option<&Path>) -> EngineResult<ConfigLoader> {
    match explicit {
        Some(path) => ConfigLoader::load(path),
        None => match ConfigLoader::load(DEFAULT_CONFIG_PATH) {
            Err(EngineError::ConfigNotFound { .. }) => {
                warn!(path = DEFAULT_CONFIG_PATH, "No configuration file, using defaults");
                Ok(ConfigLoader::default())
            }
            other => other,
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payroll_audit=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let bind_address = config.server().bind_address.clone();
    let app = create_router(AppState::new(config));

    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(address = %bind_address, error = %err, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(
        address = %bind_address,
        version = env!("CARGO_PKG_VERSION"),
        "Payroll audit server listening"
    );

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "Server stopped with an error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_takes_config_path_argument() {
        let cli = Cli::try_parse_from(["payroll-audit", "/etc/payroll/audit.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/payroll/audit.yaml")));
    }

    #[test]
    fn test_cli_help_and_version_are_not_config_paths() {
        let help = Cli::try_parse_from(["payroll-audit", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let version = Cli::try_parse_from(["payroll-audit", "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        let err = Cli::try_parse_from(["payroll-audit", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let result = load_config(Some(Path::new("./config/does-not-exist.yaml")));
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_explicit_config_path_loads() {
        let config = load_config(Some(Path::new("./config/audit.yaml"))).unwrap();
        assert_eq!(config.reports().salary_bands.len(), 5);
    }

    #[test]
    fn test_default_config_path_loads_when_present() {
        // Tests run from the crate root, where the default file exists.
        let config = load_config(None).unwrap();
        assert_eq!(config.reports().top_roles, 10);
    }
}
